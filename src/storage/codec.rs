//! Line codec for the flat-file catalog format
//!
//! One record per line, fields pipe-delimited. Inside text fields the
//! delimiters are escaped — `\` as `\\`, `|` as `\|`, and line breaks as
//! `\n` / `\r` — so any title, author, category, name, or email
//! round-trips exactly.
//!
//! Book line:   `id|title|author|category|issued`  (issued is `0` or `1`)
//! Member line: `id|name|email|csv-of-issued-book-ids`
//!
//! Book lines with only four fields (written before the issued flag was
//! persisted) decode with `issued = false`; the catalog reconciles the flag
//! from member records on load.

use thiserror::Error;

use crate::domain::{Book, Member};

#[derive(Debug, Error, PartialEq)]
pub enum LineError {
    #[error("Expected {expected} fields, got {got}")]
    FieldCount { expected: usize, got: usize },

    #[error("Invalid id: '{0}'")]
    InvalidId(String),

    #[error("Invalid issued flag: '{0}' (expected 0 or 1)")]
    InvalidFlag(String),

    #[error("Invalid book id in issued list: '{0}'")]
    InvalidIssuedId(String),
}

/// Escapes the field and record delimiters in a text field
///
/// `\r` is escaped as well as `\n`: a field ending in `\r` would otherwise
/// lose it to the reader's CRLF handling.
fn escape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '|' => out.push_str(r"\|"),
            '\n' => out.push_str(r"\n"),
            '\r' => out.push_str(r"\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Splits a line on unescaped `|`, unescaping each field
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                // Escaped character; a trailing lone backslash is kept as-is
                match chars.next() {
                    Some('n') => current.push('\n'),
                    Some('r') => current.push('\r'),
                    Some(next) => current.push(next),
                    None => current.push('\\'),
                }
            }
            '|' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

fn parse_id(field: &str) -> Result<u32, LineError> {
    field
        .trim()
        .parse()
        .map_err(|_| LineError::InvalidId(field.to_string()))
}

/// Encodes a book as one line
pub fn encode_book(book: &Book) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        book.id,
        escape(&book.title),
        escape(&book.author),
        escape(&book.category),
        if book.issued { 1 } else { 0 },
    )
}

/// Decodes one book line
pub fn decode_book(line: &str) -> Result<Book, LineError> {
    let fields = split_fields(line);
    if fields.len() != 4 && fields.len() != 5 {
        return Err(LineError::FieldCount {
            expected: 5,
            got: fields.len(),
        });
    }

    let id = parse_id(&fields[0])?;
    let issued = match fields.get(4).map(|f| f.trim()) {
        None => false,
        Some("0") => false,
        Some("1") => true,
        Some(other) => return Err(LineError::InvalidFlag(other.to_string())),
    };

    let mut book = Book::new(id, &fields[1], &fields[2], &fields[3]);
    book.issued = issued;
    Ok(book)
}

/// Encodes a member as one line
pub fn encode_member(member: &Member) -> String {
    let ids: Vec<String> = member.issued_books.iter().map(u32::to_string).collect();
    format!(
        "{}|{}|{}|{}",
        member.id,
        escape(&member.name),
        escape(&member.email),
        ids.join(","),
    )
}

/// Decodes one member line
pub fn decode_member(line: &str) -> Result<Member, LineError> {
    let fields = split_fields(line);
    if fields.len() != 4 {
        return Err(LineError::FieldCount {
            expected: 4,
            got: fields.len(),
        });
    }

    let id = parse_id(&fields[0])?;
    let mut member = Member::new(id, &fields[1], &fields[2]);

    if !fields[3].is_empty() {
        for entry in fields[3].split(',') {
            let book_id: u32 = entry
                .trim()
                .parse()
                .map_err(|_| LineError::InvalidIssuedId(entry.to_string()))?;
            member.add_issued_book(book_id);
        }
    }

    Ok(member)
}
