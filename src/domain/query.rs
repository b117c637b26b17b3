//! Read-only search and sort over the catalog's books
//!
//! Pure functions: deterministic given the same snapshot and parameters,
//! no mutation. Matching and ordering are both case-insensitive.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::book::Book;

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("Unknown field '{0}': expected title, author, or category")]
    UnknownField(String),
}

/// Book field a search or sort can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Category,
}

impl BookField {
    /// Extracts this field's value from a book
    pub fn of<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            BookField::Title => &book.title,
            BookField::Author => &book.author,
            BookField::Category => &book.category,
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Category => "category",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BookField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(BookField::Title),
            "author" => Ok(BookField::Author),
            "category" => Ok(BookField::Category),
            other => Err(QueryError::UnknownField(other.to_string())),
        }
    }
}

/// Case-insensitive substring search over one field, in id order
pub fn search<'a>(books: &'a BTreeMap<u32, Book>, field: BookField, needle: &str) -> Vec<&'a Book> {
    let needle = needle.trim().to_lowercase();
    books
        .values()
        .filter(|b| field.of(b).to_lowercase().contains(&needle))
        .collect()
}

/// All books sorted ascending by one field, case-insensitive
///
/// `sort_by_key` is stable, so books with equal keys stay in id order.
pub fn sorted_books<'a>(books: &'a BTreeMap<u32, Book>, key: BookField) -> Vec<&'a Book> {
    let mut list: Vec<&Book> = books.values().collect();
    list.sort_by_key(|b| key.of(b).to_lowercase());
    list
}
