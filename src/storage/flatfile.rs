//! Flat-file stores for books and members
//!
//! Each store owns one text file, one record per line. Reads skip malformed
//! lines and collect a diagnostic per skipped line instead of failing the
//! whole load. Writes fully overwrite the file via a temp file and an atomic
//! rename.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::codec;
use crate::domain::{Book, Member};

/// Diagnostic for a line that failed to decode and was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number in the file
    pub line_number: usize,
    /// Why the line was rejected
    pub reason: String,
}

/// Reads all lines from `path`, decoding each with `decode`
///
/// A missing file yields an empty collection. Malformed lines are skipped
/// and reported; blank lines are ignored without a diagnostic.
fn read_records<T>(
    path: &Path,
    decode: impl Fn(&str) -> Result<T, codec::LineError>,
) -> Result<(Vec<T>, Vec<SkippedLine>)> {
    if !path.exists() {
        return Ok((Vec::new(), Vec::new()));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open store: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", idx + 1))?;

        if line.trim().is_empty() {
            continue;
        }

        match decode(&line) {
            Ok(record) => records.push(record),
            Err(err) => skipped.push(SkippedLine {
                line_number: idx + 1,
                reason: err.to_string(),
            }),
        }
    }

    Ok((records, skipped))
}

/// Overwrites `path` with the given lines, atomically
pub(crate) fn write_records(path: &Path, lines: impl Iterator<Item = String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("txt.tmp");

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        let mut writer = BufWriter::new(file);
        for line in lines {
            writeln!(writer, "{}", line).context("Failed to write record")?;
        }
        writer.flush().context("Failed to flush store")?;
    }

    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

/// Store for book records
pub struct BookStore {
    path: PathBuf,
}

impl BookStore {
    /// Creates a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all books, returning the records and any skipped-line diagnostics
    pub fn read_all(&self) -> Result<(Vec<Book>, Vec<SkippedLine>)> {
        read_records(&self.path, codec::decode_book)
    }

    /// Writes the full book snapshot, replacing the file
    pub fn write_all<'a>(&self, books: impl Iterator<Item = &'a Book>) -> Result<()> {
        write_records(&self.path, books.map(codec::encode_book))
    }
}

/// Store for member records
pub struct MemberStore {
    path: PathBuf,
}

impl MemberStore {
    /// Creates a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all members, returning the records and any skipped-line diagnostics
    pub fn read_all(&self) -> Result<(Vec<Member>, Vec<SkippedLine>)> {
        read_records(&self.path, codec::decode_member)
    }

    /// Writes the full member snapshot, replacing the file
    pub fn write_all<'a>(&self, members: impl Iterator<Item = &'a Member>) -> Result<()> {
        write_records(&self.path, members.map(codec::encode_member))
    }
}
