//! Library project management
//!
//! A library lives in a directory containing a `.shelf/` data dir with the
//! two persisted resources, `books.txt` and `members.txt`. The `Library`
//! type handles discovery and initialization and owns the load/save
//! round-trip between the files and an in-memory [`Catalog`].

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::flatfile::{BookStore, MemberStore, SkippedLine};
use crate::domain::Catalog;

const DATA_DIR: &str = ".shelf";
const BOOKS_FILE: &str = "books.txt";
const MEMBERS_FILE: &str = "members.txt";

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Not in a shelf library. Run 'shelf init' first.")]
    NotInLibrary,
}

/// Diagnostics from a load: how many records came in, what was skipped
#[derive(Debug, Default)]
pub struct LoadReport {
    pub books_loaded: usize,
    pub members_loaded: usize,
    pub skipped_books: Vec<SkippedLine>,
    pub skipped_members: Vec<SkippedLine>,
}

impl LoadReport {
    /// Total number of lines skipped across both files
    pub fn skipped_count(&self) -> usize {
        self.skipped_books.len() + self.skipped_members.len()
    }

    /// True if nothing was skipped
    pub fn is_clean(&self) -> bool {
        self.skipped_count() == 0
    }
}

/// A shelf library rooted at a directory
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Opens an existing library at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.join(DATA_DIR).is_dir() {
            return Err(LibraryError::NotInLibrary.into());
        }
        Ok(Self { root })
    }

    /// Opens the library at the current directory or the nearest parent
    pub fn open_current() -> Result<Self> {
        let root = Self::find_root().ok_or(LibraryError::NotInLibrary)?;
        Self::open(root)
    }

    /// Initializes a new library at the given path (idempotent)
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let data_dir = root.join(DATA_DIR);

        fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create {} directory: {}", DATA_DIR, data_dir.display())
        })?;

        Self::open(root)
    }

    /// Walks up from the current directory looking for a `.shelf` dir
    pub fn find_root() -> Option<PathBuf> {
        let mut dir = env::current_dir().ok()?;
        loop {
            if dir.join(DATA_DIR).is_dir() {
                return Some(dir);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Returns the library root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.shelf` data directory path
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    /// Returns the book store
    pub fn book_store(&self) -> BookStore {
        BookStore::new(self.data_dir().join(BOOKS_FILE))
    }

    /// Returns the member store
    pub fn member_store(&self) -> MemberStore {
        MemberStore::new(self.data_dir().join(MEMBERS_FILE))
    }

    /// Loads the catalog from the persisted files
    ///
    /// Missing files yield an empty catalog. Malformed lines are skipped and
    /// reported in the [`LoadReport`], never propagated as errors.
    pub fn load(&self) -> Result<(Catalog, LoadReport)> {
        let (books, skipped_books) = self.book_store().read_all()?;
        let (members, skipped_members) = self.member_store().read_all()?;

        let report = LoadReport {
            books_loaded: books.len(),
            members_loaded: members.len(),
            skipped_books,
            skipped_members,
        };

        Ok((Catalog::from_records(books, members), report))
    }

    /// Writes the full catalog snapshot to both files
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        self.book_store()
            .write_all(catalog.all_books())
            .context("Failed to save books")?;
        self.member_store()
            .write_all(catalog.all_members())
            .context("Failed to save members")?;
        Ok(())
    }
}
