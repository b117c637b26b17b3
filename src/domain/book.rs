//! Book record type
//!
//! Books are the primary catalog entries. Identity is a store-assigned
//! integer id; the issued flag tracks circulation state and must stay in
//! sync with exactly one member's issued list while true.

use serde::{Deserialize, Serialize};

/// A book in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier, assigned by the catalog (monotonic from 100)
    pub id: u32,

    /// Title, free text
    pub title: String,

    /// Author, free text
    pub author: String,

    /// Category, free text (trimmed at creation)
    pub category: String,

    /// Whether the book is currently issued to a member
    pub issued: bool,
}

impl Book {
    /// Creates a new book with the given id and fields, not issued
    pub fn new(
        id: u32,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            category: category.into().trim().to_string(),
            issued: false,
        }
    }

    /// Marks the book as issued
    pub fn mark_issued(&mut self) {
        self.issued = true;
    }

    /// Marks the book as returned
    pub fn mark_returned(&mut self) {
        self.issued = false;
    }
}
