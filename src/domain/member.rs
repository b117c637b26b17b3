//! Member record type
//!
//! Members hold books: `issued_books` lists the ids of books currently out
//! to this member, in the order they were issued, with no duplicates.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Returns true if the email matches the basic `local@domain.tld` pattern
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// A library member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier, assigned by the catalog (monotonic from 200)
    pub id: u32,

    /// Name, free text (trimmed at creation)
    pub name: String,

    /// Email, validated at creation time
    pub email: String,

    /// Ids of books currently issued to this member, in issue order
    pub issued_books: Vec<u32>,
}

impl Member {
    /// Creates a new member with no issued books
    pub fn new(id: u32, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            issued_books: Vec::new(),
        }
    }

    /// Records a book as issued to this member (no duplicate entries)
    pub fn add_issued_book(&mut self, book_id: u32) {
        if !self.issued_books.contains(&book_id) {
            self.issued_books.push(book_id);
        }
    }

    /// Removes a book from this member's issued list
    pub fn remove_issued_book(&mut self, book_id: u32) {
        self.issued_books.retain(|id| *id != book_id);
    }

    /// Returns true if this member currently holds the book
    pub fn holds(&self, book_id: u32) -> bool {
        self.issued_books.contains(&book_id)
    }
}
