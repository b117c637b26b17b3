//! Catalog aggregate
//!
//! Owns the id-to-record maps, the category set, the allocation counters,
//! and the wait queue. All mutations go through here so the invariants hold:
//! ids are unique and never reused, a book's issued flag is true iff exactly
//! one member holds it, and a rejected operation leaves the maps untouched.
//!
//! Iteration order is id order (`BTreeMap`); since ids are allocated
//! monotonically this equals insertion order, so display and search output
//! are deterministic without an extra ordered-map dependency.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use thiserror::Error;

use super::book::Book;
use super::member::{is_valid_email, Member};
use super::query::{self, BookField};

/// First id handed out for books
const BOOK_ID_FLOOR: u32 = 100;

/// First id handed out for members
const MEMBER_ID_FLOOR: u32 = 200;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Invalid email format: '{0}'")]
    InvalidEmail(String),

    #[error("Book not found: {0}")]
    BookNotFound(u32),

    #[error("Member not found: {0}")]
    MemberNotFound(u32),

    #[error("Book {0} is already issued")]
    AlreadyIssued(u32),

    #[error("Book {0} is not currently issued")]
    NotIssued(u32),
}

/// Result of a successful return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnOutcome {
    /// True if a wait-queue entry for this book was satisfied by the return.
    /// Notifying the waiter is the caller's responsibility; the catalog never
    /// re-issues automatically.
    pub waitlist_satisfied: bool,
}

/// The in-memory catalog: books, members, categories, and the wait queue
#[derive(Debug, Default)]
pub struct Catalog {
    books: BTreeMap<u32, Book>,
    members: BTreeMap<u32, Member>,
    categories: BTreeSet<String>,
    next_book_id: u32,
    next_member_id: u32,
    wait_queue: VecDeque<u32>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self {
            books: BTreeMap::new(),
            members: BTreeMap::new(),
            categories: BTreeSet::new(),
            next_book_id: BOOK_ID_FLOOR,
            next_member_id: MEMBER_ID_FLOOR,
            wait_queue: VecDeque::new(),
        }
    }

    /// Rebuilds a catalog from loaded records
    ///
    /// Allocation counters are recomputed as `max(existing id) + 1`, clamped
    /// to the compiled-in floors so a loaded id is never reissued. Issued
    /// flags are reconciled against members' issued lists: a member claiming
    /// a book forces its flag true (files written by older versions omitted
    /// the flag entirely). The persisted flag is never cleared here.
    pub fn from_records(books: Vec<Book>, members: Vec<Member>) -> Self {
        let mut catalog = Self::new();

        for book in books {
            catalog.next_book_id = catalog.next_book_id.max(book.id.saturating_add(1));
            catalog.categories.insert(book.category.clone());
            catalog.books.insert(book.id, book);
        }

        for member in members {
            catalog.next_member_id = catalog.next_member_id.max(member.id.saturating_add(1));
            catalog.members.insert(member.id, member);
        }

        let claimed: Vec<u32> = catalog
            .members
            .values()
            .flat_map(|m| m.issued_books.iter().copied())
            .collect();
        for book_id in claimed {
            if let Some(book) = catalog.books.get_mut(&book_id) {
                book.mark_issued();
            }
        }

        catalog
    }

    /// Adds a book and returns its id. Always succeeds.
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> u32 {
        let id = self.next_book_id;
        self.next_book_id += 1;

        let book = Book::new(id, title, author, category);
        self.categories.insert(book.category.clone());
        self.books.insert(id, book);

        id
    }

    /// Adds a member after validating the email; no mutation on rejection
    pub fn add_member(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<u32, CatalogError> {
        let email = email.into();
        if !is_valid_email(email.trim()) {
            return Err(CatalogError::InvalidEmail(email));
        }

        let id = self.next_member_id;
        self.next_member_id += 1;
        self.members.insert(id, Member::new(id, name, email));

        Ok(id)
    }

    /// Issues a book to a member
    ///
    /// Both the book flag and the member's issued list are updated together;
    /// every failure is detected before either is touched.
    pub fn issue_book(&mut self, book_id: u32, member_id: u32) -> Result<(), CatalogError> {
        let book = self
            .books
            .get(&book_id)
            .ok_or(CatalogError::BookNotFound(book_id))?;
        if !self.members.contains_key(&member_id) {
            return Err(CatalogError::MemberNotFound(member_id));
        }
        if book.issued {
            return Err(CatalogError::AlreadyIssued(book_id));
        }

        // Checks passed; apply both updates as one logical unit
        self.books
            .get_mut(&book_id)
            .map(Book::mark_issued)
            .ok_or(CatalogError::BookNotFound(book_id))?;
        self.members
            .get_mut(&member_id)
            .map(|m| m.add_issued_book(book_id))
            .ok_or(CatalogError::MemberNotFound(member_id))?;

        Ok(())
    }

    /// Returns a book from a member
    ///
    /// On success, if the wait queue holds an entry for this book, the first
    /// such entry is removed and reported as satisfied (FIFO). Entries for
    /// other books are untouched.
    pub fn return_book(
        &mut self,
        book_id: u32,
        member_id: u32,
    ) -> Result<ReturnOutcome, CatalogError> {
        let book = self
            .books
            .get(&book_id)
            .ok_or(CatalogError::BookNotFound(book_id))?;
        if !self.members.contains_key(&member_id) {
            return Err(CatalogError::MemberNotFound(member_id));
        }
        if !book.issued {
            return Err(CatalogError::NotIssued(book_id));
        }

        self.books
            .get_mut(&book_id)
            .map(Book::mark_returned)
            .ok_or(CatalogError::BookNotFound(book_id))?;
        self.members
            .get_mut(&member_id)
            .map(|m| m.remove_issued_book(book_id))
            .ok_or(CatalogError::MemberNotFound(member_id))?;

        let waitlist_satisfied = match self.wait_queue.iter().position(|id| *id == book_id) {
            Some(pos) => {
                self.wait_queue.remove(pos);
                true
            }
            None => false,
        };

        Ok(ReturnOutcome { waitlist_satisfied })
    }

    /// Appends a wait request for a book (no dedup, no existence check)
    pub fn enqueue_wait(&mut self, book_id: u32) {
        self.wait_queue.push_back(book_id);
    }

    /// Case-insensitive substring search over one book field
    pub fn search(&self, field: BookField, needle: &str) -> Vec<&Book> {
        query::search(&self.books, field, needle)
    }

    /// All books sorted by one field, case-insensitive ascending
    pub fn sorted_books(&self, key: BookField) -> Vec<&Book> {
        query::sorted_books(&self.books, key)
    }

    /// All books in id order
    pub fn all_books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// All members in id order
    pub fn all_members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Looks up a book by id
    pub fn book(&self, id: u32) -> Option<&Book> {
        self.books.get(&id)
    }

    /// Looks up a member by id
    pub fn member(&self, id: u32) -> Option<&Member> {
        self.members.get(&id)
    }

    /// Distinct categories seen across all books (never pruned)
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    /// Number of books
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Number of members
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Number of outstanding wait requests
    pub fn wait_count(&self) -> usize {
        self.wait_queue.len()
    }

    /// Outstanding wait requests in FIFO order
    pub fn wait_queue(&self) -> impl Iterator<Item = u32> + '_ {
        self.wait_queue.iter().copied()
    }
}
