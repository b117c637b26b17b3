//! Domain models for Shelf
//!
//! Contains the core catalog logic without any I/O concerns.

mod book;
mod catalog;
mod member;
mod query;

pub use book::Book;
pub use catalog::{Catalog, CatalogError, ReturnOutcome};
pub use member::{is_valid_email, Member};
pub use query::{BookField, QueryError};
