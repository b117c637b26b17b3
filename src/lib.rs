//! Shelf - A local-first library catalog manager
//!
//! Shelf tracks books and members, supports issuing and returning books
//! with a simple waitlist, and persists the catalog to flat text files
//! between runs.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{Book, BookField, Catalog, CatalogError, Member};
