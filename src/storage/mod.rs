//! # Storage Layer
//!
//! Flat-file persistence for the catalog.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Books | pipe-delimited lines | `.shelf/books.txt` |
//! | Members | pipe-delimited lines | `.shelf/members.txt` |
//!
//! `|`, `\`, and line breaks inside text fields are escaped (`\|`, `\\`,
//! `\n`, `\r`) so free text round-trips exactly, one record per physical
//! line. Saves fully overwrite each file (temp file + atomic
//! rename); loads skip malformed lines and report them in a [`LoadReport`]
//! instead of failing.
//!
//! ## Key Types
//!
//! - [`Library`] - Entry point: data dir discovery, load/save round-trip
//! - [`BookStore`] / [`MemberStore`] - One file each, full read/rewrite
//! - [`LoadReport`] - Per-load diagnostics (counts, skipped lines)

pub mod codec;
mod flatfile;
mod library;

pub use codec::LineError;
pub(crate) use flatfile::write_records;
pub use flatfile::{BookStore, MemberStore, SkippedLine};
pub use library::{Library, LibraryError, LoadReport};
