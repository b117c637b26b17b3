//! Issue, return, and waitlist commands
//!
//! The catalog's wait queue lives in memory only; it is the shell's job to
//! carry outstanding requests between invocations. These commands keep a
//! plain id-per-line file at `.shelf/waitlist.txt`, seed the catalog's queue
//! from it before a return, and write back whatever remains.

use std::fs;

use anyhow::{Context, Result};

use super::app::load_catalog;
use super::output::Output;
use crate::domain::{Catalog, CatalogError};
use crate::storage::{write_records, Library};

const WAITLIST_FILE: &str = "waitlist.txt";

pub(super) fn read_waitlist(library: &Library) -> Result<Vec<u32>> {
    let path = library.data_dir().join(WAITLIST_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read waitlist: {}", path.display()))?;

    // Unparsable lines are dropped, same policy as the record stores
    Ok(content
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .collect())
}

fn write_waitlist(library: &Library, queue: &[u32]) -> Result<()> {
    let path = library.data_dir().join(WAITLIST_FILE);
    write_records(&path, queue.iter().map(u32::to_string))
        .with_context(|| format!("Failed to write waitlist: {}", path.display()))
}

fn seed_queue(catalog: &mut Catalog, queue: &[u32]) {
    for id in queue {
        catalog.enqueue_wait(*id);
    }
}

/// Issues a book to a member
pub fn issue(output: &Output, book_id: u32, member_id: u32) -> Result<()> {
    let (library, mut catalog) = load_catalog(output)?;

    match catalog.issue_book(book_id, member_id) {
        Ok(()) => {}
        Err(err @ CatalogError::AlreadyIssued(_)) => {
            output.warn(&format!(
                "Use 'shelf waitlist {}' to queue a wait request",
                book_id
            ));
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    }

    library.save(&catalog)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "issued": true,
            "book_id": book_id,
            "member_id": member_id,
        }));
    } else {
        output.success(&format!("Issued book {} to member {}", book_id, member_id));
    }

    Ok(())
}

/// Returns a book from a member
pub fn return_book(output: &Output, book_id: u32, member_id: u32) -> Result<()> {
    let (library, mut catalog) = load_catalog(output)?;

    let pending = read_waitlist(&library)?;
    output.verbose_ctx("return", &format!("{} outstanding wait request(s)", pending.len()));
    seed_queue(&mut catalog, &pending);

    let outcome = catalog.return_book(book_id, member_id)?;

    library.save(&catalog)?;
    let remaining: Vec<u32> = catalog.wait_queue().collect();
    write_waitlist(&library, &remaining)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "returned": true,
            "book_id": book_id,
            "member_id": member_id,
            "waitlist_satisfied": outcome.waitlist_satisfied,
        }));
    } else {
        output.success(&format!(
            "Returned book {} from member {}",
            book_id, member_id
        ));
        if outcome.waitlist_satisfied {
            output.success("A waitlisted request for this book was satisfied; notify the next waiter.");
        }
    }

    Ok(())
}

/// Adds a wait request for a book (no dedup, no existence check)
pub fn waitlist(output: &Output, book_id: u32) -> Result<()> {
    let library = Library::open_current()?;

    let mut pending = read_waitlist(&library)?;
    pending.push(book_id);
    write_waitlist(&library, &pending)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "book_id": book_id,
            "waitlist_len": pending.len(),
        }));
    } else {
        output.success(&format!(
            "Added book {} to the waitlist ({} outstanding)",
            book_id,
            pending.len()
        ));
    }

    Ok(())
}
