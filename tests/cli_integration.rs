//! CLI integration tests for Shelf
//!
//! These tests verify the complete workflow from initialization through
//! circulation, ensuring commands work together correctly and state
//! persists between invocations.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the shelf binary
fn shelf_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("shelf"))
}

/// Create a temporary directory and initialize a shelf library
fn setup_library() -> TempDir {
    let dir = TempDir::new().unwrap();
    shelf_cmd().arg("init").arg(dir.path()).assert().success();
    dir
}

/// Add a book and return its id
fn add_book(dir: &TempDir, title: &str, author: &str, category: &str) -> u32 {
    let output = shelf_cmd()
        .current_dir(dir.path())
        .args([
            "book", "add", title, "--author", author, "--category", category, "--format", "json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    json["id"].as_u64().unwrap() as u32
}

/// Add a member and return their id
fn add_member(dir: &TempDir, name: &str, email: &str) -> u32 {
    let output = shelf_cmd()
        .current_dir(dir.path())
        .args(["member", "add", name, email, "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    json["id"].as_u64().unwrap() as u32
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    shelf_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized shelf library"));

    assert!(dir.path().join(".shelf").is_dir());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    shelf_cmd().arg("init").arg(dir.path()).assert().success();
    shelf_cmd().arg("init").arg(dir.path()).assert().success();
}

#[test]
fn test_commands_outside_library_fail() {
    let dir = TempDir::new().unwrap();

    shelf_cmd()
        .current_dir(dir.path())
        .args(["book", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a shelf library"));
}

// =============================================================================
// Book Tests
// =============================================================================

#[test]
fn test_book_add_assigns_ids_from_100() {
    let dir = setup_library();

    let first = add_book(&dir, "Dune", "Frank Herbert", "Sci-Fi");
    let second = add_book(&dir, "Emma", "Jane Austen", "Classic");

    assert_eq!(first, 100);
    assert_eq!(second, 101);
}

#[test]
fn test_book_list_shows_books() {
    let dir = setup_library();
    add_book(&dir, "Dune", "Frank Herbert", "Sci-Fi");

    shelf_cmd()
        .current_dir(dir.path())
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"))
        .stdout(predicate::str::contains("available"));
}

#[test]
fn test_book_list_empty() {
    let dir = setup_library();

    shelf_cmd()
        .current_dir(dir.path())
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books in library."));
}

#[test]
fn test_book_search_is_case_insensitive() {
    let dir = setup_library();
    add_book(&dir, "Dune", "Frank Herbert", "Fiction");
    add_book(&dir, "Emma", "Jane Austen", "Drama");

    shelf_cmd()
        .current_dir(dir.path())
        .args(["book", "search", "category", "fic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"))
        .stdout(predicate::str::contains("Emma").not());
}

#[test]
fn test_book_search_no_results() {
    let dir = setup_library();
    add_book(&dir, "Dune", "Frank Herbert", "Fiction");

    shelf_cmd()
        .current_dir(dir.path())
        .args(["book", "search", "title", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found."));
}

#[test]
fn test_book_list_sorted_by_author() {
    let dir = setup_library();
    add_book(&dir, "Z Book", "Zed", "c");
    add_book(&dir, "A Book", "ann", "c");
    add_book(&dir, "M Book", "Mary", "c");

    let output = shelf_cmd()
        .current_dir(dir.path())
        .args(["book", "list", "--sort", "author", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let authors: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["author"].as_str().unwrap())
        .collect();

    assert_eq!(authors, vec!["ann", "Mary", "Zed"]);
}

// =============================================================================
// Member Tests
// =============================================================================

#[test]
fn test_member_add_assigns_ids_from_200() {
    let dir = setup_library();

    let id = add_member(&dir, "Alice", "alice@example.com");
    assert_eq!(id, 200);
}

#[test]
fn test_member_add_rejects_invalid_email() {
    let dir = setup_library();

    shelf_cmd()
        .current_dir(dir.path())
        .args(["member", "add", "Bob", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email"));

    // Member count unchanged
    shelf_cmd()
        .current_dir(dir.path())
        .args(["member", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No members."));
}

// =============================================================================
// Circulation Tests
// =============================================================================

#[test]
fn test_issue_and_return_flow() {
    let dir = setup_library();
    let book_id = add_book(&dir, "Dune", "Frank Herbert", "Sci-Fi");
    let member_id = add_member(&dir, "Alice", "alice@example.com");

    shelf_cmd()
        .current_dir(dir.path())
        .args(["issue", &book_id.to_string(), &member_id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Issued book"));

    shelf_cmd()
        .current_dir(dir.path())
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("issued"));

    shelf_cmd()
        .current_dir(dir.path())
        .args(["return", &book_id.to_string(), &member_id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Returned book"));

    shelf_cmd()
        .current_dir(dir.path())
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("available"));
}

#[test]
fn test_issue_already_issued_fails() {
    let dir = setup_library();
    let book_id = add_book(&dir, "Dune", "Frank Herbert", "Sci-Fi");
    let alice = add_member(&dir, "Alice", "alice@example.com");
    let bob = add_member(&dir, "Bob", "bob@example.com");

    shelf_cmd()
        .current_dir(dir.path())
        .args(["issue", &book_id.to_string(), &alice.to_string()])
        .assert()
        .success();

    shelf_cmd()
        .current_dir(dir.path())
        .args(["issue", &book_id.to_string(), &bob.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already issued"));
}

#[test]
fn test_return_not_issued_fails() {
    let dir = setup_library();
    let book_id = add_book(&dir, "Dune", "Frank Herbert", "Sci-Fi");
    let member_id = add_member(&dir, "Alice", "alice@example.com");

    shelf_cmd()
        .current_dir(dir.path())
        .args(["return", &book_id.to_string(), &member_id.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not currently issued"));
}

#[test]
fn test_issue_missing_book_fails() {
    let dir = setup_library();
    let member_id = add_member(&dir, "Alice", "alice@example.com");

    shelf_cmd()
        .current_dir(dir.path())
        .args(["issue", "999", &member_id.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Book not found"));
}

#[test]
fn test_invalid_number_input_is_usage_error() {
    let dir = setup_library();

    shelf_cmd()
        .current_dir(dir.path())
        .args(["issue", "abc", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_waitlist_satisfied_on_return() {
    let dir = setup_library();
    let book_id = add_book(&dir, "Dune", "Frank Herbert", "Sci-Fi");
    let member_id = add_member(&dir, "Alice", "alice@example.com");

    shelf_cmd()
        .current_dir(dir.path())
        .args(["issue", &book_id.to_string(), &member_id.to_string()])
        .assert()
        .success();

    shelf_cmd()
        .current_dir(dir.path())
        .args(["waitlist", &book_id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("waitlist"));

    shelf_cmd()
        .current_dir(dir.path())
        .args(["return", &book_id.to_string(), &member_id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("notify the next waiter"));
}

#[test]
fn test_waitlist_write_is_atomic() {
    let dir = setup_library();

    shelf_cmd()
        .current_dir(dir.path())
        .args(["waitlist", "100"])
        .assert()
        .success();

    let path = dir.path().join(".shelf/waitlist.txt");
    assert_eq!(fs::read_to_string(&path).unwrap(), "100\n");
    assert!(!path.with_extension("txt.tmp").exists());
}

#[test]
fn test_waitlist_for_other_book_survives_return() {
    let dir = setup_library();
    let issued = add_book(&dir, "Dune", "Frank Herbert", "Sci-Fi");
    let other = add_book(&dir, "Emma", "Jane Austen", "Classic");
    let member_id = add_member(&dir, "Alice", "alice@example.com");

    shelf_cmd()
        .current_dir(dir.path())
        .args(["issue", &issued.to_string(), &member_id.to_string()])
        .assert()
        .success();

    shelf_cmd()
        .current_dir(dir.path())
        .args(["waitlist", &other.to_string()])
        .assert()
        .success();

    shelf_cmd()
        .current_dir(dir.path())
        .args(["return", &issued.to_string(), &member_id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("notify the next waiter").not());

    let output = shelf_cmd()
        .current_dir(dir.path())
        .args(["status", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["waitlist"], 1); // the unrelated request is still pending
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_state_persists_between_invocations() {
    let dir = setup_library();
    let book_id = add_book(&dir, "Dungeons | Dragons", "Gary G.", "Games");
    let member_id = add_member(&dir, "Alice", "alice@example.com");

    shelf_cmd()
        .current_dir(dir.path())
        .args(["issue", &book_id.to_string(), &member_id.to_string()])
        .assert()
        .success();

    // A fresh invocation loads everything back, pipes intact
    shelf_cmd()
        .current_dir(dir.path())
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dungeons | Dragons"))
        .stdout(predicate::str::contains("issued"));

    let output = shelf_cmd()
        .current_dir(dir.path())
        .args(["member", "list", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json[0]["issued_books"][0], book_id);
}

#[test]
fn test_malformed_line_skipped_with_warning() {
    let dir = setup_library();
    add_book(&dir, "Dune", "Frank Herbert", "Sci-Fi");

    // Corrupt the books file with one bad line
    let books_path = dir.path().join(".shelf/books.txt");
    let mut content = fs::read_to_string(&books_path).unwrap();
    content.push_str("garbage line\n");
    fs::write(&books_path, content).unwrap();

    shelf_cmd()
        .current_dir(dir.path())
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"))
        .stderr(predicate::str::contains("Skipped 1 malformed line"));
}

#[test]
fn test_ids_not_reused_after_reload() {
    let dir = setup_library();

    // Hand-written file with a high id
    fs::write(dir.path().join(".shelf/books.txt"), "500|Old|x|c|0\n").unwrap();

    let next = add_book(&dir, "New", "y", "c");
    assert_eq!(next, 501);
}

#[test]
fn test_status_overview() {
    let dir = setup_library();
    add_book(&dir, "Dune", "Frank Herbert", "Sci-Fi");
    add_book(&dir, "Emma", "Jane Austen", "Classic");
    add_member(&dir, "Alice", "alice@example.com");

    shelf_cmd()
        .current_dir(dir.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Books:    2"))
        .stdout(predicate::str::contains("Members:  1"))
        .stdout(predicate::str::contains("Classic, Sci-Fi"));
}
