//! Book CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::app::load_catalog;
use super::output::Output;
use crate::domain::{Book, BookField};

#[derive(Subcommand)]
pub enum BookCommands {
    /// Add a book to the catalog
    Add {
        /// Book title
        title: String,

        /// Author name
        #[arg(long, short)]
        author: String,

        /// Category (e.g. Fiction, Sci-Fi)
        #[arg(long, short)]
        category: String,
    },

    /// List all books
    List {
        /// Sort by a field (title, author, or category) instead of id order
        #[arg(long)]
        sort: Option<String>,
    },

    /// Search books by field substring (case-insensitive)
    Search {
        /// Field to search: title, author, or category
        field: String,

        /// Text to look for
        text: String,
    },
}

pub fn run(cmd: BookCommands, output: &Output) -> Result<()> {
    match cmd {
        BookCommands::Add {
            title,
            author,
            category,
        } => add_book(output, &title, &author, &category),
        BookCommands::List { sort } => {
            let key: Option<BookField> = sort.as_deref().map(str::parse).transpose()?;
            list_books(output, key)
        }
        BookCommands::Search { field, text } => search_books(output, field.parse()?, &text),
    }
}

fn add_book(output: &Output, title: &str, author: &str, category: &str) -> Result<()> {
    let (library, mut catalog) = load_catalog(output)?;

    let id = catalog.add_book(title, author, category);
    library.save(&catalog)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "title": title,
            "author": author,
        }));
    } else {
        output.success(&format!("Added book {} - {}", id, title));
    }

    Ok(())
}

fn list_books(output: &Output, sort: Option<BookField>) -> Result<()> {
    let (_, catalog) = load_catalog(output)?;

    let books: Vec<&Book> = match sort {
        Some(key) => catalog.sorted_books(key),
        None => catalog.all_books().collect(),
    };

    render_books(output, &books, "No books in library.");
    Ok(())
}

fn search_books(output: &Output, field: BookField, text: &str) -> Result<()> {
    let (_, catalog) = load_catalog(output)?;
    output.verbose_ctx("search", &format!("field={}, text={}", field, text));

    let hits = catalog.search(field, text);
    render_books(output, &hits, "No results found.");
    Ok(())
}

fn render_books(output: &Output, books: &[&Book], empty_message: &str) {
    if output.is_json() {
        output.data(&books);
        return;
    }

    if books.is_empty() {
        println!("{}", empty_message);
        return;
    }

    println!("{:<6} {:<30} {:<20} {:<12} STATUS", "ID", "TITLE", "AUTHOR", "CATEGORY");
    println!("{}", "-".repeat(80));
    for book in books {
        println!(
            "{:<6} {:<30} {:<20} {:<12} {}",
            book.id,
            book.title,
            book.author,
            book.category,
            if book.issued { "issued" } else { "available" },
        );
    }
    output.blank();
    println!("{} book(s)", books.len());
}
