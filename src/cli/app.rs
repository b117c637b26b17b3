//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{book_cmd, circulation, member_cmd};
use crate::domain::Catalog;
use crate::storage::{Library, LoadReport};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about = "Local-first library catalog manager")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new shelf library
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Manage books
    #[command(subcommand)]
    Book(book_cmd::BookCommands),

    /// Manage members
    #[command(subcommand)]
    Member(member_cmd::MemberCommands),

    /// Issue a book to a member
    Issue {
        /// Book ID
        book_id: u32,

        /// Member ID
        member_id: u32,
    },

    /// Return a book from a member
    Return {
        /// Book ID
        book_id: u32,

        /// Member ID
        member_id: u32,
    },

    /// Add a wait request for a book
    Waitlist {
        /// Book ID
        book_id: u32,
    },

    /// Show catalog status overview
    Status,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Shelf CLI starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing library at: {}", path));
            let library = Library::init(&path)?;
            output.success(&format!(
                "Initialized shelf library at {}",
                library.root().display()
            ));
        }

        Commands::Book(cmd) => book_cmd::run(cmd, &output)?,
        Commands::Member(cmd) => member_cmd::run(cmd, &output)?,

        Commands::Issue { book_id, member_id } => {
            circulation::issue(&output, book_id, member_id)?
        }
        Commands::Return { book_id, member_id } => {
            circulation::return_book(&output, book_id, member_id)?
        }
        Commands::Waitlist { book_id } => circulation::waitlist(&output, book_id)?,

        Commands::Status => status(&output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Opens the current library and loads the catalog, surfacing skipped lines
pub(super) fn load_catalog(output: &Output) -> Result<(Library, Catalog)> {
    let library = Library::open_current()?;
    let (catalog, report) = library.load()?;
    report_skipped(output, &report);
    Ok((library, catalog))
}

fn report_skipped(output: &Output, report: &LoadReport) {
    if report.is_clean() {
        return;
    }

    output.warn(&format!(
        "Skipped {} malformed line(s) while loading",
        report.skipped_count()
    ));
    for skipped in report.skipped_books.iter() {
        output.verbose_ctx(
            "load:books",
            &format!("line {}: {}", skipped.line_number, skipped.reason),
        );
    }
    for skipped in report.skipped_members.iter() {
        output.verbose_ctx(
            "load:members",
            &format!("line {}: {}", skipped.line_number, skipped.reason),
        );
    }
}

/// Shows counts and the category overview
fn status(output: &Output) -> Result<()> {
    let (library, catalog) = load_catalog(output)?;
    let pending = circulation::read_waitlist(&library)?;

    let categories: Vec<&str> = catalog.categories().collect();

    if output.is_json() {
        output.data(&serde_json::json!({
            "books": catalog.book_count(),
            "members": catalog.member_count(),
            "waitlist": pending.len(),
            "categories": categories,
        }));
    } else {
        println!("Books:    {}", catalog.book_count());
        println!("Members:  {}", catalog.member_count());
        println!("Waitlist: {}", pending.len());
        if !categories.is_empty() {
            println!("Categories: {}", categories.join(", "));
        }
    }

    Ok(())
}
