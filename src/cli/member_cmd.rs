//! Member CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::app::load_catalog;
use super::output::Output;

#[derive(Subcommand)]
pub enum MemberCommands {
    /// Register a member
    Add {
        /// Member name
        name: String,

        /// Email address (validated)
        email: String,
    },

    /// List all members and their issued books
    List,
}

pub fn run(cmd: MemberCommands, output: &Output) -> Result<()> {
    match cmd {
        MemberCommands::Add { name, email } => add_member(output, &name, &email),
        MemberCommands::List => list_members(output),
    }
}

fn add_member(output: &Output, name: &str, email: &str) -> Result<()> {
    let (library, mut catalog) = load_catalog(output)?;

    let id = catalog.add_member(name, email)?;
    library.save(&catalog)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "name": name,
            "email": email,
        }));
    } else {
        output.success(&format!("Added member {} - {}", id, name));
    }

    Ok(())
}

fn list_members(output: &Output) -> Result<()> {
    let (_, catalog) = load_catalog(output)?;

    let members: Vec<_> = catalog.all_members().collect();

    if output.is_json() {
        output.data(&members);
        return Ok(());
    }

    if members.is_empty() {
        println!("No members.");
        return Ok(());
    }

    println!("{:<6} {:<24} {:<30} ISSUED", "ID", "NAME", "EMAIL");
    println!("{}", "-".repeat(80));
    for member in &members {
        let issued: Vec<String> = member.issued_books.iter().map(u32::to_string).collect();
        println!(
            "{:<6} {:<24} {:<30} {}",
            member.id,
            member.name,
            member.email,
            if issued.is_empty() {
                "-".to_string()
            } else {
                issued.join(", ")
            },
        );
    }
    output.blank();
    println!("{} member(s)", members.len());

    Ok(())
}
