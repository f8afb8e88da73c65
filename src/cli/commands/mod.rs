//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;
use console::style;

pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod find;
pub mod import;
pub mod info;
pub mod list;
pub mod logs;
pub mod search;
pub mod sort;

use crate::app::AppContext;
use crate::core::{Contact, ContactStore};
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a contact
    Add(add::AddArgs),

    /// List all contacts
    List(list::ListArgs),

    /// Find a contact by last name
    Search(search::SearchArgs),

    /// Find a contact by id or id prefix (8+ characters)
    Find(find::FindArgs),

    /// Edit a contact by its list number
    Edit(edit::EditArgs),

    /// Delete a contact by its list number
    Delete(delete::DeleteArgs),

    /// Sort contacts and save the new order
    Sort(sort::SortArgs),

    /// Export contacts to a JSON file
    Export(export::ExportArgs),

    /// Import contacts from a JSON file
    Import(import::ImportArgs),

    /// Show storage file details
    Info(info::InfoArgs),

    /// Inspect or prune the activity log
    Logs(logs::LogsArgs),

    /// Interactive numbered menu (default)
    Menu,
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Add(args) => add::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Search(args) => search::run(ctx, args),
        Commands::Find(args) => find::run(ctx, args),
        Commands::Edit(args) => edit::run(ctx, args),
        Commands::Delete(args) => delete::run(ctx, args),
        Commands::Sort(args) => sort::run(ctx, args),
        Commands::Export(args) => export::run(ctx, args),
        Commands::Import(args) => import::run(ctx, args),
        Commands::Info(args) => info::run(ctx, args),
        Commands::Logs(args) => logs::run(ctx, args),
        Commands::Menu => crate::cli::menu::run_interactive(ctx),
    }
}

/// Load the store and surface load warnings on stderr (human mode) or return
/// them for the robot envelope.
pub(crate) fn load_store(ctx: &AppContext) -> Result<(ContactStore, Vec<String>)> {
    let report = ctx.load()?;
    for warning in &report.warnings {
        if !ctx.robot_mode {
            eprintln!("{} {warning}", style("warning:").yellow());
        }
    }
    Ok((report.store, report.warnings))
}

/// 1-based position of `contact` in `store`, matched by id.
pub(crate) fn position_of(store: &ContactStore, contact: &Contact) -> usize {
    store
        .iter()
        .position(|c| c.same_identity(contact))
        .map_or(0, |i| i + 1)
}
