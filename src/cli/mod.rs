//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

use crate::storage::StorageFormat;

pub mod commands;
pub mod menu;
pub mod output;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "contacts", version, about = "Manage a small contact list from the console")]
pub struct Cli {
    /// Directory holding the contact, backup, log, and config files
    #[arg(long, global = true, env = "CONTACTS_ROOT")]
    pub root: Option<PathBuf>,

    /// Config file to use instead of the global and data-root files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage format, overriding the configured one
    #[arg(long, global = true, value_enum)]
    pub format: Option<StorageFormat>,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase diagnostic verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress diagnostics
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}
