//! contacts sort - Reorder contacts and save

use clap::{Args, ValueEnum};
use console::style;

use crate::app::AppContext;
use crate::cli::commands::load_store;
use crate::cli::output::{ContactEntry, emit_robot, robot_ok};
use crate::core::{SortDirection, SortKey};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortField {
    #[default]
    LastName,
    FirstName,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::LastName => Self::LastName,
            SortField::FirstName => Self::FirstName,
        }
    }
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Field to sort by
    #[arg(long, value_enum, default_value_t = SortField::LastName)]
    pub by: SortField,

    /// Sort in descending order
    #[arg(long)]
    pub desc: bool,
}

pub fn run(ctx: &AppContext, args: &SortArgs) -> Result<()> {
    let (mut store, warnings) = load_store(ctx)?;
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    store.sort(args.by.into(), direction);
    ctx.save(&store)?;
    ctx.log.info(
        "contacts sorted",
        Some(&format!("{:?} {direction:?}", args.by)),
    );

    if ctx.robot_mode {
        let entries: Vec<ContactEntry> = store
            .iter()
            .enumerate()
            .map(|(i, c)| ContactEntry::new(i + 1, c))
            .collect();
        return emit_robot(&robot_ok(entries).with_warnings(warnings));
    }
    println!(
        "{} Sorted {} contacts by {}{}",
        style("✓").green(),
        store.len(),
        match args.by {
            SortField::LastName => "last name",
            SortField::FirstName => "first name",
        },
        if args.desc { " (descending)" } else { "" }
    );
    Ok(())
}
