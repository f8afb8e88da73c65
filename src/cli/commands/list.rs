//! contacts list - List all contacts

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::commands::load_store;
use crate::cli::output::{
    ContactEntry, HumanLayout, contact_row, emit_human, emit_robot, robot_ok,
};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show full ids instead of the 8-character prefix (implied by -v)
    #[arg(long)]
    pub full_ids: bool,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let (store, warnings) = load_store(ctx)?;
    debug!(target: "list", count = store.len(), "listing contacts");

    if ctx.robot_mode {
        let entries: Vec<ContactEntry> = store
            .iter()
            .enumerate()
            .map(|(i, c)| ContactEntry::new(i + 1, c))
            .collect();
        return emit_robot(&robot_ok(entries).with_warnings(warnings));
    }

    let mut layout = HumanLayout::new();
    layout.section("Contacts");
    for (i, contact) in store.iter().enumerate() {
        if args.full_ids || ctx.verbosity > 0 {
            layout.push_line(format!("[{}] {}  {contact}", i + 1, contact.id));
        } else {
            layout.push_line(contact_row(i + 1, contact));
        }
    }
    layout
        .blank()
        .kv("Total", &store.len().to_string());
    emit_human(layout);
    Ok(())
}
