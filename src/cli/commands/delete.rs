//! contacts delete - Remove a contact by list number

use clap::Args;
use console::style;

use crate::app::AppContext;
use crate::cli::commands::load_store;
use crate::cli::output::{ContactEntry, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// List number of the contact (1-based)
    pub index: usize,
}

pub fn run(ctx: &AppContext, args: &DeleteArgs) -> Result<()> {
    let (mut store, warnings) = load_store(ctx)?;
    let removed = store.remove_at(args.index)?;
    ctx.save(&store)?;
    ctx.log.contact_action("deleted", &removed);

    if ctx.robot_mode {
        return emit_robot(
            &robot_ok(ContactEntry::new(args.index, &removed)).with_warnings(warnings),
        );
    }
    println!("{} Deleted {removed}", style("✓").green());
    Ok(())
}
