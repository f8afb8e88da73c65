//! contacts search - Find a contact by last name

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::{load_store, position_of};
use crate::cli::output::{
    ContactEntry, HumanLayout, contact_detail, emit_human, emit_robot, robot_ok,
};
use crate::error::{ContactsError, Result};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Last name to match (case-insensitive, exact)
    pub name: String,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let (store, warnings) = load_store(ctx)?;

    let Some(contact) = store.find_by_name(&args.name) else {
        ctx.log.info("search without result", Some(&args.name));
        return Err(ContactsError::NotFound(format!(
            "no contact with last name {}",
            args.name
        )));
    };
    let index = position_of(&store, contact);
    ctx.log
        .info("search", Some(&format!("{} -> {contact}", args.name)));

    if ctx.robot_mode {
        return emit_robot(&robot_ok(ContactEntry::new(index, contact)).with_warnings(warnings));
    }
    let mut layout = HumanLayout::new();
    layout.title(&format!("Contact #{index}"));
    contact_detail(&mut layout, contact);
    emit_human(layout);
    Ok(())
}
