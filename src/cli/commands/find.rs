//! contacts find - Find a contact by id or id prefix

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::{load_store, position_of};
use crate::cli::output::{
    ContactEntry, HumanLayout, contact_detail, emit_human, emit_robot, robot_ok,
};
use crate::core::store::MIN_ID_PREFIX;
use crate::error::{ContactsError, Result};

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Full id, or a prefix of at least 8 characters
    pub id: String,
}

pub fn run(ctx: &AppContext, args: &FindArgs) -> Result<()> {
    let (store, warnings) = load_store(ctx)?;

    let Some(contact) = store.find_by_id(&args.id) else {
        let reason = if args.id.trim().chars().count() < MIN_ID_PREFIX {
            format!("id {} is shorter than {MIN_ID_PREFIX} characters", args.id)
        } else {
            format!("no contact with id {}", args.id)
        };
        return Err(ContactsError::NotFound(reason));
    };
    let index = position_of(&store, contact);
    ctx.log.info("find by id", Some(&args.id));

    if ctx.robot_mode {
        return emit_robot(&robot_ok(ContactEntry::new(index, contact)).with_warnings(warnings));
    }
    let mut layout = HumanLayout::new();
    layout.title(&format!("Contact #{index}"));
    contact_detail(&mut layout, contact);
    emit_human(layout);
    Ok(())
}
