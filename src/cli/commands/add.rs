//! contacts add - Add a contact

use clap::Args;
use console::style;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::commands::load_store;
use crate::cli::output::{ContactEntry, emit_robot, robot_ok};
use crate::core::Contact;
use crate::error::{ContactsError, Result};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Last name
    pub last_name: String,

    /// First name
    pub first_name: String,

    /// Email address
    #[arg(default_value = "")]
    pub email: String,

    /// Phone number
    #[arg(default_value = "")]
    pub phone: String,

    /// Add even if a contact with the same names and email exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(ctx: &AppContext, args: &AddArgs) -> Result<()> {
    let (mut store, warnings) = load_store(ctx)?;

    if store.exists_duplicate(&args.last_name, &args.first_name, &args.email) {
        ctx.log.warning(
            "duplicate contact detected",
            Some(&format!(
                "{} {} <{}>",
                args.last_name, args.first_name, args.email
            )),
        );
        if !args.force {
            return Err(ContactsError::Duplicate(format!(
                "{} {} <{}> already exists (use --force to add anyway)",
                args.last_name, args.first_name, args.email
            )));
        }
    }

    let contact = store
        .add(Contact::new(
            &args.last_name,
            &args.first_name,
            &args.email,
            &args.phone,
        ))
        .clone();
    ctx.save(&store)?;
    ctx.log.contact_action("added", &contact);
    debug!(target: "add", id = %contact.id, count = store.len(), "contact added");

    if ctx.robot_mode {
        return emit_robot(
            &robot_ok(ContactEntry::new(store.len(), &contact)).with_warnings(warnings),
        );
    }
    println!(
        "{} Added {contact} [{}]",
        style("✓").green(),
        style(contact.short_id()).dim()
    );
    Ok(())
}
