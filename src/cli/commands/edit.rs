//! contacts edit - Update fields of a contact

use clap::Args;
use console::style;

use crate::app::AppContext;
use crate::cli::commands::load_store;
use crate::cli::output::{ContactEntry, emit_robot, robot_ok};
use crate::core::ContactPatch;
use crate::error::{ContactsError, Result};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// List number of the contact (1-based)
    pub index: usize,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

impl EditArgs {
    fn patch(&self) -> ContactPatch {
        ContactPatch {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

pub fn run(ctx: &AppContext, args: &EditArgs) -> Result<()> {
    let patch = args.patch();
    if patch.is_empty() {
        return Err(ContactsError::InvalidSelection(
            "nothing to change: pass at least one of --last-name, --first-name, --email, --phone"
                .to_string(),
        ));
    }

    let (mut store, warnings) = load_store(ctx)?;
    let updated = store.edit(args.index, &patch)?.clone();
    ctx.save(&store)?;
    ctx.log.contact_action("edited", &updated);

    if ctx.robot_mode {
        return emit_robot(
            &robot_ok(ContactEntry::new(args.index, &updated)).with_warnings(warnings),
        );
    }
    println!("{} Updated [{}] {updated}", style("✓").green(), args.index);
    Ok(())
}
