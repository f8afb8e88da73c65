//! contacts import - Read contacts from a JSON file
//!
//! Contacts whose ids are already present are skipped unless `--replace`
//! discards the current list first.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::load_store;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;
use crate::storage::json;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Source file, in the document format written by `export`
    pub path: PathBuf,

    /// Replace the current contacts instead of merging
    #[arg(long)]
    pub replace: bool,
}

#[derive(Serialize)]
struct ImportReport {
    path: PathBuf,
    read: usize,
    added: usize,
    total: usize,
    replaced: bool,
}

pub fn run(ctx: &AppContext, args: &ImportArgs) -> Result<()> {
    let (mut store, warnings) = load_store(ctx)?;
    let imported = match json::import_from(&args.path) {
        Ok(imported) => imported,
        Err(err) => {
            ctx.log.failure("import", &err);
            return Err(err);
        }
    };

    let read = imported.len();
    let added = if args.replace {
        store = imported;
        read
    } else {
        store.merge(imported)
    };
    ctx.save(&store)?;
    ctx.log.success(
        "contacts imported",
        Some(&format!(
            "{added} of {read} from {}{}",
            args.path.display(),
            if args.replace { " (replace)" } else { "" }
        )),
    );

    let report = ImportReport {
        path: args.path.clone(),
        read,
        added,
        total: store.len(),
        replaced: args.replace,
    };
    if ctx.robot_mode {
        return emit_robot(&robot_ok(report).with_warnings(warnings));
    }
    println!(
        "{} Imported {} of {} contacts from {} ({} total)",
        style("✓").green(),
        report.added,
        report.read,
        report.path.display(),
        report.total
    );
    Ok(())
}
