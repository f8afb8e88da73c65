//! contacts export - Write contacts to a JSON file

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
pub struct ExportArgs {
    /// Destination file
    pub path: PathBuf,
}

#[derive(Serialize)]
struct ExportReport {
    path: PathBuf,
    exported: usize,
}

pub fn run(ctx: &AppContext, args: &ExportArgs) -> Result<()> {
    let (store, warnings) = load_store(ctx)?;
    if let Err(err) = json::export_to(&store, &args.path) {
        ctx.log.failure("export", &err);
        return Err(err);
    }
    ctx.log.success(
        "contacts exported",
        Some(&format!("{} -> {}", store.len(), args.path.display())),
    );

    if ctx.robot_mode {
        return emit_robot(
            &robot_ok(ExportReport {
                path: args.path.clone(),
                exported: store.len(),
            })
            .with_warnings(warnings),
        );
    }
    println!(
        "{} Exported {} contacts to {}",
        style("✓").green(),
        store.len(),
        args.path.display()
    );
    Ok(())
}
