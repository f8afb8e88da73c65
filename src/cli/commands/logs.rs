//! contacts logs - Inspect or prune the activity log

use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;
use crate::utils::format_size;

#[derive(Args, Debug)]
pub struct LogsArgs {
    #[command(subcommand)]
    pub command: LogsCommand,
}

#[derive(Subcommand, Debug)]
pub enum LogsCommand {
    /// Show the most recent entries
    Recent {
        /// Number of entries
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
    },

    /// Count entries per level
    Stats,

    /// Remove entries older than the retention period
    Cleanup {
        /// Days to keep (defaults to the configured retention)
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Serialize)]
struct CleanupReport {
    days: u32,
    removed: usize,
}

pub fn run(ctx: &AppContext, args: &LogsArgs) -> Result<()> {
    match &args.command {
        LogsCommand::Recent { count } => recent(ctx, *count),
        LogsCommand::Stats => stats(ctx),
        LogsCommand::Cleanup { days } => {
            cleanup(ctx, days.unwrap_or(ctx.config.log.retention_days))
        }
    }
}

fn recent(ctx: &AppContext, count: usize) -> Result<()> {
    let lines = ctx.log.recent(count)?;
    if ctx.robot_mode {
        return emit_robot(&robot_ok(lines));
    }
    if lines.is_empty() {
        println!("{}", style("Activity log is empty").dim());
        return Ok(());
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn stats(ctx: &AppContext) -> Result<()> {
    let stats = ctx.log.stats()?;
    if ctx.robot_mode {
        return emit_robot(&robot_ok(stats));
    }
    let mut layout = HumanLayout::new();
    layout.title("Activity log");
    layout
        .kv("File", &stats.path.display().to_string())
        .kv("Size", &format_size(stats.size_bytes))
        .kv("Entries", &stats.total.to_string())
        .blank()
        .kv("INFO", &stats.info.to_string())
        .kv("WARNING", &stats.warning.to_string())
        .kv("ERROR", &stats.error.to_string())
        .kv("SUCCESS", &stats.success.to_string())
        .kv("DEBUG", &stats.debug.to_string());
    emit_human(layout);
    Ok(())
}

fn cleanup(ctx: &AppContext, days: u32) -> Result<()> {
    let removed = ctx.log.cleanup(days)?;
    if ctx.robot_mode {
        return emit_robot(&robot_ok(CleanupReport { days, removed }));
    }
    println!(
        "{} Removed {removed} entries older than {days} days",
        style("✓").green()
    );
    Ok(())
}
