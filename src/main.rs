//! contacts - console contact manager
//!
//! Without a subcommand, runs the interactive menu.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use contacts::Result;
use contacts::app::AppContext;
use contacts::cli::output::{emit_robot, robot_error};
use contacts::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.robot {
                // Robot mode: JSON error output to stdout
                if emit_robot(&robot_error(e.code(), e.to_string())).is_err() {
                    eprintln!("Error: {e}");
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    ctx.log.initialize();
    let outcome = match &cli.command {
        Some(command) => contacts::cli::commands::run(&ctx, command),
        None => contacts::cli::menu::run_interactive(&ctx),
    };
    if let Err(err) = &outcome {
        ctx.log.failure("command", err);
    }
    ctx.log.shutdown();
    outcome
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,contacts=info",
        1 => "info,contacts=debug",
        2 => "debug,contacts=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
