use clap::Parser;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use taskboard::cli;
use taskboard::cli::commands::{Cli, Commands};

fn main() {
    // Tracing is opt-in via RUST_LOG; invalid or oversized filters are ignored.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let exit_code = match cli_args.command {
        Commands::Init { seed } => cli::init::run(seed.as_deref(), json_output),
        Commands::Dashboard => cli::dashboard::run(json_output),
        Commands::Task(cmd) => cli::task::run(cmd, json_output),
        Commands::Trash(cmd) => cli::trash::run(cmd, json_output),
        Commands::User(cmd) => cli::user::run(cmd, json_output),
        Commands::Session(cmd) => cli::session::run(cmd, json_output),
    };

    process::exit(exit_code);
}
