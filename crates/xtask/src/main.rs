//! Development tasks for the world engine
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Run};

/// Development tasks for the world engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for grid worlds", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Advance a world document by one or more ticks
    Run(Run),

    /// Inspect a world document
    Inspect(Inspect),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for WORLD_* overrides and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
    }
}
