mod app;
mod cli;
mod commands;
mod types;
mod util;

use clap::Parser;

/// Main entry point for the dwdt CLI application.
///
/// Installs the log subscriber, parses command-line arguments, and
/// dispatches to the main application logic.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = cli::Cli::parse();
    app::run(cli)
}
