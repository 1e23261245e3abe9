//! Main entry point for csvpeek CLI

use anyhow::Context;
use clap::Parser;
use csvpeek::cli::Cli;
use csvpeek::commands::execute_command;
use csvpeek::PeekConfig;

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging, with debug output if requested
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config =
        PeekConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    execute_command(cli.command, &config)?;
    Ok(())
}
