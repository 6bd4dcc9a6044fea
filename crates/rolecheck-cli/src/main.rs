//! Rolecheck CLI - Validate the job roles in a PDF against an authoritative XML list.

use clap::Parser;
use rolecheck_cli::commands;
use rolecheck_cli::{Cli, Command, Config, Formatter};
use rolecheck_reconciler::FuzzyThreshold;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout carries only command output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> rolecheck_cli::Result<ExitCode> {
    // Defaults, then file, then environment, then flags
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env_vars()?;
    if let Some(threshold) = cli.threshold {
        config.reconciler.fuzzy_threshold = FuzzyThreshold::new(threshold)?;
    }
    config.validate()?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Check(args) => commands::execute_check(args, &config, &formatter),
        Command::Compare(args) => commands::execute_compare(args, &config, &formatter),
        Command::Index(args) => {
            commands::execute_index(args, &config, &formatter).map(|_| ExitCode::SUCCESS)
        }
        Command::Ask(args) => {
            commands::execute_ask(args, &config, &formatter).map(|_| ExitCode::SUCCESS)
        }
        Command::Clear(args) => {
            commands::execute_clear(args, &config, &formatter).map(|_| ExitCode::SUCCESS)
        }
        Command::WipeIndex(args) => {
            commands::execute_wipe_index(args, &config, &formatter).map(|_| ExitCode::SUCCESS)
        }
        Command::Roles(args) => {
            commands::execute_roles(args, &config, &formatter).map(|_| ExitCode::SUCCESS)
        }
    }
}
