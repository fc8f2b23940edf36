//! treeforge CLI - materializes the terraform book skeleton and archives
//! it as zip.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use output::OutputFormatter;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let operation = cli.command.as_ref().map_or("build", cli::Commands::name);

    match run(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(operation, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let show_progress = !cli.quiet && !cli.json;

    match &cli.command {
        None => commands::build::execute(&cli::BuildArgs::default(), formatter, show_progress),
        Some(cli::Commands::Build(args)) => commands::build::execute(args, formatter, show_progress),
        Some(cli::Commands::Show) => commands::show::execute(formatter),
        Some(cli::Commands::List(args)) => commands::list::execute(args, formatter),
        Some(cli::Commands::Completion(args)) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}

/// Logs go to stderr so they never mix with JSON on stdout.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();
}
