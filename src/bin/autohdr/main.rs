//! autohdr CLI - config header generation from check results

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use autohdr::core::AutohdrError;
use autohdr::util::args::expand_action_args;
use cli::{Cli, Commands};

fn main() {
    let argv = match expand_action_args(std::env::args_os().collect()) {
        Ok(argv) => argv,
        Err(e) => {
            report(&e.into(), false);
            std::process::exit(1);
        }
    };

    // Parse CLI
    let cli = Cli::parse_from(argv);
    let color = !cli.no_color && io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        report(&e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("autohdr=debug")
    } else {
        EnvFilter::try_from_env("AUTOHDR_LOG").unwrap_or_else(|_| EnvFilter::new("autohdr=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Restrict(args) => commands::restrict::execute(args),
        Commands::Wrap(args) => commands::wrap::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print an error to stderr, with diagnostic detail for library errors.
fn report(e: &anyhow::Error, color: bool) {
    match e.downcast_ref::<AutohdrError>() {
        Some(err) => eprint!("{}", err.to_diagnostic().format(color)),
        None => eprintln!("error: {:#}", e),
    }
}
