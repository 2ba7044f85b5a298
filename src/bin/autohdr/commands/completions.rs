//! `autohdr completions` command

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::{Cli, CompletionsArgs};

/// The completion script for `shell`, covering every subcommand and flag.
fn completion_script(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut script = Vec::new();
    generate(shell, &mut cmd, "autohdr", &mut script);
    script
}

pub fn execute(args: CompletionsArgs) -> Result<()> {
    let script = completion_script(args.shell);
    tracing::debug!("generated {} completions ({} bytes)", args.shell, script.len());

    io::stdout()
        .lock()
        .write_all(&script)
        .context("failed to write completions to stdout")
}
