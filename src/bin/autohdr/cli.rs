//! CLI definitions using clap.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use autohdr::core::Mode;
use autohdr::ops::SourceMapping;

/// autohdr - Generate config headers from recorded check results
#[derive(Parser)]
#[command(name = "autohdr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a header or substituted file from a template
    Resolve(ResolveArgs),

    /// Pick the spelling of the `restrict` keyword from probe results
    Restrict(RestrictArgs),

    /// Copy sources, disabling those whose result is not truthy
    Wrap(WrapArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// TOML file holding the invocation; flags are merged over it
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Results file for cache variables (repeatable)
    #[arg(long = "cache-result", value_name = "FILE")]
    pub cache_results: Vec<PathBuf>,

    /// Results file for defines (repeatable)
    #[arg(long = "define-result", value_name = "FILE")]
    pub define_results: Vec<PathBuf>,

    /// Results file for subst values (repeatable)
    #[arg(long = "subst-result", value_name = "FILE")]
    pub subst_results: Vec<PathBuf>,

    /// Template file (config.h.in)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Output file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Replace a search string with a file's content (repeatable)
    #[arg(
        long,
        num_args = 2,
        value_names = ["SEARCH", "FILE"],
        allow_hyphen_values = true,
        action = ArgAction::Append
    )]
    pub inline: Vec<String>,

    /// Replace a search string with a literal value (repeatable)
    #[arg(
        long,
        num_args = 2,
        value_names = ["SEARCH", "VALUE"],
        allow_hyphen_values = true,
        action = ArgAction::Append
    )]
    pub subst: Vec<String>,

    /// Which passes to run: defines, subst or all
    #[arg(long)]
    pub mode: Option<Mode>,
}

impl ResolveArgs {
    /// `--inline` values as search string → file.
    pub fn inlines(&self) -> BTreeMap<String, PathBuf> {
        self.inline
            .chunks(2)
            .filter_map(|pair| match pair {
                [search, file] => Some((search.clone(), PathBuf::from(file))),
                _ => None,
            })
            .collect()
    }

    /// `--subst` values as search string → replacement.
    pub fn substitutions(&self) -> BTreeMap<String, String> {
        self.subst
            .chunks(2)
            .filter_map(|pair| match pair {
                [search, value] => Some((search.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }
}

#[derive(Args)]
pub struct RestrictArgs {
    /// Probe results for `restrict`
    #[arg(long = "restrict", value_name = "FILE")]
    pub native: PathBuf,

    /// Probe results for `__restrict__`
    #[arg(long = "restrict__", value_name = "FILE")]
    pub gnu: PathBuf,

    /// Probe results for `__restrict`
    #[arg(long = "_restrict", value_name = "FILE")]
    pub msvc: PathBuf,

    /// Output results file
    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct WrapArgs {
    /// Results file (repeatable; later files win)
    #[arg(long = "results", value_name = "FILE", required = true)]
    pub results: Vec<PathBuf>,

    /// Source mapping as <in>=<DEFINE>=<out> (repeatable)
    #[arg(long = "src", value_name = "IN=DEFINE=OUT")]
    pub sources: Vec<SourceMapping>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
