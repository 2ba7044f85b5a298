//! `autohdr wrap` command

use anyhow::Result;

use crate::cli::WrapArgs;
use autohdr::ops::{wrap_sources, WrapOptions};

pub fn execute(args: WrapArgs) -> Result<()> {
    let opts = WrapOptions {
        results: args.results,
        sources: args.sources,
    };

    wrap_sources(&opts)?;
    Ok(())
}
