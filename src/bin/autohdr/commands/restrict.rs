//! `autohdr restrict` command

use anyhow::Result;

use crate::cli::RestrictArgs;
use autohdr::ops::{resolve_restrict, RestrictOptions};

pub fn execute(args: RestrictArgs) -> Result<()> {
    let opts = RestrictOptions {
        native: args.native,
        gnu: args.gnu,
        msvc: args.msvc,
        output: args.output,
    };

    let outcome = resolve_restrict(&opts)?;
    tracing::debug!("restrict resolved to `{}`", outcome);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        restrict: RestrictArgs,
    }

    #[test]
    fn test_probe_flags() {
        let cli = TestCli::parse_from([
            "test",
            "--restrict",
            "r.json",
            "--restrict__",
            "gnu.json",
            "--_restrict",
            "msvc.json",
            "--output",
            "out.json",
        ]);
        assert_eq!(cli.restrict.native, PathBuf::from("r.json"));
        assert_eq!(cli.restrict.gnu, PathBuf::from("gnu.json"));
        assert_eq!(cli.restrict.msvc, PathBuf::from("msvc.json"));
        assert_eq!(cli.restrict.output, PathBuf::from("out.json"));
    }

    #[test]
    fn test_all_probes_required() {
        assert!(TestCli::try_parse_from(["test", "--restrict", "r.json", "--output", "o"]).is_err());
    }
}
