//! Action-args (`@file`) expansion.
//!
//! Build systems often pass long argument lists through a params file. When
//! the only argument after the subcommand is `@path`, the arguments are read
//! from that file instead: one per line, surrounding whitespace trimmed,
//! blank lines skipped.

use std::ffi::OsString;
use std::path::Path;

use crate::core::{AutohdrError, Result};

/// Read arguments from an action-args file.
pub fn read_action_args_file(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AutohdrError::InvalidArgs(format!(
            "cannot open action args file {}: {}",
            path.display(),
            e
        ))
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Expand `argv` if it has the shape `<program> <subcommand> @<file>`.
///
/// Any other shape is returned unchanged, so `@` inside ordinary arguments
/// (such as `--inline @FOO@ file`) is never treated as a params file.
pub fn expand_action_args(argv: Vec<OsString>) -> Result<Vec<OsString>> {
    if argv.len() != 3 {
        return Ok(argv);
    }

    let file = match argv[2].to_str().and_then(|arg| arg.strip_prefix('@')) {
        Some(file) => file.to_string(),
        None => return Ok(argv),
    };

    if file.is_empty() {
        return Err(AutohdrError::InvalidArgs(
            "action args file path cannot be empty after '@'".to_string(),
        ));
    }

    let expanded = read_action_args_file(Path::new(&file))?;
    if expanded.is_empty() {
        return Err(AutohdrError::InvalidArgs(format!(
            "action args file {} contains no arguments",
            file
        )));
    }

    tracing::debug!("expanded {} arguments from @{}", expanded.len(), file);

    let mut out = Vec::with_capacity(expanded.len() + 2);
    out.extend(argv.into_iter().take(2));
    out.extend(expanded.into_iter().map(OsString::from));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_expands_params_file() {
        let tmp = TempDir::new().unwrap();
        let params = tmp.path().join("resolve.params");
        fs::write(
            &params,
            "--template\n  config.h.in  \n\n--output\nconfig.h\r\n",
        )
        .unwrap();

        let argv = os(&["autohdr", "resolve", &format!("@{}", params.display())]);
        let expanded = expand_action_args(argv).unwrap();
        assert_eq!(
            expanded,
            os(&[
                "autohdr",
                "resolve",
                "--template",
                "config.h.in",
                "--output",
                "config.h"
            ])
        );
    }

    #[test]
    fn test_other_shapes_are_untouched() {
        let argv = os(&["autohdr", "resolve", "--template", "@x"]);
        assert_eq!(expand_action_args(argv.clone()).unwrap(), argv);

        let argv = os(&["autohdr", "resolve", "config.h.in"]);
        assert_eq!(expand_action_args(argv.clone()).unwrap(), argv);
    }

    #[test]
    fn test_empty_path_is_an_error() {
        let err = expand_action_args(os(&["autohdr", "resolve", "@"])).unwrap_err();
        assert!(matches!(err, AutohdrError::InvalidArgs(_)));
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let params = tmp.path().join("empty.params");
        fs::write(&params, "\n   \n").unwrap();

        let argv = os(&["autohdr", "wrap", &format!("@{}", params.display())]);
        assert!(expand_action_args(argv).is_err());
    }
}
