//! Implementation of `autohdr restrict`.
//!
//! Picks the spelling of the C99 `restrict` keyword from three compile
//! probes, checked in priority order, and writes a single define result
//! describing it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::core::{AutohdrError, CheckResult, CheckType, Result};
use crate::results::load_results_file;
use crate::util::fs::write_atomic;

/// Name of the produced result and of the define it controls.
pub const RESTRICT: &str = "restrict";

/// Keyword aliases, tried after the native keyword.
const ALIASES: [&str; 2] = ["__restrict__", "__restrict"];

/// Which spelling of `restrict` the compiler accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackOutcome {
    /// `restrict` itself works; nothing needs to be defined.
    Native,
    /// Define `restrict` to this alias.
    Alias(&'static str),
    /// No spelling works; the result fails with an empty value.
    Unsupported,
}

impl FallbackOutcome {
    /// The define result for this outcome.
    pub fn to_check_result(self) -> CheckResult {
        let (value, success) = match self {
            FallbackOutcome::Native => (None, true),
            FallbackOutcome::Alias(alias) => (Some(Value::String(alias.to_string()).to_string()), true),
            FallbackOutcome::Unsupported => (Some(String::new()), false),
        };

        CheckResult::new(RESTRICT, value, success)
            .with_define(RESTRICT)
            .with_type(CheckType::Compile)
            .with_unquote(true)
    }
}

impl fmt::Display for FallbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackOutcome::Native => write!(f, "{}", RESTRICT),
            FallbackOutcome::Alias(alias) => write!(f, "{}", alias),
            FallbackOutcome::Unsupported => write!(f, "no"),
        }
    }
}

/// Pick the first probe that succeeded: `restrict`, then `__restrict__`,
/// then `__restrict`.
pub fn select_restrict(native: bool, gnu: bool, msvc: bool) -> FallbackOutcome {
    if native {
        return FallbackOutcome::Native;
    }
    [gnu, msvc]
        .iter()
        .zip(ALIASES)
        .find(|(ok, _)| **ok)
        .map(|(_, alias)| FallbackOutcome::Alias(alias))
        .unwrap_or(FallbackOutcome::Unsupported)
}

/// Read the `success` flag of a probe's results file.
///
/// The file must hold at least one result; the first one (in key order) is
/// used.
pub fn read_probe_success(path: &Path) -> Result<bool> {
    let results = load_results_file(path)?;
    results
        .first()
        .map(|r| r.success)
        .ok_or_else(|| AutohdrError::MalformedResult {
            path: path.to_path_buf(),
            detail: "probe file holds no result".to_string(),
        })
}

/// Probe results files for each spelling.
#[derive(Debug, Clone)]
pub struct RestrictOptions {
    /// Probe for `restrict`
    pub native: PathBuf,
    /// Probe for `__restrict__`
    pub gnu: PathBuf,
    /// Probe for `__restrict`
    pub msvc: PathBuf,
    pub output: PathBuf,
}

/// Render the results-file text for an outcome.
///
/// Four-space indentation and a trailing newline.
pub fn render_outcome(outcome: FallbackOutcome) -> serde_json::Result<String> {
    let mut doc = Map::new();
    doc.insert(RESTRICT.to_string(), outcome.to_check_result().to_json());

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    Value::Object(doc).serialize(&mut ser)?;

    let mut text = String::from_utf8_lossy(&buf).into_owned();
    text.push('\n');
    Ok(text)
}

/// Read the three probes and write the combined result.
pub fn resolve_restrict(opts: &RestrictOptions) -> Result<FallbackOutcome> {
    let outcome = select_restrict(
        read_probe_success(&opts.native)?,
        read_probe_success(&opts.gnu)?,
        read_probe_success(&opts.msvc)?,
    );
    tracing::info!("checking for C/C++ restrict keyword... {}", outcome);

    let text = render_outcome(outcome).map_err(|e| AutohdrError::OutputUnwritable {
        path: opts.output.clone(),
        source: e.into(),
    })?;
    write_atomic(&opts.output, &text)?;
    Ok(outcome)
}
