//! Error types for header generation.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::bucket::Bucket;
use crate::core::check_result::Outcome;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Any fatal error for one invocation. Nothing is retried internally.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum AutohdrError {
    #[error("input file does not exist: {}", path.display())]
    #[diagnostic(code(autohdr::input::missing))]
    InputMissing { path: PathBuf },

    #[error("failed to read input file: {}", path.display())]
    #[diagnostic(code(autohdr::input::unreadable))]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed check result in {}: {detail}", path.display())]
    #[diagnostic(
        code(autohdr::results::malformed),
        help("every result must be an object with a boolean `success` field")
    )]
    MalformedResult { path: PathBuf, detail: String },

    #[error("duplicate {bucket} result `{key}` with conflicting values")]
    #[diagnostic(
        code(autohdr::results::conflict),
        help("make the checks agree on the value, or drop one of the result files")
    )]
    ConflictingResult {
        bucket: Bucket,
        key: String,
        first: Outcome,
        first_source: PathBuf,
        second: Outcome,
        second_source: PathBuf,
    },

    #[error("failed to read inline file for `{search}`: {}", path.display())]
    #[diagnostic(code(autohdr::template::inline))]
    InlineUnreadable {
        search: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file: {}", path.display())]
    #[diagnostic(code(autohdr::output::unwritable))]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid arguments: {0}")]
    #[diagnostic(code(autohdr::args))]
    InvalidArgs(String),

    #[error("failed to parse manifest {}: {message}", path.display())]
    #[diagnostic(code(autohdr::manifest))]
    ManifestInvalid { path: PathBuf, message: String },
}

impl AutohdrError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            AutohdrError::InputMissing { path } => Diagnostic::error("input file does not exist")
                .with_location(path)
                .with_suggestion(suggestions::CHECK_INPUTS),

            AutohdrError::InputUnreadable { path, source } => {
                Diagnostic::error("failed to read input file")
                    .with_location(path)
                    .with_context(source.to_string())
            }

            AutohdrError::MalformedResult { path, detail } => {
                Diagnostic::error("malformed check result")
                    .with_location(path)
                    .with_context(detail.clone())
                    .with_suggestion(suggestions::RESULT_SHAPE)
            }

            AutohdrError::ConflictingResult {
                bucket,
                key,
                first,
                first_source,
                second,
                second_source,
            } => Diagnostic::error(format!(
                "duplicate {} result `{}` with conflicting values",
                bucket, key
            ))
            .with_context(format!("First:  {} ({})", first, first_source.display()))
            .with_context(format!("Second: {} ({})", second, second_source.display()))
            .with_suggestion(suggestions::CONFLICT),

            AutohdrError::InlineUnreadable {
                search,
                path,
                source,
            } => Diagnostic::error(format!("failed to read inline file for `{}`", search))
                .with_location(path)
                .with_context(source.to_string()),

            AutohdrError::OutputUnwritable { path, source } => {
                Diagnostic::error("failed to write output file")
                    .with_location(path)
                    .with_context(source.to_string())
            }

            AutohdrError::InvalidArgs(message) => {
                Diagnostic::error(message.clone()).with_suggestion(suggestions::HELP)
            }

            AutohdrError::ManifestInvalid { path, message } => {
                Diagnostic::error("failed to parse manifest")
                    .with_location(path)
                    .with_context(message.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_diagnostic_names_both_outcomes() {
        let err = AutohdrError::ConflictingResult {
            bucket: Bucket::Define,
            key: "HAVE_FOO".to_string(),
            first: Outcome {
                success: true,
                value: Some("1".to_string()),
            },
            first_source: PathBuf::from("a.json"),
            second: Outcome {
                success: false,
                value: None,
            },
            second_source: PathBuf::from("b.json"),
        };

        assert_eq!(
            err.to_string(),
            "duplicate define result `HAVE_FOO` with conflicting values"
        );

        let text = err.to_diagnostic().format(false);
        assert!(text.contains("First:  success=true, value=\"1\" (a.json)"));
        assert!(text.contains("Second: success=false, value=\"\" (b.json)"));
    }

    #[test]
    fn test_missing_input_diagnostic_has_location() {
        let err = AutohdrError::InputMissing {
            path: PathBuf::from("results/foo.json"),
        };
        let text = err.to_diagnostic().format(false);
        assert!(text.starts_with("error: input file does not exist"));
        assert!(text.contains("--> results/foo.json"));
    }
}
