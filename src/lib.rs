//! autohdr - config header generation from recorded check results
//!
//! This crate provides the library side of autohdr: loading and merging
//! check results, rewriting `config.h.in` style templates, and the small
//! companion tools built on the same result model.

pub mod core;
pub mod ops;
pub mod results;
pub mod template;
pub mod util;

pub use self::core::{AutohdrError, Bucket, CheckResult, CheckType, Mode, ResultSet};
pub use results::MergedResults;
pub use template::{ProcessedData, TemplateProcessor};
