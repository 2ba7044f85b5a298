//! Core data structures for autohdr.
//!
//! This module contains the foundational types used throughout autohdr:
//! - Check results and their outcomes
//! - Result buckets (cache, define, subst)
//! - Processing modes
//! - The error taxonomy

pub mod bucket;
pub mod check_result;
pub mod errors;
pub mod mode;

pub use bucket::{Bucket, ResultSet};
pub use check_result::{CheckResult, CheckType, Outcome};
pub use errors::AutohdrError;
pub use mode::Mode;

/// Result type used across the library.
pub type Result<T, E = AutohdrError> = std::result::Result<T, E>;
