//! Result loading and merging.
//!
//! Each results file is a JSON object of named check results. The files for
//! each bucket are merged in order into one de-duplicated `ResultSet`.

pub mod loader;
pub mod merge;

pub use loader::{load_results_file, parse_results};
pub use merge::{merge_result_files, MergedResults, ResultSources};
