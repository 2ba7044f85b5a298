//! Loading check results from JSON files.

use std::path::Path;

use serde_json::Value;

use crate::core::{AutohdrError, CheckResult, Result};
use crate::util::fs::read_input;

/// Load every result in one results file.
///
/// The file holds a JSON object whose keys are result names. A file that is
/// empty, `null`, or not an object holds zero results. Results are returned
/// in key order.
pub fn load_results_file(path: &Path) -> Result<Vec<CheckResult>> {
    let contents = read_input(path)?;
    parse_results(&contents, path)
}

/// Parse the contents of a results file. `path` is only used for errors.
pub fn parse_results(contents: &str, path: &Path) -> Result<Vec<CheckResult>> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let json: Value = serde_json::from_str(contents).map_err(|e| AutohdrError::MalformedResult {
        path: path.to_path_buf(),
        detail: format!("invalid JSON: {}", e),
    })?;

    let Value::Object(map) = json else {
        tracing::debug!("{} holds no result object, treating as empty", path.display());
        return Ok(Vec::new());
    };

    map.iter()
        .map(|(name, value)| {
            CheckResult::from_json(name, value).ok_or_else(|| AutohdrError::MalformedResult {
                path: path.to_path_buf(),
                detail: format!("result `{}` is missing a boolean `success` field", name),
            })
        })
        .collect()
}
