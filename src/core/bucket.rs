//! Result buckets.
//!
//! Check results arrive in three independently keyed collections:
//! - `cache`: looked up by cache variable name, never rendered
//! - `define`: rendered as `#define` / commented `#undef` lines
//! - `subst`: rendered by replacing `@NAME@` markers
//!
//! A `ResultSet` keeps the first-seen order of its keys so that iteration
//! (and therefore diagnostic output) is deterministic.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::check_result::CheckResult;
use crate::core::errors::AutohdrError;

/// One of the three result collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Cache,
    Define,
    Subst,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Cache => "cache",
            Bucket::Define => "define",
            Bucket::Subst => "subst",
        }
    }

    /// The key a result is registered under in this bucket.
    pub fn key_of<'a>(&self, result: &'a CheckResult) -> &'a str {
        match self {
            Bucket::Cache => &result.name,
            Bucket::Define => result.define_key(),
            Bucket::Subst => result.subst_key(),
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered, de-duplicated collection of results for one bucket.
#[derive(Debug, Clone)]
pub struct ResultSet {
    bucket: Bucket,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone)]
struct Entry {
    result: CheckResult,
    source: PathBuf,
}

impl ResultSet {
    pub fn new(bucket: Bucket) -> Self {
        ResultSet {
            bucket,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a result read from `source`.
    ///
    /// The first occurrence of a key wins. A later occurrence with the same
    /// `(success, value)` is dropped and `Ok(false)` is returned; a later
    /// occurrence with a different pair is a `ConflictingResult` error.
    pub fn insert(&mut self, result: CheckResult, source: &Path) -> Result<bool, AutohdrError> {
        let key = self.bucket.key_of(&result);

        if let Some(&idx) = self.index.get(key) {
            let existing = &self.entries[idx];
            if existing.result.outcome() != result.outcome() {
                return Err(AutohdrError::ConflictingResult {
                    bucket: self.bucket,
                    key: key.to_string(),
                    first: existing.result.outcome(),
                    first_source: existing.source.clone(),
                    second: result.outcome(),
                    second_source: source.to_path_buf(),
                });
            }
            tracing::trace!(
                "ignoring duplicate {} result `{}` from {}",
                self.bucket,
                key,
                source.display()
            );
            return Ok(false);
        }

        self.index.insert(key.to_string(), self.entries.len());
        self.entries.push(Entry {
            result,
            source: source.to_path_buf(),
        });
        Ok(true)
    }

    /// Results in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &CheckResult> {
        self.entries.iter().map(|e| &e.result)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| self.bucket.key_of(&e.result))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
