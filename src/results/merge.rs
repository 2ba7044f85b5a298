//! Merging results files into buckets.

use std::path::{Path, PathBuf};

use tracing::Level;

use crate::core::{Bucket, ResultSet, Result};
use crate::results::loader::load_results_file;

/// Load and merge a list of results files into one bucket.
///
/// Files are read in order; the first occurrence of a key wins and later
/// identical occurrences are dropped. A later occurrence with a different
/// `(success, value)` pair aborts the merge.
pub fn merge_result_files<P: AsRef<Path>>(bucket: Bucket, paths: &[P]) -> Result<ResultSet> {
    let mut set = ResultSet::new(bucket);

    for path in paths {
        let path = path.as_ref();
        let loaded = load_results_file(path)?;
        tracing::trace!(
            "loaded {} {} results from {}",
            loaded.len(),
            bucket,
            path.display()
        );
        for result in loaded {
            set.insert(result, path)?;
        }
    }

    Ok(set)
}

/// Results files for each bucket, in the order they should be merged.
#[derive(Debug, Clone, Default)]
pub struct ResultSources {
    pub cache: Vec<PathBuf>,
    pub define: Vec<PathBuf>,
    pub subst: Vec<PathBuf>,
}

/// The three merged buckets for one invocation.
#[derive(Debug, Clone)]
pub struct MergedResults {
    /// Queryable only; never rendered.
    pub cache: ResultSet,
    pub define: ResultSet,
    pub subst: ResultSet,
}

impl Default for MergedResults {
    fn default() -> Self {
        MergedResults {
            cache: ResultSet::new(Bucket::Cache),
            define: ResultSet::new(Bucket::Define),
            subst: ResultSet::new(Bucket::Subst),
        }
    }
}

impl MergedResults {
    /// Load and merge all three buckets.
    pub fn load(sources: &ResultSources) -> Result<Self> {
        let merged = MergedResults {
            cache: merge_result_files(Bucket::Cache, &sources.cache)?,
            define: merge_result_files(Bucket::Define, &sources.define)?,
            subst: merge_result_files(Bucket::Subst, &sources.subst)?,
        };

        tracing::debug!(
            "merged {} cache, {} define, {} subst results",
            merged.cache.len(),
            merged.define.len(),
            merged.subst.len()
        );

        Ok(merged)
    }

    /// Build directly from already-merged sets.
    pub fn from_sets(cache: ResultSet, define: ResultSet, subst: ResultSet) -> Self {
        MergedResults {
            cache,
            define,
            subst,
        }
    }

    /// `checking <KEY>... yes|no` lines for every define, sorted by key.
    pub fn define_check_lines(&self) -> Vec<String> {
        let mut defines: Vec<_> = self.define.iter().collect();
        defines.sort_by(|a, b| a.define_key().cmp(b.define_key()));
        defines
            .into_iter()
            .map(|r| {
                format!(
                    "checking {}... {}",
                    r.define_key(),
                    if r.success { "yes" } else { "no" }
                )
            })
            .collect()
    }

    /// Emit the define check lines when info logging is enabled.
    ///
    /// Cache and subst results are never logged this way.
    pub fn log_define_checks(&self) {
        if !tracing::enabled!(Level::INFO) {
            return;
        }
        for line in self.define_check_lines() {
            tracing::info!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AutohdrError;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_identical_duplicates_across_files_merge() {
        let tmp = TempDir::new().unwrap();
        let a = write(tmp.path(), "a.json", r#"{"HAVE_FOO": {"success": true, "value": "1"}}"#);
        let b = write(
            tmp.path(),
            "b.json",
            r#"{"HAVE_BAR": {"success": false}, "HAVE_FOO": {"success": true, "value": "1"}}"#,
        );

        let set = merge_result_files(Bucket::Define, &[a, b]).unwrap();
        let keys: Vec<_> = set.keys().collect();
        assert_eq!(keys, vec!["HAVE_FOO", "HAVE_BAR"]);
    }

    #[test]
    fn test_conflicting_duplicates_across_files_fail() {
        let tmp = TempDir::new().unwrap();
        let a = write(tmp.path(), "a.json", r#"{"HAVE_FOO": {"success": true, "value": "1"}}"#);
        let b = write(tmp.path(), "b.json", r#"{"HAVE_FOO": {"success": false}}"#);

        let err = merge_result_files(Bucket::Define, &[a.clone(), b.clone()]).unwrap_err();
        match err {
            AutohdrError::ConflictingResult {
                first_source,
                second_source,
                ..
            } => {
                assert_eq!(first_source, a);
                assert_eq!(second_source, b);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_aborts() {
        let tmp = TempDir::new().unwrap();
        let err = merge_result_files(Bucket::Cache, &[tmp.path().join("nope.json")]).unwrap_err();
        assert!(matches!(err, AutohdrError::InputMissing { .. }));
    }

    #[test]
    fn test_buckets_are_independent() {
        let tmp = TempDir::new().unwrap();
        let cache = write(tmp.path(), "c.json", r#"{"X": {"success": true, "value": "1"}}"#);
        let define = write(tmp.path(), "d.json", r#"{"X": {"success": false}}"#);

        let merged = MergedResults::load(&ResultSources {
            cache: vec![cache],
            define: vec![define],
            subst: vec![],
        })
        .unwrap();

        assert!(merged.cache.iter().all(|r| r.name == "X" && r.success));
        assert!(merged.define.iter().all(|r| r.name == "X" && !r.success));
        assert_eq!((merged.cache.len(), merged.define.len()), (1, 1));
        assert!(merged.subst.is_empty());
    }

    #[test]
    fn test_define_check_lines_are_sorted_by_define_key() {
        let tmp = TempDir::new().unwrap();
        let d = write(
            tmp.path(),
            "d.json",
            r#"{
                "ac_cv_a": {"success": true, "define": "ZLIB"},
                "ac_cv_b": {"success": false, "define": "ALLOCA"}
            }"#,
        );
        let merged = MergedResults::load(&ResultSources {
            define: vec![d],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            merged.define_check_lines(),
            vec!["checking ALLOCA... no", "checking ZLIB... yes"]
        );
    }
}
