//! Invocation manifests.
//!
//! Instead of a long command line, `autohdr resolve --manifest hdr.toml`
//! reads the invocation from a TOML file:
//!
//! ```toml
//! define_results = ["checks/printf.json", "checks/stdint.json"]
//! template = "config.h.in"
//! output = "config.h"
//! mode = "all"
//!
//! [inlines]
//! "/* @EXTRA@ */" = "extra.h"
//!
//! [substitutions]
//! "@VERSION_MAJOR@" = "3"
//! ```
//!
//! Relative paths are resolved against the manifest's directory. Values given
//! on the command line are merged over the manifest.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{AutohdrError, Mode, Result};

/// A header resolution invocation as written in a manifest file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveManifest {
    /// Results files for cache variables
    pub cache_results: Vec<PathBuf>,

    /// Results files for defines
    pub define_results: Vec<PathBuf>,

    /// Results files for subst values
    pub subst_results: Vec<PathBuf>,

    /// Template (config.h.in)
    pub template: Option<PathBuf>,

    /// Output header
    pub output: Option<PathBuf>,

    /// Processing mode (defaults to `defines`)
    pub mode: Option<Mode>,

    /// Search string → file whose content replaces it
    pub inlines: BTreeMap<String, PathBuf>,

    /// Search string → literal replacement
    pub substitutions: BTreeMap<String, String>,
}

impl ResolveManifest {
    /// Load a manifest, resolving relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = crate::util::fs::read_input(path)?;
        let mut manifest: ResolveManifest =
            toml::from_str(&contents).map_err(|e| AutohdrError::ManifestInvalid {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            manifest.rebase(base);
        }
        Ok(manifest)
    }

    /// Merge another manifest into this one (other takes precedence).
    ///
    /// Result lists append, scalars override, map entries override per key.
    pub fn merge(&mut self, other: ResolveManifest) {
        self.cache_results.extend(other.cache_results);
        self.define_results.extend(other.define_results);
        self.subst_results.extend(other.subst_results);
        if other.template.is_some() {
            self.template = other.template;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
        if other.mode.is_some() {
            self.mode = other.mode;
        }
        self.inlines.extend(other.inlines);
        self.substitutions.extend(other.substitutions);
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        self.cache_results.iter_mut().for_each(join);
        self.define_results.iter_mut().for_each(join);
        self.subst_results.iter_mut().for_each(join);
        self.template.iter_mut().for_each(join);
        self.output.iter_mut().for_each(join);
        self.inlines.values_mut().for_each(join);
    }
}
