//! Implementation of `autohdr resolve`.
//!
//! Loads the results files, merges them into buckets, rewrites the template
//! and commits the output in one step.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::{AutohdrError, Mode, Result};
use crate::results::{MergedResults, ResultSources};
use crate::template::{Replacements, TemplateProcessor};
use crate::util::config::ResolveManifest;
use crate::util::fs::{read_bytes, write_atomic};

/// Options for resolving one header.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Results files per bucket, in merge order
    pub sources: ResultSources,

    /// Template (config.h.in)
    pub template: PathBuf,

    /// Output header
    pub output: PathBuf,

    /// Search string → file whose content replaces it
    pub inlines: BTreeMap<String, PathBuf>,

    /// Search string → literal replacement
    pub substitutions: BTreeMap<String, String>,

    pub mode: Mode,
}

impl ResolveOptions {
    pub fn new(template: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        ResolveOptions {
            sources: ResultSources::default(),
            template: template.into(),
            output: output.into(),
            inlines: BTreeMap::new(),
            substitutions: BTreeMap::new(),
            mode: Mode::default(),
        }
    }

    /// Build options from a fully merged manifest.
    ///
    /// Fails with `InvalidArgs` when the template or output is missing.
    pub fn from_manifest(manifest: ResolveManifest) -> Result<Self> {
        let template = manifest
            .template
            .ok_or_else(|| AutohdrError::InvalidArgs("--template is required".to_string()))?;
        let output = manifest
            .output
            .ok_or_else(|| AutohdrError::InvalidArgs("--output is required".to_string()))?;

        Ok(ResolveOptions {
            sources: ResultSources {
                cache: manifest.cache_results,
                define: manifest.define_results,
                subst: manifest.subst_results,
            },
            template,
            output,
            inlines: manifest.inlines,
            substitutions: manifest.substitutions,
            mode: manifest.mode.unwrap_or_default(),
        })
    }

    fn replacements(&self) -> Replacements {
        Replacements {
            inlines: self.inlines.clone(),
            substitutions: self.substitutions.clone(),
        }
    }
}

/// Render the header bytes without writing them.
pub fn render_header(opts: &ResolveOptions) -> Result<Vec<u8>> {
    let results = MergedResults::load(&opts.sources)?;
    results.log_define_checks();

    let template = read_bytes(&opts.template)?;
    tracing::debug!(
        "processing {} in {} mode",
        opts.template.display(),
        opts.mode
    );

    TemplateProcessor::new(&results, opts.mode).process(&template, &opts.replacements())
}

/// Render the header and commit it to `opts.output`.
///
/// Nothing is written unless every step succeeds.
pub fn resolve_header(opts: &ResolveOptions) -> Result<()> {
    let content = render_header(opts)?;
    write_atomic(&opts.output, &content)
}
