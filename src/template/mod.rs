//! Template processing.
//!
//! Turns a `config.h.in` style template into final text. The pipeline runs in
//! a fixed order, each stage a function from text to text:
//!
//! 1. Direct substitutions and inlines (always)
//! 2. `#undef` → `#define` rewriting (`defines` and `all` modes)
//! 3. `@VAR@` substitution (`subst` and `all` modes)
//! 4. Commenting out `#undef` lines for known defines (`subst` mode only)
//! 5. End-of-file normalization (always)
//!
//! Text introduced by stage 1 is seen by every later stage; no stage is
//! repeated.

pub mod format;
pub mod inline;
pub mod normalize;
pub mod subst;
pub mod undef;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use crate::core::{CheckResult, Mode, Result};
use crate::results::MergedResults;

pub use format::{format_for_define, format_for_subst};
pub use undef::{UndefAction, Unmatched};

/// Package metadata keys that get a `#define` even without a result.
pub const BUILTINS: [&str; 6] = [
    "PACKAGE_NAME",
    "PACKAGE_VERSION",
    "PACKAGE_STRING",
    "PACKAGE_BUGREPORT",
    "PACKAGE_URL",
    "PACKAGE_TARNAME",
];

/// Read-only view over the merged results, built once per rewrite.
#[derive(Debug)]
pub struct ProcessedData<'a> {
    /// Every effective key → its result. Define results shadow subst
    /// results, which shadow cache results.
    results_by_key: BTreeMap<&'a str, &'a CheckResult>,
    /// Define key → stored value (`""` when absent)
    define_values: BTreeMap<&'a str, &'a str>,
    /// Subst key → stored value (`""` when absent)
    subst_values: BTreeMap<&'a str, &'a str>,
    /// Builtins not claimed by any define or subst result
    builtins: BTreeSet<&'static str>,
}

impl<'a> ProcessedData<'a> {
    pub fn build(results: &'a MergedResults) -> Self {
        let mut results_by_key = BTreeMap::new();
        let mut define_values = BTreeMap::new();
        let mut subst_values = BTreeMap::new();

        for result in results.cache.iter() {
            results_by_key.insert(result.name.as_str(), result);
        }
        for result in results.subst.iter() {
            let key = result.subst_key();
            results_by_key.insert(key, result);
            subst_values.insert(key, result.value.as_deref().unwrap_or(""));
        }
        for result in results.define.iter() {
            let key = result.define_key();
            results_by_key.insert(key, result);
            define_values.insert(key, result.value.as_deref().unwrap_or(""));
        }

        let builtins = BUILTINS
            .iter()
            .copied()
            .filter(|b| !define_values.contains_key(b) && !subst_values.contains_key(b))
            .collect();

        ProcessedData {
            results_by_key,
            define_values,
            subst_values,
            builtins,
        }
    }

    /// Look up a result by any effective key.
    pub fn result(&self, key: &str) -> Option<&'a CheckResult> {
        self.results_by_key.get(key).copied()
    }

    /// Every define key, in sorted order.
    pub fn define_keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.define_values.keys().copied()
    }

    pub fn define_value(&self, key: &str) -> Option<&'a str> {
        self.define_values.get(key).copied()
    }

    pub fn subst_value(&self, key: &str) -> Option<&'a str> {
        self.subst_values.get(key).copied()
    }

    /// Builtins still pending a synthesized define.
    pub fn builtins(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builtins.iter().copied()
    }
}

/// Decide how a define result rewrites its `#undef` line.
pub fn define_action(result: &CheckResult) -> UndefAction {
    let emit = if result.check_type.defines_on_value() {
        result.success || result.value.is_some()
    } else {
        result.success && result.non_empty_value().is_some()
    };

    if !emit {
        return UndefAction::Comment;
    }

    let mut line = format!("#define {}", result.define_key());
    match result.non_empty_value() {
        Some(value) => {
            line.push(' ');
            line.push_str(&format_for_define(value));
        }
        None if result.unquote => line.push(' '),
        None => line.push_str(" /**/"),
    }
    UndefAction::Define(line)
}

/// Externally supplied pre-pass replacements.
#[derive(Debug, Clone, Default)]
pub struct Replacements {
    /// Search string → file whose full content replaces it
    pub inlines: BTreeMap<String, PathBuf>,
    /// Search string → literal text
    pub substitutions: BTreeMap<String, String>,
}

/// Runs the template pipeline against one set of merged results.
pub struct TemplateProcessor<'a> {
    results: &'a MergedResults,
    mode: Mode,
}

impl<'a> TemplateProcessor<'a> {
    pub fn new(results: &'a MergedResults, mode: Mode) -> Self {
        TemplateProcessor { results, mode }
    }

    /// Produce the final text for `template`.
    ///
    /// The output ends with a newline only if the template did. The template is treated as bytes; only the `#undef` and `@VAR@`
    /// syntax needs to be ASCII.
    pub fn process(&self, template: &[u8], replacements: &Replacements) -> Result<Vec<u8>> {
        let data = ProcessedData::build(self.results);

        let content = inline::apply_direct_substitutions(template, &replacements.substitutions);
        let mut content = inline::apply_inlines(&content, &replacements.inlines)?;

        if self.mode.runs_defines() {
            content = self.replace_defines(&content, &data);
        }
        if self.mode.runs_subst() {
            content = self.replace_substs(&content, &data);
        }
        if self.mode == Mode::Subst {
            content = self.comment_define_undefs(&content);
        }

        let content = normalize::strip_trailing_whitespace(&content);
        Ok(normalize::match_trailing_newline(template, content))
    }

    /// Rewrite `#undef` lines; names without a result are commented out.
    pub fn replace_defines(&self, content: &[u8], data: &ProcessedData<'_>) -> Vec<u8> {
        let mut actions: HashMap<String, UndefAction> = data
            .define_keys()
            .filter_map(|key| data.result(key).map(|r| (key.to_string(), define_action(r))))
            .collect();

        for builtin in data.builtins() {
            let value = data.define_value(builtin).unwrap_or("");
            let line = if value.is_empty() {
                format!("#define {} \"\"", builtin)
            } else {
                format!("#define {} {}", builtin, format_for_define(value))
            };
            actions.insert(builtin.to_string(), UndefAction::Define(line));
        }

        tracing::debug!("rewriting #undef lines with {} known defines", actions.len());
        undef::replace_undefs(content, &actions, Unmatched::Comment)
    }

    /// Replace `@NAME@` markers for every subst result.
    pub fn replace_substs(&self, content: &[u8], data: &ProcessedData<'_>) -> Vec<u8> {
        let replacements: HashMap<String, String> = self
            .results
            .subst
            .iter()
            .map(|r| {
                let key = r.subst_key();
                let value = data.subst_value(key).unwrap_or("");
                (key.to_string(), format_for_subst(value))
            })
            .collect();

        tracing::debug!("substituting {} @VAR@ markers", replacements.len());
        subst::replace_substs(content, &replacements)
    }

    /// Comment out `#undef` lines for every known define, leaving others.
    pub fn comment_define_undefs(&self, content: &[u8]) -> Vec<u8> {
        let actions: HashMap<String, UndefAction> = self
            .results
            .define
            .keys()
            .map(|key| (key.to_string(), UndefAction::Comment))
            .collect();

        undef::replace_undefs(content, &actions, Unmatched::Keep)
    }
}
