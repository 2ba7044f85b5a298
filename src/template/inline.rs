//! Direct and inline text replacement.
//!
//! These run before any other pass, so replacement text can introduce new
//! `#undef` lines or `@VAR@` markers for the later passes to process.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::{AutohdrError, Result};

/// Start offsets of every non-overlapping occurrence of `needle`, left to
/// right.
fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..].starts_with(needle) {
            positions.push(i);
            i += needle.len();
        } else {
            i += 1;
        }
    }
    positions
}

/// Replace every occurrence of each search string with its literal value.
///
/// Search strings are applied in map order. Within one search string the
/// scan is left to right and replacement text is not rescanned.
pub fn apply_direct_substitutions(content: &[u8], substitutions: &BTreeMap<String, String>) -> Vec<u8> {
    let mut content = content.to_vec();
    for (search, replacement) in substitutions {
        if search.is_empty() {
            tracing::warn!("ignoring direct substitution with an empty search string");
            continue;
        }

        let positions = find_all(&content, search.as_bytes());
        if positions.is_empty() {
            continue;
        }

        let mut output = Vec::with_capacity(content.len());
        let mut copied = 0;
        for pos in positions {
            output.extend_from_slice(&content[copied..pos]);
            output.extend_from_slice(replacement.as_bytes());
            copied = pos + search.len();
        }
        output.extend_from_slice(&content[copied..]);
        content = output;
    }
    content
}

/// Replace every occurrence of each search string with a file's content.
///
/// Each file is read once, as raw bytes. Occurrences are found in one
/// forward scan of the text as it was before this search string was applied,
/// then replaced back to front so earlier offsets stay valid.
pub fn apply_inlines(content: &[u8], inlines: &BTreeMap<String, PathBuf>) -> Result<Vec<u8>> {
    let mut content = content.to_vec();

    for (search, path) in inlines {
        if search.is_empty() {
            tracing::warn!(
                "ignoring inline {} with an empty search string",
                path.display()
            );
            continue;
        }

        let replacement = std::fs::read(path).map_err(|source| AutohdrError::InlineUnreadable {
            search: search.clone(),
            path: path.clone(),
            source,
        })?;

        let positions = find_all(&content, search.as_bytes());
        tracing::debug!(
            "inlining {} at {} location(s) for `{}`",
            path.display(),
            positions.len(),
            search
        );

        for pos in positions.into_iter().rev() {
            content.splice(pos..pos + search.len(), replacement.iter().copied());
        }
    }

    Ok(content)
}
