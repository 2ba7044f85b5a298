//! Single-pass `@VAR@` substitution.

use std::collections::HashMap;

/// Replace every `@NAME@` span whose `NAME` has a replacement.
///
/// `NAME` must be a C identifier. Spans with unknown names, or that are not
/// identifiers, are left exactly as written.
pub fn replace_substs(content: &[u8], replacements: &HashMap<String, String>) -> Vec<u8> {
    let mut output = Vec::with_capacity(content.len());
    let mut copied = 0;
    let mut search = 0;

    while let Some(offset) = content[search..].iter().position(|&b| b == b'@') {
        let start = search + offset;
        let name_start = start + 1;

        let mut i = name_start;
        if i < content.len() && (content[i].is_ascii_alphabetic() || content[i] == b'_') {
            i += 1;
            while i < content.len() && (content[i].is_ascii_alphanumeric() || content[i] == b'_') {
                i += 1;
            }
        }

        let closed = i > name_start && i < content.len() && content[i] == b'@';
        let value = closed
            .then(|| std::str::from_utf8(&content[name_start..i]).ok())
            .flatten()
            .and_then(|name| replacements.get(name));

        if let Some(value) = value {
            output.extend_from_slice(&content[copied..start]);
            output.extend_from_slice(value.as_bytes());
            copied = i + 1;
            search = i + 1;
        } else {
            search = name_start;
        }
    }

    output.extend_from_slice(&content[copied..]);
    output
}
