//! Single-pass `#undef` rewriting.
//!
//! Recognizes `#` + optional horizontal whitespace + `undef` + whitespace +
//! a C identifier + one or more newlines, and dispatches on the identifier
//! through a hash map. The cost is linear in the template size no matter how
//! many defines are known.

use std::collections::HashMap;

/// What to do with a recognized `#undef NAME` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndefAction {
    /// Replace with this `#define ...` text (without trailing newline).
    Define(String),
    /// Rewrite as `/* #undef NAME */`.
    Comment,
}

/// Handling for `#undef` lines whose name has no action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmatched {
    Comment,
    Keep,
}

/// A parsed `#undef` occurrence.
#[derive(Debug, PartialEq, Eq)]
struct UndefLine<'a> {
    /// Whitespace between `#` and `undef`
    spacing: &'a [u8],
    name: &'a str,
    newlines: &'a [u8],
    /// Byte offset just past the trailing newlines
    end: usize,
}

fn is_hspace(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Try to parse an `#undef` line starting at the `#` at `pos`.
fn parse_undef_at(content: &[u8], pos: usize) -> Option<UndefLine<'_>> {
    let len = content.len();
    let mut i = pos + 1;

    let spacing_start = i;
    while i < len && is_hspace(content[i]) {
        i += 1;
    }
    let spacing = &content[spacing_start..i];

    if !content[i..].starts_with(b"undef") {
        return None;
    }
    i += 5;

    if i >= len || !is_hspace(content[i]) {
        return None;
    }
    while i < len && is_hspace(content[i]) {
        i += 1;
    }

    if i >= len || !is_ident_start(content[i]) {
        return None;
    }
    let name_start = i;
    while i < len && is_ident_continue(content[i]) {
        i += 1;
    }
    // identifier bytes are ASCII
    let name = std::str::from_utf8(&content[name_start..i]).ok()?;

    let newlines_start = i;
    while i < len && content[i] == b'\n' {
        i += 1;
    }
    if i == newlines_start {
        return None;
    }

    Some(UndefLine {
        spacing,
        name,
        newlines: &content[newlines_start..i],
        end: i,
    })
}

/// Rewrite every recognized `#undef` line in one pass.
///
/// Known names get their action; unknown names are commented out or kept
/// depending on `unmatched`. The `#`-to-`undef` spacing and all trailing
/// newlines of the original line are preserved. Bytes outside recognized
/// lines are copied unchanged, so the content need not be UTF-8.
pub fn replace_undefs(
    content: &[u8],
    actions: &HashMap<String, UndefAction>,
    unmatched: Unmatched,
) -> Vec<u8> {
    let mut output = Vec::with_capacity(content.len());
    let mut copied = 0;
    let mut search = 0;

    while let Some(offset) = content[search..].iter().position(|&b| b == b'#') {
        let pos = search + offset;

        let Some(line) = parse_undef_at(content, pos) else {
            search = pos + 1;
            continue;
        };

        output.extend_from_slice(&content[copied..pos]);

        match actions.get(line.name) {
            Some(UndefAction::Define(text)) => match text.strip_prefix('#') {
                Some(rest) => {
                    output.push(b'#');
                    output.extend_from_slice(line.spacing);
                    output.extend_from_slice(rest.as_bytes());
                }
                None => output.extend_from_slice(text.as_bytes()),
            },
            Some(UndefAction::Comment) => push_comment(&mut output, &line),
            None => match unmatched {
                Unmatched::Comment => push_comment(&mut output, &line),
                Unmatched::Keep => {
                    let newlines_start = line.end - line.newlines.len();
                    output.extend_from_slice(&content[pos..newlines_start]);
                }
            },
        }
        output.extend_from_slice(line.newlines);

        copied = line.end;
        search = line.end;
    }

    output.extend_from_slice(&content[copied..]);
    output
}

fn push_comment(output: &mut Vec<u8>, line: &UndefLine<'_>) {
    output.extend_from_slice(b"/* #");
    output.extend_from_slice(line.spacing);
    output.extend_from_slice(b"undef ");
    output.extend_from_slice(line.name.as_bytes());
    output.extend_from_slice(b" */");
}
