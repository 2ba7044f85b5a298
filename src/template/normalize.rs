//! End-of-file normalization.

/// Strip trailing horizontal whitespace from every line.
///
/// Lines of the form `#define NAME /**/` or `#define NAME` followed only by
/// whitespace mark intentionally empty values and are kept byte for byte.
/// Lines are re-joined with `\n`; a final newline is kept only if `content`
/// ended with one.
pub fn strip_trailing_whitespace(content: &[u8]) -> Vec<u8> {
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    let mut output = Vec::with_capacity(content.len());

    if !content.is_empty() {
        for (i, line) in body.split(|&b| b == b'\n').enumerate() {
            if i > 0 {
                output.push(b'\n');
            }
            if is_empty_define(line) {
                output.extend_from_slice(line);
            } else {
                output.extend_from_slice(trim_end_hspace(line));
            }
        }
    }

    if content.ends_with(b"\n") {
        output.push(b'\n');
    }
    output
}

/// Drop every trailing newline when the template did not end with one.
pub fn match_trailing_newline(template: &[u8], mut content: Vec<u8>) -> Vec<u8> {
    if !template.ends_with(b"\n") {
        while content.last() == Some(&b'\n') {
            content.pop();
        }
    }
    content
}

fn trim_end_hspace(line: &[u8]) -> &[u8] {
    let len = line
        .iter()
        .rposition(|&b| b != b' ' && b != b'\t')
        .map_or(0, |i| i + 1);
    &line[..len]
}

/// `#define NAME /**/` or `#define NAME<whitespace>`.
fn is_empty_define(line: &[u8]) -> bool {
    let Some(rest) = line.strip_prefix(b"#define ") else {
        return false;
    };
    let skip = rest.iter().take_while(|&&b| b == b' ').count();
    let rest = &rest[skip..];

    if rest.is_empty() || !(rest[0].is_ascii_alphabetic() || rest[0] == b'_') {
        return false;
    }
    let name_len = rest
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_'))
        .unwrap_or(rest.len());

    let suffix = &rest[name_len..];
    !suffix.is_empty() && (suffix == b" /**/" || suffix.iter().all(|&b| b == b' ' || b == b'\t'))
}
