//! Implementation of `autohdr wrap`.
//!
//! Copies source files, disabling each one with `#if 0` unless the result it
//! is tied to is truthy.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::{AutohdrError, CheckResult, Result};
use crate::results::load_results_file;
use crate::template::format_for_subst;
use crate::util::fs::{read_bytes, write_atomic};

/// One `<in>=<DEFINE>=<out>` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMapping {
    pub input: PathBuf,
    pub define: String,
    pub output: PathBuf,
}

impl FromStr for SourceMapping {
    type Err = AutohdrError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            AutohdrError::InvalidArgs(format!(
                "--src value must be of the form <in>=<DEFINE>=<out>, got: {}",
                s
            ))
        };

        let (input, rest) = s.split_once('=').ok_or_else(invalid)?;
        let (define, output) = rest.split_once('=').ok_or_else(invalid)?;
        if input.is_empty() || define.is_empty() || output.is_empty() {
            return Err(invalid());
        }

        Ok(SourceMapping {
            input: PathBuf::from(input),
            define: define.to_string(),
            output: PathBuf::from(output),
        })
    }
}

/// Options for `autohdr wrap`.
#[derive(Debug, Clone, Default)]
pub struct WrapOptions {
    /// Results files; later files override earlier ones
    pub results: Vec<PathBuf>,
    pub sources: Vec<SourceMapping>,
}

/// Load results files into one lookup, last occurrence of a name winning.
pub fn load_wrap_results<P: AsRef<Path>>(paths: &[P]) -> Result<HashMap<String, CheckResult>> {
    let mut merged = HashMap::new();
    for path in paths {
        for result in load_results_file(path.as_ref())? {
            merged.insert(result.name.clone(), result);
        }
    }
    Ok(merged)
}

/// `success` plus a value that is neither empty nor `0`.
pub fn is_truthy(result: &CheckResult) -> bool {
    if !result.success {
        return false;
    }
    let value = format_for_subst(result.value.as_deref().unwrap_or(""));
    !value.is_empty() && value != "0"
}

/// Source bytes for one file, disabled when `enabled` is false.
pub fn wrap_content(content: &[u8], enabled: bool) -> Vec<u8> {
    if enabled {
        return content.to_vec();
    }

    let mut out = Vec::with_capacity(content.len() + 16);
    out.extend_from_slice(b"#if 0\n");
    out.extend_from_slice(content);
    if !content.is_empty() && !content.ends_with(b"\n") {
        out.push(b'\n');
    }
    out.extend_from_slice(b"#endif\n");
    out
}

/// Write every wrapped source.
pub fn wrap_sources(opts: &WrapOptions) -> Result<()> {
    if opts.results.is_empty() {
        return Err(AutohdrError::InvalidArgs(
            "at least one --results file is required".to_string(),
        ));
    }

    let results = load_wrap_results(&opts.results)?;

    for mapping in &opts.sources {
        let enabled = results.get(&mapping.define).is_some_and(is_truthy);
        tracing::debug!(
            "{} -> {} ({} {})",
            mapping.input.display(),
            mapping.output.display(),
            mapping.define,
            if enabled { "enabled" } else { "disabled" }
        );

        let content = read_bytes(&mapping.input)?;
        write_atomic(&mapping.output, &wrap_content(&content, enabled))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_mapping() {
        let m: SourceMapping = "src/a.c=HAVE_A=out/a.c".parse().unwrap();
        assert_eq!(m.input, PathBuf::from("src/a.c"));
        assert_eq!(m.define, "HAVE_A");
        assert_eq!(m.output, PathBuf::from("out/a.c"));

        // the output may itself contain '='
        let m: SourceMapping = "a=B=c=d".parse().unwrap();
        assert_eq!(m.output, PathBuf::from("c=d"));
    }

    #[test]
    fn test_parse_mapping_rejects_bad_shapes() {
        for bad in ["a.c", "a.c=HAVE_A", "=HAVE_A=out", "a==out", "a=HAVE_A="] {
            let err = bad.parse::<SourceMapping>().unwrap_err();
            assert!(matches!(err, AutohdrError::InvalidArgs(_)), "{}", bad);
        }
    }

    #[test]
    fn test_truthiness() {
        let r = |value: Option<&str>, success| CheckResult::new("X", value.map(str::to_string), success);
        assert!(is_truthy(&r(Some("1"), true)));
        assert!(is_truthy(&r(Some("\"yes\""), true)));
        assert!(!is_truthy(&r(Some("1"), false)));
        assert!(!is_truthy(&r(Some("0"), true)));
        assert!(!is_truthy(&r(Some("\"0\""), true)));
        assert!(!is_truthy(&r(Some(""), true)));
        assert!(!is_truthy(&r(None, true)));
    }

    #[test]
    fn test_wrap_content() {
        assert_eq!(wrap_content(b"int x;\n", true), b"int x;\n");
        assert_eq!(wrap_content(b"int x;\n", false), b"#if 0\nint x;\n#endif\n");
        assert_eq!(wrap_content(b"int x;", false), b"#if 0\nint x;\n#endif\n");
        assert_eq!(wrap_content(b"", false), b"#if 0\n#endif\n");
        assert_eq!(
            wrap_content(b"/* Jos\xE9 */", false),
            b"#if 0\n/* Jos\xE9 */\n#endif\n"
        );
    }

    #[test]
    fn test_later_results_win() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.json");
        let b = tmp.path().join("b.json");
        fs::write(&a, r#"{"HAVE_A": {"success": false}}"#).unwrap();
        fs::write(&b, r#"{"HAVE_A": {"success": true, "value": "1"}}"#).unwrap();

        let merged = load_wrap_results(&[a, b]).unwrap();
        assert!(is_truthy(&merged["HAVE_A"]));
    }

    #[test]
    fn test_wrap_sources() {
        let tmp = TempDir::new().unwrap();
        let results = tmp.path().join("results.json");
        fs::write(
            &results,
            r#"{"HAVE_A": {"success": true, "value": "1"}, "HAVE_B": {"success": true, "value": "0"}}"#,
        )
        .unwrap();
        for name in ["a.c", "b.c", "c.c"] {
            fs::write(tmp.path().join(name), "int f(void);\n").unwrap();
        }

        let mapping = |input: &str, define: &str, output: &str| SourceMapping {
            input: tmp.path().join(input),
            define: define.to_string(),
            output: tmp.path().join("out").join(output),
        };
        let opts = WrapOptions {
            results: vec![results],
            sources: vec![
                mapping("a.c", "HAVE_A", "a.c"),
                mapping("b.c", "HAVE_B", "b.c"),
                mapping("c.c", "HAVE_C", "c.c"),
            ],
        };
        wrap_sources(&opts).unwrap();

        let out = tmp.path().join("out");
        assert_eq!(fs::read_to_string(out.join("a.c")).unwrap(), "int f(void);\n");
        assert_eq!(
            fs::read_to_string(out.join("b.c")).unwrap(),
            "#if 0\nint f(void);\n#endif\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("c.c")).unwrap(),
            "#if 0\nint f(void);\n#endif\n"
        );
    }

    #[test]
    fn test_wrap_requires_results() {
        let err = wrap_sources(&WrapOptions::default()).unwrap_err();
        assert!(matches!(err, AutohdrError::InvalidArgs(_)));
    }
}
