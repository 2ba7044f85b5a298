//! Value formatting for `#define` and `@VAR@` contexts.
//!
//! Stored values are JSON-encoded scalars. Both entry points try to decode
//! the value first and fall back to the raw text when it is not valid JSON.

use serde_json::Value;

/// Render a stored value as the body of a `#define`.
///
/// - number: canonical numeral, unquoted
/// - boolean: `true` / `false`
/// - string: the unescaped content, no quotes added
/// - null: empty
/// - not JSON: the raw text
pub fn format_for_define(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    match serde_json::from_str::<Value>(value) {
        Ok(Value::Number(n)) => n.to_string(),
        Ok(Value::Bool(b)) => b.to_string(),
        Ok(Value::String(s)) => s,
        Ok(Value::Null) => String::new(),
        Ok(other) => other.to_string(),
        Err(_) => {
            if is_decimal_literal(value) {
                tracing::trace!("define value `{}` is already a numeral", value);
            }
            value.to_string()
        }
    }
}

/// Render a stored value as the replacement for an `@VAR@` marker.
///
/// Strings are unescaped, null is empty, any other JSON scalar renders as
/// its JSON text and non-JSON passes through unchanged.
pub fn format_for_subst(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    match serde_json::from_str::<Value>(value) {
        Ok(Value::String(s)) => s,
        Ok(Value::Null) => String::new(),
        Ok(other) => other.to_string(),
        Err(_) => value.to_string(),
    }
}

/// An optionally signed run of digits with at most one interior `.`.
pub fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut has_digit = false;
    let mut has_dot = false;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' => has_digit = true,
            b'.' if !has_dot && i > 0 && i + 1 < bytes.len() => has_dot = true,
            b'-' | b'+' if i == 0 => {}
            _ => return false,
        }
    }

    has_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_numbers_and_bools() {
        assert_eq!(format_for_define("1"), "1");
        assert_eq!(format_for_define("2025"), "2025");
        assert_eq!(format_for_define("-8"), "-8");
        assert_eq!(format_for_define("true"), "true");
        assert_eq!(format_for_define("false"), "false");
    }

    #[test]
    fn test_define_strings_are_unquoted_once() {
        // "1" as a JSON string renders without quotes
        assert_eq!(format_for_define("\"1\""), "1");
        // a string that itself contains quotes keeps them
        assert_eq!(format_for_define(r#""\"GNU sed\"""#), "\"GNU sed\"");
        assert_eq!(format_for_define("\"\""), "");
    }

    #[test]
    fn test_define_null_and_empty() {
        assert_eq!(format_for_define("null"), "");
        assert_eq!(format_for_define(""), "");
    }

    #[test]
    fn test_define_raw_fallback() {
        assert_eq!(format_for_define("unsigned int"), "unsigned int");
        assert_eq!(format_for_define("1.2.3"), "1.2.3");
        assert_eq!(format_for_define("__restrict"), "__restrict");
    }

    #[test]
    fn test_subst_formatting() {
        assert_eq!(format_for_subst("\"bar\""), "bar");
        assert_eq!(format_for_subst("null"), "");
        assert_eq!(format_for_subst("42"), "42");
        assert_eq!(format_for_subst("true"), "true");
        assert_eq!(format_for_subst("-lm -lpthread"), "-lm -lpthread");
        assert_eq!(format_for_subst(""), "");
    }

    #[test]
    fn test_decimal_literal() {
        assert!(is_decimal_literal("42"));
        assert!(is_decimal_literal("-1"));
        assert!(is_decimal_literal("+3.14"));
        assert!(!is_decimal_literal("3."));
        assert!(!is_decimal_literal(".5"));
        assert!(!is_decimal_literal("1.2.3"));
        assert!(!is_decimal_literal("-"));
        assert!(!is_decimal_literal("0x10"));
        assert!(!is_decimal_literal(""));
    }
}
