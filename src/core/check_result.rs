//! Check results produced by compiler/feature probes.
//!
//! A `CheckResult` is the in-memory form of one entry of a results JSON file:
//!
//! ```json
//! {
//!     "ac_cv_func_printf": {
//!         "success": true,
//!         "value": "1",
//!         "define": "HAVE_PRINTF",
//!         "type": "function"
//!     }
//! }
//! ```
//!
//! Values are kept JSON-encoded so that the formatter can tell a string
//! `"1"` apart from the number `1` when rendering.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kind of probe that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    Function,
    Lib,
    Type,
    Compile,
    Link,
    /// AC_DEFINE (default)
    #[default]
    Define,
    /// AC_SUBST style variable, never emitted as a define by itself.
    #[serde(alias = "subst")]
    M4Variable,
    Sizeof,
    Alignof,
    ComputeInt,
    Endian,
    Decl,
    Member,
}

impl CheckType {
    /// Parse a type tag as written by the checker. Unknown tags are `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let ty = match tag {
            "function" => CheckType::Function,
            "lib" => CheckType::Lib,
            "type" => CheckType::Type,
            "compile" => CheckType::Compile,
            "link" => CheckType::Link,
            "define" => CheckType::Define,
            "subst" | "m4_variable" => CheckType::M4Variable,
            "sizeof" => CheckType::Sizeof,
            "alignof" => CheckType::Alignof,
            "compute_int" => CheckType::ComputeInt,
            "endian" => CheckType::Endian,
            "decl" => CheckType::Decl,
            "member" => CheckType::Member,
            _ => return None,
        };
        Some(ty)
    }

    /// The tag written back into results JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckType::Function => "function",
            CheckType::Lib => "lib",
            CheckType::Type => "type",
            CheckType::Compile => "compile",
            CheckType::Link => "link",
            CheckType::Define => "define",
            CheckType::M4Variable => "m4_variable",
            CheckType::Sizeof => "sizeof",
            CheckType::Alignof => "alignof",
            CheckType::ComputeInt => "compute_int",
            CheckType::Endian => "endian",
            CheckType::Decl => "decl",
            CheckType::Member => "member",
        }
    }

    /// Whether a failed check of this type may still produce a `#define`
    /// when it carries a value (AC_DEFINE / AC_CHECK_DECL semantics).
    pub fn defines_on_value(&self) -> bool {
        matches!(self, CheckType::Define | CheckType::Decl)
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `(success, value)` pair used to compare duplicate results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub value: Option<String>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "success={}, value=\"{}\"",
            self.success,
            self.value.as_deref().unwrap_or("")
        )
    }
}

/// One named probe outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Cache variable name (e.g. `ac_cv_func_printf`)
    pub name: String,

    /// Define name override (e.g. `HAVE_PRINTF`)
    pub define: Option<String>,

    /// Subst name override
    pub subst: Option<String>,

    /// JSON-encoded value. `None` means no value was produced, `Some("")`
    /// means the value was explicitly set to empty.
    pub value: Option<String>,

    pub success: bool,

    pub is_define: bool,

    pub is_subst: bool,

    pub check_type: CheckType,

    /// AC_DEFINE_UNQUOTED
    pub unquote: bool,
}

impl CheckResult {
    /// Create a define-type result with no overrides.
    pub fn new(name: impl Into<String>, value: Option<String>, success: bool) -> Self {
        CheckResult {
            name: name.into(),
            define: None,
            subst: None,
            value,
            success,
            is_define: true,
            is_subst: false,
            check_type: CheckType::Define,
            unquote: false,
        }
    }

    pub fn with_define(mut self, define: impl Into<String>) -> Self {
        self.define = Some(define.into());
        self.is_define = true;
        self
    }

    pub fn with_subst(mut self, subst: impl Into<String>) -> Self {
        self.subst = Some(subst.into());
        self.is_subst = true;
        self
    }

    pub fn with_type(mut self, check_type: CheckType) -> Self {
        self.check_type = check_type;
        self
    }

    pub fn with_unquote(mut self, unquote: bool) -> Self {
        self.unquote = unquote;
        self
    }

    /// Key used when this result is rendered as a `#define`.
    pub fn define_key(&self) -> &str {
        self.define.as_deref().unwrap_or(&self.name)
    }

    /// Key used when this result replaces `@NAME@` markers.
    pub fn subst_key(&self) -> &str {
        self.subst.as_deref().unwrap_or(&self.name)
    }

    pub fn outcome(&self) -> Outcome {
        Outcome {
            success: self.success,
            value: self.value.clone(),
        }
    }

    /// Value with a non-empty payload, if any.
    pub fn non_empty_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    /// Parse a result from its JSON object.
    ///
    /// Returns `None` when the object lacks a boolean `success` field.
    /// Several older field spellings are still accepted: `has_value`,
    /// `define_flag`/`subst_flag` and boolean `define`/`subst`.
    pub fn from_json(name: &str, json: &Value) -> Option<Self> {
        let obj = json.as_object()?;
        let success = obj.get("success")?.as_bool()?;

        let legacy_has_value = obj.get("has_value").and_then(Value::as_bool);

        let value = match obj.get("value") {
            None => None,
            Some(Value::Null) => legacy_has_value.filter(|v| *v).map(|_| String::new()),
            Some(Value::String(s)) if s.is_empty() => match legacy_has_value {
                Some(true) | None => Some(String::new()),
                Some(false) => None,
            },
            Some(other) => Some(other.to_string()),
        };

        let mut is_define = flag(obj, &["is_define", "define_flag", "define"]);
        let mut is_subst = flag(obj, &["is_subst", "subst_flag", "subst"]);

        let check_type = obj
            .get("type")
            .and_then(Value::as_str)
            .and_then(CheckType::from_tag)
            .unwrap_or_default();

        let define = obj.get("define").and_then(Value::as_str).map(str::to_string);
        if define.is_some() && !obj.contains_key("is_define") {
            is_define = true;
        }

        let subst = obj.get("subst").and_then(Value::as_str).map(str::to_string);
        if subst.is_some() && !obj.contains_key("is_subst") {
            is_subst = true;
        }

        let unquote = obj.get("unquote").and_then(Value::as_bool).unwrap_or(false);

        Some(CheckResult {
            name: name.to_string(),
            define,
            subst,
            value,
            success,
            is_define,
            is_subst,
            check_type,
            unquote,
        })
    }

    /// Serialize back into the results-file object shape.
    ///
    /// JSON-encoded values are decoded so the file holds the plain value,
    /// which `from_json` will encode again on the way back in.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();

        let value = match self.value.as_deref() {
            None => Value::Null,
            Some("") => Value::String(String::new()),
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
        };
        obj.insert("value".to_string(), value);
        obj.insert("success".to_string(), Value::Bool(self.success));
        obj.insert("is_define".to_string(), Value::Bool(self.is_define));
        obj.insert("is_subst".to_string(), Value::Bool(self.is_subst));
        obj.insert(
            "type".to_string(),
            Value::String(self.check_type.as_str().to_string()),
        );
        if let Some(ref define) = self.define {
            obj.insert("define".to_string(), Value::String(define.clone()));
        }
        if let Some(ref subst) = self.subst {
            obj.insert("subst".to_string(), Value::String(subst.clone()));
        }
        obj.insert("unquote".to_string(), Value::Bool(self.unquote));

        Value::Object(obj)
    }
}

/// First boolean found under any of `keys`, in order.
fn flag(obj: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_bool))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requires_boolean_success() {
        assert!(CheckResult::from_json("x", &json!({"value": "1"})).is_none());
        assert!(CheckResult::from_json("x", &json!({"success": "yes"})).is_none());
        assert!(CheckResult::from_json("x", &json!([1, 2])).is_none());
    }

    #[test]
    fn test_string_values_stay_json_encoded() {
        let r = CheckResult::from_json("x", &json!({"success": true, "value": "1"})).unwrap();
        assert_eq!(r.value.as_deref(), Some("\"1\""));

        let r = CheckResult::from_json("x", &json!({"success": true, "value": 1})).unwrap();
        assert_eq!(r.value.as_deref(), Some("1"));

        let r = CheckResult::from_json("x", &json!({"success": true, "value": false})).unwrap();
        assert_eq!(r.value.as_deref(), Some("false"));
    }

    #[test]
    fn test_null_and_empty_values() {
        let r = CheckResult::from_json("x", &json!({"success": false, "value": null})).unwrap();
        assert_eq!(r.value, None);

        let r = CheckResult::from_json("x", &json!({"success": true, "value": ""})).unwrap();
        assert_eq!(r.value.as_deref(), Some(""));

        let r = CheckResult::from_json("x", &json!({"success": true})).unwrap();
        assert_eq!(r.value, None);
    }

    #[test]
    fn test_legacy_has_value() {
        let r = CheckResult::from_json(
            "x",
            &json!({"success": true, "value": null, "has_value": true}),
        )
        .unwrap();
        assert_eq!(r.value.as_deref(), Some(""));

        let r = CheckResult::from_json(
            "x",
            &json!({"success": true, "value": "", "has_value": false}),
        )
        .unwrap();
        assert_eq!(r.value, None);
    }

    #[test]
    fn test_override_names_imply_flags() {
        let r = CheckResult::from_json(
            "ac_cv_func_printf",
            &json!({"success": true, "define": "HAVE_PRINTF", "subst": "PRINTF"}),
        )
        .unwrap();
        assert!(r.is_define);
        assert!(r.is_subst);
        assert_eq!(r.define_key(), "HAVE_PRINTF");
        assert_eq!(r.subst_key(), "PRINTF");

        let r = CheckResult::from_json(
            "x",
            &json!({"success": true, "define": "HAVE_X", "is_define": false}),
        )
        .unwrap();
        assert!(!r.is_define);
        assert_eq!(r.define_key(), "HAVE_X");
    }

    #[test]
    fn test_boolean_flag_spellings() {
        let r = CheckResult::from_json("x", &json!({"success": true, "define_flag": true})).unwrap();
        assert!(r.is_define);
        assert_eq!(r.define_key(), "x");

        let r = CheckResult::from_json("x", &json!({"success": true, "subst": true})).unwrap();
        assert!(r.is_subst);
        assert_eq!(r.subst, None);
    }

    #[test]
    fn test_type_tags() {
        let r = CheckResult::from_json("x", &json!({"success": true, "type": "decl"})).unwrap();
        assert_eq!(r.check_type, CheckType::Decl);

        let r = CheckResult::from_json("x", &json!({"success": true, "type": "subst"})).unwrap();
        assert_eq!(r.check_type, CheckType::M4Variable);

        let r = CheckResult::from_json("x", &json!({"success": true, "type": "bogus"})).unwrap();
        assert_eq!(r.check_type, CheckType::Define);
    }

    #[test]
    fn test_to_json_decodes_value() {
        let r = CheckResult::new("restrict", Some("\"__restrict__\"".to_string()), true)
            .with_define("restrict")
            .with_type(CheckType::Compile)
            .with_unquote(true);
        let json = r.to_json();
        assert_eq!(json["value"], json!("__restrict__"));
        assert_eq!(json["type"], json!("compile"));
        assert_eq!(json["define"], json!("restrict"));
        assert_eq!(json["unquote"], json!(true));

        let back = CheckResult::from_json("restrict", &json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_outcome_display() {
        let r = CheckResult::new("HAVE_FOO", Some("1".to_string()), true);
        assert_eq!(r.outcome().to_string(), "success=true, value=\"1\"");
        let r = CheckResult::new("HAVE_FOO", None, false);
        assert_eq!(r.outcome().to_string(), "success=false, value=\"\"");
    }
}
