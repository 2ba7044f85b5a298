//! Template processing mode.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which template passes run for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// `#undef` → `#define` rewriting only (config.h)
    #[default]
    Defines,
    /// `@VAR@` substitution only
    Subst,
    /// Both passes
    All,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Defines => "defines",
            Mode::Subst => "subst",
            Mode::All => "all",
        }
    }

    pub fn runs_defines(&self) -> bool {
        matches!(self, Mode::Defines | Mode::All)
    }

    pub fn runs_subst(&self) -> bool {
        matches!(self, Mode::Subst | Mode::All)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "defines" => Ok(Mode::Defines),
            "subst" => Ok(Mode::Subst),
            "all" => Ok(Mode::All),
            _ => Err(ModeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid mode string.
#[derive(Debug, Clone)]
pub struct ModeParseError(pub String);

impl fmt::Display for ModeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid mode '{}', valid values: defines, subst, all",
            self.0
        )
    }
}

impl std::error::Error for ModeParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!("defines".parse::<Mode>().unwrap(), Mode::Defines);
        assert_eq!("subst".parse::<Mode>().unwrap(), Mode::Subst);
        assert_eq!("all".parse::<Mode>().unwrap(), Mode::All);
        assert!("Defines".parse::<Mode>().is_err());
    }

    #[test]
    fn test_passes() {
        assert!(Mode::Defines.runs_defines() && !Mode::Defines.runs_subst());
        assert!(!Mode::Subst.runs_defines() && Mode::Subst.runs_subst());
        assert!(Mode::All.runs_defines() && Mode::All.runs_subst());
    }
}
