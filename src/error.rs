//! Error types with fix suggestions
//!
//! The value, date and URL helpers never fail. Errors only come from the
//! edges: config loading, cookie store writes and delayed gate actions.

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum UtilError {
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Config errors (UTIL-010 to UTIL-011)
    // ─────────────────────────────────────────────────────────────

    #[error("UTIL-010: Invalid config: {details}")]
    InvalidConfig { details: String },

    #[error("UTIL-011: Duration rule #{index} has an empty unit")]
    EmptyRuleUnit { index: usize },

    // ─────────────────────────────────────────────────────────────
    // Host errors (UTIL-020 to UTIL-021)
    // ─────────────────────────────────────────────────────────────

    #[error("UTIL-020: Cookie store rejected '{directive}': {reason}")]
    CookieWrite { directive: String, reason: String },

    #[error("UTIL-021: Delayed gate action did not complete: {0}")]
    GateAction(String),

    // ─────────────────────────────────────────────────────────────
    // CLI errors (UTIL-030)
    // ─────────────────────────────────────────────────────────────

    #[error("UTIL-030: Invalid argument: {details}")]
    InvalidArgument { details: String },
}

impl FixSuggestion for UtilError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            UtilError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
            UtilError::Json(_) => Some("Check JSON syntax (try parsing with jq)"),
            UtilError::Io(_) => Some("Check file path and permissions"),
            UtilError::InvalidConfig { .. } => Some("Compare the config against the documented keys"),
            UtilError::EmptyRuleUnit { .. } => {
                Some("Give every duration rule a non-empty unit, e.g. unit: 天")
            }
            UtilError::CookieWrite { .. } => {
                Some("Cookie directives must start with name=value")
            }
            UtilError::GateAction(_) => {
                Some("Keep the tokio runtime alive until the gate completes, and avoid panics in the action")
            }
            UtilError::InvalidArgument { .. } => Some("Run with --help to see the expected format"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_codes() {
        let err = UtilError::EmptyRuleUnit { index: 2 };
        assert_eq!(err.to_string(), "UTIL-011: Duration rule #2 has an empty unit");

        let err = UtilError::CookieWrite {
            directive: "bad".into(),
            reason: "missing '='".into(),
        };
        assert!(err.to_string().starts_with("UTIL-020"));
    }

    #[test]
    fn every_variant_has_a_suggestion() {
        let errors = [
            UtilError::InvalidConfig { details: "x".into() },
            UtilError::EmptyRuleUnit { index: 0 },
            UtilError::GateAction("cancelled".into()),
            UtilError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
        ];
        for err in errors {
            assert!(err.fix_suggestion().is_some(), "{err}");
        }
    }
}
