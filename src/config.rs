//! YAML configuration
//!
//! ```yaml
//! date_separator: "/"
//! duration_rules:
//!   - { unit: 天, unit_new: day, time: 86400000 }
//!   - { unit: 小时, unit_new: hour, time: 3600000 }
//! url_filter:
//!   remove: [token, utm_source]
//! gate:
//!   min_interval_ms: 300
//! cookie:
//!   separator: "||"
//!   use_all: false
//!   allow_old_keys: [Domain]
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::cookie::DecodeOptions;
use crate::date::{default_rules, TransferRule, DATE_SEPARATOR};
use crate::error::UtilError;
use crate::timing_gate::GateOptions;
use crate::url_params::ParamFilter;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UtilsConfig {
    pub date_separator: String,
    pub duration_rules: Vec<TransferRule>,
    pub url_filter: ParamFilter,
    pub gate: GateOptions,
    pub cookie: DecodeOptions,
}

impl Default for UtilsConfig {
    fn default() -> Self {
        Self {
            date_separator: DATE_SEPARATOR.to_string(),
            duration_rules: default_rules().to_vec(),
            url_filter: ParamFilter::default(),
            gate: GateOptions::default(),
            cookie: DecodeOptions::default(),
        }
    }
}

impl UtilsConfig {
    /// Parse and validate; blank input yields the defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, UtilError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, UtilError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn validate(&self) -> Result<(), UtilError> {
        if let Some(index) = self.duration_rules.iter().position(|r| r.unit.is_empty()) {
            return Err(UtilError::EmptyRuleUnit { index });
        }
        if self.cookie.separator.is_empty() {
            return Err(UtilError::InvalidConfig {
                details: "cookie.separator must not be empty".into(),
            });
        }
        Ok(())
    }
}
