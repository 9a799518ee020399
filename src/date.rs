//! Date string helpers
//!
//! - `arr_to_string`: `[2024, 1, 5]` → `"2024-01-05"`
//! - `parse_duration`: `"1天2小时"` + rules → units, `"1day2hour"`, total ms

use std::fmt::Display;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default separator for `arr_to_string`
pub const DATE_SEPARATOR: &str = "-";

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// How to recognize and convert one duration unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRule {
    /// Unit as it appears in the input, e.g. `天`
    pub unit: String,
    /// Replacement label in the output, e.g. `day` (falls back to `unit`)
    #[serde(default, alias = "unitNew", skip_serializing_if = "Option::is_none")]
    pub unit_new: Option<String>,
    /// Milliseconds per unit
    pub time: i64,
}

impl TransferRule {
    pub fn new(unit: &str, unit_new: Option<&str>, time: i64) -> Self {
        Self {
            unit: unit.to_string(),
            unit_new: unit_new.map(str::to_string),
            time,
        }
    }

    /// Output label: `unit_new` if set, else `unit`
    pub fn label(&self) -> &str {
        self.unit_new.as_deref().unwrap_or(&self.unit)
    }
}

/// A quantity of one named unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateUnit {
    pub num: i64,
    pub unit: String,
}

/// Result of `parse_duration`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DurationInfo {
    pub units: Vec<DateUnit>,
    pub formatted: String,
    pub total_ms: i64,
}

impl DurationInfo {
    /// None when the total is negative
    pub fn as_duration(&self) -> Option<Duration> {
        u64::try_from(self.total_ms).ok().map(Duration::from_millis)
    }
}

static DEFAULT_RULES: Lazy<Vec<TransferRule>> = Lazy::new(|| {
    vec![
        TransferRule::new("天", Some("day"), DAY_MS),
        TransferRule::new("小时", Some("hour"), HOUR_MS),
        TransferRule::new("分钟", Some("min"), MINUTE_MS),
        TransferRule::new("秒", Some("sec"), SECOND_MS),
    ]
});

/// Day/hour/minute/second rules, largest unit first
pub fn default_rules() -> &'static [TransferRule] {
    &DEFAULT_RULES
}

/// Join date components with `separator`
///
/// The first component is written as-is; every later one is left-padded
/// with `0` to two characters.
pub fn arr_to_string<T: Display>(components: &[T], separator: &str) -> String {
    let mut out = String::new();

    for (index, part) in components.iter().enumerate() {
        if index == 0 {
            out.push_str(&part.to_string());
        } else {
            out.push_str(separator);
            out.push_str(&format!("{:0>2}", part.to_string()));
        }
    }

    out
}

/// Walk `rules` in order over the unconsumed part of `input`
///
/// Rules must be listed in the same order their units appear in `input`.
/// A rule whose unit is missing, or sits at the very start of what is
/// left, is skipped without consuming anything. When the unit is found
/// further in, the cursor moves past it even if the prefix is not a
/// usable number (unparsable or zero prefixes add nothing). Totals
/// saturate at the `i64` bounds instead of overflowing.
pub fn parse_duration(input: &str, rules: &[TransferRule]) -> DurationInfo {
    let mut info = DurationInfo::default();
    let mut rest = input;

    for rule in rules {
        if rule.unit.is_empty() {
            continue;
        }

        let index = match rest.find(&rule.unit) {
            Some(index) if index > 0 => index,
            _ => {
                debug!(unit = %rule.unit, "duration rule has no numeric prefix, skipping");
                continue;
            }
        };

        match rest[..index].trim().parse::<i64>() {
            Ok(num) if num != 0 => {
                info.total_ms = info.total_ms.saturating_add(num.saturating_mul(rule.time));
                info.formatted.push_str(&format!("{}{}", num, rule.label()));
                info.units.push(DateUnit {
                    num,
                    unit: rule.label().to_string(),
                });
            }
            _ => debug!(prefix = &rest[..index], unit = %rule.unit, "unusable duration prefix"),
        }

        rest = &rest[index + rule.unit.len()..];
    }

    info
}
