//! Shared data models for offense reports and rule configuration.

pub mod report;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use report::{FileReport, Location, Report};

/// Ordered key/value configuration for a single rule.
///
/// Insertion order is kept so rendered documents list keys exactly as the
/// source file declared them.
pub type RuleConfig = IndexMap<String, serde_yaml::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single rule violation detected in one file.
pub struct Offense {
    /// Rule that raised the offense. Accepts `cop_name` as written by
    /// common JSON formatters.
    #[serde(alias = "cop_name", default)]
    pub rule: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl Offense {
    /// Build an offense carrying only a rule name.
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: String::new(),
            severity: None,
            location: None,
        }
    }
}

/// The canonical configuration of a rule with no approved override.
pub fn disabled_rule_config() -> RuleConfig {
    let mut cfg = RuleConfig::new();
    cfg.insert("Enabled".to_string(), serde_yaml::Value::Bool(false));
    cfg
}
