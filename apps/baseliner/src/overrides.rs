//! Previously approved non-default settings per rule.
//!
//! The table is built before a run and only read while synthesizing. Rules
//! without an entry fall back to the disabled config in the synthesizer.

use crate::error::{Error, Result};
use crate::models::RuleConfig;
use crate::registry::rule_config_from_yaml;
use indexmap::IndexMap;
use serde_yaml::Value as Yaml;
use std::fs;
use std::path::Path;

pub trait OverrideSource {
    fn override_for(&self, rule: &str) -> Option<&RuleConfig>;
}

#[derive(Debug, Default, Clone)]
pub struct OverrideTable {
    entries: IndexMap<String, RuleConfig>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rule: impl Into<String>, cfg: RuleConfig) {
        self.entries.insert(rule.into(), cfg);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load overrides from YAML shaped as `RuleName: {Key: value}`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: Yaml = serde_yaml::from_str(&raw).map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        let mut table = Self::new();
        let top = match doc {
            Yaml::Null => return Ok(table),
            Yaml::Mapping(m) => m,
            _ => {
                return Err(Error::InvalidRuleConfig {
                    rule: "<root>".into(),
                    message: format!("{} must map rule names to settings", path.display()),
                })
            }
        };
        for (key, value) in top {
            let rule = match key {
                Yaml::String(s) => s,
                other => {
                    return Err(Error::InvalidRuleConfig {
                        rule: format!("{:?}", other),
                        message: "rule names must be strings".into(),
                    })
                }
            };
            let cfg = rule_config_from_yaml(&rule, value)?;
            table.insert(rule, cfg);
        }
        Ok(table)
    }
}

impl OverrideSource for OverrideTable {
    fn override_for(&self, rule: &str) -> Option<&RuleConfig> {
        self.entries.get(rule)
    }
}
