//! Rule registry: default configuration and capabilities per rule.
//!
//! The synthesizer only needs two questions answered, so they live behind
//! the `RuleRegistry` trait. `DefaultRegistry` answers them from a YAML
//! defaults file where top-level keys are rule names:
//!
//! ```yaml
//! Lint/UnusedVariable:
//!   Description: Checks for unused variables.
//!   Enabled: true
//!   AutoCorrect: true
//!   MaxLines: 10
//! ```
//!
//! `AutoCorrect` is registry metadata; it is consumed at load time and never
//! appears in the rule's default configuration.

use crate::error::{Error, Result};
use crate::models::RuleConfig;
use indexmap::IndexMap;
use serde_yaml::Value as Yaml;
use std::fs;
use std::path::Path;

const AUTOCORRECT_KEY: &str = "AutoCorrect";

/// Read-only view of rule defaults and capabilities used during a run.
pub trait RuleRegistry {
    fn supports_autocorrect(&self, rule: &str) -> bool;
    fn default_configuration(&self, rule: &str) -> Option<&RuleConfig>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A registered rule implementation.
pub struct RuleInfo {
    pub name: String,
    pub autocorrect: bool,
}

impl RuleInfo {
    pub fn new(name: impl Into<String>, autocorrect: bool) -> Self {
        Self {
            name: name.into(),
            autocorrect,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct DefaultRegistry {
    defaults: IndexMap<String, RuleConfig>,
    rules: IndexMap<String, RuleInfo>,
}

impl DefaultRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule implementation. The first implementation registered
    /// under a name decides its capabilities; returns false for later ones.
    pub fn register(&mut self, info: RuleInfo) -> bool {
        if self.rules.contains_key(&info.name) {
            return false;
        }
        self.rules.insert(info.name.clone(), info);
        true
    }

    pub fn set_defaults(&mut self, rule: impl Into<String>, cfg: RuleConfig) {
        self.defaults.insert(rule.into(), cfg);
    }

    /// Number of distinct rule names known through defaults or registration.
    pub fn len(&self) -> usize {
        self.defaults.len()
            + self
                .rules
                .keys()
                .filter(|name| !self.defaults.contains_key(*name))
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load a registry from a YAML defaults file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: Yaml = serde_yaml::from_str(&raw).map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(doc)
    }

    /// Build a registry from an already parsed YAML document.
    pub fn from_yaml(doc: Yaml) -> Result<Self> {
        let mut reg = Self::new();
        let top = match doc {
            Yaml::Null => return Ok(reg),
            Yaml::Mapping(m) => m,
            _ => {
                return Err(Error::InvalidRuleConfig {
                    rule: "<root>".into(),
                    message: "expected a mapping of rule names".into(),
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
            let mut cfg = rule_config_from_yaml(&rule, value)?;
            let autocorrect = matches!(cfg.shift_remove(AUTOCORRECT_KEY), Some(Yaml::Bool(true)));
            reg.register(RuleInfo::new(rule.clone(), autocorrect));
            reg.set_defaults(rule, cfg);
        }
        Ok(reg)
    }
}

impl RuleRegistry for DefaultRegistry {
    fn supports_autocorrect(&self, rule: &str) -> bool {
        self.rules.get(rule).map(|r| r.autocorrect).unwrap_or(false)
    }

    fn default_configuration(&self, rule: &str) -> Option<&RuleConfig> {
        self.defaults.get(rule)
    }
}

/// Convert a YAML mapping into an ordered rule config. `null` is an empty
/// config; anything else that is not a mapping is rejected.
pub(crate) fn rule_config_from_yaml(rule: &str, value: Yaml) -> Result<RuleConfig> {
    let map = match value {
        Yaml::Null => return Ok(RuleConfig::new()),
        Yaml::Mapping(m) => m,
        _ => {
            return Err(Error::InvalidRuleConfig {
                rule: rule.to_string(),
                message: "expected a mapping of configuration keys".into(),
            })
        }
    };
    let mut cfg = RuleConfig::new();
    for (k, v) in map {
        match k {
            Yaml::String(s) => {
                cfg.insert(s, v);
            }
            other => {
                return Err(Error::InvalidRuleConfig {
                    rule: rule.to_string(),
                    message: format!("configuration key {:?} is not a string", other),
                })
            }
        }
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const DEFAULTS: &str = r#"
Lint/UnusedVariable:
  Description: Checks for unused variables.
  Enabled: true
  MaxLines: 10
Style/StringLiterals:
  Description: Prefer one quote style.
  StyleGuide: https://example.com/strings
  Enabled: true
  AutoCorrect: true
  EnforcedStyle: single_quotes
  SupportedStyles:
    - single_quotes
    - double_quotes
Metrics/Empty:
"#;

    #[test]
    fn test_load_defaults_and_autocorrect() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("default.yml");
        let mut f = fs::File::create(&path).unwrap();
        write!(f, "{}", DEFAULTS).unwrap();

        let reg = DefaultRegistry::load(&path).unwrap();
        assert_eq!(reg.len(), 3);
        assert!(reg.supports_autocorrect("Style/StringLiterals"));
        assert!(!reg.supports_autocorrect("Lint/UnusedVariable"));
        assert!(!reg.supports_autocorrect("Unknown/Rule"));

        let strings = reg.default_configuration("Style/StringLiterals").unwrap();
        let keys: Vec<&str> = strings.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "Description",
                "StyleGuide",
                "Enabled",
                "EnforcedStyle",
                "SupportedStyles"
            ]
        );
        assert!(reg.default_configuration("Metrics/Empty").unwrap().is_empty());
        assert!(reg.default_configuration("Unknown/Rule").is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut reg = DefaultRegistry::new();
        assert!(reg.register(RuleInfo::new("Lint/A", true)));
        assert!(!reg.register(RuleInfo::new("Lint/A", false)));
        assert!(reg.supports_autocorrect("Lint/A"));
    }

    #[test]
    fn test_len_counts_registered_and_default_names_once() {
        let mut reg = DefaultRegistry::new();
        assert!(reg.is_empty());
        reg.register(RuleInfo::new("Lint/OnlyRegistered", false));
        assert_eq!(reg.len(), 1);
        assert!(!reg.is_empty());
        reg.register(RuleInfo::new("Lint/Both", true));
        reg.set_defaults("Lint/Both", RuleConfig::new());
        reg.set_defaults("Lint/OnlyDefaults", RuleConfig::new());
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_rejects_scalar_rule_entry() {
        let doc: Yaml = serde_yaml::from_str("Lint/A: 3").unwrap();
        let err = DefaultRegistry::from_yaml(doc).unwrap_err();
        assert!(matches!(err, Error::InvalidRuleConfig { ref rule, .. } if rule == "Lint/A"));
    }

    #[test]
    fn test_empty_document_is_empty_registry() {
        let reg = DefaultRegistry::from_yaml(Yaml::Null).unwrap();
        assert!(reg.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = DefaultRegistry::load(&dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
