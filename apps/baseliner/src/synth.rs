//! Render aggregated offense counts into a todo configuration document.
//!
//! Output is YAML-compatible and deterministic apart from the header
//! timestamp:
//! - Header: comment block naming the generating command, time and version.
//! - One block per rule with offenses, sorted by rule name. Each block is a
//!   blank line, `#` annotations, `RuleName:` and indented `Key: value`
//!   lines taken from the approved override (or `Enabled: false`).
//! - Rules in the exclusion set (`Syntax` by default) are never rendered;
//!   they stand for parse failures, not configurable rules.

use crate::models::{disabled_rule_config, RuleConfig};
use crate::overrides::OverrideSource;
use crate::registry::RuleRegistry;
use chrono::{DateTime, FixedOffset};
use serde_yaml::Value as Yaml;
use std::collections::{BTreeMap, BTreeSet};

/// Default keys that describe a rule rather than configure it.
pub const DESCRIPTIVE_KEYS: [&str; 4] = ["Description", "StyleGuide", "Reference", "Enabled"];

pub const DEFAULT_COMMAND: &str = "baseliner generate";

/// Parse-failure pseudo-rule; it is excluded no matter what else is configured.
pub const SYNTAX_RULE: &str = "Syntax";

#[derive(Debug, Clone)]
pub struct Synthesizer {
    excluded: BTreeSet<String>,
    command: String,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self {
            excluded: BTreeSet::from([SYNTAX_RULE.to_string()]),
            command: DEFAULT_COMMAND.to_string(),
        }
    }
}

impl Synthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add pseudo-rules that must never be rendered. `Syntax` always stays
    /// excluded.
    pub fn with_excluded<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(rules.into_iter().map(Into::into));
        self.excluded.insert(SYNTAX_RULE.to_string());
        self
    }

    /// Command named in the header as the generator of the document.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    /// Produce the document lines for one run.
    pub fn synthesize<R, O>(
        &self,
        counts: &BTreeMap<String, usize>,
        registry: &R,
        overrides: &O,
        generated_at: &DateTime<FixedOffset>,
        tool_version: &str,
    ) -> Vec<String>
    where
        R: RuleRegistry + ?Sized,
        O: OverrideSource + ?Sized,
    {
        let mut lines = self.header(generated_at, tool_version);
        let disabled = disabled_rule_config();

        // BTreeMap iteration is already ascending by rule name.
        for (rule, count) in counts {
            if *count == 0 || self.excluded.contains(rule) {
                continue;
            }
            lines.push(String::new());
            let cfg = overrides.override_for(rule).unwrap_or(&disabled);
            rule_comments(&mut lines, registry, rule, *count, cfg);
            lines.push(format!("{}:", rule));
            for (key, value) in cfg {
                lines.push(format!("  {}: {}", key, render_value(value)));
            }
        }
        lines
    }

    fn header(&self, generated_at: &DateTime<FixedOffset>, tool_version: &str) -> Vec<String> {
        vec![
            format!("# This configuration was generated by `{}`", self.command),
            format!(
                "# on {} using baseliner version {}.",
                generated_at.format("%Y-%m-%d %H:%M:%S %z"),
                tool_version
            ),
            "# The point is for the user to remove these configuration records".to_string(),
            "# one by one as the offenses are removed from the code base.".to_string(),
            "# Note that changes in the inspected code, or installation of new".to_string(),
            "# versions of the analyzer, may require this file to be generated again."
                .to_string(),
        ]
    }
}

fn rule_comments<R>(lines: &mut Vec<String>, registry: &R, rule: &str, count: usize, cfg: &RuleConfig)
where
    R: RuleRegistry + ?Sized,
{
    lines.push(format!("# Offense count: {}", count));
    if registry.supports_autocorrect(rule) {
        lines.push("# Cop supports --auto-correct.".to_string());
    }
    let Some(defaults) = registry.default_configuration(rule) else {
        return;
    };
    let params: Vec<&str> = defaults
        .keys()
        .map(String::as_str)
        .filter(|k| !DESCRIPTIVE_KEYS.contains(k) && !cfg.contains_key(*k))
        .collect();
    if !params.is_empty() {
        lines.push(format!("# Configuration parameters: {}.", params.join(", ")));
    }
}

/// Render a config value on a single line.
pub fn render_value(value: &Yaml) -> String {
    match value {
        Yaml::Null => "~".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::String(s) if is_plain_safe(s) => s.clone(),
        Yaml::String(s) => quote(s),
        Yaml::Sequence(items) => {
            let parts: Vec<String> = items.iter().map(render_flow_item).collect();
            format!("[{}]", parts.join(", "))
        }
        Yaml::Mapping(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", render_value(k), render_flow_item(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        Yaml::Tagged(tagged) => format!("{} {}", tagged.tag, render_value(&tagged.value)),
    }
}

// Strings inside flow collections are quoted so commas and colons survive.
fn render_flow_item(value: &Yaml) -> String {
    match value {
        Yaml::String(s) => quote(s),
        other => render_value(other),
    }
}

// A string can be written plain only if it reads back as the same string.
fn is_plain_safe(s: &str) -> bool {
    if s.is_empty() || s.contains(['\n', '\r', '\t']) || s.trim() != s {
        return false;
    }
    matches!(serde_yaml::from_str::<Yaml>(s), Ok(Yaml::String(ref back)) if back == s)
}

fn quote(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    format!("\"{}\"", escaped)
}
