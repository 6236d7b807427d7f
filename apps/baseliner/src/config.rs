//! Configuration discovery and effective settings resolution.
//!
//! Baseliner reads `baseliner.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `output`: `.baseliner_todo.yml`
//! - `registry`: `config/default.yml` when that file exists, else none
//! - `overrides`: none
//! - `reports`: none (CLI arguments required)
//! - `exclude`: `["Syntax"]`; configured names are added, `Syntax` is kept
//! - `logLevel`: `warn`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use crate::synth::SYNTAX_RULE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = ".baseliner_todo.yml";
pub const DEFAULT_REGISTRY: &str = "config/default.yml";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const CONFIG_FILES: [&str; 3] = ["baseliner.toml", "baseliner.yaml", "baseliner.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `baseliner.toml|yaml`.
pub struct BaselinerConfig {
    pub output: Option<String>,
    pub registry: Option<String>,
    pub overrides: Option<String>,
    #[serde(default)]
    pub reports: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(rename = "logLevel")]
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Clone)]
/// Values supplied on the command line; `None` defers to the config file.
pub struct CliOverrides {
    pub repo_root: Option<String>,
    pub output: Option<String>,
    pub registry: Option<String>,
    pub overrides: Option<String>,
    pub reports: Vec<String>,
    pub exclude: Vec<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub output: PathBuf,
    pub registry: Option<PathBuf>,
    pub overrides: Option<PathBuf>,
    pub reports: Vec<String>,
    pub exclude: Vec<String>,
    pub log_level: String,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `baseliner.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `BaselinerConfig` from the first config file present under `root`.
pub fn load_config(root: &Path) -> Result<Option<BaselinerConfig>> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let raw = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let cfg: BaselinerConfig = if name.ends_with(".toml") {
            toml::from_str(&raw).map_err(|source| Error::Toml { path, source })?
        } else {
            serde_yaml::from_str(&raw).map_err(|source| Error::Yaml { path, source })?
        };
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides) -> Result<Effective> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    // Registry falls back to the conventional defaults file only when present.
    let registry = cli
        .registry
        .clone()
        .or(cfg.registry)
        .map(|r| repo_root.join(r))
        .or_else(|| {
            let p = repo_root.join(DEFAULT_REGISTRY);
            p.is_file().then_some(p)
        });

    let overrides = cli
        .overrides
        .clone()
        .or(cfg.overrides)
        .map(|o| repo_root.join(o));

    let reports = if cli.reports.is_empty() {
        cfg.reports.unwrap_or_default()
    } else {
        cli.reports.clone()
    };

    let mut exclude = vec![SYNTAX_RULE.to_string()];
    let configured = if cli.exclude.is_empty() {
        cfg.exclude.unwrap_or_default()
    } else {
        cli.exclude.clone()
    };
    for rule in configured {
        if !exclude.contains(&rule) {
            exclude.push(rule);
        }
    }

    let log_level = cli
        .log_level
        .clone()
        .or(cfg.log_level)
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    Ok(Effective {
        output: repo_root.join(output),
        repo_root,
        config_found,
        registry,
        overrides,
        reports,
        exclude,
        log_level,
    })
}
