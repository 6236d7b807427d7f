//! Baseliner core library.
//!
//! This crate turns the offenses of a static-analysis run into a YAML todo
//! configuration that silences every currently offending rule, so that only
//! new offenses are reported going forward.
//!
//! High-level modules:
//! - `aggregate`: Per-rule offense tally across file reports.
//! - `synth`: Deterministic rendering of counts into the todo document.
//! - `formatter`: Event adapter (`on_file_finished` / `on_run_finished`).
//! - `registry`: Rule defaults and auto-correct capability lookup.
//! - `overrides`: Approved non-default settings per rule.
//! - `input`: Parallel loading of JSON offense reports.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `output`: Human-facing messages for the binary.
//! - `logging`: Tracing subscriber setup.
//! - `models`: Offense, report and rule config types.
//! - `error`: Error type shared by all modules.
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod overrides;
pub mod registry;
pub mod synth;

pub use aggregate::OffenseAggregator;
pub use error::{Error, Result};
pub use formatter::TodoFormatter;
pub use models::{Offense, RuleConfig};
pub use overrides::{OverrideSource, OverrideTable};
pub use registry::{DefaultRegistry, RuleInfo, RuleRegistry};
pub use synth::Synthesizer;
