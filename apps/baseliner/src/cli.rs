//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "baseliner",
    version,
    about = "Generate a lint todo baseline from offense reports",
    long_about = "Baseliner — turn the offenses of an analysis run into a YAML config that silences them rule by rule, so only new offenses are reported.\n\nConfiguration precedence: CLI > baseliner.toml > defaults.",
    after_help = "Examples:\n  baseliner generate reports/*.json\n  baseliner generate --registry config/default.yml --overrides approved.yml out.json\n  baseliner generate --stdout report.json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current baseliner version.")]
    Version,
    /// Generate the todo document
    #[command(
        about = "Generate the todo document",
        long_about = "Count offenses per rule across JSON reports and write a config that disables each offending rule, annotated with counts and available parameters.",
        after_help = "Examples:\n  baseliner generate reports/*.json\n  baseliner generate --output .todo.yml --exclude Syntax --exclude Parser/Error out.json"
    )]
    Generate {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "YAML file with rule defaults (default: config/default.yml if present)")]
        registry: Option<String>,
        #[arg(long, help = "YAML file with approved per-rule settings")]
        overrides: Option<String>,
        #[arg(long, help = "Destination file (default: .baseliner_todo.yml)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Print the document instead of writing it")]
        stdout: bool,
        #[arg(long = "exclude", help = "Pseudo-rule never written to the document (repeatable; default: Syntax)")]
        exclude: Vec<String>,
        #[arg(long, help = "Log level: error|warn|info|debug|trace (default: warn)")]
        log_level: Option<String>,
        #[arg(help = "JSON report files or glob patterns")]
        reports: Vec<String>,
    },
}
