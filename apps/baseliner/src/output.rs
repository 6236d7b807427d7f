//! Operator-facing messages for the CLI.
//!
//! Colors are disabled when `NO_COLOR` is set.

use crate::formatter::completion_messages;
use owo_colors::OwoColorize;
use std::path::Path;

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors() {
        "⟦error⟧".red().bold().to_string()
    } else {
        "⟦error⟧".to_string()
    }
}

pub fn note_prefix() -> String {
    if use_colors() {
        "⟦note⟧".blue().bold().to_string()
    } else {
        "⟦note⟧".to_string()
    }
}

/// Path shown to the user: relative to the repository root when possible.
pub fn display_path(path: &Path, repo_root: &Path) -> String {
    pathdiff::diff_paths(path, repo_root)
        .filter(|p| !p.as_os_str().is_empty() && !p.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

/// Print the confirmation and the hint for using the generated document.
pub fn print_completion(shown_path: &str, rules: usize, offenses: usize) {
    let [created, hint] = completion_messages(shown_path);
    if use_colors() {
        println!("{}", created.green().bold());
    } else {
        println!("{}", created);
    }
    println!("{}", hint);
    let summary = format!("— Summary — rules={} offenses={}", rules, offenses);
    if use_colors() {
        println!("{}", summary.bold());
    } else {
        println!("{}", summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path_relative_to_root() {
        let root = Path::new("/work/repo");
        assert_eq!(
            display_path(Path::new("/work/repo/lint/todo.yml"), root),
            "lint/todo.yml"
        );
    }

    #[test]
    fn test_display_path_outside_root_stays_absolute() {
        let root = Path::new("/work/repo");
        assert_eq!(
            display_path(Path::new("/elsewhere/todo.yml"), root),
            "/elsewhere/todo.yml"
        );
    }
}
