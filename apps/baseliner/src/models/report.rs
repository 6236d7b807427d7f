//! JSON report schema: one document per analysis run, listing files and the
//! offenses found in each.

use super::Offense;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
/// Top-level report written by an analysis run.
pub struct Report {
    #[serde(default)]
    pub files: Vec<FileReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Offenses found in one inspected file.
pub struct FileReport {
    pub path: String,
    #[serde(default)]
    pub offenses: Vec<Offense>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    #[serde(default)]
    pub column: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_with_cop_name_alias() {
        let raw = r#"{
            "metadata": {"version": "1.0"},
            "files": [
                {"path": "a.rb", "offenses": [
                    {"cop_name": "Style/Foo", "message": "m", "severity": "convention",
                     "location": {"line": 3, "column": 1}}
                ]},
                {"path": "b.rb", "offenses": []},
                {"path": "c.rb"}
            ]
        }"#;
        let report: Report = serde_json::from_str(raw).unwrap();
        assert_eq!(report.files.len(), 3);
        assert_eq!(report.files[0].offenses[0].rule, "Style/Foo");
        assert_eq!(
            report.files[0].offenses[0].location,
            Some(Location {
                line: 3,
                column: Some(1)
            })
        );
        assert!(report.files[2].offenses.is_empty());
    }

    #[test]
    fn test_missing_rule_defaults_to_empty() {
        let raw = r#"{"files": [{"path": "a.rs", "offenses": [{"message": "x"}]}]}"#;
        let report: Report = serde_json::from_str(raw).unwrap();
        assert!(report.files[0].offenses[0].rule.is_empty());
    }
}
