//! Offense report loading.
//!
//! Reports are JSON documents listing inspected files and their offenses.
//! Parsing and tallying run on the rayon pool: each worker folds files into
//! its own `OffenseAggregator` and the partial tallies are merged at the
//! end, which keeps the result identical to a sequential pass.

use crate::aggregate::OffenseAggregator;
use crate::error::{Error, Result};
use crate::models::{FileReport, Report};
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Resolve report patterns relative to `root`. Patterns are globs; a
/// pattern that matches nothing is reported and skipped.
pub fn expand_patterns(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs = root.join(pat);
        let pattern = abs.to_string_lossy().to_string();
        let before = out.len();
        for entry in glob(&pattern)? {
            match entry {
                Ok(p) if p.is_file() => out.push(p),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "unreadable report path"),
            }
        }
        if out.len() == before {
            warn!(pattern = %pat, "no report matched");
        }
    }
    out.sort();
    out.dedup();
    Ok(out)
}

/// Parse one JSON report from disk.
pub fn load_report(path: &Path) -> Result<Report> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every report and tally all of their files into one aggregator.
pub fn read_reports(paths: &[PathBuf]) -> Result<OffenseAggregator> {
    let reports: Vec<Report> = paths
        .par_iter()
        .map(|p| load_report(p))
        .collect::<Result<Vec<_>>>()?;
    let files: Vec<&FileReport> = reports.iter().flat_map(|r| r.files.iter()).collect();
    debug!(reports = reports.len(), files = files.len(), "reports loaded");
    tally_files(&files)
}

/// Tally file reports in parallel, merging per-worker partial counts.
pub fn tally_files(files: &[&FileReport]) -> Result<OffenseAggregator> {
    files
        .par_iter()
        .try_fold(OffenseAggregator::new, |mut agg, file| {
            agg.record_file_offenses(&file.path, &file.offenses)?;
            Ok::<_, Error>(agg)
        })
        .try_reduce(OffenseAggregator::new, |mut left, right| {
            left.merge(right);
            Ok(left)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Offense;
    use tempfile::tempdir;

    const REPORT_A: &str = r#"{"files": [
        {"path": "a.rb", "offenses": [
            {"cop_name": "Lint/A", "message": "x"},
            {"cop_name": "Syntax", "message": "unexpected token"}
        ]},
        {"path": "b.rb", "offenses": []}
    ]}"#;

    const REPORT_B: &str = r#"{"files": [
        {"path": "c.rs", "offenses": [
            {"rule": "Lint/A", "message": "y"},
            {"rule": "Style/B", "message": "z"}
        ]}
    ]}"#;

    #[test]
    fn test_read_reports_sums_across_documents() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("reports")).unwrap();
        fs::write(dir.path().join("reports/a.json"), REPORT_A).unwrap();
        fs::write(dir.path().join("reports/b.json"), REPORT_B).unwrap();

        let paths = expand_patterns(dir.path(), &["reports/*.json".to_string()]).unwrap();
        assert_eq!(paths.len(), 2);
        let agg = read_reports(&paths).unwrap();
        let snap = agg.snapshot();
        assert_eq!(snap.get("Lint/A"), Some(&2));
        assert_eq!(snap.get("Style/B"), Some(&1));
        assert_eq!(snap.get("Syntax"), Some(&1));
    }

    #[test]
    fn test_unmatched_pattern_is_skipped() {
        let dir = tempdir().unwrap();
        let paths = expand_patterns(dir.path(), &["missing/*.json".to_string()]).unwrap();
        assert!(paths.is_empty());
        assert!(read_reports(&paths).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_reported_with_path() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{not json").unwrap();
        let err = read_reports(&[bad.clone()]).unwrap_err();
        assert!(matches!(err, Error::Json { ref path, .. } if *path == bad));
    }

    #[test]
    fn test_parallel_tally_matches_sequential() {
        let files: Vec<FileReport> = (0..200)
            .map(|i| FileReport {
                path: format!("f{}.rb", i),
                offenses: (0..(i % 4))
                    .map(|j| Offense::new(format!("Rule/{}", j)))
                    .collect(),
            })
            .collect();
        let refs: Vec<&FileReport> = files.iter().collect();
        let parallel = tally_files(&refs).unwrap();

        let mut sequential = OffenseAggregator::new();
        for f in &files {
            sequential.record_file_offenses(&f.path, &f.offenses).unwrap();
        }
        assert_eq!(parallel.snapshot(), sequential.snapshot());
    }

    #[test]
    fn test_offense_without_rule_fails_loudly() {
        let file = FileReport {
            path: "broken.rb".into(),
            offenses: vec![Offense::new("")],
        };
        let err = tally_files(&[&file]).unwrap_err();
        assert!(matches!(err, Error::MissingRuleName { .. }));
    }
}
