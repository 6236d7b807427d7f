//! Event adapter driven by an analysis run.
//!
//! The engine calls `on_file_finished` once per inspected file and
//! `on_run_finished` once at the end; the latter renders the document into
//! whatever sink the caller provides.

use crate::aggregate::OffenseAggregator;
use crate::error::{Error, Result};
use crate::models::Offense;
use crate::overrides::OverrideSource;
use crate::registry::RuleRegistry;
use crate::synth::Synthesizer;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct TodoFormatter<'a, R: ?Sized, O: ?Sized> {
    registry: &'a R,
    overrides: &'a O,
    synthesizer: Synthesizer,
    aggregator: OffenseAggregator,
}

impl<'a, R, O> TodoFormatter<'a, R, O>
where
    R: RuleRegistry + ?Sized,
    O: OverrideSource + ?Sized,
{
    pub fn new(registry: &'a R, overrides: &'a O, synthesizer: Synthesizer) -> Self {
        Self {
            registry,
            overrides,
            synthesizer,
            aggregator: OffenseAggregator::new(),
        }
    }

    /// Start from counts gathered elsewhere, e.g. a parallel report reader.
    pub fn with_aggregator(mut self, aggregator: OffenseAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn aggregator(&self) -> &OffenseAggregator {
        &self.aggregator
    }

    pub fn on_file_finished(&mut self, file: &str, offenses: &[Offense]) -> Result<()> {
        debug!(file, offenses = offenses.len(), "file finished");
        self.aggregator.record_file_offenses(file, offenses)
    }

    /// Render the document and write it to `sink`, one line per `\n`.
    pub fn on_run_finished<W: Write>(&self, sink: &mut W) -> Result<()> {
        let now = chrono::Local::now().fixed_offset();
        let lines = self.synthesizer.synthesize(
            &self.aggregator.snapshot(),
            self.registry,
            self.overrides,
            &now,
            env!("CARGO_PKG_VERSION"),
        );
        write_lines(sink, &lines).map_err(|source| Error::Io {
            path: PathBuf::from("<output>"),
            source,
        })?;
        let rules = lines
            .iter()
            .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with(' '))
            .count();
        info!(
            rules,
            offenses = self.aggregator.total(),
            "todo document rendered"
        );
        Ok(())
    }

    /// Render the document into `path`, creating parent directories.
    pub fn write_to_path(&self, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let mut buf: Vec<u8> = Vec::new();
        self.on_run_finished(&mut buf)?;
        fs::write(path, buf).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(path.to_path_buf())
    }
}

fn write_lines<W: Write>(sink: &mut W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(sink, "{}", line)?;
    }
    sink.flush()
}

/// Follow-up lines shown to the operator once the document exists.
pub fn completion_messages(path: &str) -> [String; 2] {
    [
        format!("Created {}.", path),
        format!(
            "Run your analyzer with `--config {}`, or add inherit_from: {} in its config file.",
            path, path
        ),
    ]
}
