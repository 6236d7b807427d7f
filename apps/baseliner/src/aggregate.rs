//! Per-rule offense tally for a single analysis run.
//!
//! Counts only grow while a run is in progress. Parallel producers keep
//! their own partial aggregators and combine them with `merge`, so the
//! final snapshot is the exact sum over all files regardless of the order
//! in which files finished.

use crate::error::{Error, Result};
use crate::models::Offense;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OffenseAggregator {
    counts: BTreeMap<String, usize>,
}

impl OffenseAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every offense of one inspected file against its rule.
    ///
    /// An offense with a blank rule name rejects the whole file; nothing
    /// from that call is counted.
    pub fn record_file_offenses(&mut self, file: &str, offenses: &[Offense]) -> Result<()> {
        if offenses.iter().any(|o| o.rule.trim().is_empty()) {
            return Err(Error::MissingRuleName {
                file: file.to_string(),
            });
        }
        for offense in offenses {
            *self.counts.entry(offense.rule.clone()).or_insert(0) += 1;
        }
        Ok(())
    }

    /// Current counts keyed by rule name.
    pub fn snapshot(&self) -> BTreeMap<String, usize> {
        self.counts.clone()
    }

    /// Fold another partial tally into this one.
    pub fn merge(&mut self, other: OffenseAggregator) {
        for (rule, count) in other.counts {
            *self.counts.entry(rule).or_insert(0) += count;
        }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Drop all counts so the aggregator can serve a new run.
    pub fn reset(&mut self) {
        self.counts.clear();
    }
}
