//! Plurality aggregation of per-round winners

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use rr_core::{RrError, RrResult};

/// One row of the breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Frequency breakdown and plurality winner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedResult {
    /// Sorted by count descending, ties in first-occurrence order
    counts: Vec<ValueCount>,
    winner: String,
}

impl AggregatedResult {
    /// Breakdown rows in display order
    pub fn counts(&self) -> &[ValueCount] {
        &self.counts
    }

    /// Plurality winner
    pub fn winner(&self) -> &str {
        &self.winner
    }

    /// Number of rounds aggregated
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Occurrences of `value` (0 if it never won a round)
    pub fn count_of(&self, value: &str) -> usize {
        self.counts
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    /// Fraction of rounds won by `value`, in `[0, 1]`
    pub fn share(&self, value: &str) -> f64 {
        let total = self.total();
        if total > 0 {
            self.count_of(value) as f64 / total as f64
        } else {
            0.0
        }
    }

    pub fn is_winner(&self, value: &str) -> bool {
        self.winner == value
    }
}

/// Aggregate round winners into counts and a plurality winner
///
/// Ties are broken by first occurrence in `values`.
pub fn aggregate<S: AsRef<str>>(values: &[S]) -> RrResult<AggregatedResult> {
    let mut counts: Vec<ValueCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for value in values {
        let value = value.as_ref();
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(ValueCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable: equal counts keep first-occurrence order
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    let winner = counts
        .first()
        .map(|c| c.value.clone())
        .ok_or_else(|| RrError::EmptyInput("no round results to aggregate".into()))?;

    Ok(AggregatedResult { counts, winner })
}
