//! Per-color review counts and their ranked distribution.

use serde::Serialize;
use std::collections::HashMap;

/// Number of reviews per attribute value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTally {
    counts: HashMap<String, u64>,
}

/// One row of the ranked distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TallyRow {
    pub color: String,
    pub count: u64,
    /// Share of all counted reviews, rounded to 2 decimals
    pub percent: f64,
}

impl ColorTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one review with the given color.
    pub fn record(&mut self, color: impl Into<String>) {
        *self.counts.entry(color.into()).or_insert(0) += 1;
    }

    /// Returns the count for `color`, 0 if never seen.
    pub fn get(&self, color: &str) -> u64 {
        self.counts.get(color).copied().unwrap_or(0)
    }

    /// Total number of counted reviews.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns rows sorted by count (descending), then color (ascending).
    pub fn ranked(&self) -> Vec<TallyRow> {
        let total = self.total();

        let mut rows: Vec<TallyRow> = self
            .counts
            .iter()
            .map(|(color, &count)| TallyRow {
                color: color.clone(),
                count,
                percent: percentage(count, total),
            })
            .collect();

        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.color.cmp(&b.color)));
        rows
    }
}

impl<S: Into<String>> Extend<S> for ColorTally {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for color in iter {
            self.record(color);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ColorTally {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tally = Self::new();
        tally.extend(iter);
        tally
    }
}

fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 100.0 / total as f64 * 100.0).round() / 100.0
}
