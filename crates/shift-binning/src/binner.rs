//! Quantile bucket planning for continuous dimensions

use std::collections::BTreeSet;

use ordered_float::OrderedFloat;
use shift_core::math::quantile_sorted;

use crate::types::BinOutcome;

/// Default target bucket count
pub const DEFAULT_N_BINS: usize = 10;
/// Default minimum distinct values before binning kicks in
pub const DEFAULT_MIN_UNIQUE: usize = 10;
/// Distinct-value threshold above which a numeric dimension counts as continuous
pub const DEFAULT_MAX_CATEGORIES: usize = 20;

/// Plans quantile buckets over the combined values of both periods
///
/// Edges are computed once over current ∪ previous and applied to each period
/// separately, so a bucket boundary never shifts between periods. Duplicate
/// quantiles (skewed distributions) collapse; if fewer than two distinct edges
/// survive, the dimension falls back to unbinned raw values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantileBinner {
    n_bins: usize,
    min_unique: usize,
}

impl QuantileBinner {
    /// Create a binner with the default bucket count and uniqueness threshold
    pub fn new() -> Self {
        Self {
            n_bins: DEFAULT_N_BINS,
            min_unique: DEFAULT_MIN_UNIQUE,
        }
    }

    /// Set the target bucket count
    pub fn with_n_bins(mut self, n_bins: usize) -> Self {
        self.n_bins = n_bins.max(1);
        self
    }

    /// Set the minimum number of distinct values required before binning
    pub fn with_min_unique(mut self, min_unique: usize) -> Self {
        self.min_unique = min_unique;
        self
    }

    /// Plan bucket edges for one dimension over its combined column
    ///
    /// Never fails: every degenerate case resolves to [`BinOutcome::Unbinned`].
    pub fn plan(&self, dimension: &str, combined: &[f64]) -> BinOutcome {
        if combined.is_empty() || combined.iter().any(|v| !v.is_finite()) {
            return BinOutcome::Unbinned;
        }

        let distinct = combined
            .iter()
            .map(|&v| OrderedFloat(v))
            .collect::<BTreeSet<_>>()
            .len();
        if distinct < self.min_unique {
            return BinOutcome::Unbinned;
        }

        let mut sorted = combined.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut edges: Vec<f64> = (0..=self.n_bins)
            .map(|i| quantile_sorted(&sorted, i as f64 / self.n_bins as f64))
            .collect();
        edges.dedup();

        if edges.len() < 2 {
            return BinOutcome::Unbinned;
        }

        let labels = (0..edges.len() - 1)
            .map(|i| format!("{dimension}_bin_{i}"))
            .collect();

        BinOutcome::Binned { edges, labels }
    }
}

impl Default for QuantileBinner {
    fn default() -> Self {
        Self::new()
    }
}
