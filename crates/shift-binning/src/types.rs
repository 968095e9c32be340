//! Binning outcome types

use shift_core::CategoryKey;

/// Outcome of planning quantile buckets for one continuous dimension
///
/// Fallbacks are a first-class branch rather than an error path: anything that
/// prevents usable edges (too few distinct values, degenerate quantiles,
/// non-finite data) yields [`BinOutcome::Unbinned`] and the raw values are
/// used as categories directly.
#[derive(Debug, Clone, PartialEq)]
pub enum BinOutcome {
    /// Quantile buckets with shared edges and their labels
    ///
    /// `edges` has one more entry than `labels`. Bucket `i` covers
    /// `[edges[i], edges[i+1])`; the last bucket also includes its right edge
    /// so the combined maximum is never dropped.
    Binned {
        /// Strictly increasing bucket edges
        edges: Vec<f64>,
        /// One label per bucket, `"<dim>_bin_<i>"`
        labels: Vec<String>,
    },
    /// No binning; raw values become the categories
    Unbinned,
}

impl BinOutcome {
    /// Check whether buckets were produced
    pub fn is_binned(&self) -> bool {
        matches!(self, Self::Binned { .. })
    }

    /// Number of buckets, or 0 when unbinned
    pub fn num_buckets(&self) -> usize {
        match self {
            Self::Binned { labels, .. } => labels.len(),
            Self::Unbinned => 0,
        }
    }

    /// Index of the bucket containing `value`
    ///
    /// Values outside the edge range clamp to the nearest bucket. This cannot
    /// happen when the edges were planned over the same combined column the
    /// value comes from, since the outermost edges are the exact min and max.
    pub fn bucket_index(&self, value: f64) -> Option<usize> {
        match self {
            Self::Binned { edges, labels } => {
                let idx = edges.partition_point(|&e| e <= value);
                Some(idx.saturating_sub(1).min(labels.len() - 1))
            }
            Self::Unbinned => None,
        }
    }

    /// Map raw column values to category keys
    ///
    /// Binned values become [`CategoryKey::Text`] bucket labels; unbinned
    /// values pass through as [`CategoryKey::Number`].
    pub fn assign(&self, raw: &[f64]) -> Vec<CategoryKey> {
        match self {
            Self::Binned { labels, .. } => raw
                .iter()
                .map(|&v| {
                    let idx = self.bucket_index(v).unwrap_or(0);
                    CategoryKey::text(labels[idx].clone())
                })
                .collect(),
            Self::Unbinned => raw.iter().map(|&v| CategoryKey::number(v)).collect(),
        }
    }
}
