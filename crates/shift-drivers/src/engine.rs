//! Contribution-decomposition attribution engine

use std::collections::{BTreeMap, BTreeSet};

use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use shift_binning::{QuantileBinner, DEFAULT_MAX_CATEGORIES};
use shift_core::{CategoryKey, DimensionValues, MetricFrame};

use crate::types::{CategoryDriver, DimensionDrivers, Direction, DriverStrength};

/// Parameters for driver attribution
#[derive(Debug, Clone, PartialEq)]
pub struct AttributionParams {
    /// Minimum share of period volume (in either period) to keep a category
    pub min_volume_share: f64,
    /// Minimum absolute share of the total change to keep a category
    pub min_abs_contrib_share: f64,
    /// Small constant guarding divisions by zero
    pub eps: f64,
    /// Numeric dimensions with more distinct values than this are binned
    pub max_categories: usize,
}

impl Default for AttributionParams {
    fn default() -> Self {
        Self {
            min_volume_share: 0.01,
            min_abs_contrib_share: 0.01,
            eps: 1e-8,
            max_categories: DEFAULT_MAX_CATEGORIES,
        }
    }
}

/// Ranks dimension categories by how much of the total change they explain
///
/// For each candidate dimension the engine aggregates volume and mean per
/// category in each period, computes contribution deltas, filters noise,
/// normalizes deltas to share-of-change, scores and labels each category, and
/// selects the top positive and negative drivers.
///
/// Contribution is the literal product `volume * mean` where volume is itself
/// the category's summed metric value. The product scales with category size
/// squared relative to a naive sum; the share and strength breakpoints are
/// calibrated against this scale, so the formula must not be "fixed" in
/// isolation.
#[derive(Debug, Clone, Default)]
pub struct AttributionEngine {
    params: AttributionParams,
    binner: QuantileBinner,
}

impl AttributionEngine {
    /// Create an engine with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit parameters
    pub fn with_params(params: AttributionParams) -> Self {
        Self {
            params,
            binner: QuantileBinner::new(),
        }
    }

    /// Replace the binner used for continuous dimensions
    pub fn with_binner(mut self, binner: QuantileBinner) -> Self {
        self.binner = binner;
        self
    }

    /// Compute driver sets for each candidate dimension
    ///
    /// When `dimensions` is `None`, every dimension column present in both
    /// frames is a candidate, in the current frame's column order. The result
    /// preserves that order; a dimension whose categories are all filtered
    /// away still yields an entry with empty lists.
    pub fn calculate(
        &self,
        current: &MetricFrame,
        previous: &MetricFrame,
        dimensions: Option<&[&str]>,
    ) -> Vec<DimensionDrivers> {
        let discovered: Vec<&str>;
        let dims: &[&str] = match dimensions {
            Some(d) => d,
            None => {
                discovered = current
                    .dimension_names()
                    .into_iter()
                    .filter(|name| previous.dimension(name).is_some())
                    .collect();
                &discovered
            }
        };

        let total_curr_rows = current.len() as f64;
        let total_prev_rows = previous.len() as f64;
        let total_curr_contrib = current.metric_sum();
        let total_prev_contrib = previous.metric_sum();
        let total_contrib_delta = total_curr_contrib - total_prev_contrib;

        // Near-zero total deltas would explode the shares; fall back to the
        // combined contribution magnitude as the normalizer.
        let denom = if total_contrib_delta.abs() > self.params.eps {
            total_contrib_delta
        } else {
            total_curr_contrib.abs() + total_prev_contrib.abs() + self.params.eps
        };

        debug!(
            dimensions = dims.len(),
            total_contrib_delta, "attributing change across dimensions"
        );

        let mut results = Vec::with_capacity(dims.len());

        for &dim in dims {
            let (Some(cur_col), Some(prev_col)) =
                (current.dimension(dim), previous.dimension(dim))
            else {
                continue;
            };

            // A constant dimension cannot explain change. Constancy is judged
            // on the raw values, before any binning.
            if cur_col.values().distinct_count() <= 1
                && prev_col.values().distinct_count() <= 1
            {
                continue;
            }
            let Some(combined_distinct) =
                combined_distinct(cur_col.values(), prev_col.values())
            else {
                warn!(dimension = dim, "column types differ between periods; skipping");
                continue;
            };
            if combined_distinct <= 1 {
                continue;
            }

            let (cur_keys, prev_keys) = self.category_keys(
                dim,
                cur_col.values(),
                prev_col.values(),
                combined_distinct,
            );

            let cur_agg = aggregate(&cur_keys, current.values());
            let prev_agg = aggregate(&prev_keys, previous.values());

            // Outer merge on the category key, ascending; the stable sort
            // below keeps this order among tied effect scores.
            let all_keys: BTreeSet<&CategoryKey> =
                cur_agg.keys().chain(prev_agg.keys()).collect();

            let mut records: Vec<CategoryDriver> = Vec::new();
            for key in all_keys {
                let (volume_curr, mean_curr) = stats(cur_agg.get(key));
                let (volume_prev, mean_prev) = stats(prev_agg.get(key));

                let volume_share_curr = volume_curr / (total_curr_rows + self.params.eps);
                let volume_share_prev = volume_prev / (total_prev_rows + self.params.eps);
                if volume_share_curr < self.params.min_volume_share
                    && volume_share_prev < self.params.min_volume_share
                {
                    continue;
                }

                let contrib_curr = volume_curr * mean_curr;
                let contrib_prev = volume_prev * mean_prev;
                let contrib_delta = contrib_curr - contrib_prev;
                let contrib_share_of_change = contrib_delta / denom;
                if contrib_share_of_change.abs() < self.params.min_abs_contrib_share {
                    continue;
                }

                let effect_score = contrib_share_of_change.abs();
                records.push(CategoryDriver {
                    category: key.clone(),
                    volume_curr,
                    volume_prev,
                    mean_curr,
                    mean_prev,
                    contrib_curr,
                    contrib_prev,
                    contrib_delta,
                    contrib_share_of_change,
                    effect_score,
                    change_label: DriverStrength::from_score(effect_score),
                    direction: Direction::from_delta(contrib_delta),
                });
            }

            if records.is_empty() {
                results.push(DimensionDrivers::empty(dim));
                continue;
            }

            // Largest effect first; stable, so merge order breaks ties
            records.sort_by(|a, b| {
                b.effect_score
                    .partial_cmp(&a.effect_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let top_positive: Vec<CategoryDriver> = records
                .iter()
                .filter(|r| r.contrib_delta > 0.0)
                .take(3)
                .cloned()
                .collect();
            let top_negative: Vec<CategoryDriver> = records
                .iter()
                .filter(|r| r.contrib_delta < 0.0)
                .take(3)
                .cloned()
                .collect();

            let num_drivers = records.len();
            results.push(DimensionDrivers {
                dimension: dim.to_string(),
                drivers: records,
                top_positive,
                top_negative,
                num_drivers,
            });
        }

        results
    }

    /// Category keys for both periods, binning continuous dimensions
    ///
    /// Bucket edges come from the combined column so a boundary never shifts
    /// between periods.
    fn category_keys(
        &self,
        dim: &str,
        cur: &DimensionValues,
        prev: &DimensionValues,
        combined_distinct: usize,
    ) -> (Vec<CategoryKey>, Vec<CategoryKey>) {
        match (cur, prev) {
            (DimensionValues::Categorical(a), DimensionValues::Categorical(b)) => (
                a.iter().map(|s| CategoryKey::text(s.as_str())).collect(),
                b.iter().map(|s| CategoryKey::text(s.as_str())).collect(),
            ),
            (DimensionValues::Numeric(a), DimensionValues::Numeric(b)) => {
                if combined_distinct > self.params.max_categories {
                    let combined: Vec<f64> = a.iter().chain(b.iter()).copied().collect();
                    let outcome = self.binner.plan(dim, &combined);
                    debug!(
                        dimension = dim,
                        binned = outcome.is_binned(),
                        buckets = outcome.num_buckets(),
                        "continuous dimension"
                    );
                    (outcome.assign(a), outcome.assign(b))
                } else {
                    (
                        a.iter().map(|&v| CategoryKey::number(v)).collect(),
                        b.iter().map(|&v| CategoryKey::number(v)).collect(),
                    )
                }
            }
            // Unreachable: combined_distinct already established matching types
            _ => (Vec::new(), Vec::new()),
        }
    }
}

/// Distinct values across both periods; `None` when the column types differ
fn combined_distinct(cur: &DimensionValues, prev: &DimensionValues) -> Option<usize> {
    match (cur, prev) {
        (DimensionValues::Categorical(a), DimensionValues::Categorical(b)) => {
            Some(a.iter().chain(b.iter()).collect::<BTreeSet<_>>().len())
        }
        (DimensionValues::Numeric(a), DimensionValues::Numeric(b)) => Some(
            a.iter()
                .chain(b.iter())
                .map(|&x| OrderedFloat(x))
                .collect::<BTreeSet<_>>()
                .len(),
        ),
        _ => None,
    }
}

/// Per-category metric sum and row count, keyed ascending
fn aggregate(keys: &[CategoryKey], values: &[f64]) -> BTreeMap<CategoryKey, (f64, usize)> {
    let mut agg: BTreeMap<CategoryKey, (f64, usize)> = BTreeMap::new();
    for (key, &value) in keys.iter().zip(values.iter()) {
        let entry = agg.entry(key.clone()).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    agg
}

/// Volume (summed metric) and mean for one side of the merge; zeros when the
/// category is absent from that period
fn stats(entry: Option<&(f64, usize)>) -> (f64, f64) {
    match entry {
        Some(&(sum, count)) if count > 0 => (sum, sum / count as f64),
        _ => (0.0, 0.0),
    }
}
