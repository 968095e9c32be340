//! Effect-size-based change detection between two adjacent periods

use tracing::debug;

use shift_core::math::{mean, ols_slope, rolling_std_mean, round_to, sample_std, sign};
use shift_core::{Error, MetricFrame, Result};

use crate::types::{ChangeContext, ChangeLabel};

/// Parameters for change detection
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorParams {
    /// Lower clamp for the rolling volatility window
    pub min_window: usize,
    /// Upper clamp for the rolling volatility window
    pub max_window: usize,
    /// Window size is `full_series_length / window_divisor` before clamping
    pub window_divisor: usize,
    /// Minimum trend consistency for a trustworthy verdict
    pub consistency_threshold: f64,
    /// Volatility counts as high above this fraction of the mean absolute level
    pub high_volatility_ratio: f64,
    /// Epsilon floor guarding divisions by a zero volatility
    pub eps: f64,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            min_window: 8,
            max_window: 20,
            window_divisor: 10,
            consistency_threshold: 0.6,
            high_volatility_ratio: 0.5,
            eps: 1e-8,
        }
    }
}

/// Detects level and trend changes between a previous and a current period
///
/// Uses effect-size scores (magnitude of change relative to the series' own
/// noise) rather than significance tests: period lengths are fixed by the
/// caller's granularity, not statistically chosen, so sample-size-dependent
/// p-values would mislead.
///
/// Pure function of its inputs; no side effects, no shared state.
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    params: DetectorParams,
}

impl ChangeDetector {
    /// Create a detector with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with explicit parameters
    pub fn with_params(params: DetectorParams) -> Self {
        Self { params }
    }

    /// Compute the [`ChangeContext`] for a metric
    ///
    /// `full` is the entire time-ordered series; `current` and `previous` are
    /// its two adjacent period subsets. Fails with [`Error::InvalidInput`]
    /// when either period is empty; every other degenerate numeric case is
    /// absorbed by epsilon floors or optional fields.
    pub fn detect(
        &self,
        full: &MetricFrame,
        current: &MetricFrame,
        previous: &MetricFrame,
    ) -> Result<ChangeContext> {
        if current.is_empty() {
            return Err(Error::empty_period("current"));
        }
        if previous.is_empty() {
            return Err(Error::empty_period("previous"));
        }

        let full_series = full.values();
        let current_series = current.values();
        let previous_series = previous.values();

        debug!(
            full = full_series.len(),
            current = current_series.len(),
            previous = previous_series.len(),
            "detecting change context"
        );

        // Level comparison
        let current_mean = mean(current_series);
        let previous_mean = mean(previous_series);
        let level_delta = current_mean - previous_mean;
        let relative_change_pct = if previous_mean != 0.0 {
            Some(level_delta / previous_mean * 100.0)
        } else {
            None
        };

        // Trend slopes within each period
        let previous_slope = ols_slope(previous_series);
        let current_slope = ols_slope(current_series);
        let slope_delta = current_slope - previous_slope;
        let slope_direction_changed = sign(current_slope) != sign(previous_slope);

        // Trend consistency: do successive moves agree with the level delta?
        let trend_consistency = self.trend_consistency(full_series, level_delta);

        // Volatility baseline
        let avg_volatility = self.average_volatility(full_series);
        let effective_volatility = if avg_volatility > 0.0 {
            avg_volatility
        } else {
            self.params.eps
        };

        // Effect-size scores and labels
        let level_score = level_delta.abs() / effective_volatility;
        let trend_score = slope_delta.abs() / (effective_volatility + self.params.eps);
        let level_change_label = ChangeLabel::from_score(level_score);
        let trend_change_label = ChangeLabel::from_score(trend_score);

        // Volatility and trust flags
        let mean_abs_level = mean(&full_series.iter().map(|v| v.abs()).collect::<Vec<_>>());
        let high_volatility = mean_abs_level > 0.0
            && avg_volatility > self.params.high_volatility_ratio * mean_abs_level;

        let trustworthy = (level_change_label.is_change() || trend_change_label.is_change())
            && trend_consistency > self.params.consistency_threshold
            && !high_volatility;

        let any_change_detected = level_change_label.is_change()
            || trend_change_label.is_change()
            || slope_direction_changed;

        debug!(
            %level_change_label,
            %trend_change_label,
            trustworthy,
            any_change_detected,
            "change context computed"
        );

        Ok(ChangeContext {
            current_value: round_to(current_mean, 4),
            previous_value: round_to(previous_mean, 4),
            absolute_change: round_to(level_delta, 4),
            relative_change_pct: relative_change_pct.map(|p| round_to(p, 2)),
            previous_trend_slope: round_to(previous_slope, 6),
            current_trend_slope: round_to(current_slope, 6),
            slope_delta: round_to(slope_delta, 6),
            level_score: round_to(level_score, 3),
            trend_score: round_to(trend_score, 3),
            level_change_label,
            trend_change_label,
            slope_direction_changed,
            trend_consistency: round_to(trend_consistency, 2),
            avg_volatility: round_to(avg_volatility, 4),
            high_volatility,
            any_change_detected,
            trustworthy,
        })
    }

    /// Fraction of successive differences whose sign matches the level delta
    fn trend_consistency(&self, full_series: &[f64], level_delta: f64) -> f64 {
        let delta_sign = sign(level_delta);
        if delta_sign == 0.0 {
            // Neutral when the level did not move at all
            return 0.5;
        }
        let diffs: Vec<f64> = full_series.windows(2).map(|w| w[1] - w[0]).collect();
        if diffs.is_empty() {
            return 0.0;
        }
        let matches = diffs.iter().filter(|&&d| sign(d) == delta_sign).count();
        matches as f64 / diffs.len() as f64
    }

    /// Average rolling standard deviation over the full series
    ///
    /// Window size scales with the series length, clamped to
    /// `[min_window, max_window]`. Series shorter than the window fall back
    /// to the plain sample standard deviation (0 for a single point).
    fn average_volatility(&self, full_series: &[f64]) -> f64 {
        let window = (full_series.len() / self.params.window_divisor)
            .clamp(self.params.min_window, self.params.max_window);
        match rolling_std_mean(full_series, window) {
            Some(v) => v,
            None => sample_std(full_series),
        }
    }
}
