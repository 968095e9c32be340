//! Types for the metric-level change verdict

use serde::Serialize;
use std::fmt;

/// Qualitative strength of a level or trend change
///
/// Mapped from an effect score through fixed breakpoints:
/// `< 0.5` none, `[0.5, 1.0)` minor, `[1.0, 2.0)` moderate, `>= 2.0` strong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeLabel {
    /// No material change
    None,
    /// Minor change
    Minor,
    /// Moderate change
    Moderate,
    /// Strong change
    Strong,
}

impl ChangeLabel {
    /// Map an effect score to its label
    pub fn from_score(score: f64) -> Self {
        if score < 0.5 {
            Self::None
        } else if score < 1.0 {
            Self::Minor
        } else if score < 2.0 {
            Self::Moderate
        } else {
            Self::Strong
        }
    }

    /// Short lowercase name, as reported externally
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }

    /// Check whether any change was labeled at all
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for ChangeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The full statistical verdict for the metric overall
///
/// Built once per request by [`crate::ChangeDetector::detect`], immutable
/// afterwards. All numeric fields are rounded to fixed precision for stable
/// external reporting: 4 decimals for levels and volatility, 6 for slopes,
/// 3 for scores, 2 for percentages and consistency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeContext {
    /// Current period mean of the metric
    pub current_value: f64,
    /// Previous period mean of the metric
    pub previous_value: f64,
    /// `current_value - previous_value`
    pub absolute_change: f64,
    /// Level delta as a percentage of the previous mean; `None` when the
    /// previous mean is exactly zero
    pub relative_change_pct: Option<f64>,

    /// OLS slope of the previous period against a 0-based step index
    pub previous_trend_slope: f64,
    /// OLS slope of the current period
    pub current_trend_slope: f64,
    /// `current_trend_slope - previous_trend_slope`
    pub slope_delta: f64,

    /// `|absolute_change| / volatility`
    pub level_score: f64,
    /// `|slope_delta| / volatility`
    pub trend_score: f64,
    /// Label for the level score
    pub level_change_label: ChangeLabel,
    /// Label for the trend score
    pub trend_change_label: ChangeLabel,
    /// Whether the slope sign flipped between periods
    pub slope_direction_changed: bool,

    /// Fraction of successive full-series differences whose sign matches the
    /// level delta's sign; 0.5 (neutral) when the level delta is exactly zero
    pub trend_consistency: f64,
    /// Average rolling standard deviation over the full series
    pub avg_volatility: f64,
    /// Whether volatility exceeds half the mean absolute level
    pub high_volatility: bool,

    /// Loose flag: any label is not "none", or the slope direction flipped
    pub any_change_detected: bool,
    /// Strict flag: some labeled change, consistent trend, and not volatile
    pub trustworthy: bool,
}
