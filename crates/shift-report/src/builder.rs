//! Assembly of the final structured analysis document

use std::fmt;

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use shift_change::ChangeContext;
use shift_core::MetricFrame;
use shift_drivers::{CategoryDriver, DimensionDrivers};

/// Time granularity of the comparison periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Day over day
    Day,
    /// Week over week
    Week,
    /// Month over month
    Month,
}

impl Granularity {
    /// Short lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata about the analysis request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    /// Company the data belongs to
    pub company: String,
    /// Industry context
    pub industry: String,
    /// Canonical metric name
    pub metric_analyzed: String,
    /// Period granularity
    pub time_granularity: Granularity,
    /// `"<granularity>_over_<granularity>"`
    pub comparison_type: String,
    /// UTC timestamp of report assembly, RFC 3339
    pub generated_at: String,
}

/// Date span and size of one comparison period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSpan {
    /// First date in the period
    pub start: Option<NaiveDate>,
    /// Last date in the period
    pub end: Option<NaiveDate>,
    /// Number of rows in the period
    pub rows: usize,
}

impl PeriodSpan {
    fn of(frame: &MetricFrame) -> Self {
        Self {
            start: frame.dates().first().copied(),
            end: frame.dates().last().copied(),
            rows: frame.len(),
        }
    }
}

/// Level comparison between the two periods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodComparison {
    /// Current period mean
    pub current_value: f64,
    /// Previous period mean
    pub previous_value: f64,
    /// Mean delta
    pub absolute_change: f64,
    /// Delta as a percentage of the previous mean; null at a zero base
    pub relative_change_pct: Option<f64>,
    /// "up", "down", or "flat"
    pub direction: &'static str,
    /// Deterministic one-sentence summary of the change
    pub summary: String,
    /// Current period span
    pub current_period: PeriodSpan,
    /// Previous period span
    pub previous_period: PeriodSpan,
}

/// Trend slope details
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSlopes {
    pub previous_trend_slope: f64,
    pub current_trend_slope: f64,
    pub slope_delta: f64,
}

/// Effect scores and labels for the detected change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeStrength {
    pub level_score: f64,
    pub trend_score: f64,
    pub level_change_label: shift_change::ChangeLabel,
    pub trend_change_label: shift_change::ChangeLabel,
    pub slope_direction_changed: bool,
    pub trend_slopes: TrendSlopes,
}

/// Trustworthiness context for the detected change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeTrust {
    pub trend_consistency: f64,
    pub avg_volatility: f64,
    pub high_volatility: bool,
    pub trustworthy: bool,
    /// Fixed sentence describing reliability
    pub reliability_summary: String,
}

/// Compact per-dimension driver summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionSummary {
    pub dimension: String,
    pub num_drivers: usize,
    pub top_positive: Vec<CategoryDriver>,
    pub top_negative: Vec<CategoryDriver>,
}

/// A top driver tagged with its source dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalDriver {
    /// Dimension the driver came from
    pub dimension: String,
    #[serde(flatten)]
    pub driver: CategoryDriver,
}

/// All driver information in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriversSection {
    /// One summary per dimension, input order preserved
    pub by_dimension: Vec<DimensionSummary>,
    /// Top 5 positive drivers across all dimensions, effect score descending
    pub top_positive_overall: Vec<GlobalDriver>,
    /// Top 5 negative drivers across all dimensions, effect score descending
    pub top_negative_overall: Vec<GlobalDriver>,
}

/// The complete structured result of one analysis
///
/// Built once per request and immutable afterwards; serializes directly to
/// the externally reported JSON document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub period_comparison: PeriodComparison,
    pub change_strength: ChangeStrength,
    pub change_trust: ChangeTrust,
    pub drivers: DriversSection,
    /// Externally supplied data-quality object, merged verbatim
    pub data_quality: Value,
    /// Static guidance, not derived from the data
    pub recommended_checks: Vec<String>,
}

impl Report {
    /// Serialize to a plain JSON value
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// How many drivers each global top list keeps
const GLOBAL_TOP_N: usize = 5;

/// Builds the structured output document
///
/// Merges the change verdict, the per-dimension driver sets, and the
/// externally supplied data-quality object into one report, and composes the
/// deterministic change and reliability summaries from the verdict's labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportBuilder {
    company: String,
    industry: String,
}

impl ReportBuilder {
    /// Create a builder with default meta fields
    pub fn new() -> Self {
        Self {
            company: "Example Co".to_string(),
            industry: "SaaS".to_string(),
        }
    }

    /// Set the company reported in `meta`
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Set the industry reported in `meta`
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    /// Assemble the report
    pub fn build(
        &self,
        metric_name: &str,
        granularity: Granularity,
        current: &MetricFrame,
        previous: &MetricFrame,
        change: &ChangeContext,
        drivers: &[DimensionDrivers],
        data_quality: Value,
    ) -> Report {
        let direction = if change.absolute_change > 0.0 {
            "up"
        } else if change.absolute_change < 0.0 {
            "down"
        } else {
            "flat"
        };

        let mut by_dimension = Vec::with_capacity(drivers.len());
        let mut global_positive: Vec<GlobalDriver> = Vec::new();
        let mut global_negative: Vec<GlobalDriver> = Vec::new();

        for dim in drivers {
            by_dimension.push(DimensionSummary {
                dimension: dim.dimension.clone(),
                num_drivers: dim.num_drivers,
                top_positive: dim.top_positive.clone(),
                top_negative: dim.top_negative.clone(),
            });
            global_positive.extend(dim.top_positive.iter().map(|d| GlobalDriver {
                dimension: dim.dimension.clone(),
                driver: d.clone(),
            }));
            global_negative.extend(dim.top_negative.iter().map(|d| GlobalDriver {
                dimension: dim.dimension.clone(),
                driver: d.clone(),
            }));
        }

        sort_and_truncate(&mut global_positive);
        sort_and_truncate(&mut global_negative);

        let change_summary = compose_change_summary(change, direction);
        let reliability_summary = if change.trustworthy && !change.high_volatility {
            "The detected change appears reliable given the historical pattern.".to_string()
        } else {
            "The detected change may be influenced by volatility or inconsistent trends."
                .to_string()
        };

        Report {
            meta: ReportMeta {
                company: self.company.clone(),
                industry: self.industry.clone(),
                metric_analyzed: metric_name.to_string(),
                time_granularity: granularity,
                comparison_type: format!("{granularity}_over_{granularity}"),
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            },
            period_comparison: PeriodComparison {
                current_value: change.current_value,
                previous_value: change.previous_value,
                absolute_change: change.absolute_change,
                relative_change_pct: change.relative_change_pct,
                direction,
                summary: change_summary,
                current_period: PeriodSpan::of(current),
                previous_period: PeriodSpan::of(previous),
            },
            change_strength: ChangeStrength {
                level_score: change.level_score,
                trend_score: change.trend_score,
                level_change_label: change.level_change_label,
                trend_change_label: change.trend_change_label,
                slope_direction_changed: change.slope_direction_changed,
                trend_slopes: TrendSlopes {
                    previous_trend_slope: change.previous_trend_slope,
                    current_trend_slope: change.current_trend_slope,
                    slope_delta: change.slope_delta,
                },
            },
            change_trust: ChangeTrust {
                trend_consistency: change.trend_consistency,
                avg_volatility: change.avg_volatility,
                high_volatility: change.high_volatility,
                trustworthy: change.trustworthy,
                reliability_summary,
            },
            drivers: DriversSection {
                by_dimension,
                top_positive_overall: global_positive,
                top_negative_overall: global_negative,
            },
            data_quality,
            recommended_checks: recommended_checks(),
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Rank a category purely by its effect score; no cross-dimension
/// re-normalization occurs
fn sort_and_truncate(list: &mut Vec<GlobalDriver>) {
    list.sort_by(|a, b| {
        b.driver
            .effect_score
            .partial_cmp(&a.driver.effect_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    list.truncate(GLOBAL_TOP_N);
}

fn compose_change_summary(change: &ChangeContext, direction: &str) -> String {
    if !change.any_change_detected {
        return "No meaningful change detected in this period.".to_string();
    }

    let mut parts = Vec::new();
    if change.level_change_label.is_change() {
        parts.push(format!(
            "a {} level change ({direction})",
            change.level_change_label
        ));
    }
    if change.trend_change_label.is_change() {
        parts.push(format!("a {} trend change", change.trend_change_label));
    }
    if parts.is_empty() {
        // Direction-change-only case: detected, but both labels are "none"
        parts.push("a detectable but weak change".to_string());
    }

    format!("{} in the target metric.", parts.join(" and "))
}

fn recommended_checks() -> Vec<String> {
    vec![
        "Review recent product, pricing, or campaign changes around the comparison period."
            .to_string(),
        "Check whether traffic/source mix shifted for top driver segments.".to_string(),
        "Validate tracking and data pipeline integrity for the affected dimensions.".to_string(),
    ]
}
