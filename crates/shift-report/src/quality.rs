//! Simple completeness-based data-quality assessment
//!
//! The report builder accepts any opaque JSON object for `data_quality`, so
//! callers with their own pipeline checks can pass those through verbatim.
//! This module provides the default assessment for callers that have nothing
//! better: calendar completeness of the full series plus empty-period
//! warnings.

use serde::Serialize;
use serde_json::Value;

use shift_core::math::round_to;
use shift_core::MetricFrame;

/// Data-quality flags for one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQuality {
    /// Distinct observed dates over the expected calendar span (0..=1)
    pub completeness_score_avg: f64,
    /// Human-readable warnings
    pub warnings: Vec<String>,
    /// True when any warning was raised
    pub anomalies_detected: bool,
}

impl DataQuality {
    /// Serialize to a plain JSON value for the report builder
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Assess completeness of the full series and flag empty periods
pub fn assess_data_quality(
    full: &MetricFrame,
    current: &MetricFrame,
    previous: &MetricFrame,
) -> DataQuality {
    let mut warnings = Vec::new();

    if current.is_empty() || previous.is_empty() {
        warnings.push("One of the comparison periods has no data".to_string());
    }

    let completeness = match (full.dates().first(), full.dates().last()) {
        (Some(first), Some(last)) => {
            let expected_days = (*last - *first).num_days() + 1;
            round_to(full.distinct_dates() as f64 / expected_days as f64, 2)
        }
        _ => 0.0,
    };

    let anomalies_detected = !warnings.is_empty();
    DataQuality {
        completeness_score_avg: completeness,
        warnings,
        anomalies_detected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(days: &[u32]) -> MetricFrame {
        let dates = days
            .iter()
            .map(|&d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
            .collect();
        MetricFrame::from_series(dates, vec![1.0; days.len()]).unwrap()
    }

    #[test]
    fn test_gapless_series_is_complete() {
        let full = frame(&[1, 2, 3, 4, 5, 6]);
        let quality = assess_data_quality(&full, &frame(&[4, 5, 6]), &frame(&[1, 2, 3]));
        assert_relative_eq!(quality.completeness_score_avg, 1.0);
        assert!(quality.warnings.is_empty());
        assert!(!quality.anomalies_detected);
    }

    #[test]
    fn test_gaps_reduce_completeness() {
        // 5 observed dates over a 10-day span
        let full = frame(&[1, 2, 3, 9, 10]);
        let quality = assess_data_quality(&full, &frame(&[9, 10]), &frame(&[1, 2, 3]));
        assert_relative_eq!(quality.completeness_score_avg, 0.5);
    }

    #[test]
    fn test_empty_period_raises_warning() {
        let full = frame(&[1, 2, 3]);
        let quality = assess_data_quality(&full, &frame(&[]), &frame(&[1, 2, 3]));
        assert_eq!(quality.warnings.len(), 1);
        assert!(quality.anomalies_detected);
    }

    #[test]
    fn test_duplicate_dates_count_once() {
        let full = frame(&[1, 1, 2, 2]);
        let quality = assess_data_quality(&full, &frame(&[2]), &frame(&[1]));
        assert_relative_eq!(quality.completeness_score_avg, 1.0);
    }
}
