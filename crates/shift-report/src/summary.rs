//! Compact tabular view of the global top drivers

use serde::Serialize;

use shift_core::math::round_to;
use shift_drivers::DriverStrength;

use crate::builder::{DriversSection, GlobalDriver};

/// Default cap on summary rows
pub const DEFAULT_MAX_ROWS: usize = 10;

/// One row of the compact driver summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverSummaryRow {
    /// Source dimension
    pub dimension: String,
    /// Category value or bucket label
    pub category: String,
    /// Signed share of the total change, in percent (1 decimal)
    pub impact_pct: f64,
    /// "up" or "down"
    pub direction: &'static str,
    /// Strength label carried over from the driver record
    pub strength: DriverStrength,
}

/// Flatten the global top lists into a compact table
///
/// Rows are sorted by absolute impact descending and capped at `max_rows`.
pub fn build_driver_summary(drivers: &DriversSection, max_rows: usize) -> Vec<DriverSummaryRow> {
    let mut rows = Vec::new();

    for entry in &drivers.top_positive_overall {
        rows.push(summary_row(entry, "up"));
    }
    for entry in &drivers.top_negative_overall {
        rows.push(summary_row(entry, "down"));
    }

    rows.sort_by(|a, b| {
        b.impact_pct
            .abs()
            .partial_cmp(&a.impact_pct.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows.truncate(max_rows);
    rows
}

fn summary_row(entry: &GlobalDriver, direction: &'static str) -> DriverSummaryRow {
    DriverSummaryRow {
        dimension: entry.dimension.clone(),
        category: entry.driver.category.to_string(),
        impact_pct: round_to(entry.driver.contrib_share_of_change * 100.0, 1),
        direction,
        strength: entry.driver.change_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shift_core::CategoryKey;
    use shift_drivers::{CategoryDriver, Direction};

    fn driver(dimension: &str, category: &str, share: f64) -> GlobalDriver {
        GlobalDriver {
            dimension: dimension.to_string(),
            driver: CategoryDriver {
                category: CategoryKey::text(category),
                volume_curr: 0.0,
                volume_prev: 0.0,
                mean_curr: 0.0,
                mean_prev: 0.0,
                contrib_curr: 0.0,
                contrib_prev: 0.0,
                contrib_delta: share,
                contrib_share_of_change: share,
                effect_score: share.abs(),
                change_label: DriverStrength::from_score(share.abs()),
                direction: Direction::from_delta(share),
            },
        }
    }

    fn section(pos: Vec<GlobalDriver>, neg: Vec<GlobalDriver>) -> DriversSection {
        DriversSection {
            by_dimension: Vec::new(),
            top_positive_overall: pos,
            top_negative_overall: neg,
        }
    }

    #[test]
    fn test_rows_sorted_by_absolute_impact() {
        let drivers = section(
            vec![driver("region", "emea", 0.05), driver("plan", "pro", 0.30)],
            vec![driver("region", "apac", -0.12)],
        );

        let rows = build_driver_summary(&drivers, DEFAULT_MAX_ROWS);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].category, "pro");
        assert_eq!(rows[0].impact_pct, 30.0);
        assert_eq!(rows[0].direction, "up");
        assert_eq!(rows[1].category, "apac");
        assert_eq!(rows[1].impact_pct, -12.0);
        assert_eq!(rows[1].direction, "down");
        assert_eq!(rows[2].category, "emea");
        assert_eq!(rows[2].strength, DriverStrength::Moderate);
    }

    #[test]
    fn test_row_cap() {
        let pos: Vec<GlobalDriver> = (0..8)
            .map(|i| driver("d", &format!("c{i}"), 0.1 + i as f64 * 0.01))
            .collect();
        let neg: Vec<GlobalDriver> = (0..8)
            .map(|i| driver("d", &format!("n{i}"), -0.1 - i as f64 * 0.01))
            .collect();

        let rows = build_driver_summary(&section(pos, neg), 10);
        assert_eq!(rows.len(), 10);
    }

    #[test]
    fn test_empty_sections_yield_no_rows() {
        let rows = build_driver_summary(&section(Vec::new(), Vec::new()), 10);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_impact_rounds_to_one_decimal() {
        let drivers = section(vec![driver("d", "c", 0.12345)], Vec::new());
        let rows = build_driver_summary(&drivers, 10);
        assert_eq!(rows[0].impact_pct, 12.3);
    }
}
