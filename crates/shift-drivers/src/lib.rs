//! Driver attribution across dimensions
//!
//! Explains *which segments* moved a metric between two adjacent periods by
//! decomposing the period-over-period change in total contribution across the
//! categories of each dimension. Continuous dimensions are quantile-bucketed
//! first (see `shift-binning`); tiny-volume categories and categories that
//! barely explain any of the change are filtered out; survivors are scored by
//! their absolute share of the change and ranked.
//!
//! Per-dimension attribution is independent and deterministic: the result
//! list follows the input dimension order, and repeated runs over identical
//! inputs produce identical output.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use shift_core::{DimensionColumn, MetricFrame};
//! use shift_drivers::AttributionEngine;
//!
//! let dates: Vec<NaiveDate> = (1..=2)
//!     .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
//!     .collect();
//! let seg = DimensionColumn::categorical("segment", vec!["a".into(), "b".into()]);
//!
//! let current = MetricFrame::new(dates.clone(), vec![20.0, 10.0], vec![seg.clone()]).unwrap();
//! let previous = MetricFrame::new(dates, vec![10.0, 10.0], vec![seg]).unwrap();
//!
//! let results = AttributionEngine::new().calculate(&current, &previous, None);
//! assert_eq!(results[0].dimension, "segment");
//! ```

mod engine;
mod types;

pub use engine::{AttributionEngine, AttributionParams};
pub use types::{CategoryDriver, DimensionDrivers, Direction, DriverStrength};
