//! Level and trend change detection between adjacent periods
//!
//! Quantifies whether a metric's level (mean) and trend (OLS slope) materially
//! differ between a previous and a current period, and whether the difference
//! is trustworthy. The verdict is effect-size based: each delta is scored
//! against the series' own rolling volatility instead of being run through a
//! significance test, because the period lengths are fixed by the caller's
//! granularity rather than chosen for statistical power.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use shift_change::ChangeDetector;
//! use shift_core::MetricFrame;
//!
//! let dates: Vec<NaiveDate> = (1..=10)
//!     .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
//!     .collect();
//! let values: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
//!
//! let full = MetricFrame::from_series(dates.clone(), values.clone()).unwrap();
//! let previous = MetricFrame::from_series(dates[..5].to_vec(), values[..5].to_vec()).unwrap();
//! let current = MetricFrame::from_series(dates[5..].to_vec(), values[5..].to_vec()).unwrap();
//!
//! let ctx = ChangeDetector::new().detect(&full, &current, &previous).unwrap();
//! assert!(ctx.absolute_change > 0.0);
//! ```

mod detector;
mod types;

pub use detector::{ChangeDetector, DetectorParams};
pub use types::{ChangeContext, ChangeLabel};
