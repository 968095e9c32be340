//! Shared primitives for the metric-shift workspace
//!
//! This crate holds what every other shift crate needs: the unified error
//! type, the validated in-memory table ([`MetricFrame`]), category keys, and
//! plain-f64 numeric helpers.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use shift_core::MetricFrame;
//!
//! let dates: Vec<NaiveDate> = (1..=3)
//!     .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
//!     .collect();
//! let frame = MetricFrame::from_series(dates, vec![10.0, 12.0, 11.0]).unwrap();
//! assert_eq!(frame.len(), 3);
//! ```

mod error;
mod frame;
pub mod math;

pub use error::{Error, Result};
pub use frame::{CategoryKey, DimensionColumn, DimensionValues, MetricFrame};
