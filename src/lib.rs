//! Change detection and driver attribution for period-over-period metric
//! analysis
//!
//! Given a date-sorted metric table and two adjacent, equal-length periods,
//! this workspace answers two questions: *did the metric really change, and
//! can the change be trusted?* (effect-size-based level/trend detection, no
//! p-values) and *which segments caused it?* (contribution decomposition
//! across categorical and auto-binned continuous dimensions).
//!
//! The engine is synchronous and side-effect-free: one request flows through
//! detection, attribution, and report assembly with no I/O and no shared
//! state, so concurrent requests need no coordination.
//!
//! # Crates
//!
//! - [`shift_core`]: table types, errors, numeric helpers
//! - [`shift_binning`]: quantile bucketing of continuous dimensions
//! - [`shift_change`]: level/trend change detection
//! - [`shift_drivers`]: per-dimension driver attribution
//! - [`shift_report`]: structured output assembly

pub use shift_binning::{BinOutcome, QuantileBinner};
pub use shift_change::{ChangeContext, ChangeDetector, ChangeLabel, DetectorParams};
pub use shift_core::{
    CategoryKey, DimensionColumn, DimensionValues, Error, MetricFrame, Result,
};
pub use shift_drivers::{
    AttributionEngine, AttributionParams, CategoryDriver, DimensionDrivers, Direction,
    DriverStrength,
};
pub use shift_report::{
    assess_data_quality, build_driver_summary, DataQuality, DriverSummaryRow, Granularity,
    Report, ReportBuilder,
};
