//! Structured result assembly for metric-shift analyses
//!
//! Merges the outputs of the change detector and the attribution engine, plus
//! a data-quality object, into a single immutable [`Report`] suitable for
//! direct JSON serialization: meta, period comparison, change strength, change
//! trust, drivers (per-dimension and global top lists), data quality, and
//! static recommended checks.
//!
//! Global top lists pool every dimension's top drivers, tag each with its
//! source dimension, and rank purely by effect score; no cross-dimension
//! re-normalization occurs.

mod builder;
mod quality;
mod summary;

pub use builder::{
    ChangeStrength, ChangeTrust, DimensionSummary, DriversSection, GlobalDriver, Granularity,
    PeriodComparison, PeriodSpan, Report, ReportBuilder, ReportMeta, TrendSlopes,
};
pub use quality::{assess_data_quality, DataQuality};
pub use summary::{build_driver_summary, DriverSummaryRow, DEFAULT_MAX_ROWS};
