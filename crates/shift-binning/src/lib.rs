//! Quantile binning for continuous dimensions
//!
//! A high-cardinality numeric dimension cannot be compared category-by-category
//! across periods until it is discretized. This crate plans a small set of
//! quantile buckets over the *combined* current-and-previous column and applies
//! the same edges to both periods, so a bucket means the same thing on each
//! side of the comparison.
//!
//! Planning never fails: degenerate input (too few distinct values, collapsed
//! quantile edges, non-finite data) falls back to [`BinOutcome::Unbinned`] and
//! raw values are used as categories directly.
//!
//! # Example
//!
//! ```rust
//! use shift_binning::{BinOutcome, QuantileBinner};
//!
//! let combined: Vec<f64> = (0..100).map(|i| i as f64).collect();
//! let outcome = QuantileBinner::new().plan("age", &combined);
//! assert!(outcome.is_binned());
//! assert_eq!(outcome.num_buckets(), 10);
//! ```

mod binner;
mod types;

pub use binner::{QuantileBinner, DEFAULT_MAX_CATEGORIES, DEFAULT_MIN_UNIQUE, DEFAULT_N_BINS};
pub use types::BinOutcome;
