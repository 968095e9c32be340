//! Error types for metric-shift analysis
//!
//! Provides a unified error type for all shift crates.

use thiserror::Error;

/// Core error type for the change-detection and attribution engine
///
/// Degenerate numerics (zero volatility, collapsed quantile edges, near-zero
/// deltas) are absorbed by epsilon floors and soft fallbacks rather than
/// surfaced; invalid input is the engine's only hard failure.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for an empty comparison period
    pub fn empty_period(which: &str) -> Self {
        Self::InvalidInput(format!("{which} period has no data"))
    }

    /// Create an error for mismatched column lengths
    pub fn length_mismatch(column: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidInput(format!(
            "Column '{column}' has {actual} rows, expected {expected}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("current period has no data".to_string());
        assert_eq!(err.to_string(), "Invalid input: current period has no data");
    }

    #[test]
    fn test_error_helpers() {
        let err = Error::empty_period("previous");
        assert_eq!(err.to_string(), "Invalid input: previous period has no data");

        let err = Error::length_mismatch("region", 10, 7);
        assert_eq!(
            err.to_string(),
            "Invalid input: Column 'region' has 7 rows, expected 10"
        );
    }
}
