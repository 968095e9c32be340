//! Types for per-category attribution records

use serde::Serialize;
use std::fmt;

use shift_core::CategoryKey;

/// Sign of a category's contribution delta
///
/// A delta of exactly zero counts as positive here, though such a category is
/// excluded from both top lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Contribution grew (or did not move)
    Positive,
    /// Contribution shrank
    Negative,
}

impl Direction {
    /// Classify a contribution delta
    pub fn from_delta(delta: f64) -> Self {
        if delta >= 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// Qualitative strength of a driver's share of the total change
///
/// Breakpoints on the absolute share: `< 0.02` minor, `[0.02, 0.1)` moderate,
/// `>= 0.1` strong. Unlike the metric-level labels there is no "none" tier:
/// anything below the share filter never becomes a record at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverStrength {
    /// Explains under ~2% of the change
    Minor,
    /// Explains ~2-10% of the change
    Moderate,
    /// Explains over ~10% of the change
    Strong,
}

impl DriverStrength {
    /// Map an effect score (absolute share of change) to its strength
    pub fn from_score(score: f64) -> Self {
        if score < 0.02 {
            Self::Minor
        } else if score < 0.1 {
            Self::Moderate
        } else {
            Self::Strong
        }
    }

    /// Short lowercase name, as reported externally
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for DriverStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One category's attribution record within a dimension
///
/// Volumes are the metric's sum within the category (not a row count); the
/// per-category mean is the category's average metric value; contribution is
/// their literal product. Categories present in only one period carry zeros
/// for the missing side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDriver {
    /// The category (raw value or bucket label)
    pub category: CategoryKey,
    /// Summed metric value in the current period
    pub volume_curr: f64,
    /// Summed metric value in the previous period
    pub volume_prev: f64,
    /// Average metric value in the current period
    pub mean_curr: f64,
    /// Average metric value in the previous period
    pub mean_prev: f64,
    /// `volume_curr * mean_curr`
    pub contrib_curr: f64,
    /// `volume_prev * mean_prev`
    pub contrib_prev: f64,
    /// `contrib_curr - contrib_prev`
    pub contrib_delta: f64,
    /// Contribution delta normalized to the total change
    pub contrib_share_of_change: f64,
    /// `|contrib_share_of_change|`
    pub effect_score: f64,
    /// Strength label derived from the effect score
    pub change_label: DriverStrength,
    /// Sign of the contribution delta
    pub direction: Direction,
}

/// Driver set for one dimension
///
/// A dimension whose categories are all filtered away still produces a result
/// with empty lists; dimensions are never silently omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionDrivers {
    /// Dimension name
    pub dimension: String,
    /// All surviving categories, effect score descending
    pub drivers: Vec<CategoryDriver>,
    /// Up to 3 highest-effect categories with a positive delta
    pub top_positive: Vec<CategoryDriver>,
    /// Up to 3 highest-effect categories with a negative delta
    pub top_negative: Vec<CategoryDriver>,
    /// Number of surviving categories
    pub num_drivers: usize,
}

impl DimensionDrivers {
    /// Result for a dimension with no surviving categories
    pub fn empty(dimension: impl Into<String>) -> Self {
        Self {
            dimension: dimension.into(),
            drivers: Vec::new(),
            top_positive: Vec::new(),
            top_negative: Vec::new(),
            num_drivers: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_delta() {
        assert_eq!(Direction::from_delta(1.0), Direction::Positive);
        assert_eq!(Direction::from_delta(0.0), Direction::Positive);
        assert_eq!(Direction::from_delta(-0.5), Direction::Negative);
    }

    #[test]
    fn test_strength_breakpoints() {
        assert_eq!(DriverStrength::from_score(0.0), DriverStrength::Minor);
        assert_eq!(DriverStrength::from_score(0.019), DriverStrength::Minor);
        assert_eq!(DriverStrength::from_score(0.02), DriverStrength::Moderate);
        assert_eq!(DriverStrength::from_score(0.099), DriverStrength::Moderate);
        assert_eq!(DriverStrength::from_score(0.1), DriverStrength::Strong);
        assert_eq!(DriverStrength::from_score(0.9), DriverStrength::Strong);
    }

    #[test]
    fn test_serialized_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&Direction::Negative).unwrap(),
            "\"negative\""
        );
        assert_eq!(
            serde_json::to_string(&DriverStrength::Strong).unwrap(),
            "\"strong\""
        );
    }

    #[test]
    fn test_empty_dimension_result() {
        let empty = DimensionDrivers::empty("region");
        assert_eq!(empty.dimension, "region");
        assert_eq!(empty.num_drivers, 0);
        assert!(empty.drivers.is_empty());
        assert!(empty.top_positive.is_empty());
        assert!(empty.top_negative.is_empty());
    }
}
