//! In-memory table types for the analysis engine
//!
//! A [`MetricFrame`] is the validated, date-sorted table that ingestion hands
//! to the engine: one date and one metric value per row, plus zero or more
//! typed dimension columns. Construction checks column lengths and sorts rows
//! by date, so downstream code can assume time order.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// A single dimension category, after any binning has been applied
///
/// Keys order ascending (numbers before text), which gives aggregation and
/// merge a deterministic iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryKey {
    /// Raw numeric value of a low-cardinality numeric dimension
    Number(OrderedFloat<f64>),
    /// Categorical value or a bucket label
    Text(String),
}

impl CategoryKey {
    /// Key for a raw numeric value
    pub fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    /// Key for a categorical value or bucket label
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", v.0),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for CategoryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Number(v) => serializer.serialize_f64(v.0),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Values of one dimension column
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionValues {
    /// String-valued dimension, used as-is
    Categorical(Vec<String>),
    /// Numeric dimension, subject to quantile binning when high-cardinality
    Numeric(Vec<f64>),
}

impl DimensionValues {
    /// Number of rows in the column
    pub fn len(&self) -> usize {
        match self {
            Self::Categorical(v) => v.len(),
            Self::Numeric(v) => v.len(),
        }
    }

    /// Check if the column has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct values in the column
    pub fn distinct_count(&self) -> usize {
        match self {
            Self::Categorical(v) => v.iter().collect::<BTreeSet<_>>().len(),
            Self::Numeric(v) => v
                .iter()
                .map(|&x| OrderedFloat(x))
                .collect::<BTreeSet<_>>()
                .len(),
        }
    }
}

/// A named dimension column
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionColumn {
    name: String,
    values: DimensionValues,
}

impl DimensionColumn {
    /// Create a categorical column
    pub fn categorical(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: DimensionValues::Categorical(values),
        }
    }

    /// Create a numeric column
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: DimensionValues::Numeric(values),
        }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column values
    pub fn values(&self) -> &DimensionValues {
        &self.values
    }
}

/// A validated, date-sorted metric table
///
/// Rows are `(date, metric_value, dimension_1..N)`. Dates need not be unique;
/// multiple rows may share a date. Metric values are assumed NaN-free
/// (ingestion's responsibility).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFrame {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    dimensions: Vec<DimensionColumn>,
}

impl MetricFrame {
    /// Build a frame from parallel columns, sorting rows by date (stable)
    ///
    /// Fails with [`Error::InvalidInput`] when any dimension column's length
    /// differs from the date/metric columns.
    pub fn new(
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
        dimensions: Vec<DimensionColumn>,
    ) -> Result<Self> {
        let n = dates.len();
        if values.len() != n {
            return Err(Error::length_mismatch("metric_value", n, values.len()));
        }
        for dim in &dimensions {
            if dim.values.len() != n {
                return Err(Error::length_mismatch(&dim.name, n, dim.values.len()));
            }
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&i| dates[i]);

        let dates = order.iter().map(|&i| dates[i]).collect();
        let values = order.iter().map(|&i| values[i]).collect::<Vec<f64>>();
        let dimensions = dimensions
            .into_iter()
            .map(|col| {
                let values = match col.values {
                    DimensionValues::Categorical(v) => DimensionValues::Categorical(
                        order.iter().map(|&i| v[i].clone()).collect(),
                    ),
                    DimensionValues::Numeric(v) => {
                        DimensionValues::Numeric(order.iter().map(|&i| v[i]).collect())
                    }
                };
                DimensionColumn {
                    name: col.name,
                    values,
                }
            })
            .collect();

        Ok(Self {
            dates,
            values,
            dimensions,
        })
    }

    /// Frame without dimension columns, for plain series analysis
    pub fn from_series(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        Self::new(dates, values, Vec::new())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Row dates, ascending
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Metric values, in date order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Dimension columns, in their original order
    pub fn dimensions(&self) -> &[DimensionColumn] {
        &self.dimensions
    }

    /// Look up a dimension column by name
    pub fn dimension(&self, name: &str) -> Option<&DimensionColumn> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Dimension names, in column order
    pub fn dimension_names(&self) -> Vec<&str> {
        self.dimensions.iter().map(|d| d.name.as_str()).collect()
    }

    /// Sum of the metric column
    pub fn metric_sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Number of distinct dates in the frame
    pub fn distinct_dates(&self) -> usize {
        self.dates.iter().collect::<BTreeSet<_>>().len()
    }
}
