use crate::error::{Result, SaxError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable, regularly sampled time series.
///
/// Holds at least one observation and only finite values. The encoder treats
/// the values as already aligned to uniform time steps; no gap filling or
/// interpolation is performed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct Series {
    values: Vec<f64>,
}

impl Series {
    /// Build a series, rejecting empty input and NaN or infinite values.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(SaxError::InvalidSeries(
                "series must hold at least one observation".to_string(),
            ));
        }
        if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
            return Err(SaxError::InvalidSeries(format!(
                "non-finite value {} at index {idx}",
                values[idx]
            )));
        }
        Ok(Self { values })
    }

    pub fn from_slice(values: &[f64]) -> Result<Self> {
        Self::new(values.to_vec())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a series holds at least one observation.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<Vec<f64>> for Series {
    type Error = SaxError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Series::new(values)
    }
}

impl From<Series> for Vec<f64> {
    fn from(series: Series) -> Self {
        series.values
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
