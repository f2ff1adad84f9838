//! Inclusive numeric bounds for hyperparameter values
//!
//! Bounds keep the numeric values exactly as declared (integer or float) so
//! they render back the way the document wrote them, e.g. `[1, 30]`.

use crate::hyperparam::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when declaring bounds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    #[error("Invalid bounds: min ({min}) must not be greater than max ({max})")]
    InvalidBounds { min: Value, max: Value },

    #[error("Bounds must be numeric, got '{0}'")]
    NonNumeric(Value),

    #[error("Range must have exactly two elements, got {0}")]
    WrongArity(usize),
}

/// An inclusive `[min, max]` interval
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    min: Value,
    max: Value,
}

/// Order two numeric values, comparing integers exactly.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

impl Bounds {
    /// Create bounds from a minimum and maximum
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperparam_rs::hyperparam::Bounds;
    ///
    /// let bounds = Bounds::new(1, 30).unwrap();
    /// assert_eq!(bounds.to_string(), "[1, 30]");
    /// assert!(Bounds::new(30, 1).is_err());
    /// ```
    pub fn new(min: impl Into<Value>, max: impl Into<Value>) -> Result<Self, BoundsError> {
        let min = min.into();
        let max = max.into();

        for bound in [&min, &max] {
            if bound.as_f64().is_none() {
                return Err(BoundsError::NonNumeric(bound.clone()));
            }
        }

        match compare(&min, &max) {
            Some(Ordering::Less) | Some(Ordering::Equal) => Ok(Self { min, max }),
            _ => Err(BoundsError::InvalidBounds { min, max }),
        }
    }

    /// Create bounds from a two element sequence, as found in documents
    pub fn from_values(values: &[Value]) -> Result<Self, BoundsError> {
        match values {
            [min, max] => Self::new(min.clone(), max.clone()),
            _ => Err(BoundsError::WrongArity(values.len())),
        }
    }

    pub fn min(&self) -> &Value {
        &self.min
    }

    pub fn max(&self) -> &Value {
        &self.max
    }

    /// Whether `value` lies in the interval; non-numeric values never do
    pub fn is_within_bounds(&self, value: &Value) -> bool {
        matches!(
            compare(&self.min, value),
            Some(Ordering::Less) | Some(Ordering::Equal)
        ) && matches!(
            compare(value, &self.max),
            Some(Ordering::Less) | Some(Ordering::Equal)
        )
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

impl Serialize for Bounds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.min)?;
        seq.serialize_element(&self.max)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Bounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;
        Bounds::from_values(&values).map_err(serde::de::Error::custom)
    }
}
