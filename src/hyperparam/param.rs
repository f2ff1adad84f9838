//! Hyperparameter definition and validation
//!
//! This module provides the [`Hyperparam`] struct, the leaf of the model
//! tree. A hyperparameter has a declared [`Kind`] and optionally a set of
//! allowed choices or an inclusive range. Every assignment is validated
//! against all three before the stored value changes.

use crate::error::{HyperparamError, Result};
use crate::hyperparam::bounds::Bounds;
use crate::hyperparam::value::{Kind, Value};
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised when a value violates a hyperparameter's declaration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("Wrong type '{actual}', expecting '{expected}' for hyperparameter '{name}'")]
    WrongType {
        name: String,
        actual: &'static str,
        expected: Kind,
    },

    #[error("Out of range value '{value}' not in {bounds}")]
    OutOfRange {
        name: String,
        value: Value,
        bounds: Bounds,
    },

    #[error("Unknown choice '{value}', expecting one of: {}", quote_sorted(.choices))]
    UnknownChoice {
        name: String,
        value: Value,
        choices: Vec<Value>,
    },
}

impl ValueError {
    /// Name of the hyperparameter that rejected the value
    pub fn name(&self) -> &str {
        match self {
            ValueError::WrongType { name, .. }
            | ValueError::OutOfRange { name, .. }
            | ValueError::UnknownChoice { name, .. } => name,
        }
    }
}

fn compare_choices(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn quote_sorted(choices: &[Value]) -> String {
    let mut sorted: Vec<&Value> = choices.iter().collect();
    sorted.sort_by(|a, b| compare_choices(a, b));
    sorted
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A named, typed and optionally constrained hyperparameter
///
/// Two hyperparameters are equal when their name, kind, documentation and
/// value are equal; constraints do not take part in the comparison.
#[derive(Debug, Clone, Serialize)]
pub struct Hyperparam {
    name: String,

    kind: Kind,

    doc: Option<String>,

    /// Current value, `Null` until set
    value: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    choices: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<Bounds>,
}

impl Hyperparam {
    /// Create an unset, unconstrained hyperparameter
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperparam_rs::hyperparam::{Hyperparam, Kind};
    ///
    /// let param = Hyperparam::new("C", Kind::Float);
    /// assert_eq!(param.name(), "C");
    /// assert!(param.value().is_null());
    /// ```
    pub fn new(name: &str, kind: Kind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            doc: None,
            value: Value::Null,
            choices: None,
            range: None,
        }
    }

    /// Attach documentation text
    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    /// Restrict the hyperparameter to a set of allowed values
    ///
    /// Only `str`, `int` and `float` kinds accept choices, and every choice
    /// must itself be of the declared kind.
    pub fn with_choices(mut self, choices: Vec<Value>) -> Result<Self> {
        if !self.kind.supports_choices() {
            return Err(HyperparamError::InvalidConstraint {
                name: self.name,
                message: format!("choices are not allowed for type '{}'", self.kind),
            });
        }
        for choice in &choices {
            self.check_kind(choice)?;
        }
        self.choices = Some(choices);
        Ok(self)
    }

    /// Restrict the hyperparameter to an inclusive range
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperparam_rs::hyperparam::{Bounds, Hyperparam, Kind};
    ///
    /// let param = Hyperparam::new("max_iter", Kind::Int)
    ///     .with_range(Bounds::new(1, 30).unwrap())
    ///     .unwrap()
    ///     .with_value(20)
    ///     .unwrap();
    /// assert_eq!(param.value().as_i64(), Some(20));
    /// ```
    pub fn with_range(mut self, range: Bounds) -> Result<Self> {
        if !self.kind.is_numeric() {
            return Err(HyperparamError::InvalidConstraint {
                name: self.name,
                message: format!("range is not allowed for type '{}'", self.kind),
            });
        }
        self.range = Some(range);
        Ok(self)
    }

    /// Set the initial value, validating it against the declaration
    pub fn with_value(mut self, value: impl Into<Value>) -> Result<Self> {
        self.set_value(value)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Current value; `Null` when unset
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn choices(&self) -> Option<&[Value]> {
        self.choices.as_deref()
    }

    pub fn range(&self) -> Option<&Bounds> {
        self.range.as_ref()
    }

    fn check_kind(&self, value: &Value) -> std::result::Result<(), ValueError> {
        if self.kind.matches(value) {
            Ok(())
        } else {
            Err(ValueError::WrongType {
                name: self.name.clone(),
                actual: value.type_name(),
                expected: self.kind,
            })
        }
    }

    /// Check a candidate value against kind, choices and range.
    ///
    /// `Null` is always accepted since it clears the value.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), ValueError> {
        if value.is_null() {
            return Ok(());
        }

        self.check_kind(value)?;

        if let Some(choices) = &self.choices {
            if !choices.is_empty() && !choices.contains(value) {
                return Err(ValueError::UnknownChoice {
                    name: self.name.clone(),
                    value: value.clone(),
                    choices: choices.clone(),
                });
            }
        }

        if let Some(range) = &self.range {
            if !range.is_within_bounds(value) {
                return Err(ValueError::OutOfRange {
                    name: self.name.clone(),
                    value: value.clone(),
                    bounds: range.clone(),
                });
            }
        }

        Ok(())
    }

    /// Validate and assign a new value; the old value is kept on failure
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperparam_rs::hyperparam::{Hyperparam, Kind};
    ///
    /// let mut param = Hyperparam::new("C", Kind::Float);
    /// param.set_value(3.0).unwrap();
    ///
    /// let err = param.set_value(3).unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Wrong type 'int', expecting 'float' for hyperparameter 'C'"
    /// );
    /// assert_eq!(param.value().as_f64(), Some(3.0));
    /// ```
    pub fn set_value(&mut self, value: impl Into<Value>) -> std::result::Result<(), ValueError> {
        let value = value.into();
        self.validate(&value)?;
        tracing::trace!(name = %self.name, value = %value, "set hyperparameter");
        self.value = value;
        Ok(())
    }

    /// Reset the value to unset
    pub fn clear(&mut self) {
        self.value = Value::Null;
    }

    /// Direct access to the payload for element-wise list and dict edits.
    ///
    /// Element edits never change the payload's kind, so they bypass
    /// validation.
    pub(crate) fn payload_mut(&mut self) -> &mut Value {
        &mut self.value
    }
}

impl PartialEq for Hyperparam {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.doc == other.doc
            && self.value == other.value
    }
}
