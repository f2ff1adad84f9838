//! Hyperparameter kinds and the dynamic values they govern
//!
//! A [`Kind`] is the declared primitive category of a hyperparameter and a
//! [`Value`] is the runtime payload stored in it. Values are compared
//! against kinds strictly: an integer never satisfies a `float` kind and a
//! float never satisfies an `int` kind.

use crate::error::{HyperparamError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A flat mapping from dotted path to value.
///
/// This is both the output of `flatten()` and the input accepted by
/// `update()` on models and model sets.
pub type FlatMap = IndexMap<String, Value>;

/// Error returned when a kind name is not one of the supported kinds
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown hyperparameter type '{0}'")]
pub struct UnknownKindError(pub String);

/// The declared primitive category of a hyperparameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Int,
    Float,
    Str,
    Bool,
    List,
    Dict,
}

impl Kind {
    /// Every supported kind, in documentation order.
    pub const ALL: [Kind; 6] = [
        Kind::Int,
        Kind::Float,
        Kind::Str,
        Kind::Bool,
        Kind::List,
        Kind::Dict,
    ];

    /// The name used in documents, messages and rendered output
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "str",
            Kind::Bool => "bool",
            Kind::List => "list",
            Kind::Dict => "dict",
        }
    }

    /// Whether values of this kind can be range constrained
    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Int | Kind::Float)
    }

    /// Whether values of this kind can be restricted to a choice set
    pub fn supports_choices(&self) -> bool {
        matches!(self, Kind::Int | Kind::Float | Kind::Str)
    }

    /// Whether `value` has exactly this kind's runtime type.
    ///
    /// `Null` is not matched by any kind; callers decide whether an unset
    /// value is acceptable.
    pub fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Kind::Int, Value::Int(_))
                | (Kind::Float, Value::Float(_))
                | (Kind::Str, Value::Str(_))
                | (Kind::Bool, Value::Bool(_))
                | (Kind::List, Value::List(_))
                | (Kind::Dict, Value::Dict(_))
        )
    }

    /// Infer the kind of a value, or `None` for `Null`
    pub fn infer(value: &Value) -> Option<Kind> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(Kind::Bool),
            Value::Int(_) => Some(Kind::Int),
            Value::Float(_) => Some(Kind::Float),
            Value::Str(_) => Some(Kind::Str),
            Value::List(_) => Some(Kind::List),
            Value::Dict(_) => Some(Kind::Dict),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Kind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownKindError(s.to_string()))
    }
}

/// A dynamically typed hyperparameter value
///
/// `Null` represents an unset value. Lists and dicts are opaque payloads
/// from the point of view of validation, but they can still be addressed
/// element by element with paths such as `k_means.strata.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Dict(IndexMap<String, Value>),
}

impl Value {
    /// The runtime kind name of this value (`none` for `Null`)
    pub fn type_name(&self) -> &'static str {
        Kind::infer(self).map(|k| k.name()).unwrap_or("none")
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The numeric value as a float, for either numeric variant
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    /// Convert a parsed YAML node into a value.
    ///
    /// Tagged nodes, integers outside the `i64` range and non-string
    /// mapping keys are rejected as load errors.
    pub fn from_yaml(yaml: &serde_yaml::Value) -> Result<Value> {
        match yaml {
            serde_yaml::Value::Null => Ok(Value::Null),
            serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if n.is_f64() {
                    n.as_f64().map(Value::Float).ok_or_else(|| HyperparamError::Load {
                        message: format!("Unrepresentable number: {}", n),
                    })
                } else {
                    Err(HyperparamError::Load {
                        message: format!("Integer out of range: {}", n),
                    })
                }
            }
            serde_yaml::Value::String(s) => Ok(Value::Str(s.clone())),
            serde_yaml::Value::Sequence(items) => items
                .iter()
                .map(Value::from_yaml)
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            serde_yaml::Value::Mapping(mapping) => {
                let mut entries = IndexMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    let key = key.as_str().ok_or_else(|| HyperparamError::Load {
                        message: format!("Mapping keys must be strings, got: {:?}", key),
                    })?;
                    entries.insert(key.to_string(), Value::from_yaml(value)?);
                }
                Ok(Value::Dict(entries))
            }
            serde_yaml::Value::Tagged(tagged) => Err(HyperparamError::Load {
                message: format!("Tagged values are not supported: {}", tagged.tag),
            }),
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "'{}'", s),
            other => fmt::Display::fmt(other, f),
        }
    }
}

fn fmt_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{}", x)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => fmt_float(*x, f),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                f.write_str("]")
            }
            Value::Dict(entries) => {
                f.write_str("{")?;
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: ", key)?;
                    item.fmt_nested(f)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Dict(entries)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
