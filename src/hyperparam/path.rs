//! Dotted path parsing and resolution
//!
//! Paths address members across the model tree and into list and dict
//! payloads, e.g. `svm.max_iter`, `k_means.strata.0` or
//! `k_means.kwargs.learning_rate`. A trailing `node()` segment asks for the
//! addressed container (model or hyperparameter) rather than its value.
//!
//! Resolution walks the segments left to right. A hyperparameter that is
//! followed by more segments is entered through its value, so list
//! indexing and dict lookups work on the payload directly.

use crate::error::{HyperparamError, Result};
use crate::hyperparam::model::{HyperparamModel, Member};
use crate::hyperparam::param::Hyperparam;
use crate::hyperparam::set::HyperparamSet;
use crate::hyperparam::value::Value;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, char},
    combinator::{all_consuming, recognize},
    multi::{many0, separated_list1},
    sequence::pair,
    IResult, Parser,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Terminal segment that selects the container instead of its value.
pub const NODE_ACCESSOR: &str = "node()";

/// Errors raised while resolving or assigning through a path
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("List indices must be integers, not '{0}'")]
    ListIndex(String),

    #[error("List index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Trying to index '{type_name}' with remaining path: [{}]", quote_segments(.remaining))]
    Indexing {
        type_name: &'static str,
        remaining: Vec<String>,
    },

    #[error("Invalid path: '{0}'")]
    InvalidPath(String),

    #[error("Cannot assign a value to '{0}'")]
    NotAssignable(String),

    #[error("Member '{name}' is not a {expected}")]
    WrongMember { name: String, expected: &'static str },
}

fn quote_segments(segments: &[String]) -> String {
    segments
        .iter()
        .map(|s| format!("'{}'", s))
        .collect::<Vec<_>>()
        .join(", ")
}

// Parser functions using nom

/// Parse an identifier: a letter or underscore followed by letters, digits
/// or underscores
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

/// Parse a single non-empty path segment
fn segment(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != '.').parse(input)
}

/// Parse a dot separated list of segments
fn segments(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('.'), segment).parse(input)
}

/// Whether `name` is a legal model or hyperparameter name
///
/// # Examples
///
/// ```
/// use hyperparam_rs::hyperparam::is_identifier;
///
/// assert!(is_identifier("max_iter"));
/// assert!(is_identifier("_private"));
/// assert!(!is_identifier("kernel()"));
/// assert!(!is_identifier("2d"));
/// ```
pub fn is_identifier(name: &str) -> bool {
    all_consuming(identifier).parse(name).is_ok()
}

/// Fail with a naming error unless `name` is an identifier.
pub(crate) fn check_identifier(name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(HyperparamError::Naming {
            name: name.to_string(),
        })
    }
}

/// A parsed dotted address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<String>,
    node: bool,
}

impl Path {
    /// Parse a dotted address, splitting off a trailing `node()`
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperparam_rs::hyperparam::Path;
    ///
    /// let path = Path::parse("svm.max_iter.node()").unwrap();
    /// assert_eq!(path.segments(), ["svm", "max_iter"]);
    /// assert!(path.is_node());
    /// ```
    pub fn parse(input: &str) -> std::result::Result<Self, PathError> {
        let (_, parts) = all_consuming(segments)
            .parse(input)
            .map_err(|_| PathError::InvalidPath(input.to_string()))?;

        let mut segments: Vec<String> = parts.into_iter().map(str::to_string).collect();
        let node = segments.last().map(|s| s == NODE_ACCESSOR).unwrap_or(false);
        if node {
            segments.pop();
        }

        Ok(Self { segments, node })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the path ends with the `node()` accessor
    pub fn is_node(&self) -> bool {
        self.node
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))?;
        if self.node {
            if !self.segments.is_empty() {
                f.write_str(".")?;
            }
            f.write_str(NODE_ACCESSOR)?;
        }
        Ok(())
    }
}

/// What a path resolved to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Model(&'a HyperparamModel),
    Param(&'a Hyperparam),
    Value(&'a Value),
}

impl<'a> Resolved<'a> {
    pub fn as_model(&self) -> Option<&'a HyperparamModel> {
        match self {
            Resolved::Model(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_param(&self) -> Option<&'a Hyperparam> {
        match self {
            Resolved::Param(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Resolved::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Position of a walk over the tree
pub(crate) enum Cursor<'a> {
    Set(&'a HyperparamSet),
    Model(&'a HyperparamModel),
    Param(&'a Hyperparam),
    Value(&'a Value),
}

/// Mutable position of a walk over the tree
pub(crate) enum CursorMut<'a> {
    Set(&'a mut HyperparamSet),
    Model(&'a mut HyperparamModel),
    Param(&'a mut Hyperparam),
    Value(&'a mut Value),
}

fn parse_index(segment: &str) -> std::result::Result<usize, PathError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PathError::ListIndex(segment.to_string()));
    }
    segment
        .parse::<usize>()
        .map_err(|_| PathError::ListIndex(segment.to_string()))
}

fn indexing_error(value: &Value, segment: &str, rest: &[String]) -> HyperparamError {
    let remaining = std::iter::once(segment.to_string())
        .chain(rest.iter().cloned())
        .collect();
    PathError::Indexing {
        type_name: value.type_name(),
        remaining,
    }
    .into()
}

fn member_cursor(member: &Member) -> Cursor<'_> {
    match member {
        Member::Param(p) => Cursor::Param(p),
        Member::Model(m) => Cursor::Model(m),
    }
}

fn step<'a>(cursor: Cursor<'a>, segment: &str, rest: &[String]) -> Result<Cursor<'a>> {
    match cursor {
        Cursor::Set(set) => set.get(segment).map(Cursor::Model),
        Cursor::Model(model) => model.get(segment).map(member_cursor),
        Cursor::Param(param) => step(Cursor::Value(param.value()), segment, rest),
        Cursor::Value(value) => match value {
            Value::List(items) => {
                let index = parse_index(segment)?;
                items.get(index).map(Cursor::Value).ok_or_else(|| {
                    PathError::IndexOutOfRange {
                        index,
                        len: items.len(),
                    }
                    .into()
                })
            }
            Value::Dict(entries) => entries
                .get(segment)
                .map(Cursor::Value)
                .ok_or_else(|| HyperparamError::key_not_found(segment)),
            other => Err(indexing_error(other, segment, rest)),
        },
    }
}

fn step_mut<'a>(cursor: CursorMut<'a>, segment: &str, rest: &[String]) -> Result<CursorMut<'a>> {
    match cursor {
        CursorMut::Set(set) => set.get_mut(segment).map(CursorMut::Model),
        CursorMut::Model(model) => Ok(match model.get_mut(segment)? {
            Member::Param(p) => CursorMut::Param(p),
            Member::Model(m) => CursorMut::Model(m),
        }),
        CursorMut::Param(param) => step_mut(CursorMut::Value(param.payload_mut()), segment, rest),
        CursorMut::Value(value) => match value {
            Value::List(items) => {
                let index = parse_index(segment)?;
                let len = items.len();
                items
                    .get_mut(index)
                    .map(CursorMut::Value)
                    .ok_or_else(|| PathError::IndexOutOfRange { index, len }.into())
            }
            Value::Dict(entries) => entries
                .get_mut(segment)
                .map(CursorMut::Value)
                .ok_or_else(|| HyperparamError::key_not_found(segment)),
            other => Err(indexing_error(other, segment, rest)),
        },
    }
}

/// Resolve `path` starting at `root`.
pub(crate) fn resolve<'a>(root: Cursor<'a>, path: &Path) -> Result<Resolved<'a>> {
    let segments = path.segments();
    let mut cursor = root;
    for (i, segment) in segments.iter().enumerate() {
        cursor = step(cursor, segment, &segments[i + 1..])?;
    }

    match cursor {
        Cursor::Set(_) => Err(PathError::InvalidPath(path.to_string()).into()),
        Cursor::Model(model) => Ok(Resolved::Model(model)),
        Cursor::Param(param) if path.is_node() => Ok(Resolved::Param(param)),
        Cursor::Param(param) => Ok(Resolved::Value(param.value())),
        Cursor::Value(value) => Ok(Resolved::Value(value)),
    }
}

/// Assign `value` at `path` starting at `root`.
///
/// Hyperparameters are assigned through their validation; list elements
/// and dict entries are replaced (or inserted, for dict keys) directly.
pub(crate) fn assign(root: CursorMut<'_>, path: &Path, value: Value) -> Result<()> {
    if path.is_node() {
        return Err(PathError::NotAssignable(path.to_string()).into());
    }
    let (last, parents) = path
        .segments()
        .split_last()
        .ok_or_else(|| PathError::InvalidPath(path.to_string()))?;

    let segments = path.segments();
    let mut cursor = root;
    for (i, segment) in parents.iter().enumerate() {
        cursor = step_mut(cursor, segment, &segments[i + 1..])?;
    }

    tracing::trace!(path = %path, "assign");
    assign_last(cursor, last, value)
}

fn assign_last(cursor: CursorMut<'_>, segment: &str, value: Value) -> Result<()> {
    match cursor {
        CursorMut::Set(_) => Err(PathError::NotAssignable(segment.to_string()).into()),
        CursorMut::Model(model) => match model.get_mut(segment)? {
            Member::Param(param) => Ok(param.set_value(value)?),
            Member::Model(_) => Err(PathError::NotAssignable(segment.to_string()).into()),
        },
        CursorMut::Param(param) => assign_last(CursorMut::Value(param.payload_mut()), segment, value),
        CursorMut::Value(target) => match target {
            Value::List(items) => {
                let index = parse_index(segment)?;
                let len = items.len();
                let slot = items
                    .get_mut(index)
                    .ok_or(PathError::IndexOutOfRange { index, len })?;
                *slot = value;
                Ok(())
            }
            Value::Dict(entries) => {
                entries.insert(segment.to_string(), value);
                Ok(())
            }
            other => Err(indexing_error(other, segment, &[])),
        },
    }
}
