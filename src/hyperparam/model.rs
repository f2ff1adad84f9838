//! Hyperparameter model implementation
//!
//! A [`HyperparamModel`] is a named, ordered group of hyperparameters and
//! nested models, for example the settings of one learning algorithm.
//! Members keep their declaration order, which every renderer follows.

use crate::error::{HyperparamError, Result};
use crate::hyperparam::param::Hyperparam;
use crate::hyperparam::path::{self, check_identifier, Cursor, CursorMut, Path, PathError, Resolved};
use crate::hyperparam::value::{FlatMap, Value};
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Write;

/// Export to, and the source of updates from, the flat dotted wire format
pub trait Flatten {
    /// Map every hyperparameter's dotted path to its value
    fn flatten(&self) -> FlatMap;
}

impl Flatten for FlatMap {
    fn flatten(&self) -> FlatMap {
        self.clone()
    }
}

/// A member of a model: a hyperparameter or a nested model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Member {
    Param(Hyperparam),
    Model(HyperparamModel),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Param(p) => p.name(),
            Member::Model(m) => m.name(),
        }
    }

    pub fn as_param(&self) -> Option<&Hyperparam> {
        match self {
            Member::Param(p) => Some(p),
            Member::Model(_) => None,
        }
    }

    pub fn as_model(&self) -> Option<&HyperparamModel> {
        match self {
            Member::Model(m) => Some(m),
            Member::Param(_) => None,
        }
    }
}

impl From<Hyperparam> for Member {
    fn from(param: Hyperparam) -> Self {
        Member::Param(param)
    }
}

impl From<HyperparamModel> for Member {
    fn from(model: HyperparamModel) -> Self {
        Member::Model(model)
    }
}

/// A named, ordered collection of hyperparameters and nested models
///
/// Values are read and written with [`value`](Self::value) and
/// [`set_value`](Self::set_value); the hyperparameter or nested model
/// itself is available through [`get`](Self::get).
///
/// Two models are equal when their metadata match and they hold equal
/// members in the same order.
#[derive(Debug, Clone, Serialize)]
pub struct HyperparamModel {
    name: String,

    /// Human readable description, the name unless given
    desc: String,

    doc: Option<String>,

    /// Rendering hints passed through to table generators
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<IndexMap<String, Value>>,

    #[serde(rename = "params")]
    members: IndexMap<String, Member>,
}

impl HyperparamModel {
    /// Create an empty model
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperparam_rs::hyperparam::HyperparamModel;
    ///
    /// let model = HyperparamModel::new("svm");
    /// assert_eq!(model.name(), "svm");
    /// assert_eq!(model.desc(), "svm");
    /// assert!(model.is_empty());
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            desc: name.to_string(),
            doc: None,
            table: None,
            members: IndexMap::new(),
        }
    }

    pub fn with_desc(mut self, desc: &str) -> Self {
        self.desc = desc.to_string();
        self
    }

    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    pub fn with_table(mut self, table: IndexMap<String, Value>) -> Self {
        self.table = Some(table);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn table(&self) -> Option<&IndexMap<String, Value>> {
        self.table.as_ref()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Member names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.members.keys()
    }

    /// Members in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Member)> {
        self.members.iter()
    }

    /// Add a member, rejecting illegal and duplicate names
    pub fn add(&mut self, member: impl Into<Member>) -> Result<()> {
        let member = member.into();
        let name = member.name().to_string();
        check_identifier(&name)?;
        if self.members.contains_key(&name) {
            return Err(HyperparamError::DuplicateName { name });
        }
        self.members.insert(name, member);
        Ok(())
    }

    pub fn add_param(&mut self, param: Hyperparam) -> Result<()> {
        self.add(Member::Param(param))
    }

    pub fn add_model(&mut self, model: HyperparamModel) -> Result<()> {
        self.add(Member::Model(model))
    }

    /// Get a member (hyperparameter or nested model) by name
    pub fn get(&self, name: &str) -> Result<&Member> {
        self.members
            .get(name)
            .ok_or_else(|| HyperparamError::key_not_found(name))
    }

    /// Get a mutable member by name
    ///
    /// Hyperparameters reached this way still validate every assignment.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Member> {
        self.members
            .get_mut(name)
            .ok_or_else(|| HyperparamError::key_not_found(name))
    }

    /// Get a hyperparameter by name
    pub fn param(&self, name: &str) -> Result<&Hyperparam> {
        self.get(name)?.as_param().ok_or_else(|| {
            PathError::WrongMember {
                name: name.to_string(),
                expected: "hyperparameter",
            }
            .into()
        })
    }

    /// Get a nested model by name
    pub fn model(&self, name: &str) -> Result<&HyperparamModel> {
        self.get(name)?.as_model().ok_or_else(|| {
            PathError::WrongMember {
                name: name.to_string(),
                expected: "model",
            }
            .into()
        })
    }

    /// The value of the named hyperparameter
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperparam_rs::hyperparam::{Hyperparam, HyperparamModel, Kind, Value};
    ///
    /// let mut model = HyperparamModel::new("svm");
    /// model.add_param(Hyperparam::new("C", Kind::Float)).unwrap();
    /// model.set_value("C", 2.0).unwrap();
    /// assert_eq!(model.value("C").unwrap(), &Value::Float(2.0));
    /// ```
    pub fn value(&self, name: &str) -> Result<&Value> {
        Ok(self.param(name)?.value())
    }

    /// Validate and assign the value of the named hyperparameter
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        match self.get_mut(name)? {
            Member::Param(param) => Ok(param.set_value(value)?),
            Member::Model(_) => Err(PathError::NotAssignable(name.to_string()).into()),
        }
    }

    /// Resolve a dotted path relative to this model
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperparam_rs::hyperparam::{Hyperparam, HyperparamModel, Kind, Value};
    ///
    /// let mut model = HyperparamModel::new("k_means");
    /// model
    ///     .add_param(Hyperparam::new("strata", Kind::List).with_value(vec![1, 2]).unwrap())
    ///     .unwrap();
    /// let first = model.resolve("strata.0").unwrap();
    /// assert_eq!(first.as_value(), Some(&Value::Int(1)));
    /// ```
    pub fn resolve(&self, path: &str) -> Result<Resolved<'_>> {
        let path = Path::parse(path)?;
        path::resolve(Cursor::Model(self), &path)
    }

    /// Assign a value at a dotted path relative to this model
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let path = Path::parse(path)?;
        path::assign(CursorMut::Model(self), &path, value.into())
    }

    pub(crate) fn flatten_into(&self, prefix: &str, out: &mut FlatMap) {
        for (name, member) in &self.members {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };
            match member {
                Member::Param(param) => {
                    out.insert(key, param.value().clone());
                }
                Member::Model(model) => model.flatten_into(&key, out),
            }
        }
    }

    /// Map each hyperparameter's dotted path (relative to this model) to its
    /// value, depth first in declaration order
    pub fn flatten(&self) -> FlatMap {
        let mut out = FlatMap::new();
        self.flatten_into("", &mut out);
        out
    }

    /// Apply every entry of `source` through [`set`](Self::set).
    ///
    /// Updates are applied in order and stop at the first failure; entries
    /// applied before the failing one are kept.
    pub fn update<S: Flatten + ?Sized>(&mut self, source: &S) -> Result<()> {
        for (key, value) in source.flatten() {
            self.set(&key, value)?;
        }
        Ok(())
    }

    /// Write the model as indented text, with documentation when
    /// `include_full` is set
    pub fn write<W: Write>(&self, writer: &mut W, include_full: bool) -> Result<()> {
        let options = crate::render::WriteOptions {
            include_full,
            ..Default::default()
        };
        crate::render::text::write_model(self, writer, 0, &options)
    }

    /// All hyperparameters in the subtree with their dotted names
    pub fn leaves(&self) -> Vec<(String, &Hyperparam)> {
        let mut out = Vec::new();
        self.collect_leaves("", &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Hyperparam)>) {
        for (name, member) in &self.members {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };
            match member {
                Member::Param(param) => out.push((key, param)),
                Member::Model(model) => model.collect_leaves(&key, out),
            }
        }
    }
}

impl PartialEq for HyperparamModel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.desc == other.desc
            && self.doc == other.doc
            && self.table == other.table
            && self.members.iter().eq(other.members.iter())
    }
}

impl Flatten for HyperparamModel {
    fn flatten(&self) -> FlatMap {
        HyperparamModel::flatten(self)
    }
}
