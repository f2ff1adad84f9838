//! The top-level collection of hyperparameter models

use crate::error::{HyperparamError, Result};
use crate::hyperparam::model::{Flatten, HyperparamModel};
use crate::hyperparam::path::{self, check_identifier, Cursor, CursorMut, Path, Resolved};
use crate::hyperparam::value::{FlatMap, Value};
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Write;

/// An ordered set of named models, usually loaded from one document
///
/// Paths and flattened keys are prefixed with the model name, e.g.
/// `svm.max_iter`. Sets are equal when they hold equal models in the same
/// order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct HyperparamSet {
    models: IndexMap<String, HyperparamModel>,
}

impl HyperparamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model, rejecting illegal and duplicate names
    pub fn add(&mut self, model: HyperparamModel) -> Result<()> {
        let name = model.name().to_string();
        check_identifier(&name)?;
        if self.models.contains_key(&name) {
            return Err(HyperparamError::DuplicateName { name });
        }
        self.models.insert(name, model);
        Ok(())
    }

    /// Get a model by name
    pub fn get(&self, name: &str) -> Result<&HyperparamModel> {
        self.models
            .get(name)
            .ok_or_else(|| HyperparamError::key_not_found(name))
    }

    /// Get a mutable model by name
    pub fn get_mut(&mut self, name: &str) -> Result<&mut HyperparamModel> {
        self.models
            .get_mut(name)
            .ok_or_else(|| HyperparamError::key_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Model names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.models.keys()
    }

    /// Models in declaration order
    pub fn models(&self) -> impl Iterator<Item = &HyperparamModel> {
        self.models.values()
    }

    /// Resolve a dotted path whose first segment names a model
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperparam_rs::hyperparam::HyperparamSetLoader;
    ///
    /// let set = HyperparamSetLoader::load_str(
    ///     "svm:\n  max_iter: {type: int, value: 20, range: [1, 30]}\n",
    /// )
    /// .unwrap();
    /// let value = set.resolve("svm.max_iter").unwrap();
    /// assert_eq!(value.as_value().and_then(|v| v.as_i64()), Some(20));
    ///
    /// let param = set.resolve("svm.max_iter.node()").unwrap();
    /// assert_eq!(param.as_param().unwrap().name(), "max_iter");
    /// ```
    pub fn resolve(&self, path: &str) -> Result<Resolved<'_>> {
        let path = Path::parse(path)?;
        path::resolve(Cursor::Set(self), &path)
    }

    /// Assign a value at a dotted path whose first segment names a model
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let path = Path::parse(path)?;
        path::assign(CursorMut::Set(self), &path, value.into())
    }

    /// Map `<model>.<path>` of every hyperparameter to its value
    pub fn flatten(&self) -> FlatMap {
        let mut out = FlatMap::new();
        for (name, model) in &self.models {
            model.flatten_into(name, &mut out);
        }
        out
    }

    /// Apply every entry of `source` through [`set`](Self::set).
    ///
    /// Updates are applied in order and stop at the first failure; entries
    /// applied before the failing one are kept.
    pub fn update<S: Flatten + ?Sized>(&mut self, source: &S) -> Result<()> {
        let flat = source.flatten();
        tracing::debug!(entries = flat.len(), "updating hyperparameter set");
        for (key, value) in flat {
            self.set(&key, value)?;
        }
        Ok(())
    }

    /// Write all models as indented text, with documentation when
    /// `include_full` is set
    pub fn write<W: Write>(&self, writer: &mut W, include_full: bool) -> Result<()> {
        let options = crate::render::WriteOptions {
            include_full,
            ..Default::default()
        };
        crate::render::text::write_set(self, writer, &options)
    }
}

impl PartialEq for HyperparamSet {
    fn eq(&self, other: &Self) -> bool {
        self.models.iter().eq(other.models.iter())
    }
}

impl Flatten for HyperparamSet {
    fn flatten(&self) -> FlatMap {
        HyperparamSet::flatten(self)
    }
}
