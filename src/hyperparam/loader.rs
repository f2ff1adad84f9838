//! Loading hyperparameter sets from YAML documents
//!
//! A document maps model names to model definitions:
//!
//! ```yaml
//! svm:
//!   desc: support vector machine
//!   C:
//!     type: float
//!     doc: regularization parameter
//!   kernel:
//!     type: str
//!     choices: [radial, linear]
//!   max_iter:
//!     type: int
//!     value: 20
//!     range: [1, 30]
//! k_means:
//!   copy_x: true
//!   strata: [1, 2]
//! ```
//!
//! Model definitions may carry `desc`, `doc` and `table` metadata. Members
//! are either listed under a `params` mapping or given directly next to the
//! metadata. A member mapping with a `type` key is a hyperparameter, any
//! other mapping with at least one member is a nested model, and a bare
//! scalar or sequence is a hyperparameter whose kind is inferred from its
//! value.
//!
//! The metadata keys are reserved at model level: `desc` and `doc` must be
//! strings and `table` a mapping. Hyperparameters with those names can only
//! be declared under `params`.

use crate::error::{HyperparamError, Result};
use crate::hyperparam::bounds::Bounds;
use crate::hyperparam::model::{HyperparamModel, Member};
use crate::hyperparam::param::Hyperparam;
use crate::hyperparam::path::check_identifier;
use crate::hyperparam::set::HyperparamSet;
use crate::hyperparam::value::{FlatMap, Kind, UnknownKindError, Value};
use serde_yaml::{Mapping, Value as YamlValue};
use std::path::{Path, PathBuf};

const TYPE_KEY: &str = "type";
const VALUE_KEY: &str = "value";
const DOC_KEY: &str = "doc";
const CHOICES_KEY: &str = "choices";
const RANGE_KEY: &str = "range";
const DESC_KEY: &str = "desc";
const TABLE_KEY: &str = "table";
const PARAMS_KEY: &str = "params";

const PARAM_KEYS: [&str; 5] = [TYPE_KEY, VALUE_KEY, DOC_KEY, CHOICES_KEY, RANGE_KEY];

/// Loads a [`HyperparamSet`] from a YAML file
///
/// All validation happens here: a load either returns a fully validated
/// set or an error. Updates given with [`with_updates`](Self::with_updates)
/// override the document's defaults and are validated the same way.
#[derive(Debug, Clone)]
pub struct HyperparamSetLoader {
    path: PathBuf,
    updates: FlatMap,
}

impl HyperparamSetLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            updates: FlatMap::new(),
        }
    }

    /// Override values after parsing, keyed by `<model>.<path>`
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperparam_rs::hyperparam::{FlatMap, HyperparamSetLoader, Value};
    ///
    /// let mut updates = FlatMap::new();
    /// updates.insert("svm.max_iter".to_string(), Value::Int(16));
    ///
    /// let set = HyperparamSetLoader::new("unused.yml")
    ///     .with_updates(updates)
    ///     .load_document("svm:\n  max_iter: {type: int, value: 20}\n")
    ///     .unwrap();
    /// assert_eq!(set.flatten()["svm.max_iter"], Value::Int(16));
    /// ```
    pub fn with_updates(mut self, updates: FlatMap) -> Self {
        self.updates = updates;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn updates(&self) -> &FlatMap {
        &self.updates
    }

    /// Read and parse the file, then apply the updates
    pub fn load(&self) -> Result<HyperparamSet> {
        tracing::debug!(path = %self.path.display(), "loading hyperparameters");
        let contents = std::fs::read_to_string(&self.path)?;
        self.load_document(&contents)
    }

    /// Parse a document held in memory, then apply the updates
    ///
    /// A failing update discards the set and returns the error.
    pub fn load_document(&self, document: &str) -> Result<HyperparamSet> {
        let mut set = Self::load_str(document)?;
        if !self.updates.is_empty() {
            tracing::debug!(updates = self.updates.len(), "applying load updates");
            set.update(&self.updates)?;
        }
        Ok(set)
    }

    /// Parse a document held in memory
    pub fn load_str(document: &str) -> Result<HyperparamSet> {
        let yaml: YamlValue = serde_yaml::from_str(document)?;
        Self::load_yaml(&yaml)
    }

    /// Build a set from an already parsed YAML document
    pub fn load_yaml(document: &YamlValue) -> Result<HyperparamSet> {
        let mut set = HyperparamSet::new();
        let models = match document {
            YamlValue::Null => return Ok(set),
            YamlValue::Mapping(models) => models,
            _ => {
                return Err(HyperparamError::load(
                    "Document must be a mapping of model names to definitions",
                ))
            }
        };

        for (key, definition) in models {
            let name = key_str(key)?;
            check_identifier(name)?;
            let definition = definition.as_mapping().ok_or_else(|| {
                HyperparamError::load(format!("Model '{}' must be a mapping", name))
            })?;
            set.add(parse_model(name, definition)?)?;
        }

        tracing::debug!(models = set.len(), "loaded hyperparameter set");
        Ok(set)
    }
}

fn key_str(key: &YamlValue) -> Result<&str> {
    key.as_str()
        .ok_or_else(|| HyperparamError::load(format!("Names must be strings, got: {:?}", key)))
}

fn parse_model(name: &str, definition: &Mapping) -> Result<HyperparamModel> {
    let params = definition.get(PARAMS_KEY);
    let mut model = HyperparamModel::new(name);
    let mut members: Vec<(&str, &YamlValue)> = Vec::new();

    for (key, value) in definition {
        let key = key_str(key)?;
        match (key, value) {
            (DESC_KEY, YamlValue::String(desc)) => model = model.with_desc(desc),
            (DOC_KEY, YamlValue::String(doc)) => model = model.with_doc(doc),
            (TABLE_KEY, YamlValue::Mapping(_)) => {
                if let Value::Dict(table) = Value::from_yaml(value)? {
                    model = model.with_table(table);
                }
            }
            (DESC_KEY | DOC_KEY, _) => {
                return Err(HyperparamError::load(format!(
                    "'{}' of model '{}' must be a string",
                    key, name
                )))
            }
            (TABLE_KEY, _) => {
                return Err(HyperparamError::load(format!(
                    "'{}' of model '{}' must be a mapping",
                    TABLE_KEY, name
                )))
            }
            (PARAMS_KEY, _) => {}
            _ if params.is_some() => {
                return Err(HyperparamError::load(format!(
                    "Unknown key '{}' in model '{}'",
                    key, name
                )))
            }
            _ => members.push((key, value)),
        }
    }

    if let Some(params) = params {
        let params = params.as_mapping().ok_or_else(|| {
            HyperparamError::load(format!("'{}' of model '{}' must be a mapping", PARAMS_KEY, name))
        })?;
        for (key, value) in params {
            members.push((key_str(key)?, value));
        }
    }

    for (member_name, definition) in members {
        let member = parse_member(member_name, definition)?;
        model.add(member)?;
    }

    Ok(model)
}

fn parse_member(name: &str, definition: &YamlValue) -> Result<Member> {
    check_identifier(name)?;
    match definition {
        YamlValue::Mapping(mapping) if mapping.contains_key(TYPE_KEY) => {
            parse_param(name, mapping).map(Member::Param)
        }
        YamlValue::Mapping(mapping)
            if [VALUE_KEY, CHOICES_KEY, RANGE_KEY]
                .iter()
                .any(|k| mapping.contains_key(*k)) =>
        {
            Err(missing_type(name))
        }
        YamlValue::Mapping(mapping) => {
            let model = parse_model(name, mapping)?;
            if model.is_empty() {
                return Err(missing_type(name));
            }
            Ok(Member::Model(model))
        }
        YamlValue::Null => Err(missing_type(name)),
        other => {
            let value = Value::from_yaml(other)?;
            let kind = Kind::infer(&value).ok_or_else(|| missing_type(name))?;
            Ok(Member::Param(Hyperparam::new(name, kind).with_value(value)?))
        }
    }
}

fn missing_type(name: &str) -> HyperparamError {
    HyperparamError::load(format!("Missing '{}' for hyperparameter '{}'", TYPE_KEY, name))
}

fn parse_param(name: &str, definition: &Mapping) -> Result<Hyperparam> {
    for key in definition.keys() {
        let key = key_str(key)?;
        if !PARAM_KEYS.contains(&key) {
            return Err(HyperparamError::load(format!(
                "Unknown key '{}' for hyperparameter '{}'",
                key, name
            )));
        }
    }

    let kind: Kind = definition
        .get(TYPE_KEY)
        .and_then(YamlValue::as_str)
        .ok_or_else(|| {
            HyperparamError::load(format!(
                "'{}' of hyperparameter '{}' must be a string",
                TYPE_KEY, name
            ))
        })?
        .parse()
        .map_err(|e: UnknownKindError| HyperparamError::load(e.to_string()))?;

    let mut param = Hyperparam::new(name, kind);

    match definition.get(DOC_KEY) {
        None | Some(YamlValue::Null) => {}
        Some(YamlValue::String(doc)) => param = param.with_doc(doc),
        Some(_) => {
            return Err(HyperparamError::load(format!(
                "'{}' of hyperparameter '{}' must be a string",
                DOC_KEY, name
            )))
        }
    }

    if let Some(choices) = definition.get(CHOICES_KEY) {
        match Value::from_yaml(choices)? {
            Value::List(choices) => param = param.with_choices(choices)?,
            _ => {
                return Err(HyperparamError::load(format!(
                    "'{}' of hyperparameter '{}' must be a sequence",
                    CHOICES_KEY, name
                )))
            }
        }
    }

    if let Some(range) = definition.get(RANGE_KEY) {
        match Value::from_yaml(range)? {
            Value::List(bounds) => param = param.with_range(Bounds::from_values(&bounds)?)?,
            _ => {
                return Err(HyperparamError::load(format!(
                    "'{}' of hyperparameter '{}' must be a sequence",
                    RANGE_KEY, name
                )))
            }
        }
    }

    if let Some(value) = definition.get(VALUE_KEY) {
        param = param.with_value(Value::from_yaml(value)?)?;
    }

    Ok(param)
}
