//! Tabular hand-off of models to external table generators
//!
//! Every model becomes a [`HyperparamTable`] with one row per
//! hyperparameter. Formatting the table (LaTeX, spreadsheets, ...) is left
//! to a [`TableGenerator`] implementation.

use crate::error::Result;
use crate::hyperparam::{HyperparamModel, HyperparamSet, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default rendering hints applied to every table
///
/// A model's own `table` hints take precedence over these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableDefaults {
    hints: IndexMap<String, Value>,
}

impl TableDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hint(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.hints.insert(key.to_string(), value.into());
        self
    }

    pub fn hints(&self) -> &IndexMap<String, Value> {
        &self.hints
    }

    /// The defaults overlaid by a model's hints
    pub fn merge(&self, model: &HyperparamModel) -> IndexMap<String, Value> {
        let mut hints = self.hints.clone();
        if let Some(table) = model.table() {
            for (key, value) in table {
                hints.insert(key.clone(), value.clone());
            }
        }
        hints
    }
}

/// One hyperparameter row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Dotted name relative to the model
    pub name: String,
    pub value: Value,
    pub doc: Option<String>,
}

/// The rows and hints of one model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperparamTable {
    pub name: String,
    pub desc: String,
    pub hints: IndexMap<String, Value>,
    pub rows: Vec<TableRow>,
}

impl HyperparamTable {
    pub fn from_model(model: &HyperparamModel, defaults: &TableDefaults) -> Self {
        let rows = model
            .leaves()
            .into_iter()
            .map(|(name, param)| TableRow {
                name,
                value: param.value().clone(),
                doc: param.doc().map(str::to_string),
            })
            .collect();
        Self {
            name: model.name().to_string(),
            desc: model.desc().to_string(),
            hints: defaults.merge(model),
            rows,
        }
    }
}

/// Consumer of hyperparameter tables
pub trait TableGenerator {
    /// Called once per model, in declaration order
    fn generate(&mut self, table: HyperparamTable) -> Result<()>;
}

impl TableGenerator for Vec<HyperparamTable> {
    fn generate(&mut self, table: HyperparamTable) -> Result<()> {
        self.push(table);
        Ok(())
    }
}

/// Build a table for every model of the set and pass it to `generator`
pub fn render_tables(
    set: &HyperparamSet,
    defaults: &TableDefaults,
    generator: &mut dyn TableGenerator,
) -> Result<()> {
    for model in set.models() {
        tracing::trace!(model = model.name(), "generating table");
        generator.generate(HyperparamTable::from_model(model, defaults))?;
    }
    Ok(())
}
