//! Tests for the table hand-off

use crate::test_helpers::load_svm;
use hyperparam_rs::error::Result;
use hyperparam_rs::hyperparam::{HyperparamSetLoader, Value};
use hyperparam_rs::render::{
    render_tables, render_to_string, HyperparamTable, OutputFormat, TableDefaults,
    TableGenerator, WriteOptions,
};

/// Collects the names of the generated tables and their row counts
#[derive(Default)]
struct Summary {
    lines: Vec<String>,
}

impl TableGenerator for Summary {
    fn generate(&mut self, table: HyperparamTable) -> Result<()> {
        self.lines.push(format!("{} ({}): {} rows", table.name, table.desc, table.rows.len()));
        Ok(())
    }
}

#[test]
fn test_generator_receives_every_model() {
    let set = load_svm();
    let mut summary = Summary::default();
    render_tables(&set, &TableDefaults::default(), &mut summary).unwrap();
    assert_eq!(
        summary.lines,
        vec!["svm (svm): 3 rows", "k_means (k-means): 4 rows"]
    );
}

#[test]
fn test_rows_and_hints() {
    let set = HyperparamSetLoader::load_str(
        "pipeline:\n  table: {caption: Pipeline settings}\n  seed: 3\n  scaler:\n    with_mean: {type: bool, value: false, doc: center data}\n",
    )
    .unwrap();
    let defaults = TableDefaults::new()
        .with_hint("caption", "Hyperparameters")
        .with_hint("column_keeps", vec!["name", "value"]);

    let mut tables: Vec<HyperparamTable> = Vec::new();
    render_tables(&set, &defaults, &mut tables).unwrap();
    let table = &tables[0];

    assert_eq!(table.hints["caption"], Value::from("Pipeline settings"));
    assert_eq!(table.hints["column_keeps"], Value::from(vec!["name", "value"]));
    assert_eq!(
        table.rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        vec!["seed", "scaler.with_mean"]
    );
    assert_eq!(table.rows[1].value, Value::Bool(false));
    assert_eq!(table.rows[1].doc.as_deref(), Some("center data"));
}

#[test]
fn test_table_format() {
    let set = load_svm();
    let out = render_to_string(&set, OutputFormat::Table, &WriteOptions::default()).unwrap();
    let tables: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
    assert_eq!(tables[0]["name"].as_str(), Some("svm"));
    assert_eq!(tables[1]["rows"][3]["name"].as_str(), Some("kwargs"));
}

#[test]
fn test_defaults_deserialize() {
    let defaults: TableDefaults = serde_yaml::from_str("placement: t\nsize: small\n").unwrap();
    assert_eq!(
        defaults.hints().keys().cloned().collect::<Vec<_>>(),
        vec!["placement", "size"]
    );
}
