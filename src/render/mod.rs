//! Rendering hyperparameter sets for people and programs.
//!
//! This module writes a [`HyperparamSet`] as indented text, JSON, YAML,
//! a Sphinx documented dataclass, or hands it to a table generator.

use crate::error::Result;
use crate::hyperparam::HyperparamSet;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

pub mod serial;
pub mod sphinx;
pub mod table;
pub mod text;

pub use table::{render_tables, HyperparamTable, TableDefaults, TableGenerator, TableRow};

/// Options for the text renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOptions {
    /// Spaces per nesting level. Default: 4
    pub indent: usize,

    /// Include model and hyperparameter documentation. Default: false
    pub include_full: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            include_full: false,
        }
    }
}

impl WriteOptions {
    /// Options for the `full` format.
    pub fn full() -> Self {
        Self {
            include_full: true,
            ..Default::default()
        }
    }

    pub(crate) fn pad(&self, depth: usize) -> String {
        " ".repeat(self.indent * depth)
    }
}

/// Error returned when parsing an unknown output format name.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown output format '{0}', expecting one of: short, full, json, yaml, sphinx, table")]
pub struct UnknownFormatError(pub String);

/// Output formats supported by [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Values, kinds and constraints as indented text
    Short,

    /// Like `Short`, with documentation
    Full,

    Json,

    Yaml,

    /// Python dataclass with Sphinx `:param:`/`:type:` docstrings
    Sphinx,

    /// One table per model, written as YAML rows
    Table,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Short,
        OutputFormat::Full,
        OutputFormat::Json,
        OutputFormat::Yaml,
        OutputFormat::Sphinx,
        OutputFormat::Table,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Short => "short",
            OutputFormat::Full => "full",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Sphinx => "sphinx",
            OutputFormat::Table => "table",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OutputFormat::ALL
            .iter()
            .copied()
            .find(|format| format.name() == s)
            .ok_or_else(|| UnknownFormatError(s.to_string()))
    }
}

/// Write `set` to `writer` in the given format.
///
/// `Short` and `Full` differ only in documentation, so `options.include_full`
/// is overridden by the format. The `Table` format collects the tables with
/// default hints and writes them as YAML; use [`render_tables`] to feed a
/// custom [`TableGenerator`].
///
/// # Examples
///
/// ```
/// use hyperparam_rs::hyperparam::HyperparamSetLoader;
/// use hyperparam_rs::render::{render, OutputFormat, WriteOptions};
///
/// let set = HyperparamSetLoader::load_str("svm:\n  C: {type: float, value: 0.5}\n").unwrap();
/// let mut out = Vec::new();
/// render(&set, OutputFormat::Short, &WriteOptions::default(), &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "models:\n    svm:\n        C: 0.5 (float)\n"
/// );
/// ```
pub fn render<W: Write>(
    set: &HyperparamSet,
    format: OutputFormat,
    options: &WriteOptions,
    writer: &mut W,
) -> Result<()> {
    tracing::debug!(%format, models = set.len(), "rendering hyperparameters");
    match format {
        OutputFormat::Short | OutputFormat::Full => {
            let options = WriteOptions {
                include_full: format == OutputFormat::Full,
                ..options.clone()
            };
            text::write_set(set, writer, &options)
        }
        OutputFormat::Json => serial::write_json(set, writer),
        OutputFormat::Yaml => serial::write_yaml(set, writer),
        OutputFormat::Sphinx => sphinx::write_sphinx(set, writer, options),
        OutputFormat::Table => {
            let mut tables: Vec<HyperparamTable> = Vec::new();
            render_tables(set, &TableDefaults::default(), &mut tables)?;
            serial::write_yaml(&tables, writer)
        }
    }
}

/// Render to a `String`.
pub fn render_to_string(
    set: &HyperparamSet,
    format: OutputFormat,
    options: &WriteOptions,
) -> Result<String> {
    let mut out = Vec::new();
    render(set, format, options, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
