//! Sphinx documented Python class of a hyperparameter set
//!
//! The output is a module with one `@dataclass` whose fields are the
//! models. Each field's docstring holds a `Hyperparameters::` block of
//! `:param:`/`:type:` pairs, so the generated file can be imported and
//! rendered by Sphinx as is.

use crate::error::Result;
use crate::hyperparam::{Hyperparam, HyperparamModel, HyperparamSet};
use crate::render::WriteOptions;
use std::io::Write;

/// Class name used by [`write_sphinx`]
pub const DEFAULT_CLASS_NAME: &str = "Hyperparams";

const IMPORTS: &str = "from dataclasses import dataclass, field\n\
                       from zensols.datdesc import HyperparamModel\n";

const QUOTES: &str = "\"\"\"";

/// Write the set as a dataclass named [`DEFAULT_CLASS_NAME`]
pub fn write_sphinx<W: Write>(set: &HyperparamSet, writer: &mut W, options: &WriteOptions) -> Result<()> {
    write_sphinx_class(set, DEFAULT_CLASS_NAME, writer, options)
}

/// Write the set as a dataclass named `class_name`
///
/// # Examples
///
/// ```
/// use hyperparam_rs::hyperparam::HyperparamSetLoader;
/// use hyperparam_rs::render::sphinx::write_sphinx_class;
/// use hyperparam_rs::render::WriteOptions;
///
/// let set = HyperparamSetLoader::load_str("svm:\n  C: {type: float}\n").unwrap();
/// let mut out = Vec::new();
/// write_sphinx_class(&set, "SvmHyperparams", &mut out, &WriteOptions::default()).unwrap();
/// let out = String::from_utf8(out).unwrap();
/// assert!(out.contains("class SvmHyperparams(object):\n"));
/// assert!(out.contains("    svm: HyperparamModel = field()\n"));
/// ```
pub fn write_sphinx_class<W: Write>(
    set: &HyperparamSet,
    class_name: &str,
    writer: &mut W,
    options: &WriteOptions,
) -> Result<()> {
    let pad = options.pad(1);
    write!(writer, "{}\n\n", IMPORTS)?;
    writeln!(writer, "@dataclass")?;
    writeln!(writer, "class {}(object):", class_name)?;

    let descs: Vec<String> = set.models().map(|m| format!("``{}``", m.desc())).collect();
    if descs.is_empty() {
        writeln!(writer, "{}{}Hyperparameters.", pad, QUOTES)?;
    } else {
        writeln!(writer, "{}{}Hyperparameters for models {}.", pad, QUOTES, descs.join(", "))?;
    }
    writeln!(writer)?;
    writeln!(writer, "{}{}", pad, QUOTES)?;

    for (i, model) in set.models().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        write_field(model, writer, options)?;
    }
    Ok(())
}

/// Write one model as a dataclass field with its docstring
pub fn write_field<W: Write>(
    model: &HyperparamModel,
    writer: &mut W,
    options: &WriteOptions,
) -> Result<()> {
    let pad = options.pad(1);
    writeln!(writer, "{}{}: HyperparamModel = field()", pad, model.name())?;
    writeln!(
        writer,
        "{}{}{}",
        pad,
        QUOTES,
        model.doc().unwrap_or(model.desc())
    )?;

    let leaves = model.leaves();
    if !leaves.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "{}Hyperparameters::", pad)?;
        let inner = options.pad(2);
        for (name, param) in leaves {
            writeln!(writer)?;
            match param_field(param) {
                Some(doc) => writeln!(writer, "{}:param {}: {}", inner, name, doc)?,
                None => writeln!(writer, "{}:param {}:", inner, name)?,
            }
            writeln!(writer, "{}:type {}: {}", inner, name, type_field(param))?;
        }
    }
    writeln!(writer, "{}{}", pad, QUOTES)?;
    Ok(())
}

fn param_field(param: &Hyperparam) -> Option<String> {
    let range = param.range();
    match (param.doc(), range) {
        (Some(doc), Some(range)) => Some(format!("{}, must be in the interval {}", doc, range)),
        (Some(doc), None) => Some(doc.to_string()),
        (None, Some(range)) => Some(format!("must be in the interval {}", range)),
        (None, None) => None,
    }
}

fn type_field(param: &Hyperparam) -> String {
    match param.choices() {
        Some(choices) => {
            let choices: Vec<String> = choices.iter().map(ToString::to_string).collect();
            format!("{}; one of: {}", param.kind(), choices.join(", "))
        }
        None => param.kind().to_string(),
    }
}
