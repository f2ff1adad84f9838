//! Indented text rendering of models and sets

use crate::error::Result;
use crate::hyperparam::{Hyperparam, HyperparamModel, HyperparamSet, Member, Value};
use crate::render::WriteOptions;
use std::io::Write;

/// Write every model of the set under a `models:` header
pub fn write_set<W: Write>(set: &HyperparamSet, writer: &mut W, options: &WriteOptions) -> Result<()> {
    writeln!(writer, "models:")?;
    for model in set.models() {
        write_model(model, writer, 1, options)?;
    }
    Ok(())
}

/// Write a model headed by its description, members one level deeper
pub fn write_model<W: Write>(
    model: &HyperparamModel,
    writer: &mut W,
    depth: usize,
    options: &WriteOptions,
) -> Result<()> {
    writeln!(writer, "{}{}:", options.pad(depth), model.desc())?;
    if options.include_full {
        if let Some(doc) = model.doc() {
            writeln!(writer, "{}{}", options.pad(depth + 1), doc)?;
        }
    }
    for (_, member) in model.iter() {
        match member {
            Member::Param(param) => write_param(param, writer, depth + 1, options)?,
            Member::Model(nested) => write_model(nested, writer, depth + 1, options)?,
        }
    }
    Ok(())
}

/// Write one hyperparameter line, or a block for a set dict value
pub fn write_param<W: Write>(
    param: &Hyperparam,
    writer: &mut W,
    depth: usize,
    options: &WriteOptions,
) -> Result<()> {
    let pad = options.pad(depth);
    match param.value() {
        Value::Dict(entries) => {
            writeln!(writer, "{}{}", pad, param.name())?;
            write_doc(param, writer, depth + 1, options)?;
            let inner = options.pad(depth + 1);
            for (key, value) in entries {
                writeln!(writer, "{}{}: {}", inner, key, value)?;
            }
        }
        _ => {
            writeln!(writer, "{}{}: {}", pad, param.name(), describe(param))?;
            write_doc(param, writer, depth + 1, options)?;
        }
    }
    Ok(())
}

fn write_doc<W: Write>(
    param: &Hyperparam,
    writer: &mut W,
    depth: usize,
    options: &WriteOptions,
) -> Result<()> {
    if options.include_full {
        if let Some(doc) = param.doc() {
            writeln!(writer, "{}{}", options.pad(depth), doc)?;
        }
    }
    Ok(())
}

/// `<value >(<kind>[ <a|b>])[ in [min, max]]`
pub(crate) fn describe(param: &Hyperparam) -> String {
    let mut out = String::new();
    if !param.value().is_null() {
        out.push_str(&param.value().to_string());
        out.push(' ');
    }
    out.push('(');
    out.push_str(param.kind().name());
    if let Some(choices) = param.choices() {
        let choices: Vec<String> = choices.iter().map(ToString::to_string).collect();
        out.push_str(&format!(" <{}>", choices.join("|")));
    }
    out.push(')');
    if let Some(range) = param.range() {
        out.push_str(&format!(" in {}", range));
    }
    out
}
