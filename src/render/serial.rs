//! JSON and YAML dumps
//!
//! A set serializes as a mapping of model name to
//! `{name, desc, doc, table?, params}`, where `params` maps member names to
//! nested models or to hyperparameters `{name, kind, doc, value, choices?, range?}`.

use crate::error::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;

const JSON_INDENT: &[u8] = b"    ";

/// Serialize to JSON indented by four spaces
pub fn to_json<T: Serialize + ?Sized>(item: &T) -> Result<String> {
    let mut out = Vec::new();
    write_pretty(item, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Serialize to YAML
pub fn to_yaml<T: Serialize + ?Sized>(item: &T) -> Result<String> {
    Ok(serde_yaml::to_string(item)?)
}

/// Write indented JSON followed by a newline
pub fn write_json<T: Serialize + ?Sized, W: Write>(item: &T, writer: &mut W) -> Result<()> {
    write_pretty(item, &mut *writer)?;
    writeln!(writer)?;
    Ok(())
}

fn write_pretty<T: Serialize + ?Sized, W: Write>(item: &T, writer: W) -> Result<()> {
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(JSON_INDENT));
    item.serialize(&mut serializer)?;
    Ok(())
}

pub fn write_yaml<T: Serialize + ?Sized, W: Write>(item: &T, writer: &mut W) -> Result<()> {
    serde_yaml::to_writer(&mut *writer, item)?;
    Ok(())
}
