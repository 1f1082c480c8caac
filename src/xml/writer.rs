//! XML serialization

use super::{
    COLOR_ATTRS, DURATION_ATTRS, ENTRY_ELEMENT, KEY_ATTR, NAME_ATTR, POINT_ATTRS, ROOT_ELEMENT,
    TYPE_ATTR,
};
use crate::parser::MAX_DEPTH;
use crate::types::{DataContainer, Value};
use quick_xml::escape::{escape, partial_escape};
use std::borrow::Cow;
use std::fmt::{self, Write};
use std::io;

const INDENT: &str = "  ";

/// Serialize a container to an XML document
///
/// Fails with `InvalidInput` for containers nested deeper than
/// [`MAX_DEPTH`], which the reader would refuse.
pub fn to_string(container: &DataContainer) -> io::Result<String> {
    let mut out = String::new();
    // writing into a String only fails on the nesting limit
    write(&mut out, container).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("container nesting exceeded (max={MAX_DEPTH})"),
        )
    })?;
    Ok(out)
}

/// Write a container as an XML document to any `fmt::Write` sink
///
/// Returns `fmt::Error` if the sink fails or nesting exceeds [`MAX_DEPTH`].
pub fn write<W: Write>(out: &mut W, container: &DataContainer) -> fmt::Result {
    writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
    write!(
        out,
        r#"<{ROOT_ELEMENT} {NAME_ATTR}="{}""#,
        escape_attribute_value(container.name())
    )?;
    if container.is_empty() {
        return writeln!(out, "/>");
    }
    writeln!(out, ">")?;
    write_entries(out, container, 1)?;
    writeln!(out, "</{ROOT_ELEMENT}>")
}

fn write_entries<W: Write>(out: &mut W, container: &DataContainer, depth: usize) -> fmt::Result {
    for (key, value) in container.iter() {
        write_entry(out, key, value, depth)?;
    }
    Ok(())
}

fn write_entry<W: Write>(out: &mut W, key: &str, value: &Value, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    write!(
        out,
        r#"{indent}<{ENTRY_ELEMENT} {KEY_ATTR}="{}" {TYPE_ATTR}="{}""#,
        escape_attribute_value(key),
        value.tag()
    )?;

    let text = match value {
        Value::Int16(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::UInt16(v) => v.to_string(),
        Value::UInt32(v) => v.to_string(),
        Value::UInt64(v) => v.to_string(),
        // Display prints the shortest text that parses back to the same value
        Value::Float32(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::String(s) => escape_text(s).into_owned(),
        Value::DateTime(dt) => dt.to_string(),
        Value::Duration(d) => {
            let parts = [d.days, d.hours, d.minutes, d.seconds, d.milliseconds];
            for (name, part) in DURATION_ATTRS.iter().zip(parts) {
                write!(out, r#" {name}="{part}""#)?;
            }
            return writeln!(out, "/>");
        }
        Value::Point(p) => {
            for (name, part) in POINT_ATTRS.iter().zip([p.x, p.y]) {
                write!(out, r#" {name}="{part}""#)?;
            }
            return writeln!(out, "/>");
        }
        Value::Color(c) => {
            for (name, part) in COLOR_ATTRS.iter().zip([c.r, c.g, c.b]) {
                write!(out, r#" {name}="{part}""#)?;
            }
            return writeln!(out, "/>");
        }
        Value::Container(inner) => {
            // entries at indent `depth` belong to a container at that nesting depth
            if depth > MAX_DEPTH {
                return Err(fmt::Error);
            }
            write!(
                out,
                r#" {NAME_ATTR}="{}""#,
                escape_attribute_value(inner.name())
            )?;
            if inner.is_empty() {
                return writeln!(out, "/>");
            }
            writeln!(out, ">")?;
            write_entries(out, inner, depth + 1)?;
            return writeln!(out, "{indent}</{ENTRY_ELEMENT}>");
        }
    };

    writeln!(out, ">{text}</{ENTRY_ELEMENT}>")
}

/// Escape element text. `\r` is written as a character reference so it is
/// not folded into a line break by the reader.
fn escape_text(s: &str) -> Cow<'_, str> {
    let escaped = partial_escape(s);
    if escaped.contains('\r') {
        Cow::Owned(escaped.replace('\r', "&#13;"))
    } else {
        escaped
    }
}

/// Escape attribute values. Whitespace other than plain spaces is written as
/// character references since attribute normalization would replace it.
fn escape_attribute_value(s: &str) -> Cow<'_, str> {
    let escaped = escape(s);
    if !escaped.contains(['\n', '\r', '\t']) {
        return escaped;
    }
    let mut result = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            '\t' => result.push_str("&#9;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
