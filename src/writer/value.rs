//! Value and container block serialization

use crate::parser::MAX_DEPTH;
use crate::types::{DataContainer, Value, ValueTag};
use std::io::{self, Write};

use super::compound::{write_color_body, write_datetime_body, write_duration_body, write_point_body};

/// Write a tagged value
pub fn write_value<W: Write>(writer: &mut W, value: &Value) -> io::Result<()> {
    write_value_at(writer, value, 0)
}

/// Write a container block: name, entry count, then `key, tag, payload` per entry
///
/// Containers nested deeper than [`MAX_DEPTH`] are rejected with
/// `InvalidInput`, since the parser would refuse to read them back.
pub fn write_container<W: Write>(writer: &mut W, container: &DataContainer) -> io::Result<()> {
    write_container_at(writer, container, 0)
}

fn write_value_at<W: Write>(writer: &mut W, value: &Value, depth: usize) -> io::Result<()> {
    writer.write_all(&[value.tag() as u8])?;
    match value {
        Value::Int16(v) => writer.write_all(&v.to_le_bytes())?,
        Value::Int32(v) => writer.write_all(&v.to_le_bytes())?,
        Value::Int64(v) => writer.write_all(&v.to_le_bytes())?,
        Value::UInt16(v) => writer.write_all(&v.to_le_bytes())?,
        Value::UInt32(v) => writer.write_all(&v.to_le_bytes())?,
        Value::UInt64(v) => writer.write_all(&v.to_le_bytes())?,
        Value::Float32(v) => writer.write_all(&v.to_le_bytes())?,
        Value::Float64(v) => writer.write_all(&v.to_le_bytes())?,
        Value::Bool(b) => writer.write_all(&[if *b { 1 } else { 0 }])?,
        Value::String(s) => {
            let bytes = s.as_bytes();
            let len = u32::try_from(bytes.len()).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("string of {} bytes exceeds u32 length", bytes.len()),
                )
            })?;
            writer.write_all(&len.to_le_bytes())?;
            writer.write_all(bytes)?;
        }
        Value::DateTime(dt) => write_datetime_body(writer, dt)?,
        Value::Duration(d) => write_duration_body(writer, d)?,
        Value::Point(p) => write_point_body(writer, p)?,
        Value::Color(c) => write_color_body(writer, c)?,
        Value::Container(c) => write_container_at(writer, c, depth + 1)?,
    }
    Ok(())
}

fn write_container_at<W: Write>(
    writer: &mut W,
    container: &DataContainer,
    depth: usize,
) -> io::Result<()> {
    if depth > MAX_DEPTH {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("container nesting exceeded (max={MAX_DEPTH})"),
        ));
    }

    write_key(writer, container.name())?;
    let count = u32::try_from(container.len()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "too many entries in container")
    })?;
    writer.write_all(&count.to_le_bytes())?;
    for (key, value) in container.iter() {
        write_key(writer, key)?;
        write_value_at(writer, value, depth)?;
    }
    Ok(())
}

/// Keys and container names carry a `u16` length prefix
fn write_key<W: Write>(writer: &mut W, key: &str) -> io::Result<()> {
    let bytes = key.as_bytes();
    let len = u16::try_from(bytes.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("key of {} bytes exceeds u16 length", bytes.len()),
        )
    })?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(bytes)
}
