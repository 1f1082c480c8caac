//! Serialization of data containers to the binary format

mod compound;
mod value;

use crate::types::{DataContainer, MAGIC, VERSION};
use std::io::{self, Write};

pub use value::{write_container, write_value};

/// Write a data container to a writer: header, then the root container block
pub fn write<W: Write>(writer: &mut W, container: &DataContainer) -> io::Result<()> {
    // Write header
    writer.write_all(MAGIC)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?; // flags (reserved)

    write_container(writer, container)
}

/// Write a data container to bytes
pub fn to_bytes(container: &DataContainer) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    write(&mut buf, container)?;
    Ok(buf)
}
