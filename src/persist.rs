//! Loading and saving containers as binary or XML files

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::{trace, warn};
use tempfile::NamedTempFile;

use crate::error::{ContainerError, DecodeError, Result, XmlError};
use crate::types::DataContainer;
use crate::{parser, writer, xml};

#[derive(Debug, Clone, Copy)]
enum Format {
    Binary,
    Xml,
}

impl DataContainer {
    /// Encode to the binary format
    pub fn to_binary_bytes(&self) -> io::Result<Vec<u8>> {
        writer::to_bytes(self)
    }

    /// Decode from the binary format into an owned container
    pub fn from_binary_bytes(bytes: &[u8]) -> std::result::Result<DataContainer, DecodeError> {
        Ok(parser::parse(bytes)?.to_owned())
    }

    /// Encode as an XML document
    pub fn to_xml_string(&self) -> io::Result<String> {
        xml::to_string(self)
    }

    pub fn from_xml_str(text: &str) -> std::result::Result<DataContainer, XmlError> {
        xml::from_str(text)
    }

    /// Write the binary format to `path` and bind the path on success
    pub fn try_save_as_binary(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.save_to(path.as_ref(), Format::Binary)
    }

    /// Write XML to `path` and bind the path on success
    pub fn try_save_as_xml(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.save_to(path.as_ref(), Format::Xml)
    }

    /// Write the binary format to `path`. Returns false if the file could
    /// not be written.
    pub fn save_as_binary(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.try_save_as_binary(path)
            .inspect_err(|e| warn!("failed to save {}: {e}", path.display()))
            .is_ok()
    }

    /// Write XML to `path`. Returns false if the file could not be written.
    pub fn save_as_xml(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.try_save_as_xml(path)
            .inspect_err(|e| warn!("failed to save {}: {e}", path.display()))
            .is_ok()
    }

    /// Write the binary format to the bound path
    pub fn resave_as_binary(&self) -> bool {
        self.resave(Format::Binary)
            .inspect_err(|e| warn!("failed to resave as binary: {e}"))
            .is_ok()
    }

    /// Write XML to the bound path
    pub fn resave_as_xml(&self) -> bool {
        self.resave(Format::Xml)
            .inspect_err(|e| warn!("failed to resave as xml: {e}"))
            .is_ok()
    }

    /// Read a binary file, reporting why it could not be loaded
    pub fn try_load_from_binary(path: impl AsRef<Path>) -> Result<DataContainer> {
        load_from(path.as_ref(), Format::Binary)
    }

    /// Read an XML file, reporting why it could not be loaded
    pub fn try_load_from_xml(path: impl AsRef<Path>) -> Result<DataContainer> {
        load_from(path.as_ref(), Format::Xml)
    }

    /// Read a binary file.
    ///
    /// A missing or corrupt file yields an empty container with no bound
    /// path; use [`try_load_from_binary`](Self::try_load_from_binary) to tell
    /// the cases apart.
    pub fn load_from_binary(path: impl AsRef<Path>) -> DataContainer {
        let path = path.as_ref();
        Self::try_load_from_binary(path).unwrap_or_else(|e| {
            warn!("failed to load {}: {e}", path.display());
            DataContainer::new()
        })
    }

    /// Read an XML file. Same failure policy as
    /// [`load_from_binary`](Self::load_from_binary).
    pub fn load_from_xml(path: impl AsRef<Path>) -> DataContainer {
        let path = path.as_ref();
        Self::try_load_from_xml(path).unwrap_or_else(|e| {
            warn!("failed to load {}: {e}", path.display());
            DataContainer::new()
        })
    }

    fn save_to(&mut self, path: &Path, format: Format) -> Result<()> {
        self.write_file(path, format)?;
        self.bind_path(path);
        Ok(())
    }

    fn resave(&self, format: Format) -> Result<()> {
        let path = self.file_path().ok_or(ContainerError::NoFilePath)?;
        self.write_file(path, format)
    }

    fn write_file(&self, path: &Path, format: Format) -> Result<()> {
        let bytes = match format {
            Format::Binary => self.to_binary_bytes()?,
            Format::Xml => self.to_xml_string()?.into_bytes(),
        };
        trace!("writing {} bytes of {format:?} to {}", bytes.len(), path.display());
        write_atomic(path, &bytes)?;
        Ok(())
    }
}

fn load_from(path: &Path, format: Format) -> Result<DataContainer> {
    let bytes = fs::read(path)?;
    trace!("read {} bytes of {format:?} from {}", bytes.len(), path.display());
    let mut container = match format {
        Format::Binary => DataContainer::from_binary_bytes(&bytes)?,
        Format::Xml => {
            let text = std::str::from_utf8(&bytes)
                .map_err(|e| XmlError::Parse(e.to_string()))?;
            DataContainer::from_xml_str(text)?
        }
    };
    container.bind_path(path);
    Ok(container)
}

/// Write to a temporary file in the destination directory, then rename it
/// over `path` so a failed write never leaves a truncated file behind.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
