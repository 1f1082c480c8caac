//! Error types for datacontainer

use crate::types::ValueTag;
use thiserror::Error;

/// Crate-level result type.
pub type Result<T> = std::result::Result<T, ContainerError>;

/// Errors produced while decoding the binary format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input does not start with the format magic
    #[error("invalid magic bytes, not a data container file")]
    InvalidMagic,
    /// Header carries a version this crate does not read
    #[error("unsupported data container version: {version}")]
    UnsupportedVersion { version: u32 },
    /// Unknown value tag byte
    #[error("invalid value tag 0x{tag:02X} at offset {at}")]
    InvalidValueTag { tag: u8, at: usize },
    /// Bool payload other than 0 or 1
    #[error("invalid bool byte 0x{value:02X} at offset {at}")]
    InvalidBool { value: u8, at: usize },
    /// Key, name or string payload is not UTF-8
    #[error("invalid UTF-8 in string at offset {at}")]
    InvalidUtf8 { at: usize },
    /// Not enough bytes remained for a requested read
    #[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
    UnexpectedEof { at: usize, need: usize, rem: usize },
    /// Containers nested deeper than the decoder allows
    #[error("container nesting exceeded (max={max_depth})")]
    DepthExceeded { max_depth: usize },
    /// Bytes left over after the root container
    #[error("{rem} trailing bytes after root container at offset {at}")]
    TrailingBytes { at: usize, rem: usize },
}

/// Errors produced while decoding the XML format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// Tokenizer or attribute syntax error
    #[error("xml parse error: {0}")]
    Parse(String),
    /// Document has no root container element
    #[error("missing root <DataContainer> element")]
    MissingRoot,
    /// Element other than the ones the format defines
    #[error("unexpected element <{name}>")]
    UnexpectedElement { name: String },
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    /// `type` attribute names no known kind
    #[error("unknown value type '{name}'")]
    UnknownType { name: String },
    /// Text or attribute could not be read as the declared kind
    #[error("invalid {kind} value for key '{key}': {text:?}")]
    InvalidValue {
        key: String,
        kind: ValueTag,
        text: String,
    },
    /// Document ended inside an open element
    #[error("unexpected end of document")]
    UnexpectedEof,
}

/// Errors from loading or saving a container
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Filesystem or stream IO failure.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("binary decode: {0}")]
    Decode(#[from] DecodeError),
    #[error("xml decode: {0}")]
    Xml(#[from] XmlError),
    /// Save requested without a path and none is bound
    #[error("no file path bound to container")]
    NoFilePath,
}

/// Error for accessing values by key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Key not present in the container
    #[error("key not found: {key}")]
    NotFound { key: String },
    /// Value under key has a different kind
    #[error("kind mismatch at '{key}': expected {expected}, got {actual}")]
    KindMismatch {
        key: String,
        expected: ValueTag,
        actual: ValueTag,
    },
}
