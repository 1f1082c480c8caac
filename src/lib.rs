//! datacontainer - Typed hierarchical key-value container
//!
//! An ordered map from string keys to values of a closed set of kinds
//! (integers of several widths, floats, bool, string, date/time, duration,
//! point, color and nested containers), with a fluent builder and two
//! lossless codecs.
//!
//! # Features
//!
//! - Exact-kind typed lookups: an `Int32` is never readable as `Int64`
//! - Insertion order preserved through both codecs
//! - Compact little-endian binary format with zero-copy parsing
//! - Human-readable XML format carrying the same type information
//! - Atomic file saves
//!
//! # Example
//!
//! ```rust
//! use datacontainer::{Color, DataContainer, DataContainerBuilder, Point};
//!
//! let mut dc = DataContainerBuilder::create("settings")
//!     .data("volume", 7i32)
//!     .data("title", "main window")
//!     .build();
//! dc.put("colorv", Color::new(255, 123, 67));
//!
//! assert_eq!(dc.get::<Color>("colorv"), Some(Color::new(255, 123, 67)));
//! assert_eq!(dc.get::<Point>("colorv"), None);
//! assert_eq!(dc.get::<i64>("volume"), None);
//!
//! // Both codecs round-trip to the same container
//! let bytes = dc.to_binary_bytes().unwrap();
//! let xml = dc.to_xml_string().unwrap();
//! assert_eq!(DataContainer::from_binary_bytes(&bytes).unwrap(), dc);
//! assert_eq!(DataContainer::from_xml_str(&xml).unwrap(), dc);
//! ```

pub mod builder;
pub mod error;
pub mod parser;
mod persist;
pub mod types;
pub mod writer;
pub mod xml;

#[cfg(feature = "time")]
pub mod time_ext;

// Re-export common types at crate root
pub use builder::DataContainerBuilder;
pub use error::{AccessError, ContainerError, DecodeError, Result, XmlError};
pub use parser::parse;
pub use types::{
    Color, ContainerView, DataContainer, DateTime, Duration, FromValue, HEADER_SIZE, MAGIC, Point,
    VERSION, Value, ValueTag, ValueView,
};
