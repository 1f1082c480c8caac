//! Binary parser for the data container format
//!
//! Zero-copy parsing that returns views into the original byte buffer.

mod compound;
mod cursor;
mod entry;
mod primitives;
mod string;
mod value;

pub use cursor::ByteCursor;
pub use entry::parse_entry;
pub use value::{MAX_DEPTH, parse_container, parse_value};

use crate::error::DecodeError;
use crate::types::{ContainerView, HEADER_SIZE, MAGIC, VERSION};
use log::trace;

/// Parse a binary data container from bytes
///
/// Returns a ContainerView that borrows keys and strings from the input
/// bytes. The whole input must be consumed by the root container.
pub fn parse(bytes: &[u8]) -> Result<ContainerView<'_>, DecodeError> {
    trace!("parse: {} bytes", bytes.len());

    // Check minimum size for header
    if bytes.len() < HEADER_SIZE {
        return Err(DecodeError::UnexpectedEof {
            at: 0,
            need: HEADER_SIZE,
            rem: bytes.len(),
        });
    }

    // Validate magic bytes
    if &bytes[0..8] != MAGIC {
        return Err(DecodeError::InvalidMagic);
    }

    // Validate version
    let version = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    if version != VERSION {
        return Err(DecodeError::UnsupportedVersion { version });
    }

    // Parse root container starting after header
    let mut cursor = ByteCursor::with_offset(bytes, HEADER_SIZE);
    let root = parse_container(&mut cursor)?;

    if !cursor.eos() {
        return Err(DecodeError::TrailingBytes {
            at: cursor.position(),
            rem: cursor.remaining(),
        });
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataContainer, DateTime, Duration, ValueView};
    use crate::writer;

    #[test]
    fn test_roundtrip_empty() {
        let bytes = writer::to_bytes(&DataContainer::new()).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + 2 + 4);
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.name, "");
        assert!(parsed.entries.is_empty());
    }

    #[test]
    fn test_roundtrip_string_is_borrowed() {
        let mut dc = DataContainer::new();
        dc.put("greeting", "hello world");
        let bytes = writer::to_bytes(&dc).unwrap();
        let parsed = parse(&bytes).unwrap();

        let s = parsed.get("greeting").unwrap().as_str().unwrap();
        assert_eq!(s, "hello world");
        let range = bytes.as_ptr_range();
        assert!(range.contains(&s.as_ptr()));
    }

    #[test]
    fn test_roundtrip_nested() {
        let mut config = DataContainer::with_name("config");
        config.put("enabled", true);
        config.put("threshold", 0.5f64);

        let mut root = DataContainer::new();
        root.put("config", config);
        root.put("when", DateTime::new(2000, 1, 1, 0, 0, 0));
        root.put("span", Duration::new(0, 25, 0, 0, 0));

        let bytes = writer::to_bytes(&root).unwrap();
        let parsed = parse(&bytes).unwrap();

        assert_eq!(parsed.get("config.enabled"), Some(&ValueView::Bool(true)));
        assert_eq!(
            parsed.get("config.threshold"),
            Some(&ValueView::Float64(0.5))
        );
        assert_eq!(
            parsed.get("config").unwrap().as_container().unwrap().name,
            "config"
        );
        assert_eq!(parsed.to_owned(), root);
    }

    #[test]
    fn test_short_input() {
        let bytes = [0u8; HEADER_SIZE - 1];
        assert!(matches!(
            parse(&bytes),
            Err(DecodeError::UnexpectedEof { at: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_magic() {
        let bytes = vec![0x00; HEADER_SIZE + 6]; // Wrong magic but right size
        assert_eq!(parse(&bytes), Err(DecodeError::InvalidMagic));
    }

    #[test]
    fn test_invalid_version() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&99u32.to_le_bytes()); // Wrong version
        bytes.extend_from_slice(&0u32.to_le_bytes()); // flags
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(
            parse(&bytes),
            Err(DecodeError::UnsupportedVersion { version: 99 })
        );
    }

    #[test]
    fn test_truncated() {
        let mut dc = DataContainer::new();
        dc.put("a", 1i64);
        let bytes = writer::to_bytes(&dc).unwrap();
        for len in HEADER_SIZE..bytes.len() {
            assert!(
                matches!(
                    parse(&bytes[..len]),
                    Err(DecodeError::UnexpectedEof { .. })
                ),
                "length {len} should be truncated"
            );
        }
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = writer::to_bytes(&DataContainer::new()).unwrap();
        let end = bytes.len();
        bytes.push(0);
        assert_eq!(
            parse(&bytes),
            Err(DecodeError::TrailingBytes { at: end, rem: 1 })
        );
    }
}
