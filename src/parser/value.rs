//! Value and container block parsing

use super::compound::{
    parse_color_body, parse_datetime_body, parse_duration_body, parse_point_body,
};
use super::cursor::ByteCursor;
use super::entry::parse_entry_at;
use super::primitives::{
    f32_le, f64_le, i16_le, i32_le, i64_le, u8_parser, u16_le, u32_le, u64_le,
};
use super::string::{parse_key, parse_string};
use crate::error::DecodeError;
use crate::types::{ContainerView, ValueTag, ValueView};

/// Deepest container nesting the decoder follows
pub const MAX_DEPTH: usize = 256;

/// Smallest possible encoded entry: empty key (2) + tag (1) + 1-byte payload
const MIN_ENTRY_SIZE: usize = 4;

/// Parse a tagged value
pub fn parse_value<'a>(cursor: &mut ByteCursor<'a>) -> Result<ValueView<'a>, DecodeError> {
    parse_value_at(cursor, 0)
}

/// Parse a container block: name, entry count, entries
pub fn parse_container<'a>(cursor: &mut ByteCursor<'a>) -> Result<ContainerView<'a>, DecodeError> {
    parse_container_at(cursor, 0)
}

pub(super) fn parse_value_at<'a>(
    cursor: &mut ByteCursor<'a>,
    depth: usize,
) -> Result<ValueView<'a>, DecodeError> {
    let at = cursor.position();
    let tag_byte = u8_parser(cursor)?;
    let tag = ValueTag::from_u8(tag_byte).ok_or(DecodeError::InvalidValueTag { tag: tag_byte, at })?;

    let value = match tag {
        ValueTag::Int16 => ValueView::Int16(i16_le(cursor)?),
        ValueTag::Int32 => ValueView::Int32(i32_le(cursor)?),
        ValueTag::Int64 => ValueView::Int64(i64_le(cursor)?),
        ValueTag::UInt16 => ValueView::UInt16(u16_le(cursor)?),
        ValueTag::UInt32 => ValueView::UInt32(u32_le(cursor)?),
        ValueTag::UInt64 => ValueView::UInt64(u64_le(cursor)?),
        ValueTag::Float32 => ValueView::Float32(f32_le(cursor)?),
        ValueTag::Float64 => ValueView::Float64(f64_le(cursor)?),
        ValueTag::Bool => {
            let at = cursor.position();
            match u8_parser(cursor)? {
                0 => ValueView::Bool(false),
                1 => ValueView::Bool(true),
                value => return Err(DecodeError::InvalidBool { value, at }),
            }
        }
        ValueTag::String => ValueView::String(parse_string(cursor)?),
        ValueTag::DateTime => ValueView::DateTime(parse_datetime_body(cursor)?),
        ValueTag::Duration => ValueView::Duration(parse_duration_body(cursor)?),
        ValueTag::Point => ValueView::Point(parse_point_body(cursor)?),
        ValueTag::Color => ValueView::Color(parse_color_body(cursor)?),
        ValueTag::Container => ValueView::Container(parse_container_at(cursor, depth + 1)?),
    };
    Ok(value)
}

pub(super) fn parse_container_at<'a>(
    cursor: &mut ByteCursor<'a>,
    depth: usize,
) -> Result<ContainerView<'a>, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::DepthExceeded {
            max_depth: MAX_DEPTH,
        });
    }

    let name = parse_key(cursor)?;
    let count = u32_le(cursor)? as usize;

    // the count is untrusted; bound the reservation by what the input can hold
    let mut entries = Vec::with_capacity(count.min(cursor.remaining() / MIN_ENTRY_SIZE));
    for _ in 0..count {
        entries.push(parse_entry_at(cursor, depth)?);
    }

    Ok(ContainerView { name, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Point};

    fn key(bytes: &mut Vec<u8>, k: &str) {
        bytes.extend_from_slice(&(k.len() as u16).to_le_bytes());
        bytes.extend_from_slice(k.as_bytes());
    }

    #[test]
    fn test_parse_bool() {
        let bytes = &[ValueTag::Bool as u8, 1, ValueTag::Bool as u8, 0];
        let mut cursor = ByteCursor::new(bytes);
        assert_eq!(parse_value(&mut cursor).unwrap(), ValueView::Bool(true));
        assert_eq!(parse_value(&mut cursor).unwrap(), ValueView::Bool(false));
    }

    #[test]
    fn test_bool_out_of_range() {
        let bytes = &[ValueTag::Bool as u8, 2];
        let mut cursor = ByteCursor::new(bytes);
        assert_eq!(
            parse_value(&mut cursor),
            Err(DecodeError::InvalidBool { value: 2, at: 1 })
        );
    }

    #[test]
    fn test_parse_widths() {
        let mut bytes = vec![ValueTag::Int16 as u8];
        bytes.extend_from_slice(&(-3i16).to_le_bytes());
        bytes.push(ValueTag::UInt64 as u8);
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        bytes.push(ValueTag::Float32 as u8);
        bytes.extend_from_slice(&1.5f32.to_le_bytes());

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(parse_value(&mut cursor).unwrap(), ValueView::Int16(-3));
        assert_eq!(parse_value(&mut cursor).unwrap(), ValueView::UInt64(u64::MAX));
        assert_eq!(parse_value(&mut cursor).unwrap(), ValueView::Float32(1.5));
        assert!(cursor.eos());
    }

    #[test]
    fn test_parse_string() {
        let s = "hello";
        let mut bytes = vec![ValueTag::String as u8];
        bytes.extend_from_slice(&(s.len() as u32).to_le_bytes());
        bytes.extend_from_slice(s.as_bytes());
        let mut cursor = ByteCursor::new(&bytes);
        let val = parse_value(&mut cursor).unwrap();
        assert_eq!(val.as_str(), Some("hello"));
    }

    #[test]
    fn test_parse_compound() {
        let mut bytes = vec![ValueTag::Point as u8];
        bytes.extend_from_slice(&1.0f64.to_le_bytes());
        bytes.extend_from_slice(&2.0f64.to_le_bytes());
        bytes.extend_from_slice(&[ValueTag::Color as u8, 1, 2, 3]);

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(
            parse_value(&mut cursor).unwrap(),
            ValueView::Point(Point::new(1.0, 2.0))
        );
        assert_eq!(
            parse_value(&mut cursor).unwrap(),
            ValueView::Color(Color::new(1, 2, 3))
        );
    }

    #[test]
    fn test_parse_container() {
        let mut bytes = Vec::new();
        key(&mut bytes, "cfg");
        bytes.extend_from_slice(&2u32.to_le_bytes()); // 2 entries

        // Entry 1: "name" -> "test"
        key(&mut bytes, "name");
        bytes.push(ValueTag::String as u8);
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(b"test");

        // Entry 2: "count" -> 42
        key(&mut bytes, "count");
        bytes.push(ValueTag::Int64 as u8);
        bytes.extend_from_slice(&42i64.to_le_bytes());

        let mut cursor = ByteCursor::new(&bytes);
        let container = parse_container(&mut cursor).unwrap();

        assert_eq!(container.name, "cfg");
        assert_eq!(container.entries.len(), 2);
        assert_eq!(container.entries[0].0, "name");
        assert_eq!(container.entries[0].1.as_str(), Some("test"));
        assert_eq!(container.entries[1].0, "count");
        assert_eq!(container.entries[1].1, ValueView::Int64(42));
    }

    #[test]
    fn test_parse_nested_container() {
        let mut bytes = Vec::new();
        key(&mut bytes, "");
        bytes.extend_from_slice(&1u32.to_le_bytes()); // 1 entry

        // Entry: "inner" -> { "value": 123 }
        key(&mut bytes, "inner");
        bytes.push(ValueTag::Container as u8);
        key(&mut bytes, "inner-name");
        bytes.extend_from_slice(&1u32.to_le_bytes());
        key(&mut bytes, "value");
        bytes.push(ValueTag::Int32 as u8);
        bytes.extend_from_slice(&123i32.to_le_bytes());

        let mut cursor = ByteCursor::new(&bytes);
        let container = parse_container(&mut cursor).unwrap();

        let inner = container.entries[0].1.as_container().unwrap();
        assert_eq!(inner.name, "inner-name");
        assert_eq!(container.get("inner.value"), Some(&ValueView::Int32(123)));
    }

    #[test]
    fn test_invalid_tag() {
        let bytes = &[0xFF]; // Invalid tag
        let mut cursor = ByteCursor::new(bytes);
        assert_eq!(
            parse_value(&mut cursor),
            Err(DecodeError::InvalidValueTag { tag: 0xFF, at: 0 })
        );
    }

    #[test]
    fn test_count_larger_than_input() {
        let mut bytes = Vec::new();
        key(&mut bytes, "");
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());

        let mut cursor = ByteCursor::new(&bytes);
        assert!(matches!(
            parse_container(&mut cursor),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        // every level: empty name, one entry with empty key holding a container
        let mut bytes = Vec::new();
        for _ in 0..MAX_DEPTH + 2 {
            key(&mut bytes, "");
            bytes.extend_from_slice(&1u32.to_le_bytes());
            key(&mut bytes, "");
            bytes.push(ValueTag::Container as u8);
        }

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(
            parse_container(&mut cursor),
            Err(DecodeError::DepthExceeded {
                max_depth: MAX_DEPTH
            })
        );
    }
}
