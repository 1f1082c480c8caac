//! String parsing helpers

use super::cursor::ByteCursor;
use super::primitives::{u16_le, u32_le};
use crate::error::DecodeError;

/// Parse a u32 length-prefixed UTF-8 string (for values)
pub fn parse_string<'a>(cursor: &mut ByteCursor<'a>) -> Result<&'a str, DecodeError> {
    let len = u32_le(cursor)?;
    utf8(cursor, len as usize)
}

/// Parse a u16 length-prefixed UTF-8 string (for keys and container names)
pub fn parse_key<'a>(cursor: &mut ByteCursor<'a>) -> Result<&'a str, DecodeError> {
    let len = u16_le(cursor)?;
    utf8(cursor, len as usize)
}

fn utf8<'a>(cursor: &mut ByteCursor<'a>, len: usize) -> Result<&'a str, DecodeError> {
    let at = cursor.position();
    let bytes = cursor.take(len)?;
    std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { at })
}
