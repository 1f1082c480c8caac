//! Container entry parsing

use super::cursor::ByteCursor;
use super::string::parse_key;
use super::value::parse_value_at;
use crate::error::DecodeError;
use crate::types::ValueView;

/// Parse a single container entry (key + tagged value)
pub fn parse_entry<'a>(
    cursor: &mut ByteCursor<'a>,
) -> Result<(&'a str, ValueView<'a>), DecodeError> {
    parse_entry_at(cursor, 0)
}

pub(super) fn parse_entry_at<'a>(
    cursor: &mut ByteCursor<'a>,
    depth: usize,
) -> Result<(&'a str, ValueView<'a>), DecodeError> {
    let key = parse_key(cursor)?;
    let value = parse_value_at(cursor, depth)?;
    Ok((key, value))
}
