//! Fixed-layout struct payloads (after the tag has been consumed)

use super::cursor::ByteCursor;
use super::primitives::{f64_le, i32_le, u8_parser};
use crate::error::DecodeError;
use crate::types::{Color, DateTime, Duration, Point};

/// `i32 year`, then one byte each for month, day, hour, minute, second
pub fn parse_datetime_body(cursor: &mut ByteCursor<'_>) -> Result<DateTime, DecodeError> {
    let year = i32_le(cursor)?;
    let [month, day, hour, minute, second] = cursor.take_array()?;
    Ok(DateTime::new(year, month, day, hour, minute, second))
}

/// Five `i32`: days, hours, minutes, seconds, milliseconds
pub fn parse_duration_body(cursor: &mut ByteCursor<'_>) -> Result<Duration, DecodeError> {
    Ok(Duration {
        days: i32_le(cursor)?,
        hours: i32_le(cursor)?,
        minutes: i32_le(cursor)?,
        seconds: i32_le(cursor)?,
        milliseconds: i32_le(cursor)?,
    })
}

pub fn parse_point_body(cursor: &mut ByteCursor<'_>) -> Result<Point, DecodeError> {
    let x = f64_le(cursor)?;
    let y = f64_le(cursor)?;
    Ok(Point::new(x, y))
}

pub fn parse_color_body(cursor: &mut ByteCursor<'_>) -> Result<Color, DecodeError> {
    let r = u8_parser(cursor)?;
    let g = u8_parser(cursor)?;
    let b = u8_parser(cursor)?;
    Ok(Color::new(r, g, b))
}
