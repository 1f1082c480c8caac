//! Fixed-layout struct payloads (tag written by the caller)

use crate::types::{Color, DateTime, Duration, Point};
use std::io::{self, Write};

pub fn write_datetime_body<W: Write>(writer: &mut W, dt: &DateTime) -> io::Result<()> {
    writer.write_all(&dt.year.to_le_bytes())?;
    writer.write_all(&[dt.month, dt.day, dt.hour, dt.minute, dt.second])
}

pub fn write_duration_body<W: Write>(writer: &mut W, d: &Duration) -> io::Result<()> {
    for part in [d.days, d.hours, d.minutes, d.seconds, d.milliseconds] {
        writer.write_all(&part.to_le_bytes())?;
    }
    Ok(())
}

pub fn write_point_body<W: Write>(writer: &mut W, p: &Point) -> io::Result<()> {
    writer.write_all(&p.x.to_le_bytes())?;
    writer.write_all(&p.y.to_le_bytes())
}

pub fn write_color_body<W: Write>(writer: &mut W, c: &Color) -> io::Result<()> {
    writer.write_all(&[c.r, c.g, c.b])
}
