//! Calendar values: wall-clock date/time and field-wise durations

use std::fmt;

/// Calendar date and time of day, without a timezone.
///
/// Fields are stored as given; no calendar validation is performed, so any
/// combination survives a round trip through both codecs unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateTime {
    pub year: i32,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-23
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    pub fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        DateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Parse the canonical `YYYY-MM-DDTHH:MM:SS` form produced by `Display`.
    pub fn parse(s: &str) -> Option<Self> {
        let (date, time) = s.trim().split_once('T')?;

        // rsplitn keeps a leading '-' on negative years attached to the year
        let mut date_parts = date.rsplitn(3, '-');
        let day = date_parts.next()?.parse().ok()?;
        let month = date_parts.next()?.parse().ok()?;
        let year = date_parts.next()?.parse().ok()?;

        let mut time_parts = time.splitn(3, ':');
        let hour = time_parts.next()?.parse().ok()?;
        let minute = time_parts.next()?.parse().ok()?;
        let second = time_parts.next()?.parse().ok()?;

        Some(DateTime::new(year, month, day, hour, minute, second))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Time span kept as five independent fields.
///
/// The fields are not normalized: `hours` may exceed 23 and `seconds` may
/// exceed 59. Equality is field-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Duration {
    pub days: i32,
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    pub milliseconds: i32,
}

impl Duration {
    pub fn new(days: i32, hours: i32, minutes: i32, seconds: i32, milliseconds: i32) -> Self {
        Duration {
            days,
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    /// Total length in milliseconds across all five fields
    pub fn total_milliseconds(&self) -> i64 {
        i64::from(self.days) * 86_400_000
            + i64::from(self.hours) * 3_600_000
            + i64::from(self.minutes) * 60_000
            + i64::from(self.seconds) * 1_000
            + i64::from(self.milliseconds)
    }
}
