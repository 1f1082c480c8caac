//! Conversions between calendar values and the `time` crate
//!
//! Enable with the `time` feature flag.

use crate::types::{DateTime, Duration};
use std::num::TryFromIntError;
use time::error::ComponentRange;
use time::{Date, Month, PrimitiveDateTime, Time};

impl From<PrimitiveDateTime> for DateTime {
    /// Sub-second precision is dropped
    fn from(dt: PrimitiveDateTime) -> Self {
        DateTime::new(
            dt.year(),
            u8::from(dt.month()),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
        )
    }
}

impl TryFrom<DateTime> for PrimitiveDateTime {
    type Error = ComponentRange;

    /// Fails for field combinations that are not a real calendar date or
    /// time of day
    fn try_from(dt: DateTime) -> Result<Self, Self::Error> {
        let month = Month::try_from(dt.month)?;
        let date = Date::from_calendar_date(dt.year, month, dt.day)?;
        let time = Time::from_hms(dt.hour, dt.minute, dt.second)?;
        Ok(PrimitiveDateTime::new(date, time))
    }
}

impl From<Duration> for time::Duration {
    fn from(d: Duration) -> Self {
        time::Duration::milliseconds(d.total_milliseconds())
    }
}

impl TryFrom<time::Duration> for Duration {
    type Error = TryFromIntError;

    /// Splits into normalized fields; all fields share the sign of the input.
    /// Sub-millisecond precision is dropped. Fails if the day count does not
    /// fit in `i32`.
    fn try_from(d: time::Duration) -> Result<Self, Self::Error> {
        Ok(Duration {
            days: i32::try_from(d.whole_days())?,
            hours: (d.whole_hours() % 24) as i32,
            minutes: (d.whole_minutes() % 60) as i32,
            seconds: (d.whole_seconds() % 60) as i32,
            milliseconds: d.subsec_milliseconds() as i32,
        })
    }
}
