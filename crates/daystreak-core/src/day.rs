//! Calendar day normalization.
//!
//! Every statistic in this crate compares records by local calendar day.
//! [`Today`] is the one place where an instant becomes a day and where
//! "N days ago" is computed; callers never derive day boundaries themselves.

use chrono::{DateTime, Days, Duration, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Milliseconds in a nominal day, used by [`DayArithmetic::FixedOffset`].
pub const MS_PER_DAY: i64 = 86_400_000;

/// Storage and display form of a calendar day.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// How "N days ago" is derived from the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayArithmetic {
    /// Subtract N calendar days from today's date.
    #[default]
    Calendar,
    /// Subtract `N * 86_400_000` ms from the instant, then take its local date.
    /// Skips or repeats a day around daylight-saving transitions.
    FixedOffset,
}

/// Reference "today" for the aggregator: an anchor instant in a time zone.
#[derive(Debug, Clone)]
pub struct Today<Tz: TimeZone = Local> {
    anchor: DateTime<Tz>,
    date: NaiveDate,
    arithmetic: DayArithmetic,
}

impl Today<Local> {
    /// Today in the local time zone.
    pub fn now(arithmetic: DayArithmetic) -> Self {
        Self::at(Local::now(), arithmetic)
    }
}

impl<Tz: TimeZone> Today<Tz> {
    pub fn at(anchor: DateTime<Tz>, arithmetic: DayArithmetic) -> Self {
        let date = anchor.date_naive();
        Self {
            anchor,
            date,
            arithmetic,
        }
    }

    /// Today's calendar day.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn anchor(&self) -> &DateTime<Tz> {
        &self.anchor
    }

    pub fn arithmetic(&self) -> DayArithmetic {
        self.arithmetic
    }

    /// Calendar day of an arbitrary instant, in this reference's time zone.
    pub fn day_of<Other: TimeZone>(&self, instant: &DateTime<Other>) -> NaiveDate {
        instant.with_timezone(&self.anchor.timezone()).date_naive()
    }

    /// Whether `instant` falls on today's calendar day.
    pub fn contains<Other: TimeZone>(&self, instant: &DateTime<Other>) -> bool {
        self.day_of(instant) == self.date
    }

    /// The calendar day `offset` days before today (offset 0 is today).
    ///
    /// Returns `None` only when the result leaves chrono's representable range.
    pub fn days_ago(&self, offset: u32) -> Option<NaiveDate> {
        match self.arithmetic {
            DayArithmetic::Calendar => self.date.checked_sub_days(Days::new(u64::from(offset))),
            DayArithmetic::FixedOffset => {
                let delta = Duration::milliseconds(i64::from(offset) * MS_PER_DAY);
                self.anchor
                    .clone()
                    .checked_sub_signed(delta)
                    .map(|shifted| shifted.date_naive())
            }
        }
    }
}

/// Format a day as `YYYY-MM-DD`.
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` day.
pub fn parse_day(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}
