mod clock;
mod consts;
mod format;
mod observer;
mod prelude;
mod range;
mod reactive;
mod store;
mod types;

#[cfg(test)]
mod test_utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use consts::*;
pub use format::{DateStyle, RangeFormatter, long_form, today, ymd_form};
pub use observer::RangeObserver;
pub use range::{DateRange, RangeError};
pub use reactive::{Observable, Subscription, Watch};
pub use store::{DateRangeStore, Reading};
pub use types::{Day, Month, Weekday, Year, day_of_week, days_in_month, is_leap_year};

use crate::prelude::*;
use std::str::FromStr;

/// A calendar date with no time-of-day component.
///
/// Values are immutable and replaced wholesale. Field order makes the derived
/// ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct DateValue {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl DateValue {
    /// Creates a date from validated components.
    ///
    /// The day is checked again against `year` and `month`, since a `Day`
    /// may have been validated for a longer month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the day does not exist in that month.
    pub fn new(year: Year, month: Month, day: Day) -> Result<Self, ParseError> {
        let day = Day::new(day.get(), year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from raw components.
    ///
    /// # Errors
    /// Returns the `ParseError` for the first component that is out of range.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    pub const fn weekday(&self) -> Weekday {
        day_of_week(self.year, self.month, self.day)
    }

    /// Plain (year, month, day) components
    pub const fn to_ymd(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }

    /// Helper to parse u16 with better error messages
    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for DateValue {
    type Err = ParseError;

    /// Parses the ISO `YYYY-MM-DD` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        match parts.as_slice() {
            [year, month, day] => {
                Self::from_ymd(Self::parse_u16(year)?, Self::parse_u8(month)?, Self::parse_u8(day)?)
            }
            _ => Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} component(s)",
                parts.len()
            ))),
        }
    }
}

impl TryFrom<(u16, u8, u8)> for DateValue {
    type Error = ParseError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::from_ymd(value.0, value.1, value.2)
    }
}

impl TryFrom<chrono::NaiveDate> for DateValue {
    type Error = ParseError;

    fn try_from(date: chrono::NaiveDate) -> Result<Self, Self::Error> {
        use chrono::Datelike;

        let year = u16::try_from(date.year())
            .map_err(|_| ParseError::InvalidYear(if date.year() < 0 { 0 } else { u16::MAX }))?;
        // chrono guarantees month in 1..=12 and day in 1..=31
        let month = u8::try_from(date.month()).map_err(|_| ParseError::InvalidMonth(0))?;
        let day = u8::try_from(date.day()).map_err(|_| ParseError::InvalidDay { year, month, day: 0 })?;
        Self::from_ymd(year, month, day)
    }
}

impl serde::Serialize for DateValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
