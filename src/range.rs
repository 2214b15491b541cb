use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DateValue, ParseError, RANGE_SEPARATOR, RangeFormatter, prelude::*};

/// A start/end pair of dates, taken as given.
///
/// The endpoints are not reordered: a range whose start is after its end is
/// kept and rendered that way. Use [`is_reversed`](Self::is_reversed) and
/// [`normalized`](Self::normalized) when chronological order matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: DateValue,
    end:   DateValue,
}

/// Error type for date range parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Error parsing date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    pub const fn new(start: DateValue, end: DateValue) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> DateValue {
        self.start
    }

    pub const fn end(&self) -> DateValue {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (DateValue, DateValue) {
        (self.start, self.end)
    }

    /// Start and end are the same calendar date
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Start falls after end
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }

    /// Same dates in chronological order
    #[must_use]
    pub fn normalized(&self) -> Self {
        if self.is_reversed() {
            Self::new(self.end, self.start)
        } else {
            *self
        }
    }

    /// Checks if `date` lies between the endpoints (inclusive), in either order.
    pub fn contains(&self, date: &DateValue) -> bool {
        let Self { start, end } = self.normalized();
        start <= *date && *date <= end
    }

    /// Display form using the default formatter
    pub fn to_display_string(&self) -> String {
        RangeFormatter::default().format(self.start, self.end)
    }
}

impl From<(DateValue, DateValue)> for DateRange {
    fn from((start, end): (DateValue, DateValue)) -> Self {
        Self::new(start, end)
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // ISO 8601 interval form: start and end separated by RANGE_SEPARATOR
        let Some((start_str, end_str)) = trimmed.split_once(RANGE_SEPARATOR) else {
            return Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            )));
        };
        if end_str.contains(RANGE_SEPARATOR) {
            let separator_count = trimmed.matches(RANGE_SEPARATOR).count();
            return Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            )));
        }

        let start = start_str.trim().parse::<DateValue>()?;
        let end = end_str.trim().parse::<DateValue>()?;

        Ok(Self::new(start, end))
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
