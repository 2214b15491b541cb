//! Display strings for dates and date ranges.
//!
//! - Long form: `<Weekday> <Month> <Day> <Year>`, e.g. `Monday January 1 2024`.
//! - Ymd form: `YYYY-MM-DD` with zero-padded components, used for "today".
//! - Range form: `<long start> – <long end>`, collapsing to the single long
//!   form when both endpoints are the same date.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Clock, DISPLAY_RANGE_SEPARATOR, DateValue, ParseError, YMD_STYLE_TOKEN, prelude::*};

/// How a single date is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    #[default]
    #[display(fmt = "long")]
    Long,
    #[display(fmt = "ymd")]
    Ymd,
}

impl FromStr for DateStyle {
    type Err = std::convert::Infallible;

    /// Exactly `"ymd"` selects [`DateStyle::Ymd`]; every other token falls
    /// back to [`DateStyle::Long`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == YMD_STYLE_TOKEN {
            Ok(Self::Ymd)
        } else {
            Ok(Self::Long)
        }
    }
}

/// `<Weekday> <Month> <Day> <Year>`
pub fn long_form(date: DateValue) -> String {
    format!(
        "{} {} {} {}",
        date.weekday(),
        date.month().name(),
        date.day().get(),
        date.year()
    )
}

/// `YYYY-MM-DD`
pub fn ymd_form(date: DateValue) -> String {
    date.to_string()
}

/// Today's date in the ymd form.
///
/// # Errors
/// Returns the clock's error if it cannot produce a valid date.
pub fn today(clock: &(impl Clock + ?Sized)) -> Result<String, ParseError> {
    clock.today().map(ymd_form)
}

/// Maps a start/end pair to its display string.
///
/// Loadable from host configuration; missing fields take the defaults
/// (EN DASH separator, long style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeFormatter {
    pub separator: String,
    pub style:     DateStyle,
}

impl Default for RangeFormatter {
    fn default() -> Self {
        Self {
            separator: DISPLAY_RANGE_SEPARATOR.to_owned(),
            style:     DateStyle::Long,
        }
    }
}

impl RangeFormatter {
    pub fn render(&self, date: DateValue) -> String {
        match self.style {
            DateStyle::Long => long_form(date),
            DateStyle::Ymd => ymd_form(date),
        }
    }

    /// Single rendering of `end` when the endpoints are equal, otherwise both
    /// joined by the separator. Endpoints are never reordered.
    pub fn format(&self, start: DateValue, end: DateValue) -> String {
        if start == end {
            self.render(end)
        } else {
            format!("{}{}{}", self.render(start), self.separator, self.render(end))
        }
    }
}
