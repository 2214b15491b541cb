use crate::{DateValue, ParseError};

/// Source of the current calendar date.
pub trait Clock {
    /// Today's date.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the clock reports a year outside `1..=MAX_YEAR`.
    fn today(&self) -> Result<DateValue, ParseError>;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Result<DateValue, ParseError> {
        DateValue::try_from(chrono::Local::now().date_naive())
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateValue);

impl Clock for FixedClock {
    fn today(&self) -> Result<DateValue, ParseError> {
        Ok(self.0)
    }
}
