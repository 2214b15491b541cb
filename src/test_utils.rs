//! Terse constructors for tests.

use crate::{DateRangeStore, DateValue};

pub fn date(year: u16, month: u8, day: u8) -> DateValue {
    DateValue::from_ymd(year, month, day).expect("test date must be valid")
}

/// A store with both endpoints at the given date
pub fn store_at(year: u16, month: u8, day: u8) -> DateRangeStore {
    DateRangeStore::new(date(year, month, day))
}
