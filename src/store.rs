use tracing::debug;

use crate::reactive::{Observable, Subscription};
use crate::{Clock, DateRange, DateValue, ParseError};

/// Current value of a store field; `None` means the field is unset.
pub type Reading = Option<DateValue>;

/// Shared start/end date pair.
///
/// One store is created by the host and handed to every collaborator that
/// reads or writes the selection. Cloning yields a handle to the same state.
/// No ordering is enforced between the endpoints.
#[derive(Debug, Clone)]
pub struct DateRangeStore {
    start: Observable<Reading>,
    end:   Observable<Reading>,
}

impl DateRangeStore {
    /// Creates a store with both endpoints set to `initial`.
    pub fn new(initial: DateValue) -> Self {
        Self {
            start: Observable::new(Some(initial)),
            end:   Observable::new(Some(initial)),
        }
    }

    /// Creates a store with both endpoints set to the clock's date, read once.
    ///
    /// # Errors
    /// Returns the clock's error if it cannot produce a valid date.
    pub fn from_clock(clock: &(impl Clock + ?Sized)) -> Result<Self, ParseError> {
        clock.today().map(Self::new)
    }

    pub fn start(&self) -> Reading {
        self.start.get()
    }

    pub fn end(&self) -> Reading {
        self.end.get()
    }

    /// Both endpoints, if both are set
    pub fn range(&self) -> Option<DateRange> {
        Some(DateRange::new(self.start()?, self.end()?))
    }

    pub fn set_start(&self, date: DateValue) {
        debug!(field = "start", %date, "set date");
        self.start.set(Some(date));
    }

    pub fn set_end(&self, date: DateValue) {
        debug!(field = "end", %date, "set date");
        self.end.set(Some(date));
    }

    /// Marks the start as unset, e.g. when the picker input was emptied.
    pub fn clear_start(&self) {
        debug!(field = "start", "cleared date");
        self.start.set(None);
    }

    /// Marks the end as unset.
    pub fn clear_end(&self) {
        debug!(field = "end", "cleared date");
        self.end.set(None);
    }

    pub fn start_field(&self) -> &Observable<Reading> {
        &self.start
    }

    pub fn end_field(&self) -> &Observable<Reading> {
        &self.end
    }

    pub fn subscribe_start(&self, callback: impl Fn(&Reading) + 'static) -> Subscription {
        self.start.subscribe(callback)
    }

    pub fn subscribe_end(&self, callback: impl Fn(&Reading) + 'static) -> Subscription {
        self.end.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;
    use crate::test_utils::{date, store_at};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_new_sets_both_endpoints() {
        let store = store_at(2024, 1, 1);
        assert_eq!(store.start(), Some(date(2024, 1, 1)));
        assert_eq!(store.end(), Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_from_clock_captures_today_once() {
        let store = DateRangeStore::from_clock(&FixedClock(date(2024, 3, 7))).unwrap();
        assert_eq!(store.start(), Some(date(2024, 3, 7)));
        assert_eq!(store.end(), Some(date(2024, 3, 7)));
    }

    #[test]
    fn test_setters_replace_without_validation() {
        let store = store_at(2024, 1, 1);
        store.set_end(date(2023, 6, 1));
        store.set_start(date(2024, 2, 1));

        assert_eq!(store.start(), Some(date(2024, 2, 1)));
        assert_eq!(store.end(), Some(date(2023, 6, 1)));
        let range = store.range().unwrap();
        assert!(range.is_reversed());
    }

    #[test]
    fn test_clear_yields_unset_reading() {
        let store = store_at(2024, 1, 1);
        store.clear_start();
        assert_eq!(store.start(), None);
        assert_eq!(store.end(), Some(date(2024, 1, 1)));
        assert!(store.range().is_none());

        store.clear_end();
        assert_eq!(store.end(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let picker = store_at(2024, 1, 1);
        let display = picker.clone();
        picker.set_end(date(2024, 1, 10));
        assert_eq!(display.end(), Some(date(2024, 1, 10)));
    }

    #[test]
    fn test_subscribers_see_changes_only() {
        let store = store_at(2024, 1, 1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = store.subscribe_end(move |reading| sink.borrow_mut().push(*reading));

        store.set_end(date(2024, 1, 1));
        store.set_end(date(2024, 1, 10));
        store.clear_end();

        assert_eq!(*seen.borrow(), vec![Some(date(2024, 1, 10)), None]);
        assert_eq!(store.end_field().version(), 2);
        assert_eq!(store.start_field().version(), 0);
    }
}
