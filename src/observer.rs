use tracing::{debug, trace};

use crate::prelude::*;
use crate::reactive::Watch;
use crate::{DateRangeStore, DateValue, RangeFormatter, Reading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
enum Channel {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "end")]
    End,
}

/// Keeps a display string for the store's range current.
///
/// The observer subscribes to both store fields and keeps its own copy of
/// each endpoint. Changes are applied on [`tick`](Self::tick): each channel,
/// start first, compares the latest reading with the one it saw on the
/// previous tick, and a changed date updates that endpoint and recomputes
/// the display from both local endpoints. Unset readings are recorded but
/// never recompute. Dropping the observer unsubscribes it.
#[derive(Debug)]
pub struct RangeObserver {
    formatter:      RangeFormatter,
    start_watch:    Watch<Reading>,
    end_watch:      Watch<Reading>,
    start:          Reading,
    end:            Reading,
    display:        Option<String>,
    recomputations: u64,
}

impl RangeObserver {
    pub fn new(store: &DateRangeStore) -> Self {
        Self::with_formatter(store, RangeFormatter::default())
    }

    /// Renders the store's current range right away; that initial render is
    /// not counted in [`recomputations`](Self::recomputations).
    pub fn with_formatter(store: &DateRangeStore, formatter: RangeFormatter) -> Self {
        let start = store.start();
        let end = store.end();
        let display = start
            .zip(end)
            .map(|(start, end)| formatter.format(start, end));

        Self {
            formatter,
            start_watch: Watch::new(store.start_field()),
            end_watch: Watch::new(store.end_field()),
            start,
            end,
            display,
            recomputations: 0,
        }
    }

    /// Applies changes seen since the previous tick.
    ///
    /// Returns how many times the display was recomputed (0..=2).
    pub fn tick(&mut self) -> usize {
        let mut recomputed = 0;
        for channel in [Channel::Start, Channel::End] {
            if self.check(channel) {
                recomputed += 1;
            }
        }
        recomputed
    }

    /// Current display string, `None` until both endpoints have been known
    pub fn display_range(&self) -> Option<&str> {
        self.display.as_deref()
    }

    pub const fn local_start(&self) -> Reading {
        self.start
    }

    pub const fn local_end(&self) -> Reading {
        self.end
    }

    /// Number of tick-driven recomputations so far
    pub const fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub const fn formatter(&self) -> &RangeFormatter {
        &self.formatter
    }

    fn check(&mut self, channel: Channel) -> bool {
        let watch = match channel {
            Channel::Start => &self.start_watch,
            Channel::End => &self.end_watch,
        };
        let Some(reading) = watch.poll() else {
            return false;
        };
        let Some(date) = reading else {
            trace!(%channel, "skipped unset reading");
            return false;
        };

        match channel {
            Channel::Start => self.start = Some(date),
            Channel::End => self.end = Some(date),
        }
        self.recompute(channel)
    }

    fn recompute(&mut self, channel: Channel) -> bool {
        let Some((start, end)) = self.start.zip(self.end) else {
            trace!(%channel, "other endpoint not known yet");
            return false;
        };
        let rendered = self.render(start, end);
        debug!(%channel, display = %rendered, "recomputed date range");
        self.display = Some(rendered);
        self.recomputations += 1;
        true
    }

    fn render(&self, start: DateValue, end: DateValue) -> String {
        self.formatter.format(start, end)
    }
}
