//! Debounced input settling for search boxes.
//!
//! `Debouncer` is clock-agnostic: callers pass the current time in
//! milliseconds, so the browser drives it from `gloo-timers` and tests drive
//! it with plain numbers.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

/// Quiet period before a search term is applied.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Wall-clock milliseconds for driving a `Debouncer` in the browser.
#[must_use]
pub fn now_ms() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let now = js_sys::Date::now() as u64;
        now
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
    seq: u64,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms, pending: None, seq: 0 }
    }

    /// Record new input at `now_ms`, superseding anything pending.
    ///
    /// Returns a ticket; only the latest ticket can settle.
    pub fn input(&mut self, value: T, now_ms: u64) -> u64 {
        self.seq += 1;
        self.pending = Some((value, now_ms + self.delay_ms));
        self.seq
    }

    /// Settle `ticket` at `now_ms`: yields the value if it is still the
    /// latest input and its quiet period has elapsed.
    pub fn settle(&mut self, ticket: u64, now_ms: u64) -> Option<T> {
        if ticket != self.seq {
            return None;
        }
        match &self.pending {
            Some((_, deadline)) if now_ms >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    #[must_use]
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
