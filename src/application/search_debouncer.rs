// src/application/search_debouncer.rs
use std::time::Duration;

use tokio::time::Instant;

use crate::constants::SEARCH_DEBOUNCE_MS;

/// Coalesces a burst of search keystrokes into one committed value.
///
/// Every input restarts the quiet window; the last value typed before the
/// window elapses becomes the committed search text. The raw value is
/// readable immediately so the input echo never lags, only the committed
/// value (the one queries are built from) is delayed.
#[derive(Debug)]
pub struct SearchDebouncer {
    window: Duration,
    raw: String,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            raw: String::new(),
            pending: None,
        }
    }

    /// Record a keystroke and restart the quiet window.
    pub fn input(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.raw = text.clone();
        self.pending = Some((text, Instant::now() + self.window));
    }

    /// Last raw input, for immediate echo display.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether a value is waiting for its quiet window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value commits, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// The committed value, once the quiet window has elapsed with no
    /// further input. Returns `None` while the window is still open or
    /// nothing is pending. Each commit is yielded exactly once.
    pub fn take_committed(&mut self) -> Option<String> {
        let (_, deadline) = self.pending.as_ref()?;
        if Instant::now() < *deadline {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop any pending value and raw echo, e.g. when the view is
    /// re-created for another tag route.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.pending = None;
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }
}
