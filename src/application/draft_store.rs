// src/application/draft_store.rs
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::application::validation::FormField;
use crate::domain::NoteDraft;

/// Holder for the single in-progress, not-yet-submitted note.
///
/// Handles are cheap clones sharing one record, so any screen can read or
/// update the same draft and navigating away does not lose input. The
/// record lives for the process only; it is cleared exactly once, after a
/// successful create — cancellation never clears it.
///
/// No validation happens here: the draft stores whatever was typed.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    inner: Arc<Mutex<NoteDraft>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current draft.
    pub fn draft(&self) -> NoteDraft {
        self.lock().clone()
    }

    /// Merge one field value into the draft, leaving the others untouched.
    /// Tag updates take this same path as every other field.
    pub fn set_field(&self, field: FormField, value: &str) {
        let mut draft = self.lock();
        match field {
            FormField::Title => draft.title = value.to_string(),
            FormField::Content => draft.content = value.to_string(),
            FormField::Tag => draft.tag = value.to_string(),
        }
    }

    /// Reset to an empty draft.
    pub fn clear(&self) {
        debug!("clearing note draft");
        *self.lock() = NoteDraft::default();
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NoteDraft> {
        // A poisoned lock means a panic mid-update; the draft is best-effort
        // state, so keep whatever was written.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_field_updates_when_reading_draft_then_values_merged() {
        // Arrange
        let store = DraftStore::new();

        // Act
        store.set_field(FormField::Title, "Buy milk");
        store.set_field(FormField::Tag, "Todo");

        // Assert
        let draft = store.draft();
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.content, "");
        assert_eq!(draft.tag, "Todo");
    }

    #[test]
    fn given_cloned_handle_when_updating_then_both_handles_see_change() {
        // Arrange
        let store = DraftStore::new();
        let other = store.clone();

        // Act
        other.set_field(FormField::Content, "2 liters");

        // Assert
        assert_eq!(store.draft().content, "2 liters");
    }

    #[test]
    fn given_filled_draft_when_clearing_then_draft_is_empty() {
        // Arrange
        let store = DraftStore::new();
        store.set_field(FormField::Title, "Buy milk");

        // Act
        store.clear();

        // Assert
        assert!(store.is_empty());
    }

    #[test]
    fn given_repeated_field_update_when_reading_then_last_value_wins() {
        let store = DraftStore::new();

        store.set_field(FormField::Title, "Buy mil");
        store.set_field(FormField::Title, "Buy milk");

        assert_eq!(store.draft().title, "Buy milk");
    }
}
