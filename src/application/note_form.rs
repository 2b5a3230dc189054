// src/application/note_form.rs
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::draft_store::DraftStore;
use crate::application::query_cache::QueryCache;
use crate::application::repository::NoteRepository;
use crate::application::validation::{validate, FormField, ValidationErrors};
use crate::domain::{DomainError, Note};

/// Where the form sits in the create workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Success,
}

/// Result of one submission attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Field rules failed; no request was made.
    Rejected,
    /// The service refused or the request never arrived; the draft and the
    /// (empty) validation set are untouched.
    Failed(DomainError),
    /// The note exists remotely; caches are invalidated, the draft is
    /// cleared, and the caller should navigate back to the unfiltered list.
    Created(Note),
}

/// The note-creation workflow: validate, submit, clean up.
///
/// Validation errors and transport failures live in disjoint state — a
/// failed request never populates the field error set, and a rejected
/// draft never reaches the network.
pub struct NoteForm<R> {
    repository: R,
    cache: Arc<QueryCache<R>>,
    draft: DraftStore,
    errors: ValidationErrors,
    state: FormState,
    submit_failed: bool,
}

impl<R: NoteRepository> NoteForm<R> {
    pub fn new(repository: R, cache: Arc<QueryCache<R>>, draft: DraftStore) -> Self {
        Self {
            repository,
            cache,
            draft,
            errors: ValidationErrors::default(),
            state: FormState::Editing,
            submit_failed: false,
        }
    }

    /// Record a keystroke. All fields, the tag included, flow through this
    /// one path into the draft store.
    pub fn set_field(&self, field: FormField, value: &str) {
        self.draft.set_field(field, value);
    }

    pub fn draft(&self) -> &DraftStore {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Generic failure indicator for the last submission attempt. Never
    /// carries field attribution.
    pub fn submit_failed(&self) -> bool {
        self.submit_failed
    }

    /// Abandon editing. The draft is deliberately kept so returning to the
    /// form does not lose input; only a successful create clears it.
    pub fn cancel(&mut self) {
        debug!("form cancelled; draft retained");
        self.state = FormState::Editing;
    }

    /// Run the rule table over the current draft and, if it is clean,
    /// create the note remotely.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let values = self.draft.draft();
        match validate(&values) {
            Err(errors) => {
                debug!(violations = errors.len(), "rejecting note draft");
                self.errors = errors;
                self.state = FormState::Editing;
                SubmitOutcome::Rejected
            }
            Ok(new_note) => {
                self.errors = ValidationErrors::default();
                self.submit_failed = false;
                self.state = FormState::Submitting;
                match self.repository.create_note(&new_note).await {
                    Ok(note) => {
                        info!(id = %note.id, "note created");
                        self.cache.invalidate_all().await;
                        self.draft.clear();
                        self.state = FormState::Success;
                        SubmitOutcome::Created(note)
                    }
                    Err(err) => {
                        debug!(%err, "note creation failed");
                        self.submit_failed = true;
                        self.state = FormState::Editing;
                        SubmitOutcome::Failed(err)
                    }
                }
            }
        }
    }
}
