// src/application/repository.rs
use async_trait::async_trait;

use crate::domain::{DomainError, NewNote, Note, NoteId, NotePage, Tag};

/// Gateway to the remote note service.
///
/// Every method maps to exactly one HTTP round-trip; failures come back
/// unretried and uninterpreted so callers decide what a failure means.
#[async_trait]
pub trait NoteRepository {
    /// Fetch one page of notes matching `search`, optionally restricted to
    /// a tag. `tag = None` means unfiltered.
    async fn list_notes(
        &self,
        search: &str,
        page: u32,
        tag: Option<Tag>,
    ) -> Result<NotePage, DomainError>;

    /// Create a note and return it with the id the service assigned.
    async fn create_note(&self, note: &NewNote) -> Result<Note, DomainError>;

    /// Delete a note and return the deleted record.
    async fn delete_note(&self, id: &NoteId) -> Result<Note, DomainError>;

    async fn get_note(&self, id: &NoteId) -> Result<Note, DomainError>;
}
