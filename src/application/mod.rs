// src/application/mod.rs
pub mod draft_store;
pub mod note_form;
pub mod notes_query;
pub mod query_cache;
pub mod repository;
pub mod search_debouncer;
pub mod validation;

pub use draft_store::DraftStore;
pub use note_form::{FormState, NoteForm, SubmitOutcome};
pub use notes_query::{FetchTicket, NotesQuery};
pub use query_cache::{QueryCache, QueryKey};
pub use repository::NoteRepository;
pub use search_debouncer::SearchDebouncer;
pub use validation::{validate, FormField, ValidationErrors};
