// src/util/testing.rs

use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteRepository;
use crate::domain::{DomainError, NewNote, Note, NoteId, NotePage, Tag};

/// Minimal note fixture.
pub fn note(id: &str, title: &str) -> Note {
    Note {
        id: NoteId::from(id),
        title: title.to_string(),
        content: String::new(),
        tag: Tag::Todo,
    }
}

/// Page fixture.
pub fn page(notes: Vec<Note>, total_pages: u32) -> NotePage {
    NotePage { notes, total_pages }
}

/// Arguments of one list request: (search, page, tag).
pub type ListKey = (String, u32, Option<Tag>);

#[derive(Default)]
struct MockState {
    pages: HashMap<ListKey, NotePage>,
    notes: HashMap<NoteId, Note>,
    list_delay: Option<Duration>,
    list_error: Option<DomainError>,
    create_error: Option<DomainError>,
    list_calls: Vec<ListKey>,
    create_calls: Vec<NewNote>,
    next_id: u32,
}

/// Shared mock repository for use cases that depend on NoteRepository
///
/// This mock provides configurable pages, injectable failures and
/// artificial latency, plus call recording so tests can assert how many
/// network requests a scenario produced. Handles are clones sharing one
/// state, so the same instance can back a cache and be inspected later.
///
/// # Examples
///
/// ```
/// use notehub::util::testing::{note, page, MockNoteRepository};
///
/// let mock = MockNoteRepository::builder()
///     .with_page("", 1, None, page(vec![note("1", "Buy milk")], 1))
///     .build();
/// ```
#[derive(Clone)]
pub struct MockNoteRepository {
    state: Arc<Mutex<MockState>>,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    /// Number of list requests issued so far.
    pub fn list_calls(&self) -> usize {
        self.lock().list_calls.len()
    }

    /// Arguments of every list request, in call order.
    pub fn recorded_list_calls(&self) -> Vec<ListKey> {
        self.lock().list_calls.clone()
    }

    /// Number of create requests issued so far.
    pub fn create_calls(&self) -> usize {
        self.lock().create_calls.len()
    }

    /// Payloads of every create request, in call order.
    pub fn created(&self) -> Vec<NewNote> {
        self.lock().create_calls.clone()
    }

    /// Make every list request fail from now on, for scenarios where a
    /// working query later loses its connection.
    pub fn fail_lists_with(&self, error: DomainError) {
        self.lock().list_error = Some(error);
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn list_notes(
        &self,
        search: &str,
        page_number: u32,
        tag: Option<Tag>,
    ) -> Result<NotePage, DomainError> {
        let (delay, outcome) = {
            let mut state = self.lock();
            let key = (search.to_string(), page_number, tag);
            state.list_calls.push(key.clone());
            let outcome = if let Some(err) = &state.list_error {
                Err(err.clone())
            } else if let Some(result) = state.pages.get(&key) {
                Ok(result.clone())
            } else {
                // Unconfigured queries return an empty single page so tests
                // only set up what they assert on.
                Ok(NotePage {
                    notes: vec![],
                    total_pages: 1,
                })
            };
            (state.list_delay, outcome)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        outcome
    }

    async fn create_note(&self, new_note: &NewNote) -> Result<Note, DomainError> {
        let mut state = self.lock();
        state.create_calls.push(new_note.clone());
        if let Some(err) = &state.create_error {
            return Err(err.clone());
        }
        state.next_id += 1;
        let created = Note {
            id: NoteId(format!("note-{}", state.next_id)),
            title: new_note.title.clone(),
            content: new_note.content.clone(),
            tag: new_note.tag,
        };
        state.notes.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn delete_note(&self, id: &NoteId) -> Result<Note, DomainError> {
        let mut state = self.lock();
        state.notes.remove(id).ok_or_else(|| DomainError::Api {
            status: 404,
            message: format!("Note not found: {id}"),
        })
    }

    async fn get_note(&self, id: &NoteId) -> Result<Note, DomainError> {
        let state = self.lock();
        state.notes.get(id).cloned().ok_or_else(|| DomainError::Api {
            status: 404,
            message: format!("Note not found: {id}"),
        })
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    state: MockState,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            state: MockState::default(),
        }
    }

    /// Configure the result of list_notes for a specific query.
    pub fn with_page(
        mut self,
        search: &str,
        page_number: u32,
        tag: Option<Tag>,
        result: NotePage,
    ) -> Self {
        self.state
            .pages
            .insert((search.to_string(), page_number, tag), result);
        self
    }

    /// Add a note retrievable by get_note and removable by delete_note.
    pub fn with_note(mut self, note: Note) -> Self {
        self.state.notes.insert(note.id.clone(), note);
        self
    }

    /// Delay every list response, for pending-fetch scenarios under paused
    /// test time.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.state.list_delay = Some(delay);
        self
    }

    /// Make every list request fail.
    pub fn with_list_error(mut self, error: DomainError) -> Self {
        self.state.list_error = Some(error);
        self
    }

    /// Make every create request fail.
    pub fn with_create_error(mut self, error: DomainError) -> Self {
        self.state.create_error = Some(error);
        self
    }

    pub fn build(self) -> MockNoteRepository {
        MockNoteRepository {
            state: Arc::new(Mutex::new(self.state)),
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "tokio_util"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
