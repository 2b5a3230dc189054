// src/application/notes_query.rs
use std::sync::Arc;

use tracing::debug;

use crate::application::query_cache::{QueryCache, QueryKey};
use crate::application::repository::NoteRepository;
use crate::domain::{DomainError, Note, NotePage, Tag};

/// Snapshot identifying one fetch request issued by a [`NotesQuery`].
///
/// Completions carrying a stale ticket are discarded: whatever key was
/// requested last owns the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Consumer-side view over the query cache.
///
/// Keeps the previously displayed page visible while a fetch for a newer
/// key is pending or has failed, so paging and filtering never flash an
/// empty list. Key changes bump a generation counter; results for
/// superseded generations are ignored rather than cancelled.
pub struct NotesQuery<R> {
    cache: Arc<QueryCache<R>>,
    key: QueryKey,
    generation: u64,
    data: Option<Arc<NotePage>>,
    loading: bool,
    error: Option<DomainError>,
}

impl<R: NoteRepository> NotesQuery<R> {
    pub fn new(cache: Arc<QueryCache<R>>, tag: Option<Tag>) -> Self {
        Self {
            cache,
            key: QueryKey::first_page(tag),
            generation: 0,
            data: None,
            loading: false,
            error: None,
        }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn page(&self) -> u32 {
        self.key.page
    }

    pub fn search(&self) -> &str {
        &self.key.search
    }

    pub fn tag(&self) -> Option<Tag> {
        self.key.tag
    }

    /// Currently displayed page, which may belong to the previous key while
    /// a newer fetch is pending.
    pub fn data(&self) -> Option<&NotePage> {
        self.data.as_deref()
    }

    pub fn notes(&self) -> &[Note] {
        match self.data.as_deref() {
            Some(page) => &page.notes,
            None => &[],
        }
    }

    /// Zero until the first page has loaded, matching the service contract
    /// of `totalPages >= 0`.
    pub fn total_pages(&self) -> u32 {
        self.data.as_deref().map_or(0, |page| page.total_pages)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&DomainError> {
        self.error.as_ref()
    }

    pub fn set_page(&mut self, page: u32) {
        let page = page.max(1);
        if page == self.key.page {
            return;
        }
        self.key.page = page;
        self.generation += 1;
    }

    /// Commit a search value. A new search implies a new result set whose
    /// page count may differ, so the page always resets to 1.
    pub fn apply_search(&mut self, search: String) {
        let next = QueryKey::new(1, search, self.key.tag);
        if next == self.key {
            return;
        }
        self.key = next;
        self.generation += 1;
    }

    /// Route change: switch tag filter and start over at the landing key.
    /// `None` is the unfiltered "all" route.
    pub fn navigate(&mut self, tag: Option<Tag>) {
        self.key = QueryKey::first_page(tag);
        self.generation += 1;
    }

    pub fn set_tag(&mut self, tag: Option<Tag>) {
        if tag == self.key.tag {
            return;
        }
        self.navigate(tag);
    }

    /// Start a fetch for the current key. The ticket and key are detached
    /// from the view so the actual cache call can race other events; feed
    /// the outcome back through [`complete`](Self::complete).
    pub fn begin(&mut self) -> (FetchTicket, QueryKey) {
        self.loading = true;
        (
            FetchTicket {
                generation: self.generation,
            },
            self.key.clone(),
        )
    }

    /// Commit a fetch outcome unless the user has moved to another key in
    /// the meantime. On failure the previous page stays visible and only
    /// the error flag changes.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Arc<NotePage>, DomainError>,
    ) {
        if ticket.generation != self.generation {
            debug!("discarding fetch result for superseded key");
            return;
        }
        self.loading = false;
        match outcome {
            Ok(page) => {
                self.data = Some(page);
                self.error = None;
            }
            Err(err) => {
                debug!(%err, "notes fetch failed; keeping previous data");
                self.error = Some(err);
            }
        }
    }

    /// Fetch the current key to completion: begin, serve any cached page as
    /// immediate placeholder, then resolve through the cache.
    pub async fn resolve(&mut self) {
        let (ticket, key) = self.begin();
        if self.data.is_none() {
            if let Some(page) = self.cache.peek(&key).await {
                self.data = Some(page);
            }
        }
        let cache = Arc::clone(&self.cache);
        let outcome = cache.fetch(&key).await;
        self.complete(ticket, outcome);
    }
}
