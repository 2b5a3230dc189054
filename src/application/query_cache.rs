// src/application/query_cache.rs
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::application::repository::NoteRepository;
use crate::domain::{DomainError, NotePage, Tag};

/// Identifies one cached result set.
///
/// Keys are value-equal: two keys built independently from the same page,
/// search text and tag hit the same cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub page: u32,
    pub search: String,
    pub tag: Option<Tag>,
}

impl QueryKey {
    pub fn new(page: u32, search: impl Into<String>, tag: Option<Tag>) -> Self {
        Self {
            page: page.max(1),
            search: search.into(),
            tag,
        }
    }

    /// The landing key for a tag route: first page, no search text.
    pub fn first_page(tag: Option<Tag>) -> Self {
        Self::new(1, "", tag)
    }
}

struct CacheEntry {
    page: Arc<NotePage>,
    stale: bool,
}

type FetchOutcome = Result<Arc<NotePage>, DomainError>;

#[derive(Default)]
struct CacheState {
    entries: HashMap<QueryKey, CacheEntry>,
    in_flight: HashMap<QueryKey, broadcast::Sender<FetchOutcome>>,
}

/// Client-side cache over the note repository, keyed by [`QueryKey`].
///
/// At most one request is outstanding per key; callers arriving while a
/// fetch is in flight subscribe to its outcome instead of issuing a second
/// request. Invalidation marks entries stale rather than evicting them, so
/// a stale page can still be shown while its refetch is pending.
///
/// The state lock is never held across a repository call: readers observe
/// either the pre- or post-mutation state, never a partially written entry.
pub struct QueryCache<R> {
    repository: R,
    state: Mutex<CacheState>,
}

impl<R: NoteRepository> QueryCache<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Cached page for `key`, fresh or stale, without touching the network.
    pub async fn peek(&self, key: &QueryKey) -> Option<Arc<NotePage>> {
        let state = self.state.lock().await;
        state.entries.get(key).map(|entry| Arc::clone(&entry.page))
    }

    /// Return the cached page for `key`, fetching it if absent or stale.
    ///
    /// Concurrent calls for the same key share a single request and all
    /// receive its outcome, including a failure.
    pub async fn fetch(&self, key: &QueryKey) -> FetchOutcome {
        loop {
            let joined = {
                let mut state = self.state.lock().await;
                if let Some(entry) = state.entries.get(key) {
                    if !entry.stale {
                        debug!(?key, "query cache hit");
                        return Ok(Arc::clone(&entry.page));
                    }
                }
                match state.in_flight.get(key) {
                    Some(tx) => Some(tx.subscribe()),
                    None => {
                        let (tx, _) = broadcast::channel(1);
                        state.in_flight.insert(key.clone(), tx);
                        None
                    }
                }
            };

            let Some(mut rx) = joined else {
                return self.fetch_and_publish(key).await;
            };

            debug!(?key, "joining in-flight request");
            if let Ok(outcome) = rx.recv().await {
                return outcome;
            }
            // The fetching caller went away without publishing; start over.
        }
    }

    /// One-shot population for a key before any interactive consumer
    /// exists. A later `fetch` of the same key is then a pure cache hit.
    pub async fn prefetch(&self, key: &QueryKey) -> FetchOutcome {
        debug!(?key, "prefetching");
        self.fetch(key).await
    }

    /// Mark every cached listing stale. The next fetch of any key goes back
    /// to the network; until it lands, the stale page remains available as
    /// placeholder data.
    pub async fn invalidate_all(&self) {
        let mut state = self.state.lock().await;
        let count = state.entries.len();
        for entry in state.entries.values_mut() {
            entry.stale = true;
        }
        debug!(count, "invalidated cached note listings");
    }

    async fn fetch_and_publish(&self, key: &QueryKey) -> FetchOutcome {
        debug!(?key, "fetching notes");
        let outcome = self
            .repository
            .list_notes(&key.search, key.page, key.tag)
            .await
            .map(Arc::new);

        let tx = {
            let mut state = self.state.lock().await;
            let tx = state.in_flight.remove(key);
            if let Ok(page) = &outcome {
                state.entries.insert(
                    key.clone(),
                    CacheEntry {
                        page: Arc::clone(page),
                        stale: false,
                    },
                );
            }
            tx
        };
        if let Some(tx) = tx {
            // No subscribers is fine; the send result is irrelevant.
            let _ = tx.send(outcome.clone());
        }
        outcome
    }
}
