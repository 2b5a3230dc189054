// src/constants.rs
//
// Application-wide constants extracted from magic numbers throughout the codebase.
// Each constant is documented with its purpose and usage context.

/// Number of notes requested per result page.
///
/// The remote service paginates note listings; every list request carries
/// this value as `perPage` so page numbers stay stable across queries.
///
/// Used in: `infrastructure/api.rs`
pub const PAGE_SIZE: u32 = 12;

/// Quiet window in milliseconds before typed search text is committed.
///
/// Each keystroke restarts the window; only when input pauses for this long
/// does the search value become part of the query key and trigger a fetch.
///
/// Used in: `application/search_debouncer.rs`
pub const SEARCH_DEBOUNCE_MS: u64 = 1000;

/// Default base URL of the remote NoteHub API.
///
/// Overridable with `--api-url` or the `NOTEHUB_API_URL` environment
/// variable.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_API_URL: &str = "https://notehub-public.goit.study/api";

/// Minimum number of characters accepted for a note title.
///
/// Used in: `application/validation.rs`
pub const TITLE_MIN_CHARS: usize = 3;

/// Maximum number of characters accepted for a note title.
///
/// Used in: `application/validation.rs`
pub const TITLE_MAX_CHARS: usize = 50;

/// Maximum number of characters accepted for note content.
///
/// Content is optional; an empty body is always valid.
///
/// Used in: `application/validation.rs`
pub const CONTENT_MAX_CHARS: usize = 500;
