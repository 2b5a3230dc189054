// src/domain/error.rs
use thiserror::Error;

/// Failures surfaced by the remote service or the path to it.
///
/// `Clone` is load-bearing: callers that join an in-flight request in the
/// query cache all receive the same outcome, error or not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Non-2xx response. The status is carried as-is; this client does not
    /// interpret status codes or retry.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
