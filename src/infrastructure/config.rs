// src/infrastructure/config.rs
use std::env;

use crate::constants::DEFAULT_API_URL;
use crate::domain::DomainError;

/// Environment variable holding the bearer token for the note service.
pub const TOKEN_ENV: &str = "NOTEHUB_TOKEN";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "NOTEHUB_API_URL";

/// Connection settings for the remote note service.
///
/// Resolved flags-first, environment second; a missing token fails here,
/// before any request is attempted.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
}

impl ApiConfig {
    pub fn from_env(
        base_url: Option<String>,
        token: Option<String>,
    ) -> Result<Self, DomainError> {
        let base_url = base_url
            .or_else(|| env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token = token
            .or_else(|| env::var(TOKEN_ENV).ok())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| DomainError::Config(format!("{TOKEN_ENV} is not set")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}
