// src/infrastructure/api.rs
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::application::NoteRepository;
use crate::constants::PAGE_SIZE;
use crate::domain::{DomainError, NewNote, Note, NoteId, NotePage, Tag};
use crate::infrastructure::config::ApiConfig;

/// Remote NoteHub service reached over HTTP.
///
/// One request per operation, bearer-authenticated, no retries. Non-2xx
/// responses surface as [`DomainError::Api`] with the status carried as-is.
#[derive(Debug, Clone)]
pub struct HttpNoteRepository {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpNoteRepository {
    pub fn new(config: ApiConfig) -> Result<Self, DomainError> {
        debug!(base_url = %config.base_url, "Creating HTTP note repository");
        let client = Client::builder()
            .build()
            .map_err(|e| DomainError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url,
            token: config.token,
        })
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: &NoteId) -> String {
        format!("{}/notes/{}", self.base_url, id)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DomainError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DomainError::Api {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))
    }
}

/// Query parameters for a list request. The tag is omitted entirely when
/// unfiltered; the service treats an empty string as a real tag value.
fn list_params(search: &str, page: u32, tag: Option<Tag>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("search", search.to_string()),
        ("page", page.to_string()),
        ("perPage", PAGE_SIZE.to_string()),
    ];
    if let Some(tag) = tag {
        params.push(("tag", tag.to_string()));
    }
    params
}

#[async_trait]
impl NoteRepository for HttpNoteRepository {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(
        &self,
        search: &str,
        page: u32,
        tag: Option<Tag>,
    ) -> Result<NotePage, DomainError> {
        let request = self
            .client
            .get(self.notes_url())
            .query(&list_params(search, page, tag));
        self.send(request).await
    }

    #[instrument(level = "debug", skip(self, note), fields(title = %note.title))]
    async fn create_note(&self, note: &NewNote) -> Result<Note, DomainError> {
        self.send(self.client.post(self.notes_url()).json(note)).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: &NoteId) -> Result<Note, DomainError> {
        self.send(self.client.delete(self.note_url(id))).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_note(&self, id: &NoteId) -> Result<Note, DomainError> {
        self.send(self.client.get(self.note_url(id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_tag_filter_when_building_params_then_tag_is_omitted() {
        // Arrange / Act
        let params = list_params("tree", 2, None);

        // Assert: omission is the contract, not an empty string
        assert!(params.iter().all(|(name, _)| *name != "tag"));
        assert!(params.contains(&("search", "tree".to_string())));
        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("perPage", "12".to_string())));
    }

    #[test]
    fn given_tag_filter_when_building_params_then_tag_is_sent() {
        let params = list_params("", 1, Some(Tag::Work));

        assert!(params.contains(&("tag", "Work".to_string())));
    }

    #[test]
    fn given_config_when_building_urls_then_paths_are_joined() {
        let repository = HttpNoteRepository::new(ApiConfig {
            base_url: "https://notehub.example/api".to_string(),
            token: "secret".to_string(),
        })
        .expect("client should build");

        assert_eq!(repository.notes_url(), "https://notehub.example/api/notes");
        assert_eq!(
            repository.note_url(&NoteId::from("6650f1")),
            "https://notehub.example/api/notes/6650f1"
        );
    }
}
