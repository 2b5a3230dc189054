// src/cli/handlers.rs
use anyhow::{bail, Context, Result};
use tracing::info;

use crate::application::{
    DraftStore, FormField, NoteForm, NoteRepository, QueryCache, QueryKey, SubmitOutcome,
};
use crate::domain::{NoteId, Tag};
use crate::ports::TextPresenter;
use std::sync::Arc;

pub async fn list<R: NoteRepository>(
    repository: R,
    search: Option<String>,
    page: u32,
    tag: Option<Tag>,
) -> Result<()> {
    let cache = QueryCache::new(repository);
    let key = QueryKey::new(page, search.unwrap_or_default(), tag);

    info!(?key, "Listing notes");
    let notes = cache
        .fetch(&key)
        .await
        .context("Failed to list notes")?;

    print!("{}", TextPresenter::new().render_list(&notes, key.page));
    Ok(())
}

pub async fn view<R: NoteRepository>(repository: R, note_id: &str, json: bool) -> Result<()> {
    let id = NoteId::from(note_id);

    info!(%id, "Viewing note");
    let note = repository
        .get_note(&id)
        .await
        .context("Failed to fetch note")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        print!("{}", TextPresenter::new().render_note(&note));
    }
    Ok(())
}

pub async fn delete<R: NoteRepository>(repository: R, note_id: &str) -> Result<()> {
    let id = NoteId::from(note_id);

    info!(%id, "Deleting note");
    let note = repository
        .delete_note(&id)
        .await
        .context("Failed to delete note")?;

    println!("Deleted note {}: {}", note.id, note.title);
    Ok(())
}

/// Flag-driven create: fills the draft through the form's field path, then
/// runs the same validate-then-mutate workflow the interactive form uses.
pub async fn create<R: NoteRepository + Clone>(
    repository: R,
    title: Option<String>,
    content: Option<String>,
    tag: Option<Tag>,
) -> Result<()> {
    let cache = Arc::new(QueryCache::new(repository.clone()));
    let mut form = NoteForm::new(repository, cache, DraftStore::new());

    if let Some(title) = title {
        form.set_field(FormField::Title, &title);
    }
    if let Some(content) = content {
        form.set_field(FormField::Content, &content);
    }
    if let Some(tag) = tag {
        form.set_field(FormField::Tag, tag.as_str());
    }

    match form.submit().await {
        SubmitOutcome::Created(note) => {
            println!("Created note {}: {}", note.id, note.title);
            Ok(())
        }
        SubmitOutcome::Rejected => {
            for (field, message) in form.errors().iter() {
                eprintln!("{field}: {message}");
            }
            bail!("Note rejected by validation");
        }
        SubmitOutcome::Failed(err) => Err(err).context("Failed to create note"),
    }
}
