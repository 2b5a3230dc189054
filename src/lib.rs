// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::args::{Args, Command};
use crate::infrastructure::{ApiConfig, HttpNoteRepository};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notehub with arguments");

    // Initialize infrastructure
    let config = ApiConfig::from_env(args.api_url, args.token)
        .context("Failed to resolve NoteHub connection settings")?;
    let repository = HttpNoteRepository::new(config).context("Failed to build HTTP client")?;

    // Execute use case
    match args.command {
        Command::List { search, page, tag } => {
            cli::handlers::list(repository, search, page, tag).await
        }
        Command::View { note_id, json } => cli::handlers::view(repository, &note_id, json).await,
        Command::Delete { note_id } => cli::handlers::delete(repository, &note_id).await,
        Command::Create {
            title,
            content,
            tag,
        } => cli::handlers::create(repository, title, content, tag).await,
        Command::Browse { tag } => {
            let tag = cli::browse::parse_tag_route(&tag)
                .context("Invalid tag route; use one of the fixed tags or \"all\"")?;
            cli::browse::run(repository, tag).await
        }
    }
}
