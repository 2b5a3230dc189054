// src/cli/browse.rs
//
// The interactive presentation shell: a line-driven loop over the notes
// query view. Search input echoes immediately and commits through the
// debouncer; paging, tag routes and the create form all resolve through
// the shared query cache.
use std::io::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::Instant;
use tracing::debug;

use crate::application::{
    DraftStore, FormField, NoteForm, NoteRepository, NotesQuery, QueryCache, SearchDebouncer,
    SubmitOutcome,
};
use crate::domain::{NoteId, Tag, UnknownTag};
use crate::ports::TextPresenter;

/// Token that abandons the note form at any prompt. The draft is kept.
const CANCEL_TOKEN: &str = ":q";

type InputLines = Lines<BufReader<Stdin>>;

/// Route semantics: "all" (any case) or empty means unfiltered; anything
/// else must be one of the fixed tags.
pub fn parse_tag_route(value: &str) -> Result<Option<Tag>, UnknownTag> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    <Tag as ValueEnum>::from_str(value, true)
        .map(Some)
        .map_err(|_| UnknownTag(value.to_string()))
}

#[derive(Debug, PartialEq, Eq)]
enum BrowseCommand {
    Search(String),
    Next,
    Prev,
    Goto(u32),
    Tag(Option<Tag>),
    New,
    Delete(NoteId),
    Redraw,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> BrowseCommand {
    let line = line.trim();
    if let Some(text) = line.strip_prefix('/') {
        return BrowseCommand::Search(text.to_string());
    }

    let mut words = line.splitn(2, char::is_whitespace);
    let head = words.next().unwrap_or_default();
    let rest = words.next().unwrap_or("").trim();
    match head {
        "" => BrowseCommand::Redraw,
        "n" | "next" => BrowseCommand::Next,
        "p" | "prev" => BrowseCommand::Prev,
        "g" | "goto" => match rest.parse() {
            Ok(page) => BrowseCommand::Goto(page),
            Err(_) => BrowseCommand::Unknown(line.to_string()),
        },
        "t" | "tag" => match parse_tag_route(rest) {
            Ok(tag) => BrowseCommand::Tag(tag),
            Err(_) => BrowseCommand::Unknown(line.to_string()),
        },
        "new" => BrowseCommand::New,
        "d" | "delete" if !rest.is_empty() => BrowseCommand::Delete(NoteId::from(rest)),
        "h" | "help" | "?" => BrowseCommand::Help,
        "q" | "quit" => BrowseCommand::Quit,
        _ => BrowseCommand::Unknown(line.to_string()),
    }
}

pub async fn run<R: NoteRepository + Clone>(repository: R, tag: Option<Tag>) -> Result<()> {
    let cache = Arc::new(QueryCache::new(repository.clone()));
    let draft = DraftStore::new();
    let mut query = NotesQuery::new(Arc::clone(&cache), tag);
    let mut debouncer = SearchDebouncer::default();
    let presenter = TextPresenter::new();

    // Populate the landing key before the first render; the resolve below
    // is then served from the cache without a second request.
    if let Err(err) = cache.prefetch(query.key()).await {
        debug!(%err, "prefetch failed; the interactive fetch will retry");
    }
    query.resolve().await;
    render(&presenter, &query, &debouncer);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break; // stdin closed
                };
                match parse_command(&line) {
                    BrowseCommand::Quit => break,
                    BrowseCommand::Search(text) => {
                        debouncer.input(text);
                        println!("Searching for: {}", debouncer.raw());
                    }
                    BrowseCommand::Next => {
                        if query.page() < query.total_pages() {
                            query.set_page(query.page() + 1);
                            query.resolve().await;
                        }
                        render(&presenter, &query, &debouncer);
                    }
                    BrowseCommand::Prev => {
                        if query.page() > 1 {
                            query.set_page(query.page() - 1);
                            query.resolve().await;
                        }
                        render(&presenter, &query, &debouncer);
                    }
                    BrowseCommand::Goto(page) => {
                        query.set_page(page.clamp(1, query.total_pages().max(1)));
                        query.resolve().await;
                        render(&presenter, &query, &debouncer);
                    }
                    BrowseCommand::Tag(tag) => {
                        // A tag switch is a route change: new landing key,
                        // search input starts over.
                        query.set_tag(tag);
                        debouncer.clear();
                        query.resolve().await;
                        render(&presenter, &query, &debouncer);
                    }
                    BrowseCommand::New => {
                        let mut form = NoteForm::new(
                            repository.clone(),
                            Arc::clone(&cache),
                            draft.clone(),
                        );
                        if form_flow(&mut lines, &mut form).await? {
                            query.navigate(None);
                            debouncer.clear();
                            query.resolve().await;
                        }
                        render(&presenter, &query, &debouncer);
                    }
                    BrowseCommand::Delete(id) => {
                        match repository.delete_note(&id).await {
                            Ok(note) => {
                                println!("Deleted note {}: {}", note.id, note.title);
                                cache.invalidate_all().await;
                                query.resolve().await;
                            }
                            Err(err) => println!("Could not delete {id}: {err}"),
                        }
                        render(&presenter, &query, &debouncer);
                    }
                    BrowseCommand::Redraw => render(&presenter, &query, &debouncer),
                    BrowseCommand::Help => print_help(),
                    BrowseCommand::Unknown(input) => {
                        println!("Unknown command: {input}");
                        print_help();
                    }
                }
            }
            () = sleep_until(deadline), if deadline.is_some() => {
                if let Some(committed) = debouncer.take_committed() {
                    query.apply_search(committed);
                    query.resolve().await;
                    render(&presenter, &query, &debouncer);
                }
            }
        }
    }
    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn render<R: NoteRepository>(
    presenter: &TextPresenter,
    query: &NotesQuery<R>,
    debouncer: &SearchDebouncer,
) {
    println!();
    let filter = query.tag().map_or_else(|| "all".to_string(), |t| t.to_string());
    if debouncer.raw().is_empty() {
        println!("Notes [{filter}]");
    } else {
        println!("Notes [{filter}] search: \"{}\"", debouncer.raw());
    }
    match query.data() {
        Some(page) => print!("{}", presenter.render_list(page, query.page())),
        None if query.is_loading() => println!("Loading notes..."),
        None => {}
    }
    if query.is_error() {
        println!("Something went wrong loading notes.");
    }
}

fn print_help() {
    println!("Commands: /TEXT search, n/p page, g N goto, t TAG|all filter,");
    println!("          new create note, d ID delete, h help, q quit");
}

/// Sequential draft-backed prompts followed by one submission attempt.
/// Returns whether a note was created.
async fn form_flow<R: NoteRepository>(
    lines: &mut InputLines,
    form: &mut NoteForm<R>,
) -> Result<bool> {
    println!("New note ({CANCEL_TOKEN} cancels; empty input keeps the shown value)");

    let draft = form.draft().draft();
    let Some(title) = prompt_field(lines, "Title", &draft.title).await? else {
        form.cancel();
        return Ok(false);
    };
    form.set_field(FormField::Title, &title);

    let Some(content) = prompt_field(lines, "Content", &draft.content).await? else {
        form.cancel();
        return Ok(false);
    };
    form.set_field(FormField::Content, &content);

    let choices = Tag::ALL
        .iter()
        .map(Tag::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    println!("Tags: {choices}");
    // The tag prompt preselects Todo, like the form's select element; the
    // confirmed value still flows through the regular field path.
    let tag_default = if draft.tag.is_empty() {
        Tag::Todo.as_str()
    } else {
        draft.tag.as_str()
    };
    let Some(tag) = prompt_field(lines, "Tag", tag_default).await? else {
        form.cancel();
        return Ok(false);
    };
    form.set_field(FormField::Tag, &tag);

    println!("Creating note...");
    match form.submit().await {
        SubmitOutcome::Created(note) => {
            println!("Created note {}: {}", note.id, note.title);
            Ok(true)
        }
        SubmitOutcome::Rejected => {
            for (field, message) in form.errors().iter() {
                println!("  {field}: {message}");
            }
            println!("Draft kept; enter `new` to continue editing.");
            Ok(false)
        }
        SubmitOutcome::Failed(_) => {
            println!("Could not create the note, please try again. Draft kept.");
            Ok(false)
        }
    }
}

/// Prompt with the current value as default; empty input keeps it. Returns
/// `None` when the user cancels or stdin closes.
async fn prompt_field(
    lines: &mut InputLines,
    label: &str,
    current: &str,
) -> Result<Option<String>> {
    if current.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{current}]: ");
    }
    std::io::stdout().flush().context("Failed to flush prompt")?;

    let Some(line) = lines.next_line().await.context("Failed to read input")? else {
        return Ok(None);
    };
    if line.trim() == CANCEL_TOKEN {
        return Ok(None);
    }
    if line.is_empty() {
        Ok(Some(current.to_string()))
    } else {
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_slash_prefix_when_parsing_then_search_command() {
        assert_eq!(
            parse_command("/buy milk"),
            BrowseCommand::Search("buy milk".to_string())
        );
    }

    #[test]
    fn given_bare_slash_when_parsing_then_empty_search() {
        // Clearing the search box is itself a keystroke.
        assert_eq!(parse_command("/"), BrowseCommand::Search(String::new()));
    }

    #[test]
    fn given_paging_shortcuts_when_parsing_then_page_commands() {
        assert_eq!(parse_command("n"), BrowseCommand::Next);
        assert_eq!(parse_command("prev"), BrowseCommand::Prev);
        assert_eq!(parse_command("g 4"), BrowseCommand::Goto(4));
    }

    #[test]
    fn given_tag_commands_when_parsing_then_route_semantics_apply() {
        assert_eq!(parse_command("t work"), BrowseCommand::Tag(Some(Tag::Work)));
        assert_eq!(parse_command("t all"), BrowseCommand::Tag(None));
        assert_eq!(
            parse_command("t chores"),
            BrowseCommand::Unknown("t chores".to_string())
        );
    }

    #[test]
    fn given_delete_without_id_when_parsing_then_unknown() {
        assert_eq!(parse_command("d"), BrowseCommand::Unknown("d".to_string()));
    }

    #[test]
    fn given_noise_when_parsing_then_unknown_keeps_input() {
        assert_eq!(
            parse_command("frobnicate"),
            BrowseCommand::Unknown("frobnicate".to_string())
        );
    }

    #[test]
    fn given_all_route_when_parsing_tag_then_unfiltered() {
        assert_eq!(parse_tag_route("all"), Ok(None));
        assert_eq!(parse_tag_route("ALL"), Ok(None));
        assert_eq!(parse_tag_route(""), Ok(None));
    }

    #[test]
    fn given_tag_route_when_parsing_then_case_insensitive() {
        assert_eq!(parse_tag_route("meeting"), Ok(Some(Tag::Meeting)));
        assert_eq!(parse_tag_route("Shopping"), Ok(Some(Tag::Shopping)));
        assert!(parse_tag_route("chores").is_err());
    }
}
