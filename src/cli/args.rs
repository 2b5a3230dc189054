// src/cli/args.rs
use clap::{Parser, Subcommand};

use crate::domain::Tag;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Base URL of the note service (overrides NOTEHUB_API_URL)
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token for the note service (overrides NOTEHUB_TOKEN)
    #[arg(long, value_name = "TOKEN", global = true)]
    pub token: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (list, view, delete, create, or browse)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List notes, optionally filtered by search text and tag
    List {
        /// Search term forwarded to the service
        #[arg(value_name = "SEARCH")]
        search: Option<String>,

        /// Result page to fetch
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Only notes carrying this tag
        #[arg(short, long, value_enum)]
        tag: Option<Tag>,
    },

    /// Show a single note
    View {
        /// Note ID to show
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        /// Output note as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Create a note from flags
    Create {
        /// Note title (3-50 characters)
        #[arg(long)]
        title: Option<String>,

        /// Note body (up to 500 characters, may be empty)
        #[arg(long)]
        content: Option<String>,

        /// Category tag
        #[arg(long, value_enum)]
        tag: Option<Tag>,
    },

    /// Interactively browse, search and page through notes
    Browse {
        /// Tag route for the initial view ("all" means unfiltered)
        #[arg(value_name = "TAG", default_value = "all")]
        tag: String,
    },
}
