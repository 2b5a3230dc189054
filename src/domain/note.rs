// src/domain/note.rs
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque note identifier assigned by the remote service.
///
/// This client never fabricates ids; they only ever arrive in responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub String);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Wrong tag name: {0}")]
pub struct UnknownTag(pub String);

/// Fixed category set for notes. The service accepts exactly these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Tag {
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl Tag {
    pub const ALL: [Tag; 5] = [
        Tag::Todo,
        Tag::Work,
        Tag::Personal,
        Tag::Meeting,
        Tag::Shopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Todo => "Todo",
            Tag::Work => "Work",
            Tag::Personal => "Personal",
            Tag::Meeting => "Meeting",
            Tag::Shopping => "Shopping",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = UnknownTag;

    /// Exact spellings only; this is the wire contract, not a convenience
    /// parser. Flag parsing goes through `ValueEnum` instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: Tag,
}

/// One page of a note listing as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotePage {
    pub notes: Vec<Note>,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// Validated payload for a create request. Produced only by the form
/// workflow's rule table, never constructed from raw input directly.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tag: Tag,
}

/// In-progress, not-yet-submitted field values.
///
/// Fields are raw strings so the draft can hold whatever was typed,
/// including values the rule table will reject; nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tag: String,
}

impl NoteDraft {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty() && self.tag.is_empty()
    }
}
