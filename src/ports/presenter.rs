// src/ports/presenter.rs
use crate::domain::{Note, NotePage};

/// Renders note listings and single notes as plain terminal text.
#[derive(Debug, Default)]
pub struct TextPresenter;

impl TextPresenter {
    pub fn new() -> Self {
        Self
    }

    /// One line per note (id, tag, title) plus a pagination footer when
    /// there is more than one page.
    pub fn render_list(&self, page: &NotePage, current_page: u32) -> String {
        let mut out = String::new();
        if page.notes.is_empty() {
            out.push_str("No notes found.\n");
        } else {
            for note in &page.notes {
                out.push_str(&format!(
                    "{:<26} [{:<8}] {}\n",
                    note.id, note.tag, note.title
                ));
            }
        }
        if page.total_pages > 1 {
            out.push_str(&format!("Page {} of {}\n", current_page, page.total_pages));
        }
        out
    }

    /// Full note view with the content body.
    pub fn render_note(&self, note: &Note) -> String {
        let body = if note.content.is_empty() {
            "(no content)"
        } else {
            note.content.as_str()
        };
        format!(
            "{}\nTag: {}\nId:  {}\n\n{}\n",
            note.title, note.tag, note.id, body
        )
    }
}
