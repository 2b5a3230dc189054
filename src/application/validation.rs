// src/application/validation.rs
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{CONTENT_MAX_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS};
use crate::domain::{NewNote, NoteDraft, Tag};

/// The three form fields a draft can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Title,
    Content,
    Tag,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Content => "content",
            FormField::Tag => "tag",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field → message map, rebuilt from scratch on every submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FormField, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

/// One rule: the predicate returns whether the draft satisfies it.
type Rule = (FormField, fn(&NoteDraft) -> bool, &'static str);

/// All rules run on every attempt; no short-circuiting. Within a field,
/// later rules overwrite earlier messages, so the most specific failure
/// (e.g. "required" over "minimum length" for an empty title) reports.
const RULES: &[Rule] = &[
    (FormField::Title, title_min, "Title must have minimum 3 symbols"),
    (FormField::Title, title_max, "Title must have maximum 50 symbols"),
    (FormField::Title, title_present, "Title is required"),
    (
        FormField::Content,
        content_max,
        "Content must have maximum 500 symbols",
    ),
    (FormField::Tag, tag_known, "Wrong tag name"),
    (FormField::Tag, tag_present, "Tag is required"),
];

fn title_min(draft: &NoteDraft) -> bool {
    draft.title.chars().count() >= TITLE_MIN_CHARS
}

fn title_max(draft: &NoteDraft) -> bool {
    draft.title.chars().count() <= TITLE_MAX_CHARS
}

fn title_present(draft: &NoteDraft) -> bool {
    !draft.title.is_empty()
}

fn content_max(draft: &NoteDraft) -> bool {
    draft.content.chars().count() <= CONTENT_MAX_CHARS
}

fn tag_known(draft: &NoteDraft) -> bool {
    Tag::from_str(&draft.tag).is_ok()
}

fn tag_present(draft: &NoteDraft) -> bool {
    !draft.tag.is_empty()
}

/// Run every rule against the draft. All violations are collected in one
/// pass; only a fully clean draft yields the typed create payload.
pub fn validate(draft: &NoteDraft) -> Result<NewNote, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for (field, satisfied, message) in RULES {
        if !satisfied(draft) {
            errors.insert(*field, message);
        }
    }

    if errors.is_empty() {
        if let Ok(tag) = Tag::from_str(&draft.tag) {
            return Ok(NewNote {
                title: draft.title.clone(),
                content: draft.content.clone(),
                tag,
            });
        }
    }
    Err(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(title: &str, content: &str, tag: &str) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            content: content.to_string(),
            tag: tag.to_string(),
        }
    }

    #[test]
    fn given_valid_draft_when_validating_then_returns_typed_payload() {
        // Arrange
        let draft = draft("Buy milk", "", "Todo");

        // Act
        let note = validate(&draft).expect("draft should validate");

        // Assert
        assert_eq!(note.title, "Buy milk");
        assert_eq!(note.content, "");
        assert_eq!(note.tag, Tag::Todo);
    }

    #[rstest]
    #[case("ab", "Title must have minimum 3 symbols")]
    #[case("", "Title is required")]
    fn given_bad_title_when_validating_then_reports_expected_message(
        #[case] title: &str,
        #[case] expected: &str,
    ) {
        let result = validate(&draft(title, "", "Todo"));

        let errors = result.expect_err("draft should be rejected");
        assert_eq!(errors.get(FormField::Title), Some(expected));
    }

    #[test]
    fn given_overlong_title_when_validating_then_reports_maximum() {
        let long_title = "x".repeat(51);

        let errors = validate(&draft(&long_title, "", "Todo"))
            .expect_err("draft should be rejected");

        assert_eq!(
            errors.get(FormField::Title),
            Some("Title must have maximum 50 symbols")
        );
    }

    #[test]
    fn given_boundary_lengths_when_validating_then_accepted() {
        assert!(validate(&draft("abc", "", "Todo")).is_ok());
        assert!(validate(&draft(&"x".repeat(50), &"y".repeat(500), "Work")).is_ok());
    }

    #[test]
    fn given_overlong_content_when_validating_then_reports_content_error() {
        let errors = validate(&draft("Buy milk", &"y".repeat(501), "Todo"))
            .expect_err("draft should be rejected");

        assert_eq!(
            errors.get(FormField::Content),
            Some("Content must have maximum 500 symbols")
        );
    }

    #[rstest]
    #[case("", "Tag is required")]
    #[case("Chores", "Wrong tag name")]
    #[case("todo", "Wrong tag name")]
    fn given_bad_tag_when_validating_then_reports_expected_message(
        #[case] tag: &str,
        #[case] expected: &str,
    ) {
        let errors =
            validate(&draft("Buy milk", "", tag)).expect_err("draft should be rejected");

        assert_eq!(errors.get(FormField::Tag), Some(expected));
    }

    #[test]
    fn given_multiple_violations_when_validating_then_all_fields_reported() {
        // Arrange: short title, overlong content, unknown tag
        let draft = draft("ab", &"y".repeat(501), "Chores");

        // Act
        let errors = validate(&draft).expect_err("draft should be rejected");

        // Assert: one message per failing field, collected in one pass
        assert_eq!(errors.len(), 3);
        assert!(errors.get(FormField::Title).is_some());
        assert!(errors.get(FormField::Content).is_some());
        assert!(errors.get(FormField::Tag).is_some());
    }

    #[test]
    fn given_multibyte_title_when_counting_then_chars_not_bytes() {
        // Three characters, nine bytes
        assert!(validate(&draft("äöü", "", "Todo")).is_ok());
    }
}
