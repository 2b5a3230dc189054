use std::sync::Arc;

use notehub::application::{
    DraftStore, FormField, FormState, NoteForm, QueryCache, QueryKey, SubmitOutcome,
};
use notehub::domain::DomainError;
use notehub::util::testing::MockNoteRepository;

fn form_over(
    mock: &MockNoteRepository,
) -> (NoteForm<MockNoteRepository>, Arc<QueryCache<MockNoteRepository>>, DraftStore) {
    let cache = Arc::new(QueryCache::new(mock.clone()));
    let draft = DraftStore::new();
    let form = NoteForm::new(mock.clone(), Arc::clone(&cache), draft.clone());
    (form, cache, draft)
}

#[tokio::test]
async fn given_short_title_when_submitting_then_title_error_and_no_request() {
    // Arrange
    let mock = MockNoteRepository::builder().build();
    let (mut form, _, _) = form_over(&mock);
    form.set_field(FormField::Title, "ab");
    form.set_field(FormField::Tag, "Todo");

    // Act
    let outcome = form.submit().await;

    // Assert
    assert!(matches!(outcome, SubmitOutcome::Rejected));
    assert_eq!(
        form.errors().get(FormField::Title),
        Some("Title must have minimum 3 symbols")
    );
    assert_eq!(mock.create_calls(), 0);
    assert_eq!(form.state(), FormState::Editing);
}

#[tokio::test]
async fn given_valid_note_when_submitting_then_invalidates_cache_and_clears_draft() {
    // Arrange: a listing cached before the create
    let mock = MockNoteRepository::builder().build();
    let (mut form, cache, draft) = form_over(&mock);
    cache
        .fetch(&QueryKey::first_page(None))
        .await
        .expect("fetch should succeed");
    assert_eq!(mock.list_calls(), 1);

    form.set_field(FormField::Title, "Buy milk");
    form.set_field(FormField::Content, "");
    form.set_field(FormField::Tag, "Todo");

    // Act
    let outcome = form.submit().await;

    // Assert
    let SubmitOutcome::Created(created) = outcome else {
        panic!("Expected the note to be created");
    };
    assert_eq!(created.title, "Buy milk");
    assert_eq!(mock.create_calls(), 1);
    assert_eq!(form.state(), FormState::Success);
    assert!(form.errors().is_empty());
    assert!(draft.is_empty());

    // The cached listing is stale: the next read goes back to the network
    cache
        .fetch(&QueryKey::first_page(None))
        .await
        .expect("fetch should succeed");
    assert_eq!(mock.list_calls(), 2);
}

#[tokio::test]
async fn given_transport_failure_when_submitting_then_draft_retained_and_errors_empty() {
    // Arrange
    let mock = MockNoteRepository::builder()
        .with_create_error(DomainError::Transport("connection reset".to_string()))
        .build();
    let (mut form, _, draft) = form_over(&mock);
    form.set_field(FormField::Title, "Buy milk");
    form.set_field(FormField::Tag, "Todo");

    // Act
    let outcome = form.submit().await;

    // Assert: generic indicator only; the two error kinds never mix
    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(DomainError::Transport(_))
    ));
    assert!(form.submit_failed());
    assert!(form.errors().is_empty());
    assert_eq!(form.state(), FormState::Editing);

    // Nothing to retype: the attempted values are still in the draft
    assert_eq!(draft.draft().title, "Buy milk");
    assert_eq!(draft.draft().tag, "Todo");
}

#[tokio::test]
async fn given_rejected_draft_when_fixed_and_resubmitted_then_created() {
    // Arrange
    let mock = MockNoteRepository::builder().build();
    let (mut form, _, _) = form_over(&mock);
    form.set_field(FormField::Title, "ab");
    form.set_field(FormField::Tag, "Todo");
    assert!(matches!(form.submit().await, SubmitOutcome::Rejected));

    // Act
    form.set_field(FormField::Title, "Buy milk");
    let outcome = form.submit().await;

    // Assert
    assert!(matches!(outcome, SubmitOutcome::Created(_)));
    assert!(form.errors().is_empty());
    assert_eq!(mock.create_calls(), 1);
}

#[tokio::test]
async fn given_new_violations_when_resubmitting_then_error_set_is_replaced() {
    // Arrange: title and tag both bad
    let mock = MockNoteRepository::builder().build();
    let (mut form, _, _) = form_over(&mock);
    form.set_field(FormField::Title, "ab");
    form.set_field(FormField::Tag, "Chores");
    assert!(matches!(form.submit().await, SubmitOutcome::Rejected));
    assert_eq!(form.errors().len(), 2);

    // Act: fix the title only
    form.set_field(FormField::Title, "Buy milk");
    assert!(matches!(form.submit().await, SubmitOutcome::Rejected));

    // Assert: the set is recomputed, not accumulated
    assert_eq!(form.errors().len(), 1);
    assert!(form.errors().get(FormField::Title).is_none());
    assert_eq!(form.errors().get(FormField::Tag), Some("Wrong tag name"));
}

#[tokio::test]
async fn given_cancelled_form_when_reopening_then_draft_survives() {
    // Arrange: typing, then navigating away without submitting
    let mock = MockNoteRepository::builder().build();
    let cache = Arc::new(QueryCache::new(mock.clone()));
    let draft = DraftStore::new();
    {
        let mut form = NoteForm::new(mock.clone(), Arc::clone(&cache), draft.clone());
        form.set_field(FormField::Title, "Standup notes");
        form.cancel();
    }

    // Act: a later visit to the form
    let form = NoteForm::new(mock, cache, draft);

    // Assert: cancellation never clears the draft
    assert_eq!(form.draft().draft().title, "Standup notes");
}
