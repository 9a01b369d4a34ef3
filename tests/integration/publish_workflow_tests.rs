/*!
 * Integration tests for the full publish flow against the mock API
 */

use termbatch::api::mock::MockApi;
use termbatch::errors::{ApiError, SubmitError};
use termbatch::{
    AuthoritativeEntity, EditOptions, PageSnapshot, PublishAction, PublishOutcome,
    RecordingNotifier, Severity, SnapshotSurface, SubmitState,
};

use crate::common::{self, row, EntityBuilder, RowExt};

fn action(api: MockApi) -> PublishAction<MockApi, RecordingNotifier> {
    common::init_logging();
    PublishAction::new(api, RecordingNotifier::new())
}

fn cat_entity() -> AuthoritativeEntity {
    EntityBuilder::new()
        .label("en", "Cat")
        .aliases("en", &["Feline"])
        .build()
}

#[tokio::test]
async fn test_publish_changedTerms_shouldWriteOnceAndReload() {
    let action = action(MockApi::new(cat_entity()));
    let surface = common::surface(vec![
        row("en").with_label("Cat").with_tag_aliases(&["Feline", "Kitty"]),
        row("fr").with_description("Un chat"),
    ]);

    let outcome = action.publish(&surface).await;

    assert_eq!(
        outcome,
        PublishOutcome::Saved {
            entity: "Q42".parse().unwrap(),
            change_count: 2,
            revision: Some(1),
        }
    );

    let edits = action.api().edits();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].id.as_str(), "Q42");
    assert_eq!(edits[0].options, EditOptions::default());
    assert_eq!(edits[0].options.summary, "");
    assert_eq!(edits[0].options.maxlag, 5);
    assert_eq!(
        serde_json::to_value(&edits[0].change_set).unwrap(),
        serde_json::json!({
            "aliases": {"en": [
                {"language": "en", "value": "Feline"},
                {"language": "en", "value": "Kitty"}
            ]},
            "descriptions": {"fr": {"language": "fr", "value": "Un chat"}}
        })
    );

    assert_eq!(
        action.notifier().last(),
        Some((Severity::Success, "Saved all edited languages in one edit.".to_string()))
    );
    assert_eq!(surface.reload_count(), 1);
    assert!(action.is_enabled());
}

#[tokio::test]
async fn test_publish_noChanges_shouldWarnAndSkipWrite() {
    let action = action(MockApi::new(cat_entity()));
    let surface = common::surface(vec![row("en").with_label("Cat").with_tag_aliases(&["Feline"])]);

    let outcome = action.publish(&surface).await;

    assert_eq!(outcome, PublishOutcome::NoChange);
    assert_eq!(action.api().fetches().len(), 1);
    assert!(action.api().edits().is_empty());
    assert_eq!(
        action.notifier().notices(),
        vec![(Severity::Warning, "Nothing changed - no edits to publish.".to_string())]
    );
    assert_eq!(surface.reload_count(), 0);
    assert_eq!(action.state(), SubmitState::Idle);
}

#[tokio::test]
async fn test_publish_noEntityId_shouldFailBeforeNetwork() {
    let action = action(MockApi::new(cat_entity()));
    let surface = SnapshotSurface::new(PageSnapshot {
        entity_id: None,
        location: "https://www.wikidata.org/wiki/Special:RecentChanges".to_string(),
        user_language: Some("en".to_string()),
        rows: vec![row("en").with_label("Dog")],
    });

    let outcome = action.publish(&surface).await;

    assert_eq!(outcome, PublishOutcome::InvalidEntity);
    assert!(action.api().fetches().is_empty());
    assert!(action.api().edits().is_empty());
    assert_eq!(
        action.notifier().last(),
        Some((Severity::Error, "Cannot detect entity ID (Q-id).".to_string()))
    );
    assert!(action.is_enabled());
}

#[tokio::test]
async fn test_publish_entityIdFromLocation_shouldBeUsed() {
    let action = action(MockApi::new(AuthoritativeEntity::default()));
    let surface = SnapshotSurface::new(PageSnapshot {
        entity_id: None,
        location: "/wiki/Q146".to_string(),
        user_language: None,
        rows: vec![row("en").with_label("house cat")],
    });

    let outcome = action.publish(&surface).await;

    assert!(matches!(outcome, PublishOutcome::Saved { change_count: 1, .. }));
    assert_eq!(action.api().fetches()[0].as_str(), "Q146");
}

#[tokio::test]
async fn test_publish_writeRejected_shouldReportServerInfoAndReenable() {
    let api = MockApi::failing_write(
        cat_entity(),
        ApiError::Server {
            code: "modification-failed".to_string(),
            info: "Label and description must differ".to_string(),
        },
    );
    let action = action(api);
    let surface = common::surface(vec![row("en").with_label("Tiger")]);

    let outcome = action.publish(&surface).await;

    assert_eq!(outcome, PublishOutcome::Failed);
    assert_eq!(action.api().edits().len(), 1);
    assert_eq!(
        action.notifier().last(),
        Some((
            Severity::Error,
            "Save failed: Label and description must differ".to_string()
        ))
    );
    assert_eq!(surface.reload_count(), 0);
    assert!(action.is_enabled());
}

#[tokio::test]
async fn test_publish_writeRejectedWithCodeOnly_shouldReportCode() {
    let api = MockApi::failing_write(
        cat_entity(),
        ApiError::Server {
            code: "badtoken".to_string(),
            info: String::new(),
        },
    );
    let action = action(api);
    let surface = common::surface(vec![row("en").with_label("Tiger")]);

    action.publish(&surface).await;

    assert_eq!(
        action.notifier().last(),
        Some((Severity::Error, "Save failed: badtoken".to_string()))
    );
}

#[tokio::test]
async fn test_publish_fetchFailed_shouldReportAndNotWrite() {
    let api = MockApi::failing_fetch(ApiError::Request("connection refused".to_string()));
    let action = action(api);
    let surface = common::surface(vec![row("en").with_label("Tiger")]);

    let outcome = action.publish(&surface).await;

    assert_eq!(outcome, PublishOutcome::Failed);
    assert!(action.api().edits().is_empty());
    let (severity, message) = action.notifier().last().unwrap();
    assert_eq!(severity, Severity::Error);
    assert!(message.contains("connection refused"));
    assert!(action.is_enabled());
}

#[tokio::test]
async fn test_publish_failure_shouldAllowRetryByUser() {
    let api = MockApi::failing_write(cat_entity(), ApiError::Request("timeout".to_string()));
    let action = action(api);
    let surface = common::surface(vec![row("en").with_label("Tiger")]);

    assert_eq!(action.publish(&surface).await, PublishOutcome::Failed);
    assert_eq!(action.publish(&surface).await, PublishOutcome::Failed);

    // One write per click, never retried on its own
    assert_eq!(action.api().edits().len(), 2);
}

#[tokio::test]
async fn test_publish_customOptions_shouldBeSent() {
    let options = EditOptions {
        summary: "batch term update".to_string(),
        maxlag: 10,
    };
    let action = action(MockApi::new(cat_entity())).with_options(options.clone());
    let surface = common::surface(vec![row("de").with_label("Katze")]);

    action.publish(&surface).await;

    assert_eq!(action.api().edits()[0].options, options);
}

#[tokio::test]
async fn test_preview_shouldDiffWithoutWriting() {
    let action = action(MockApi::new(cat_entity()));
    let surface = common::surface(vec![row("en").with_label("")]);

    let (id, diff) = action.preview(&surface).await.unwrap();

    assert_eq!(id.as_str(), "Q42");
    assert_eq!(diff.change_count, 1);
    assert_eq!(diff.change_set.labels["en"].value, "");
    assert!(action.api().edits().is_empty());
    assert!(action.notifier().notices().is_empty());
    assert!(action.is_enabled());
}

#[tokio::test]
async fn test_preview_missingEntity_shouldReturnFetchError() {
    let action = action(MockApi::failing_fetch(ApiError::MissingEntity("Q42".to_string())));
    let surface = common::surface(vec![row("en").with_label("Cat")]);

    let result = action.preview(&surface).await;
    assert!(matches!(result, Err(SubmitError::Fetch(ApiError::MissingEntity(_)))));
}
