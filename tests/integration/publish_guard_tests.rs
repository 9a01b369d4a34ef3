/*!
 * Integration tests for the single in-flight submission guard
 */

use std::time::Duration;

use termbatch::api::mock::MockApi;
use termbatch::errors::SubmitError;
use termbatch::{PublishAction, PublishOutcome, RecordingNotifier};

use crate::common::{self, row, EntityBuilder, RowExt};

fn slow_action() -> PublishAction<MockApi, RecordingNotifier> {
    common::init_logging();
    let api = MockApi::new(EntityBuilder::new().label("en", "Cat").build())
        .with_delay(Duration::from_millis(20));
    PublishAction::new(api, RecordingNotifier::new())
}

#[tokio::test]
async fn test_publish_secondClickInFlight_shouldBeIgnored() {
    let action = slow_action();
    let surface = common::surface(vec![row("en").with_label("Tiger")]);

    let (first, second) = tokio::join!(action.publish(&surface), action.publish(&surface));

    assert!(matches!(first, PublishOutcome::Saved { change_count: 1, .. }));
    assert_eq!(second, PublishOutcome::Ignored);
    assert_eq!(action.api().fetches().len(), 1);
    assert_eq!(action.api().edits().len(), 1);
    // The ignored click raises no notice of its own
    assert_eq!(action.notifier().notices().len(), 1);
    assert!(action.is_enabled());
}

#[tokio::test]
async fn test_publish_afterCompletion_shouldAcceptNextClick() {
    let action = slow_action();
    let surface = common::surface(vec![row("en").with_label("Tiger")]);

    action.publish(&surface).await;
    let outcome = action.publish(&surface).await;

    assert!(matches!(outcome, PublishOutcome::Saved { .. }));
    assert_eq!(action.api().edits().len(), 2);
}

#[tokio::test]
async fn test_preview_whilePublishing_shouldBeBusy() {
    let action = slow_action();
    let surface = common::surface(vec![row("en").with_label("Tiger")]);

    let (published, previewed) = tokio::join!(action.publish(&surface), action.preview(&surface));

    assert!(matches!(published, PublishOutcome::Saved { .. }));
    assert!(matches!(previewed, Err(SubmitError::Busy)));
}

#[tokio::test]
async fn test_publish_droppedMidFlight_shouldReenableControl() {
    let action = slow_action();
    let surface = common::surface(vec![row("en").with_label("Tiger")]);

    let result = tokio::time::timeout(Duration::from_millis(5), action.publish(&surface)).await;

    assert!(result.is_err());
    assert!(action.is_enabled());
}
