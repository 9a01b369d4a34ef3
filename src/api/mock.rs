/*!
 * Mock term API for testing.
 *
 * The mock serves a scripted authoritative entity and a scripted write
 * outcome, and records every call so tests can assert on what would have
 * been sent:
 * - `MockApi::new(entity)` - fetch and write both succeed
 * - `MockApi::failing_write(entity, error)` - the write is rejected
 * - `MockApi::failing_fetch(error)` - the fetch is rejected
 */

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::{EditOptions, EditResponse, TermsApi};
use crate::entity_id::EntityId;
use crate::errors::ApiError;
use crate::terms::{AuthoritativeEntity, ChangeSet};

/// A write captured by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEdit {
    pub id: EntityId,
    pub change_set: ChangeSet,
    pub options: EditOptions,
}

#[derive(Debug, Default)]
struct CallLog {
    fetches: Vec<EntityId>,
    edits: Vec<RecordedEdit>,
}

/// Scripted in-memory term API
#[derive(Debug, Clone)]
pub struct MockApi {
    /// Result of every fetch
    fetch_result: Result<AuthoritativeEntity, ApiError>,
    /// Result of every write
    edit_result: Result<EditResponse, ApiError>,
    /// Delay before each call completes
    delay: Option<Duration>,
    /// Shared call log, so clones observe the same calls
    calls: Arc<Mutex<CallLog>>,
}

impl MockApi {
    /// Mock where fetch returns `entity` and every write succeeds
    pub fn new(entity: AuthoritativeEntity) -> Self {
        Self {
            fetch_result: Ok(entity),
            edit_result: Ok(EditResponse { revision: Some(1) }),
            delay: None,
            calls: Arc::new(Mutex::new(CallLog::default())),
        }
    }

    /// Mock where the write is rejected with `error`
    pub fn failing_write(entity: AuthoritativeEntity, error: ApiError) -> Self {
        Self {
            edit_result: Err(error),
            ..Self::new(entity)
        }
    }

    /// Mock where the fetch is rejected with `error`
    pub fn failing_fetch(error: ApiError) -> Self {
        Self {
            fetch_result: Err(error),
            ..Self::new(AuthoritativeEntity::default())
        }
    }

    /// Delay every call, to hold a submission in flight
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Ids fetched so far
    pub fn fetches(&self) -> Vec<EntityId> {
        self.calls.lock().fetches.clone()
    }

    /// Writes sent so far
    pub fn edits(&self) -> Vec<RecordedEdit> {
        self.calls.lock().edits.clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl TermsApi for MockApi {
    async fn fetch_terms(&self, id: &EntityId) -> Result<AuthoritativeEntity, ApiError> {
        self.calls.lock().fetches.push(id.clone());
        self.pause().await;
        self.fetch_result.clone()
    }

    async fn edit_entity(
        &self,
        id: &EntityId,
        change_set: &ChangeSet,
        options: &EditOptions,
    ) -> Result<EditResponse, ApiError> {
        self.calls.lock().edits.push(RecordedEdit {
            id: id.clone(),
            change_set: change_set.clone(),
            options: options.clone(),
        });
        self.pause().await;
        self.edit_result.clone()
    }
}
