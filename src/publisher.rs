use log::{debug, info};
use parking_lot::Mutex;

use crate::api::{EditOptions, TermsApi};
use crate::entity_id::{resolve_entity_id, EntityId};
use crate::errors::SubmitError;
use crate::notify::{Notifier, Severity};
use crate::surface::EditingSurface;
use crate::terms::{build_change_set, extract_terms, EditedTerms, TermDiff};

// @module: Publish action for batched term edits

const NOTHING_CHANGED: &str = "Nothing changed - no edits to publish.";
const SAVED: &str = "Saved all edited languages in one edit.";

/// Where a submission currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Fetching,
    Diffing,
    Writing,
}

/// How a publish click ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A submission was already in flight; the click had no effect
    Ignored,
    /// No item id could be resolved; nothing was sent
    InvalidEntity,
    /// The edited terms match the server; nothing was written
    NoChange,
    /// The edit was saved
    Saved {
        entity: EntityId,
        change_count: usize,
        revision: Option<u64>,
    },
    /// Fetching or writing failed; the error was reported
    Failed,
}

/// Marks the action busy and returns it to `Idle` when dropped
struct InFlight<'a> {
    state: &'a Mutex<SubmitState>,
}

impl InFlight<'_> {
    fn advance(&self, next: SubmitState) {
        let mut state = self.state.lock();
        debug!("Submit state {:?} -> {:?}", *state, next);
        *state = next;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.state.lock() = SubmitState::Idle;
    }
}

/// The publish button: one state machine per action
pub struct PublishAction<A, N> {
    // @field: Term API client
    api: A,
    // @field: Notice sink
    notifier: N,
    // @field: Summary and maxlag of the write
    options: EditOptions,
    // @field: Current submission state; the control is enabled only when idle
    state: Mutex<SubmitState>,
}

impl<A: TermsApi, N: Notifier> PublishAction<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            options: EditOptions::default(),
            state: Mutex::new(SubmitState::Idle),
        }
    }

    /// Use custom write options
    pub fn with_options(mut self, options: EditOptions) -> Self {
        self.options = options;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn state(&self) -> SubmitState {
        *self.state.lock()
    }

    /// Whether the triggering control accepts clicks
    pub fn is_enabled(&self) -> bool {
        self.state() == SubmitState::Idle
    }

    /// Claim the action, or `None` when a submission is already in flight
    fn begin(&self) -> Option<InFlight<'_>> {
        let mut state = self.state.lock();
        if *state != SubmitState::Idle {
            return None;
        }
        *state = SubmitState::Fetching;
        Some(InFlight { state: &self.state })
    }

    /// Resolve the item and read the edited rows once
    fn collect(&self, surface: &dyn EditingSurface) -> Result<(EntityId, EditedTerms), SubmitError> {
        let configured = surface.configured_entity_id();
        let id = resolve_entity_id(configured.as_deref(), &surface.location())?;
        let user_language = surface.user_language();
        let edited = extract_terms(&surface.editable_rows(), user_language.as_deref());
        Ok((id, edited))
    }

    /// Handle one click of the publish control.
    ///
    /// Every outcome is reported through the notifier except `Ignored`, and
    /// the control is enabled again when this returns.
    pub async fn publish(&self, surface: &dyn EditingSurface) -> PublishOutcome {
        let Some(flight) = self.begin() else {
            debug!("Publish ignored: a submission is already in flight");
            return PublishOutcome::Ignored;
        };

        let (id, edited) = match self.collect(surface) {
            Ok(collected) => collected,
            Err(e) => {
                self.notifier.notify(&e.notice(), Severity::Error);
                return PublishOutcome::InvalidEntity;
            }
        };

        match self.submit(&flight, &id, &edited, surface).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.notifier.notify(&e.notice(), Severity::Error);
                PublishOutcome::Failed
            }
        }
    }

    async fn submit(
        &self,
        flight: &InFlight<'_>,
        id: &EntityId,
        edited: &EditedTerms,
        surface: &dyn EditingSurface,
    ) -> Result<PublishOutcome, SubmitError> {
        let diff = self.diff(flight, id, edited).await?;
        if diff.is_noop() {
            self.notifier.notify(NOTHING_CHANGED, Severity::Warning);
            return Ok(PublishOutcome::NoChange);
        }

        flight.advance(SubmitState::Writing);
        let response = self
            .api
            .edit_entity(id, &diff.change_set, &self.options)
            .await
            .map_err(SubmitError::Write)?;

        self.notifier.notify(SAVED, Severity::Success);
        surface.reload();

        Ok(PublishOutcome::Saved {
            entity: id.clone(),
            change_count: diff.change_count,
            revision: response.revision,
        })
    }

    async fn diff(
        &self,
        flight: &InFlight<'_>,
        id: &EntityId,
        edited: &EditedTerms,
    ) -> Result<TermDiff, SubmitError> {
        let current = self.api.fetch_terms(id).await.map_err(SubmitError::Fetch)?;

        flight.advance(SubmitState::Diffing);
        let diff = build_change_set(&current, edited);
        info!("{} change(s) to publish for {}", diff.change_count, id);
        debug!("Change set: {:?}", diff.change_set);
        Ok(diff)
    }

    /// Fetch and diff without writing
    pub async fn preview(&self, surface: &dyn EditingSurface) -> Result<(EntityId, TermDiff), SubmitError> {
        let flight = self.begin().ok_or(SubmitError::Busy)?;
        let (id, edited) = self.collect(surface)?;
        let diff = self.diff(&flight, &id, &edited).await?;
        Ok((id, diff))
    }
}
