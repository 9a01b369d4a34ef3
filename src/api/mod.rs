/*!
 * Clients for the Wikibase term API.
 *
 * - `mediawiki`: HTTP client for a live MediaWiki/Wikibase `api.php`
 * - `mock`: scripted in-memory client for tests and dry runs
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::entity_id::EntityId;
use crate::errors::ApiError;
use crate::terms::{AuthoritativeEntity, ChangeSet};

pub mod mediawiki;
pub mod mock;

pub use mediawiki::MediaWikiApi;
pub use mock::MockApi;

/// Parameters attached to a write besides the payload itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditOptions {
    /// Edit summary; empty by default since a batched term edit speaks for itself
    pub summary: String,
    /// `maxlag` hint in seconds
    pub maxlag: u32,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            summary: String::new(),
            maxlag: 5,
        }
    }
}

/// What the server reported after a successful write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditResponse {
    /// Revision id created by the edit, when reported
    pub revision: Option<u64>,
}

/// Common trait for all term API clients
///
/// Implementations read the current terms of an entity and apply a change set
/// as one atomic edit. Timeouts and transport retries are the client's concern.
#[async_trait]
pub trait TermsApi: Send + Sync + Debug {
    /// Fetch labels, descriptions and aliases in every language
    async fn fetch_terms(&self, id: &EntityId) -> Result<AuthoritativeEntity, ApiError>;

    /// Apply all entries of `change_set` in a single edit
    async fn edit_entity(
        &self,
        id: &EntityId,
        change_set: &ChangeSet,
        options: &EditOptions,
    ) -> Result<EditResponse, ApiError>;
}
