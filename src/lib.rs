/*!
 * # termbatch - batched term edits for Wikibase items
 *
 * A Rust library that publishes pending label, description and alias edits
 * for many languages of one Wikibase item as a single atomic edit.
 *
 * ## Features
 *
 * - Read edited term rows, including several alias widget shapes
 * - Compute the minimal change set against the current server state
 * - Distinguish "untouched", "cleared" and "changed" for every field
 * - Submit the change set as one `wbeditentity` write with a maxlag hint
 * - Guard against overlapping submissions with a per-action state machine
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `terms`: Term model and the pure pipeline:
 *   - `terms::extractor`: Editable rows to per-language edited terms
 *   - `terms::aliases`: Alias widget readers
 *   - `terms::differ`: Minimal change set computation
 * - `entity_id`: Item id parsing and resolution
 * - `api`: Term API clients:
 *   - `api::mediawiki`: MediaWiki/Wikibase HTTP client
 *   - `api::mock`: Scripted client for tests
 * - `publisher`: The publish action state machine
 * - `surface`: The host editing surface and its JSON snapshot form
 * - `notify`: User-visible notices
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod api;
pub mod entity_id;
pub mod errors;
pub mod notify;
pub mod publisher;
pub mod surface;
pub mod terms;

// Re-export main types for easier usage
pub use app_config::Config;
pub use api::{EditOptions, MediaWikiApi, MockApi, TermsApi};
pub use entity_id::{resolve_entity_id, EntityId};
pub use errors::{ApiError, AppError, SubmitError};
pub use notify::{LogNotifier, Notifier, RecordingNotifier, Severity};
pub use publisher::{PublishAction, PublishOutcome, SubmitState};
pub use surface::{EditingSurface, PageSnapshot, SnapshotSurface};
pub use terms::{build_change_set, extract_terms, AuthoritativeEntity, ChangeSet, EditedTerm, EditedTerms};
