/*!
 * The host editing surface.
 *
 * The publish action reads its inputs from, and reports back to, the page
 * hosting the term editor. `SnapshotSurface` stands in for that page with a
 * JSON snapshot of the rows currently in edit mode.
 */

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::terms::EditableRow;

/// What the publish action needs from the hosting page
pub trait EditingSurface: Send + Sync {
    /// Item id provided by the host configuration, if any
    fn configured_entity_id(&self) -> Option<String>;

    /// Current navigation location (URL or path)
    fn location(&self) -> String;

    /// The user's interface language
    fn user_language(&self) -> Option<String>;

    /// Rows currently in edit mode
    fn editable_rows(&self) -> Vec<EditableRow>;

    /// Discard local edit state and show the server state again
    fn reload(&self);
}

/// Serialized page state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Host-configured item id
    #[serde(default)]
    pub entity_id: Option<String>,

    /// Page location
    #[serde(default)]
    pub location: String,

    /// Interface language
    #[serde(default)]
    pub user_language: Option<String>,

    /// Rows in edit mode
    #[serde(default)]
    pub rows: Vec<EditableRow>,
}

/// Editing surface backed by a `PageSnapshot`
#[derive(Debug, Default)]
pub struct SnapshotSurface {
    snapshot: PageSnapshot,
    reloads: AtomicUsize,
}

impl SnapshotSurface {
    pub fn new(snapshot: PageSnapshot) -> Self {
        Self {
            snapshot,
            reloads: AtomicUsize::new(0),
        }
    }

    /// Load a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open snapshot file: {}", path.display()))?;
        let snapshot: PageSnapshot = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse snapshot file: {}", path.display()))?;
        Ok(Self::new(snapshot))
    }

    /// Override the host-configured item id
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.snapshot.entity_id = Some(entity_id.into());
        self
    }

    /// Number of reloads requested so far
    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl EditingSurface for SnapshotSurface {
    fn configured_entity_id(&self) -> Option<String> {
        self.snapshot.entity_id.clone()
    }

    fn location(&self) -> String {
        self.snapshot.location.clone()
    }

    fn user_language(&self) -> Option<String> {
        self.snapshot.user_language.clone()
    }

    fn editable_rows(&self) -> Vec<EditableRow> {
        self.snapshot.rows.clone()
    }

    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        info!("Reloading {}", self.snapshot.location);
    }
}
