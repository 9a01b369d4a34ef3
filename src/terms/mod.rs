/*!
 * Term data model shared by the extractor, the differ and the API layer.
 *
 * - `EditedTerm`: what the user currently has in one language row
 * - `AuthoritativeEntity`: the server snapshot used as the diff baseline
 * - `ChangeSet`: the minimal `wbeditentity` payload
 *
 * Optional fields carry intent: `None` means "leave untouched", while
 * `Some(String::new())` and `Some(Vec::new())` are explicit deletions.
 */

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

pub mod aliases;
pub mod differ;
pub mod extractor;
pub mod rows;

pub use differ::{build_change_set, TermDiff};
pub use extractor::extract_terms;
pub use rows::{AliasCell, AliasTag, EditableRow, TagMultiselect, TextControl};

/// Lowercase language code identifying one row of terms (e.g. "en")
pub type TermKey = String;

/// Edited terms keyed by language, in stable language order
pub type EditedTerms = BTreeMap<TermKey, EditedTerm>;

/// The edited state of one language row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditedTerm {
    /// Trimmed label; `Some("")` deletes the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Trimmed description; `Some("")` deletes the description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// De-duplicated aliases; `Some(vec![])` clears them, `None` leaves them alone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

impl EditedTerm {
    /// True when no field of this row could be read
    pub fn is_untouched(&self) -> bool {
        self.label.is_none() && self.description.is_none() && self.aliases.is_none()
    }
}

/// A single term value as returned by `wbgetentities`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermValue {
    pub value: String,
}

impl TermValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// Server-side term snapshot of one entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoritativeEntity {
    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub labels: BTreeMap<TermKey, TermValue>,

    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub descriptions: BTreeMap<TermKey, TermValue>,

    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub aliases: BTreeMap<TermKey, Vec<TermValue>>,
}

impl AuthoritativeEntity {
    /// Current label for `language`, empty when there is none
    pub fn label(&self, language: &str) -> &str {
        self.labels.get(language).map_or("", |t| t.value.as_str())
    }

    /// Current description for `language`, empty when there is none
    pub fn description(&self, language: &str) -> &str {
        self.descriptions.get(language).map_or("", |t| t.value.as_str())
    }

    /// Current aliases for `language` in server order
    pub fn alias_values(&self, language: &str) -> Vec<&str> {
        self.aliases
            .get(language)
            .map(|list| list.iter().map(|t| t.value.as_str()).collect())
            .unwrap_or_default()
    }
}

/// A language-tagged value as sent to `wbeditentity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageValue {
    pub language: String,
    pub value: String,
}

impl LanguageValue {
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }
}

/// Minimal set of term writes submitted as one edit.
///
/// Empty sections are omitted from the serialized payload entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<TermKey, LanguageValue>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub descriptions: BTreeMap<TermKey, LanguageValue>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<TermKey, Vec<LanguageValue>>,
}

impl ChangeSet {
    /// True when there is nothing to write
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.descriptions.is_empty() && self.aliases.is_empty()
    }

    /// Serialize as the `data` parameter of `wbeditentity`
    pub fn to_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MapOrList<T> {
    Map(BTreeMap<String, T>),
    List(Vec<serde_json::Value>),
}

// The API renders an empty term section as `[]` rather than `{}`.
fn map_or_empty_list<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<MapOrList<T>>::deserialize(deserializer)? {
        Some(MapOrList::Map(map)) => Ok(map),
        Some(MapOrList::List(list)) if !list.is_empty() => Err(de::Error::custom(
            "expected a language-keyed object, found a non-empty list",
        )),
        _ => Ok(BTreeMap::new()),
    }
}
