/*!
 * Alias readers.
 *
 * An alias cell can be backed by the legacy tag list, the tag multiselect
 * widget or a plain text field. Readers are tried in that order; the first
 * one whose widget is present decides the outcome.
 */

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::rows::{AliasCell, AliasTag, TagMultiselect};

static ALIAS_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n|;|,|\|").expect("valid alias separator pattern"));

/// Result of probing one widget shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasProbe {
    /// This widget shape is not in the cell
    Absent,
    /// Aliases were read; an empty list means the user cleared them all
    Read(Vec<String>),
    /// The widget exists but its state cannot be read
    Unreadable,
}

/// The supported alias widget shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasReader {
    TagList,
    TagMultiselect,
    TextField,
}

impl AliasReader {
    /// Readers in priority order
    pub const PRIORITY: [AliasReader; 3] = [
        AliasReader::TagList,
        AliasReader::TagMultiselect,
        AliasReader::TextField,
    ];

    /// Probe `cell` for this reader's widget shape
    pub fn probe(self, cell: &AliasCell) -> AliasProbe {
        match self {
            Self::TagList => cell
                .tag_list
                .as_deref()
                .map_or(AliasProbe::Absent, read_tag_list),
            Self::TagMultiselect => cell
                .tag_multiselect
                .as_ref()
                .map_or(AliasProbe::Absent, read_tag_multiselect),
            Self::TextField => cell
                .text_field
                .as_deref()
                .map_or(AliasProbe::Absent, read_text_field),
        }
    }
}

/// Read the aliases of one cell.
///
/// Returns `None` when no reader could determine the aliases, in which case
/// the caller must leave the language's aliases untouched.
pub fn read_aliases(cell: &AliasCell) -> Option<Vec<String>> {
    for reader in AliasReader::PRIORITY {
        match reader.probe(cell) {
            AliasProbe::Absent => continue,
            AliasProbe::Read(values) => return Some(values),
            AliasProbe::Unreadable => {
                log::debug!("{:?} alias widget present but unreadable", reader);
                return None;
            }
        }
    }
    None
}

fn read_tag_list(tags: &[AliasTag]) -> AliasProbe {
    let values = tags
        .iter()
        .filter(|tag| !tag.placeholder)
        .map(|tag| tag.input.as_deref().or(tag.text.as_deref()).unwrap_or_default());
    AliasProbe::Read(normalize(values))
}

fn read_tag_multiselect(widget: &TagMultiselect) -> AliasProbe {
    match &widget.items {
        Some(items) => AliasProbe::Read(normalize(items.iter().map(String::as_str))),
        None => AliasProbe::Unreadable,
    }
}

fn read_text_field(content: &str) -> AliasProbe {
    AliasProbe::Read(normalize(ALIAS_SEPARATOR.split(content)))
}

/// Trim, drop empties and de-duplicate keeping the first occurrence
pub fn normalize<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
