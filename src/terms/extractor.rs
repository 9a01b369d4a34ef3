/*!
 * Extractor: turns editable rows into per-language edited terms.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::aliases::read_aliases;
use super::rows::EditableRow;
use super::{EditedTerm, EditedTerms};

static ROW_LANGUAGE_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)wikibase-entitytermsforlanguageview-([a-z0-9-]+)")
        .expect("valid row language pattern")
});

/// Language used when neither the row nor the user locale names one
pub const FALLBACK_LANGUAGE: &str = "en";

/// Resolve the language code of a row.
///
/// The explicit class marker wins, then any `lang` attribute on or inside the
/// row, then the user's interface language.
pub fn row_language(row: &EditableRow, user_language: Option<&str>) -> String {
    if let Some(code) = ROW_LANGUAGE_CLASS
        .captures(&row.class_name)
        .and_then(|caps| caps.get(1))
    {
        return code.as_str().to_lowercase();
    }

    row.lang
        .as_deref()
        .into_iter()
        .chain(row.inner_langs.iter().map(String::as_str))
        .chain(user_language)
        .map(str::trim)
        .find(|code| !code.is_empty())
        .unwrap_or(FALLBACK_LANGUAGE)
        .to_lowercase()
}

/// Read one snapshot of all editable rows into a language-keyed map.
///
/// Rows for the same language are merged; a field read from a later row
/// replaces the one read from an earlier row.
pub fn extract_terms(rows: &[EditableRow], user_language: Option<&str>) -> EditedTerms {
    let mut terms = EditedTerms::new();

    for row in rows {
        let language = row_language(row, user_language);
        let entry: &mut EditedTerm = terms.entry(language).or_default();

        if let Some(control) = &row.label {
            entry.label = Some(control.current_value());
        }
        if let Some(control) = &row.description {
            entry.description = Some(control.current_value());
        }
        if let Some(aliases) = row.aliases.as_ref().and_then(read_aliases) {
            entry.aliases = Some(aliases);
        }
    }

    debug!("Collected edited terms: {:?}", terms);
    terms
}
