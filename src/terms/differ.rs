/*!
 * Differ: compares edited terms against the authoritative snapshot and
 * produces the minimal change set.
 */

use super::{AuthoritativeEntity, ChangeSet, EditedTerms, LanguageValue};

/// Outcome of a diff
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermDiff {
    /// Fields to write
    pub change_set: ChangeSet,
    /// Number of changed fields (one per label, description or alias list)
    pub change_count: usize,
}

impl TermDiff {
    /// True when nothing differs and the write can be skipped
    pub fn is_noop(&self) -> bool {
        self.change_count == 0
    }
}

/// Build the change set for every language present in `edited`.
///
/// Labels and descriptions are compared after trimming, with a missing
/// authoritative value treated as the empty string. Alias lists are compared
/// as multisets and written in their edited order. Fields that are `None`
/// are never written.
pub fn build_change_set(current: &AuthoritativeEntity, edited: &EditedTerms) -> TermDiff {
    let mut diff = TermDiff::default();

    for (language, term) in edited {
        if let Some(label) = &term.label {
            let new_value = label.trim();
            if new_value != current.label(language) {
                diff.change_set
                    .labels
                    .insert(language.clone(), LanguageValue::new(language, new_value));
                diff.change_count += 1;
            }
        }

        if let Some(description) = &term.description {
            let new_value = description.trim();
            if new_value != current.description(language) {
                diff.change_set
                    .descriptions
                    .insert(language.clone(), LanguageValue::new(language, new_value));
                diff.change_count += 1;
            }
        }

        if let Some(aliases) = &term.aliases {
            let old_values = current.alias_values(language);
            if !same_aliases(aliases, &old_values) {
                let values = aliases
                    .iter()
                    .map(|value| LanguageValue::new(language, value.as_str()))
                    .collect();
                diff.change_set.aliases.insert(language.clone(), values);
                diff.change_count += 1;
            }
        }
    }

    diff
}

/// Order-insensitive comparison with multiplicity
fn same_aliases(new_values: &[String], old_values: &[&str]) -> bool {
    if new_values.len() != old_values.len() {
        return false;
    }
    let mut new_sorted: Vec<&str> = new_values.iter().map(String::as_str).collect();
    let mut old_sorted = old_values.to_vec();
    new_sorted.sort_unstable();
    old_sorted.sort_unstable();
    new_sorted == old_sorted
}
