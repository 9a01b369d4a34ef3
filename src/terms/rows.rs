/*!
 * Raw editable-row state as supplied by the host editing surface.
 *
 * These types mirror what a term row in edit mode exposes: a class name and
 * `lang` attributes for language detection, text controls for label and
 * description, and an alias cell that may be backed by one of several
 * widget shapes.
 */

use serde::{Deserialize, Serialize};

/// One term row currently in edit mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditableRow {
    /// The row's class attribute (carries the explicit language marker)
    pub class_name: String,

    /// `lang` attribute of the row itself
    pub lang: Option<String>,

    /// `lang` attributes found on elements inside the row, in document order
    pub inner_langs: Vec<String>,

    /// Label control, `None` when the row has no readable label input
    pub label: Option<TextControl>,

    /// Description control, `None` when the row has no readable description input
    pub description: Option<TextControl>,

    /// Alias cell, `None` when the row has no alias view at all
    pub aliases: Option<AliasCell>,
}

/// A text input, optionally wrapped by a rich text widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextControl {
    /// Value reported by the wrapping widget, when its state is readable
    pub widget_value: Option<String>,

    /// Raw value of the underlying input element
    pub input_value: Option<String>,
}

impl TextControl {
    /// Control backed only by a plain input
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            widget_value: None,
            input_value: Some(value.into()),
        }
    }

    /// Trimmed current value; the widget wins over the raw input
    pub fn current_value(&self) -> String {
        self.widget_value
            .as_deref()
            .or(self.input_value.as_deref())
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

/// The alias cell of a row and whichever alias widgets it contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasCell {
    /// Legacy tag list chips, when that widget is present
    pub tag_list: Option<Vec<AliasTag>>,

    /// Tag multiselect widget, when present
    pub tag_multiselect: Option<TagMultiselect>,

    /// Plain text field content, when present
    pub text_field: Option<String>,
}

/// One chip of the legacy tag list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasTag {
    /// Value of the chip's edit input, if it is rendered as one
    pub input: Option<String>,

    /// Rendered chip text, used when there is no input
    pub text: Option<String>,

    /// The trailing empty chip used for typing new aliases
    pub placeholder: bool,
}

impl AliasTag {
    /// Chip rendered as an edit input
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            input: Some(value.into()),
            ..Default::default()
        }
    }

    /// Chip rendered as plain text
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            text: Some(value.into()),
            ..Default::default()
        }
    }

    /// Empty chip awaiting input
    pub fn placeholder() -> Self {
        Self {
            placeholder: true,
            ..Default::default()
        }
    }
}

/// The tag multiselect widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagMultiselect {
    /// Item labels; `None` when the widget's internal state cannot be read
    pub items: Option<Vec<String>>,
}
