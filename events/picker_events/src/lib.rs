use bevy::prelude::*;

/// Event to request opening the item picker dialog.
/// Used with observers via commands.trigger().
#[derive(Event, Debug, Clone)]
pub struct OpenItemPicker {
    /// Dialog title
    pub title: String,
    /// Explicit set of offered item names. When present it bypasses the
    /// placement-result filter and hides the creative group.
    pub allow_list: Option<Vec<String>>,
}

impl OpenItemPicker {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            allow_list: None,
        }
    }

    pub fn with_allow_list(title: impl Into<String>, allow_list: Vec<String>) -> Self {
        Self {
            title: title.into(),
            allow_list: Some(allow_list),
        }
    }
}

/// Triggered exactly once when the user completes a primary-button
/// selection. Never triggered when the dialog is dismissed.
#[derive(Event, Debug, Clone)]
pub struct ItemPicked {
    pub item: String,
}
