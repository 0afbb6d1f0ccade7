//! Picker interaction state, modeled as an explicit machine so tests
//! drive transitions directly instead of synthesizing pointer events.

/// Refresh requested for the recipe preview panel after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelRefresh {
    /// Show the recipe (or creative label) for this item
    Item(String),
    Cleared,
}

/// Mutable state of an open picker: the active group index and the item
/// currently under the pointer. Selection is terminal and tracked by
/// dialog teardown, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerState {
    active_group: usize,
    hovered: Option<String>,
}

impl Default for PickerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PickerState {
    /// A freshly opened picker shows the first non-empty group.
    pub fn new() -> Self {
        Self {
            active_group: 0,
            hovered: None,
        }
    }

    pub fn active_group(&self) -> usize {
        self.active_group
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Activates a group. Returns `false` when the group is already
    /// active, in which case no buttons or grids need toggling.
    pub fn select_group(&mut self, index: usize) -> bool {
        if self.active_group == index {
            return false;
        }
        self.active_group = index;
        true
    }

    /// Pointer entered an item button.
    pub fn hover_item(&mut self, item: &str) -> PanelRefresh {
        self.hovered = Some(item.to_string());
        PanelRefresh::Item(item.to_string())
    }

    /// Pointer left an item button. Only fires while `item` is still the
    /// hovered one; a pointer-out arriving after a newer pointer-over
    /// for a different item is stale and ignored.
    pub fn unhover_item(&mut self, item: &str) -> Option<PanelRefresh> {
        if self.hovered.as_deref() != Some(item) {
            return None;
        }
        self.hovered = None;
        Some(PanelRefresh::Cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reselecting_active_group_is_a_no_op() {
        let mut state = PickerState::new();
        assert!(!state.select_group(0));
        assert!(state.select_group(2));
        assert!(!state.select_group(2));
        assert_eq!(state.active_group(), 2);
    }

    #[test]
    fn hover_then_unhover_clears_panel() {
        let mut state = PickerState::new();
        assert_eq!(
            state.hover_item("iron-plate"),
            PanelRefresh::Item("iron-plate".to_string())
        );
        assert_eq!(
            state.unhover_item("iron-plate"),
            Some(PanelRefresh::Cleared)
        );
        assert_eq!(state.hovered(), None);
    }

    #[test]
    fn stale_unhover_after_newer_hover_is_ignored() {
        let mut state = PickerState::new();
        state.hover_item("a");
        state.hover_item("b");

        assert_eq!(state.unhover_item("a"), None);
        assert_eq!(state.hovered(), Some("b"));
    }

    #[test]
    fn unhover_without_hover_is_ignored() {
        let mut state = PickerState::new();
        assert_eq!(state.unhover_item("a"), None);
    }
}
