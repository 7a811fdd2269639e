//! Selection set bookkeeping.
//!
//! The set and each button's `selected` flag are only ever changed together,
//! through [`SelectionSet::insert`], [`SelectionSet::remove`] and
//! [`SelectionSet::clear`].

use crate::button::{Button, ButtonId};

/// Currently selected buttons, in the order they were selected.
///
/// Order matters for distribution, which uses the first two selected
/// buttons as anchors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<ButtonId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `button` selected. Returns true if it was newly added.
    pub fn insert(&mut self, button: &mut Button) -> bool {
        button.selected = true;
        if self.ids.contains(&button.id) {
            return false;
        }
        self.ids.push(button.id);
        true
    }

    /// Mark `button` deselected. Returns true if it was present.
    pub fn remove(&mut self, button: &mut Button) -> bool {
        button.selected = false;
        let before = self.ids.len();
        self.ids.retain(|&id| id != button.id);
        self.ids.len() != before
    }

    /// Deselect every button in the set.
    pub fn clear(&mut self, buttons: &mut [Button]) {
        for button in buttons.iter_mut().filter(|b| b.selected) {
            button.selected = false;
        }
        self.ids.clear();
    }

    /// Drop ids that no longer refer to a live button.
    pub(crate) fn retain_live(&mut self, buttons: &[Button]) {
        self.ids.retain(|id| buttons.iter().any(|b| b.id == *id));
    }

    pub fn contains(&self, id: ButtonId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ButtonId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether the set agrees with the flags on `buttons`.
    pub fn is_consistent_with(&self, buttons: &[Button]) -> bool {
        let flagged = buttons.iter().filter(|b| b.selected).count();
        flagged == self.ids.len()
            && buttons
                .iter()
                .filter(|b| b.selected)
                .all(|b| self.ids.contains(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};

    fn buttons(n: usize) -> Vec<Button> {
        (0..n)
            .map(|i| Button::ellipse(Point::new(i as f64 * 20.0, 0.0), Size::new(10.0, 10.0), "e"))
            .collect()
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut list = buttons(2);
        let mut set = SelectionSet::new();
        assert!(set.insert(&mut list[0]));
        assert!(!set.insert(&mut list[0]));
        assert_eq!(set.len(), 1);
        assert!(list[0].is_selected());
        assert!(set.is_consistent_with(&list));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut list = buttons(2);
        let mut set = SelectionSet::new();
        set.insert(&mut list[0]);
        assert!(set.remove(&mut list[0]));
        assert!(!set.remove(&mut list[0]));
        assert!(set.is_empty());
        assert!(!list[0].is_selected());
        assert!(set.is_consistent_with(&list));
    }

    #[test]
    fn test_clear_resets_flags() {
        let mut list = buttons(3);
        let mut set = SelectionSet::new();
        set.insert(&mut list[0]);
        set.insert(&mut list[2]);
        set.clear(&mut list);
        assert!(set.is_empty());
        assert!(list.iter().all(|b| !b.is_selected()));
    }

    #[test]
    fn test_preserves_selection_order() {
        let mut list = buttons(3);
        let mut set = SelectionSet::new();
        set.insert(&mut list[2]);
        set.insert(&mut list[0]);
        assert_eq!(set.ids(), &[list[2].id(), list[0].id()]);
    }

    #[test]
    fn test_retain_live_drops_removed() {
        let mut list = buttons(2);
        let mut set = SelectionSet::new();
        set.insert(&mut list[0]);
        set.insert(&mut list[1]);
        list.remove(0);
        set.retain_live(&list);
        assert_eq!(set.ids(), &[list[0].id()]);
    }
}
