use std::collections::BTreeSet;

/// Multi-selection of file ids shared across panels.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    items: BTreeSet<String>,
}

impl SelectionState {
    /// Add or remove one id from the selection.
    pub fn toggle(&mut self, id: &str) {
        if !self.items.remove(id) {
            self.items.insert(id.to_string());
        }
    }

    /// Replace the selection with one id.
    pub fn select_only(&mut self, id: &str) {
        self.items.clear();
        self.items.insert(id.to_string());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains(id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Drop ids no longer present in the browser rows.
    pub fn retain_known(&mut self, known: &BTreeSet<String>) {
        self.items.retain(|id| known.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = SelectionState::default();
        selection.toggle("a");
        assert!(selection.contains("a"));
        selection.toggle("a");
        assert!(selection.is_empty());
    }

    #[test]
    fn select_only_replaces_existing_items() {
        let mut selection = SelectionState::default();
        selection.toggle("a");
        selection.toggle("b");
        selection.select_only("c");
        assert_eq!(selection.len(), 1);
        assert!(selection.contains("c"));
    }

    #[test]
    fn retain_known_drops_stale_ids() {
        let mut selection = SelectionState::default();
        selection.toggle("a");
        selection.toggle("b");
        let known: BTreeSet<String> = ["b".to_string()].into();
        selection.retain_known(&known);
        assert_eq!(selection.ids().collect::<Vec<_>>(), ["b"]);
    }
}
