//! Selection state over the current card list.
//!
//! Indices refer to positions in the authoritative card list and are only
//! meaningful against the list they were created for; the owner must call
//! [`Selection::clear`] whenever a new dataset replaces that list.

use crate::cards::Card;
use std::collections::BTreeSet;

/// Set of selected card indices. Ordered so that resolution walks cards in
/// source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `index`.
    pub fn toggle(&mut self, index: usize) {
        if !self.indices.remove(&index) {
            self.indices.insert(index);
        }
    }

    /// Toggle-all: select `{0..total}` unless that is already the exact
    /// selection, in which case clear it.
    pub fn select_all(&mut self, total: usize) {
        if self.indices.len() == total && self.indices.iter().all(|&i| i < total) {
            self.indices.clear();
        } else {
            self.indices = (0..total).collect();
        }
    }

    /// Empty the selection. Called on every dataset replacement so stale
    /// indices can never leak into the new card list.
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolve the selection against the current card list, in ascending
    /// index order. Indices past the end of the list are discarded rather
    /// than erroring: the list may have been replaced between the selection
    /// being made and being read.
    pub fn resolve<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
        self.indices
            .iter()
            .filter_map(|&i| cards.get(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{VizData, build_cards};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut sel = Selection::new();
        sel.toggle(3);
        assert!(sel.contains(3));
        sel.toggle(3);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_select_all_toggles() {
        let mut sel = Selection::new();
        sel.select_all(5);
        assert_eq!(sel.len(), 5);
        // Already exactly full: toggles back to empty.
        sel.select_all(5);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_select_all_from_partial_fills() {
        let mut sel = Selection::new();
        sel.toggle(1);
        sel.toggle(2);
        sel.select_all(4);
        assert_eq!(sel.len(), 4);
        assert!(sel.contains(0) && sel.contains(3));
    }

    #[test]
    fn test_clear() {
        let mut sel = Selection::new();
        sel.select_all(3);
        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn test_resolve_discards_out_of_range() {
        let viz: VizData = serde_json::from_value(json!({
            "datasets": [
                { "f": "https://a.com/0.png" },
                { "f": "https://a.com/1.png" }
            ],
            "fieldMap": { "f": {} },
            "locationMap": { "dimensions": ["f"] }
        }))
        .unwrap();
        let cards = build_cards(&viz);

        let mut sel = Selection::new();
        sel.toggle(1);
        sel.toggle(7); // stale index from a previous, larger list
        let resolved = sel.resolve(&cards);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].image_url, "https://a.com/1.png");
    }

    #[test]
    fn test_resolve_is_in_ascending_order() {
        let viz: VizData = serde_json::from_value(json!({
            "datasets": [
                { "f": "https://a.com/0.png" },
                { "f": "https://a.com/1.png" },
                { "f": "https://a.com/2.png" }
            ],
            "fieldMap": { "f": {} },
            "locationMap": { "dimensions": ["f"] }
        }))
        .unwrap();
        let cards = build_cards(&viz);

        let mut sel = Selection::new();
        sel.toggle(2);
        sel.toggle(0);
        let urls: Vec<&str> = sel.resolve(&cards).iter().map(|c| c.image_url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.com/0.png", "https://a.com/2.png"]);
    }
}
