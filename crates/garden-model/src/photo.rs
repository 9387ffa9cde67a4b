//! Photo references and the compose selection set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of photos that can be selected for a collage.
pub const MAX_SELECTED: usize = 10;

/// Minimum number of photos required to compose a collage.
pub const MIN_COMPOSE: usize = 2;

/// A dated reference to a photo file, relative to the garden root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    /// Unique, stable identifier.
    pub id: String,

    /// Relative path from the garden root to the image file.
    pub path: String,

    /// Date the photo was taken.
    pub date: NaiveDate,
}

/// Ephemeral selection state over a set of photos.
///
/// Materialized fresh each time the compose flow opens and discarded
/// afterwards. The selection is capped at [`MAX_SELECTED`]; toggling an
/// additional photo while the cap is reached is a no-op.
#[derive(Debug, Clone)]
pub struct PhotoSelection {
    photos: Vec<PhotoRef>,
    selected: Vec<String>,
}

impl PhotoSelection {
    /// Create a selection over the given photos, nothing selected.
    pub fn new(photos: Vec<PhotoRef>) -> Self {
        Self {
            photos,
            selected: Vec::new(),
        }
    }

    /// All photos the selection ranges over.
    pub fn photos(&self) -> &[PhotoRef] {
        &self.photos
    }

    /// Toggle selection of a photo by id.
    ///
    /// Returns `true` if the selection changed. Selecting an unknown id,
    /// or selecting beyond [`MAX_SELECTED`], leaves the set unchanged.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            return true;
        }
        if !self.photos.iter().any(|p| p.id == id) {
            return false;
        }
        if self.selected.len() >= MAX_SELECTED {
            return false;
        }
        self.selected.push(id.to_string());
        true
    }

    /// Number of currently selected photos.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected photos in selection order.
    pub fn selected(&self) -> Vec<&PhotoRef> {
        self.selected
            .iter()
            .filter_map(|id| self.photos.iter().find(|p| &p.id == id))
            .collect()
    }

    /// Whether the selection satisfies the compose precondition (2..=10).
    pub fn is_composable(&self) -> bool {
        (MIN_COMPOSE..=MAX_SELECTED).contains(&self.selected.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: &str) -> PhotoRef {
        PhotoRef {
            id: id.to_string(),
            path: format!("photos/{id}.jpg"),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    fn selection(n: usize) -> PhotoSelection {
        PhotoSelection::new((0..n).map(|i| photo(&format!("p{i}"))).collect())
    }

    #[test]
    fn test_toggle_selects_and_deselects() {
        let mut sel = selection(3);
        assert!(sel.toggle("p0"));
        assert_eq!(sel.selected_count(), 1);
        assert!(sel.toggle("p0"));
        assert_eq!(sel.selected_count(), 0);
    }

    #[test]
    fn test_eleventh_selection_is_noop() {
        let mut sel = selection(12);
        for i in 0..10 {
            assert!(sel.toggle(&format!("p{i}")));
        }
        assert_eq!(sel.selected_count(), 10);

        assert!(!sel.toggle("p10"));
        assert_eq!(sel.selected_count(), 10);
        let ids: Vec<_> = sel.selected().iter().map(|p| p.id.clone()).collect();
        assert!(!ids.contains(&"p10".to_string()));

        // Deselecting still works at the cap.
        assert!(sel.toggle("p3"));
        assert_eq!(sel.selected_count(), 9);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut sel = selection(2);
        assert!(!sel.toggle("nope"));
        assert_eq!(sel.selected_count(), 0);
    }

    #[test]
    fn test_composable_bounds() {
        let mut sel = selection(4);
        assert!(!sel.is_composable());
        sel.toggle("p0");
        assert!(!sel.is_composable());
        sel.toggle("p1");
        assert!(sel.is_composable());
    }
}
