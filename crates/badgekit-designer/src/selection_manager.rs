use crate::model::{Bounds, Element, ElementId, Point};
use std::collections::BTreeSet;

/// Tracks the set of selected element ids.
///
/// `SelectionManager` is responsible for:
/// - Tracking which element is the "primary" selection
/// - Point-based selection (clicking on elements)
/// - Rectangle-based selection (marquee)
/// - Multi-select toggling (Shift+click)
///
/// # Selection Model
///
/// - **Primary Selection**: the most recently selected element (`selected_id`)
/// - **Selection Set**: every selected id, in the order it was selected
///
/// Selection is not part of the undo history. After a history restore the
/// owner calls [`SelectionManager::retain_existing`] so that ids which no
/// longer exist are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    selected: Vec<ElementId>,
    selected_id: Option<ElementId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use badgekit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the primary selected element.
    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected_id
    }

    /// Selected ids in selection order.
    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clears the selection and the primary id.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
        self.selected_id = None;
    }

    /// Selects every element. The primary becomes the last one.
    pub fn select_all(&mut self, elements: &[Element]) {
        self.selected = elements.iter().map(|e| e.id).collect();
        self.selected_id = self.selected.last().copied();
    }

    /// Replaces the selection with exactly `ids`.
    pub fn set(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.selected.clear();
        for id in ids {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        }
        self.selected_id = self.selected.last().copied();
    }

    /// Selects an element by id.
    ///
    /// # Arguments
    ///
    /// * `id` - The element to select
    /// * `multi` - If `true`, toggles `id` without touching the rest of the
    ///   selection; if `false`, replaces the selection
    pub fn select_id(&mut self, id: ElementId, multi: bool) {
        if !multi {
            self.set([id]);
            return;
        }

        if let Some(pos) = self.selected.iter().position(|&s| s == id) {
            self.selected.remove(pos);
            if self.selected_id == Some(id) {
                self.selected_id = self.selected.last().copied();
            }
        } else {
            self.selected.push(id);
            self.selected_id = Some(id);
        }
    }

    /// Selects the topmost element at `point`.
    ///
    /// Clicking empty space without `multi` clears the selection.
    ///
    /// # Returns
    ///
    /// The primary selection after the click.
    pub fn select_at(
        &mut self,
        elements: &[Element],
        point: &Point,
        multi: bool,
    ) -> Option<ElementId> {
        match element_at(elements, point) {
            Some(id) => self.select_id(id, multi),
            None if !multi => self.deselect_all(),
            None => {}
        }
        self.selected_id
    }

    /// Selects every element whose bounding box intersects the rectangle.
    ///
    /// Uses an axis-aligned overlap test (touching edges do not count);
    /// containment is not required.
    ///
    /// # Arguments
    ///
    /// * `rect` - Selection rectangle in badge space, already normalized
    /// * `multi` - If `true`, adds to the existing selection
    ///
    /// # Returns
    ///
    /// The ids the rectangle hit.
    pub fn select_in_rect(
        &mut self,
        elements: &[Element],
        rect: &Bounds,
        multi: bool,
    ) -> Vec<ElementId> {
        if !multi {
            self.deselect_all();
        }

        let mut hit = Vec::new();

        for element in elements {
            if element.bounds().intersects(rect) {
                hit.push(element.id);
                if !self.selected.contains(&element.id) {
                    self.selected.push(element.id);
                }
                if self.selected_id.is_none() {
                    self.selected_id = Some(element.id);
                }
            }
        }

        hit
    }

    /// Removes ids from the selection.
    pub fn remove(&mut self, ids: &BTreeSet<ElementId>) {
        self.selected.retain(|id| !ids.contains(id));
        if self.selected_id.is_some_and(|id| ids.contains(&id)) {
            self.selected_id = self.selected.last().copied();
        }
    }

    /// Drops ids that are not present in `elements`.
    pub fn retain_existing(&mut self, elements: &[Element]) {
        let existing: BTreeSet<ElementId> = elements.iter().map(|e| e.id).collect();
        self.selected.retain(|id| existing.contains(id));
        if self.selected_id.is_some_and(|id| !existing.contains(&id)) {
            self.selected_id = self.selected.last().copied();
        }
    }
}

/// Returns the topmost element whose bounding box contains `point`.
///
/// Stacking follows z-index, then insertion order (later wins).
pub fn element_at(elements: &[Element], point: &Point) -> Option<ElementId> {
    elements
        .iter()
        .enumerate()
        .filter(|(_, e)| e.bounds().contains(point))
        .max_by_key(|(i, e)| (e.style.z_index, *i))
        .map(|(_, e)| e.id)
}
