//! Element selection, canvas pseudo-selection and the edit/view mode gate.

use crate::element::ElementId;
use serde::{Deserialize, Serialize};

/// Whether the surface accepts edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    #[default]
    Edit,
    View,
}

/// How many elements are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementSelection {
    None,
    Single(ElementId),
    Multi,
}

/// Whether the canvas itself is selected (for page-level properties).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasSelection {
    Unselected,
    Selected,
}

/// Tracks which elements are selected.
///
/// Selection order is kept: the first element is the one a host shows
/// properties for when several are selected.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selected: Vec<ElementId>,
    canvas_selected: bool,
    mode: EditMode,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editable(&self) -> bool {
        self.mode == EditMode::Edit
    }

    /// Switch modes. Entering view mode drops every selection.
    pub fn set_mode(&mut self, mode: EditMode) {
        if mode == EditMode::View {
            self.selected.clear();
            self.canvas_selected = false;
        }
        self.mode = mode;
    }

    /// Select an element. Additive selection toggles membership.
    pub fn select(&mut self, id: ElementId, additive: bool) {
        if !self.is_editable() {
            log::debug!("select ignored in view mode");
            return;
        }
        if additive {
            if let Some(index) = self.selected.iter().position(|&s| s == id) {
                self.selected.remove(index);
            } else {
                self.selected.push(id);
            }
        } else {
            self.selected.clear();
            self.selected.push(id);
        }
        // Element and canvas selection are mutually exclusive
        if !self.selected.is_empty() {
            self.canvas_selected = false;
        }
    }

    /// Select or deselect the canvas. Selecting it drops the element selection.
    pub fn select_canvas(&mut self, selected: bool) {
        if !self.is_editable() {
            log::debug!("select_canvas ignored in view mode");
            return;
        }
        if selected {
            self.selected.clear();
        }
        self.canvas_selected = selected;
    }

    /// A click outside the canvas.
    pub fn click_outside(&mut self) {
        self.canvas_selected = false;
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.canvas_selected = false;
    }

    /// Forget a deleted element.
    pub fn remove(&mut self, id: ElementId) {
        self.selected.retain(|&s| s != id);
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected element IDs in selection order.
    pub fn selected(&self) -> &[ElementId] {
        &self.selected
    }

    /// The selected element when exactly one is selected.
    pub fn selected_element(&self) -> Option<ElementId> {
        match self.selected.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    pub fn is_canvas_selected(&self) -> bool {
        self.canvas_selected
    }

    pub fn state(&self) -> (ElementSelection, CanvasSelection) {
        let elements = match self.selected.as_slice() {
            [] => ElementSelection::None,
            [id] => ElementSelection::Single(*id),
            _ => ElementSelection::Multi,
        };
        let canvas = if self.canvas_selected {
            CanvasSelection::Selected
        } else {
            CanvasSelection::Unselected
        };
        (elements, canvas)
    }
}
