//! The element store for one document page.

use crate::element::{Element, ElementId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Logical size of a document page. Fixed for the duration of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// All elements of a page, keyed by ID, with their paint order.
///
/// This is the single owner of element records. Controllers borrow it mutably
/// for one call and never hold on to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub canvas: CanvasSize,
    elements: HashMap<ElementId, Element>,
    /// Z-order of elements (back to front).
    z_order: Vec<ElementId>,
}

impl Document {
    /// Create a new empty document with the given page size.
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            elements: HashMap::new(),
            z_order: Vec::new(),
        }
    }

    /// Add an element on top. Replaces any element with the same ID in place.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id();
        if self.elements.insert(id, element).is_none() {
            self.z_order.push(id);
        }
        id
    }

    /// Remove an element.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.z_order.retain(|&element_id| element_id != id);
        self.elements.remove(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.z_order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Elements in z-order that are not in `exclude`.
    pub fn siblings<'a>(&'a self, exclude: &'a [ElementId]) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| !exclude.contains(&e.id()))
    }

    /// Topmost element containing `point`, if any.
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.elements.get(id).is_some_and(|e| e.bounds().contains(point)))
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}
