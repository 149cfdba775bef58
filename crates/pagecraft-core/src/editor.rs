//! The editor: one owner for the document and every gesture on it.
//!
//! Hosts forward pointer events here in screen pixels. Gesture methods come in
//! two forms: `try_*` returns why an event was ignored, the plain form logs the
//! reason and carries on. Nothing here panics on bad input.

use crate::config::EditorConfig;
use crate::document::{CanvasSize, Document};
use crate::drag::DragController;
use crate::element::{ApproximateTextMeasurer, Element, ElementId, ShapeStyle, TextFormat, TextMeasurer};
use crate::error::{EditorError, EditorResult};
use crate::handles::{HandleVisibility, ResizeDirection, hit_test_handles};
use crate::input::{Modifiers, MoveCoalescer, PointerSample};
use crate::resize::{ResizeContext, ResizeController};
use crate::selection::{EditMode, SelectionStore};
use crate::snap::{AlignmentGuides, SnapEngine};
use crate::viewport::{Viewport, ViewportTracker, to_viewport_rect};
use kurbo::{Point, Rect, Size};

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// What lies under a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A resize handle of the single selected element.
    Handle(ElementId, ResizeDirection),
    Element(ElementId),
}

/// Canvas geometry engine state plus its command API.
pub struct Editor {
    document: Document,
    selection: SelectionStore,
    viewport: Viewport,
    drag: DragController,
    resize: ResizeController,
    guides: AlignmentGuides,
    config: EditorConfig,
    snap: SnapEngine,
    measurer: Box<dyn TextMeasurer>,
    moves: MoveCoalescer,
    tracker: ViewportTracker,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(CanvasSize::default(), EditorConfig::default())
    }
}

impl Editor {
    pub fn new(canvas: CanvasSize, config: EditorConfig) -> Self {
        Self {
            document: Document::new(canvas),
            selection: SelectionStore::new(),
            viewport: Viewport::new(&config),
            drag: DragController::new(),
            resize: ResizeController::new(),
            guides: AlignmentGuides::default(),
            snap: SnapEngine::from_config(&config),
            measurer: Box::new(ApproximateTextMeasurer),
            moves: MoveCoalescer::new(),
            tracker: ViewportTracker::new(&config),
            config,
        }
    }

    /// Use a real text layout engine for text heights.
    pub fn with_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    // --- Drag ---

    pub fn try_begin_drag(&mut self, id: ElementId, x: f64, y: f64) -> EditorResult<()> {
        self.ensure_editable()?;
        if self.resize.is_active() {
            return Err(EditorError::ModeViolation("resize in progress"));
        }
        // Moves queued before the press belong to no gesture
        self.moves.clear();
        // A selected lead carries the rest of the selection along
        let followers: Vec<ElementId> = if self.selection.contains(id) {
            self.selection.selected().to_vec()
        } else {
            Vec::new()
        };
        self.drag.begin(&self.document, id, &followers, Point::new(x, y))
    }

    pub fn begin_drag(&mut self, id: ElementId, x: f64, y: f64) {
        if let Err(e) = self.try_begin_drag(id, x, y) {
            e.log("begin_drag");
        }
    }

    /// Move the dragged elements. Modifiers do not change how a move behaves.
    pub fn try_update_drag(&mut self, x: f64, y: f64, _modifiers: Modifiers) -> EditorResult<()> {
        self.ensure_editable()?;
        let scale = self.viewport.scale();
        self.drag.update(
            &mut self.document,
            Point::new(x, y),
            scale,
            &self.snap,
            &mut self.guides,
        )
    }

    pub fn update_drag(&mut self, x: f64, y: f64, modifiers: Modifiers) {
        if let Err(e) = self.try_update_drag(x, y, modifiers) {
            e.log("update_drag");
        }
    }

    pub fn try_end_drag(&mut self) -> EditorResult<()> {
        self.flush_pending(true);
        self.drag.end(&mut self.guides)?;
        self.tracker.clear();
        Ok(())
    }

    /// Finish the drag. Safe to call when no drag is active.
    pub fn end_drag(&mut self) {
        if let Err(e) = self.try_end_drag() {
            e.log("end_drag");
        }
    }

    pub fn try_cancel_drag(&mut self) -> EditorResult<()> {
        self.moves.clear();
        self.drag.cancel(&mut self.document, &mut self.guides)?;
        self.tracker.clear();
        Ok(())
    }

    pub fn cancel_drag(&mut self) {
        if let Err(e) = self.try_cancel_drag() {
            e.log("cancel_drag");
        }
    }

    // --- Resize ---

    pub fn try_begin_resize(
        &mut self,
        id: ElementId,
        direction: ResizeDirection,
        x: f64,
        y: f64,
    ) -> EditorResult<()> {
        self.ensure_editable()?;
        if self.drag.is_active() {
            return Err(EditorError::ModeViolation("drag in progress"));
        }
        self.moves.clear();
        self.resize
            .begin(&self.document, id, direction, Point::new(x, y), &self.config)
    }

    pub fn begin_resize(&mut self, id: ElementId, direction: ResizeDirection, x: f64, y: f64) {
        if let Err(e) = self.try_begin_resize(id, direction, x, y) {
            e.log("begin_resize");
        }
    }

    pub fn try_update_resize(&mut self, x: f64, y: f64, modifiers: Modifiers) -> EditorResult<()> {
        self.ensure_editable()?;
        let ctx = ResizeContext {
            scale: self.viewport.scale(),
            engine: &self.snap,
            config: &self.config,
            measurer: self.measurer.as_ref(),
            exclude: self.selection.selected(),
        };
        self.resize.update(
            &mut self.document,
            Point::new(x, y),
            modifiers,
            &ctx,
            &mut self.guides,
        )
    }

    pub fn update_resize(&mut self, x: f64, y: f64, modifiers: Modifiers) {
        if let Err(e) = self.try_update_resize(x, y, modifiers) {
            e.log("update_resize");
        }
    }

    pub fn try_end_resize(&mut self) -> EditorResult<()> {
        self.flush_pending(false);
        self.resize.end(&mut self.guides)?;
        self.tracker.clear();
        Ok(())
    }

    /// Finish the resize. Safe to call when no resize is active.
    pub fn end_resize(&mut self) {
        if let Err(e) = self.try_end_resize() {
            e.log("end_resize");
        }
    }

    pub fn try_cancel_resize(&mut self) -> EditorResult<()> {
        self.moves.clear();
        self.resize.cancel(&mut self.document, &mut self.guides)?;
        self.tracker.clear();
        Ok(())
    }

    pub fn cancel_resize(&mut self) {
        if let Err(e) = self.try_cancel_resize() {
            e.log("cancel_resize");
        }
    }

    // --- Coalesced pointer moves ---

    /// Buffer a pointer move; only the latest one is applied on the next tick.
    pub fn queue_pointer_move(&mut self, x: f64, y: f64, modifiers: Modifiers) {
        self.moves.push(PointerSample::new(Point::new(x, y), modifiers));
    }

    /// Apply the latest buffered move to the active gesture.
    ///
    /// Returns true if a gesture was updated.
    pub fn tick(&mut self) -> bool {
        let Some(sample) = self.moves.take() else {
            return false;
        };
        self.apply_sample(sample)
    }

    fn apply_sample(&mut self, sample: PointerSample) -> bool {
        let Point { x, y } = sample.position;
        let result = if self.drag.is_active() {
            self.try_update_drag(x, y, sample.modifiers)
        } else if self.resize.is_active() {
            self.try_update_resize(x, y, sample.modifiers)
        } else {
            Err(EditorError::NotActive)
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                e.log("tick");
                false
            }
        }
    }

    /// Apply a move still waiting for a tick before the gesture ends.
    fn flush_pending(&mut self, dragging: bool) {
        let active = if dragging {
            self.drag.is_active()
        } else {
            self.resize.is_active()
        };
        if active {
            if let Some(sample) = self.moves.take() {
                self.apply_sample(sample);
            }
        }
    }

    // --- Zoom ---

    pub fn set_zoom(&mut self, percent: u32) {
        self.viewport.set_zoom(percent);
        self.tracker.clear();
        log::debug!("zoom set to {}%", self.viewport.zoom());
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.tracker.clear();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.tracker.clear();
    }

    /// Zoom so the whole canvas fits a container of the given pixel size.
    pub fn fit_to_container(&mut self, width: f64, height: f64) {
        self.viewport
            .fit_to_container(self.document.canvas, Size::new(width, height), &self.config);
        self.tracker.clear();
        log::debug!("fit {width}x{height}: zoom {}%", self.viewport.zoom());
    }

    // --- Selection ---

    pub fn select(&mut self, id: ElementId, additive: bool) {
        if !self.document.contains(id) {
            EditorError::UnknownElement(id).log("select");
            return;
        }
        self.selection.select(id, additive);
    }

    pub fn select_canvas(&mut self, selected: bool) {
        self.selection.select_canvas(selected);
    }

    pub fn click_outside(&mut self) {
        self.selection.click_outside();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Switch between edit and view mode. Entering view mode finishes any
    /// gesture in progress and clears the selection.
    pub fn set_mode(&mut self, mode: EditMode) {
        if mode == EditMode::View {
            self.moves.clear();
            if self.drag.is_active() {
                if let Err(e) = self.drag.end(&mut self.guides) {
                    e.log("set_mode");
                }
            }
            if self.resize.is_active() {
                if let Err(e) = self.resize.end(&mut self.guides) {
                    e.log("set_mode");
                }
            }
        }
        self.selection.set_mode(mode);
        log::debug!("mode set to {mode:?}");
    }

    // --- Element lifecycle ---

    /// Add an element on top of the others. Invalid sizes are clamped.
    pub fn add_element(&mut self, mut element: Element) -> ElementId {
        let (width, height) = self.config.clamp_size(element.width, element.height);
        if width != element.width || height != element.height {
            EditorError::InvalidGeometry {
                id: element.id(),
                width: element.width,
                height: element.height,
            }
            .log("add_element");
            element.width = width;
            element.height = height;
        }
        if !element.x.is_finite() || !element.y.is_finite() {
            EditorError::InvalidInput("non-finite element position").log("add_element");
            element.set_position(Point::ZERO);
        }
        self.document.add(element)
    }

    pub fn try_delete_element(&mut self, id: ElementId) -> EditorResult<Element> {
        self.ensure_editable()?;
        let element = self.document.remove(id).ok_or(EditorError::UnknownElement(id))?;
        self.selection.remove(id);
        self.drag.forget(id);
        self.resize.forget(id);
        self.tracker.forget(id);
        if !self.drag.is_active() && !self.resize.is_active() {
            self.guides.clear();
        }
        log::debug!("deleted {} {id}", element.kind.name());
        Ok(element)
    }

    pub fn delete_element(&mut self, id: ElementId) {
        if let Err(e) = self.try_delete_element(id) {
            e.log("delete_element");
        }
    }

    /// Delete every selected element. Returns the removed records.
    pub fn delete_selected(&mut self) -> Vec<Element> {
        let ids = self.selection.selected().to_vec();
        ids.into_iter()
            .filter_map(|id| match self.try_delete_element(id) {
                Ok(element) => Some(element),
                Err(e) => {
                    e.log("delete_selected");
                    None
                }
            })
            .collect()
    }

    pub fn try_set_locked(&mut self, id: ElementId, locked: bool) -> EditorResult<()> {
        self.ensure_editable()?;
        let element = self.document.get_mut(id).ok_or(EditorError::UnknownElement(id))?;
        element.locked = locked;
        Ok(())
    }

    pub fn set_locked(&mut self, id: ElementId, locked: bool) {
        if let Err(e) = self.try_set_locked(id, locked) {
            e.log("set_locked");
        }
    }

    /// Change text formatting. Layout-affecting changes re-measure the height,
    /// keeping the top edge in place.
    pub fn try_update_text_format(&mut self, id: ElementId, format: &TextFormat) -> EditorResult<()> {
        self.ensure_editable()?;
        let element = self.document.get_mut(id).ok_or(EditorError::UnknownElement(id))?;
        let width = element.width;
        let min_font_size = self.config.min_font_size;
        let props = element
            .text_props_mut()
            .ok_or(EditorError::ModeViolation("not a text element"))?;
        if format.apply(props, min_font_size) {
            let measured = self.measurer.measure_height(props, width);
            let (_, height) = self.config.clamp_size(width, measured);
            element.height = height;
        }
        element.touch();
        Ok(())
    }

    pub fn update_text_format(&mut self, id: ElementId, format: &TextFormat) {
        if let Err(e) = self.try_update_text_format(id, format) {
            e.log("update_text_format");
        }
    }

    pub fn try_update_shape_style(&mut self, id: ElementId, style: ShapeStyle) -> EditorResult<()> {
        self.ensure_editable()?;
        let element = self.document.get_mut(id).ok_or(EditorError::UnknownElement(id))?;
        let target = element
            .kind
            .shape_style_mut()
            .ok_or(EditorError::ModeViolation("element has no shape style"))?;
        *target = style;
        element.touch();
        Ok(())
    }

    pub fn update_shape_style(&mut self, id: ElementId, style: ShapeStyle) {
        if let Err(e) = self.try_update_shape_style(id, style) {
            e.log("update_shape_style");
        }
    }

    // --- Accessors ---

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.document.get(id)
    }

    /// Elements back to front.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.document.elements()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn canvas(&self) -> CanvasSize {
        self.document.canvas
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn alignment_guides(&self) -> &AlignmentGuides {
        &self.guides
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn mode(&self) -> EditMode {
        self.selection.mode()
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    pub fn zoom(&self) -> u32 {
        self.viewport.zoom()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_active()
    }

    /// Screen rect of an element for a canvas drawn at `origin`.
    pub fn viewport_rect(&self, id: ElementId, origin: Point) -> Option<Rect> {
        self.document
            .get(id)
            .map(|e| to_viewport_rect(e.bounds(), origin, self.viewport.scale()))
    }

    /// Viewport rects that changed enough to be worth re-laying out since the
    /// last call, throttled to the frame interval.
    pub fn changed_viewport_rects(&mut self, origin: Point, now: Instant) -> Vec<(ElementId, Rect)> {
        let scale = self.viewport.scale();
        let mut changed = Vec::new();
        for element in self.document.elements() {
            if let Some(rect) = self.tracker.update(element.id(), element.bounds(), origin, scale, now) {
                changed.push((element.id(), rect));
            }
        }
        changed
    }

    /// Which resize handles to draw for an element at the current zoom.
    pub fn handle_visibility(&self, id: ElementId) -> Option<HandleVisibility> {
        self.document.get(id).map(|e| {
            HandleVisibility::compute(e.width, e.height, self.viewport.scale(), self.config.handle_size)
        })
    }

    /// Resolve a press at screen `(x, y)` for a canvas drawn at `origin`.
    ///
    /// Handles of a lone selected, unlocked element take priority over the
    /// topmost element body under the point.
    pub fn hit_test(&self, x: f64, y: f64, origin: Point) -> Option<HitTarget> {
        let screen = Point::new(x, y);
        if !screen.is_finite() {
            return None;
        }
        let resizable = self
            .selection
            .selected_element()
            .filter(|&id| self.document.get(id).is_some_and(|e| !e.locked));
        if let Some(id) = resizable {
            if let (Some(bounds), Some(visibility)) = (self.viewport_rect(id, origin), self.handle_visibility(id)) {
                if let Some(direction) = hit_test_handles(bounds, visibility, screen, self.config.handle_size) {
                    return Some(HitTarget::Handle(id, direction));
                }
            }
        }
        let logical = self.viewport.screen_to_logical(screen, origin);
        self.document.element_at(logical).map(HitTarget::Element)
    }

    fn ensure_editable(&self) -> EditorResult<()> {
        if self.selection.is_editable() {
            Ok(())
        } else {
            Err(EditorError::ModeViolation("view mode"))
        }
    }
}
