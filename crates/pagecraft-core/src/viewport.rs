//! Zoom and the mapping between logical design space and screen pixels.

use crate::config::EditorConfig;
use crate::document::CanvasSize;
use crate::element::ElementId;
use kurbo::{Affine, Point, Rect, Size};
use std::collections::HashMap;
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Zoom level in integer percent. 100% maps one logical unit to one pixel.
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: u32,
    min_zoom: u32,
    max_zoom: u32,
    zoom_step: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Viewport {
    pub fn new(config: &EditorConfig) -> Self {
        let min_zoom = config.min_zoom.min(config.max_zoom);
        Self {
            zoom: 100u32.clamp(min_zoom, config.max_zoom),
            min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step.max(1),
        }
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Scale factor, exactly `zoom / 100`.
    pub fn scale(&self) -> f64 {
        f64::from(self.zoom) / 100.0
    }

    /// Set the zoom percentage, clamped to the configured range.
    pub fn set_zoom(&mut self, percent: u32) {
        self.zoom = percent.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom.saturating_add(self.zoom_step));
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom.saturating_sub(self.zoom_step));
    }

    /// Pick the zoom at which the whole canvas fits the container.
    pub fn fit_to_container(&mut self, canvas: CanvasSize, container: Size, config: &EditorConfig) {
        let zoom = fit_zoom(canvas, container, config);
        self.set_zoom(zoom);
    }

    /// Logical → screen transform for a canvas drawn at `origin`.
    pub fn transform(&self, origin: Point) -> Affine {
        Affine::translate(origin.to_vec2()) * Affine::scale(self.scale())
    }

    /// Convert a screen point to logical coordinates.
    pub fn screen_to_logical(&self, screen: Point, origin: Point) -> Point {
        self.transform(origin).inverse() * screen
    }
}

/// Zoom percentage at which `canvas` fits inside `container` minus the UI
/// margins, never above 100% and never below the configured floor.
pub fn fit_zoom(canvas: CanvasSize, container: Size, config: &EditorConfig) -> u32 {
    let avail_w = container.width - config.fit_margin_x;
    let avail_h = container.height - config.fit_margin_y;
    let valid = canvas.width.is_finite()
        && canvas.height.is_finite()
        && canvas.width > 0.0
        && canvas.height > 0.0
        && avail_w.is_finite()
        && avail_h.is_finite();
    if !valid {
        log::debug!("fit_to_container: degenerate input {canvas:?} in {container:?}");
        return 100;
    }

    let width_ratio = avail_w / canvas.width;
    let height_ratio = avail_h / canvas.height;
    let fit_scale = width_ratio.min(height_ratio).min(1.0);
    // Guard against 0.29 * 100 = 28.999...
    let percent = (fit_scale * 100.0 + 1e-9).floor();
    let floor = f64::from(config.fit_floor_zoom);
    percent.max(floor).min(f64::from(config.max_zoom)) as u32
}

/// Map a logical rect to screen pixels for a canvas drawn at `origin`.
pub fn to_viewport_rect(logical: Rect, origin: Point, scale: f64) -> Rect {
    Rect::new(
        origin.x + logical.x0 * scale,
        origin.y + logical.y0 * scale,
        origin.x + logical.x1 * scale,
        origin.y + logical.y1 * scale,
    )
}

#[derive(Debug, Clone, Copy)]
struct TrackedRect {
    rect: Rect,
    computed_at: Instant,
}

/// Caches per-element viewport rects and limits how often they change.
///
/// A rect is recomputed at most once per frame interval, and only when one of
/// its dimensions moved by more than the epsilon.
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    entries: HashMap<ElementId, TrackedRect>,
    interval: Duration,
    epsilon: f64,
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl ViewportTracker {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            entries: HashMap::new(),
            interval: Duration::from_millis(config.frame_interval_ms),
            epsilon: config.viewport_epsilon,
        }
    }

    /// Offer a new logical rect. Returns the new viewport rect if it was
    /// recomputed, `None` if the cached one still stands.
    pub fn update(
        &mut self,
        id: ElementId,
        logical: Rect,
        origin: Point,
        scale: f64,
        now: Instant,
    ) -> Option<Rect> {
        let target = to_viewport_rect(logical, origin, scale);
        if let Some(tracked) = self.entries.get(&id) {
            if now.saturating_duration_since(tracked.computed_at) < self.interval {
                return None;
            }
            if !self.differs(tracked.rect, target) {
                return None;
            }
        }
        self.entries.insert(id, TrackedRect { rect: target, computed_at: now });
        Some(target)
    }

    /// Last computed viewport rect.
    pub fn get(&self, id: ElementId) -> Option<Rect> {
        self.entries.get(&id).map(|t| t.rect)
    }

    pub fn forget(&mut self, id: ElementId) {
        self.entries.remove(&id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn differs(&self, a: Rect, b: Rect) -> bool {
        (a.x0 - b.x0).abs() > self.epsilon
            || (a.y0 - b.y0).abs() > self.epsilon
            || (a.width() - b.width()).abs() > self.epsilon
            || (a.height() - b.height()).abs() > self.epsilon
    }
}
