//! Resize gesture: edge and corner handles, aspect lock, text font scaling.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::element::{ElementId, TextMeasurer};
use crate::error::{EditorError, EditorResult};
use crate::handles::ResizeDirection;
use crate::input::Modifiers;
use crate::snap::{AlignmentGuides, Axis, SnapEngine};
use kurbo::{Point, Rect, Vec2};

/// Geometry captured at gesture start. All deltas apply to this.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    pub id: ElementId,
    pub direction: ResizeDirection,
    pub start_pointer: Point,
    pub original: Rect,
    /// Width over height, with the height clamped to at least 1.
    pub aspect: f64,
    pub original_font_size: Option<f64>,
}

#[derive(Debug, Clone, Default)]
enum ResizeState {
    #[default]
    Idle,
    Resizing(ResizeSession),
}

/// Outcome of one resize step, before it is written to the element.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeOutcome {
    pub bounds: Rect,
    pub font_size: Option<f64>,
    pub guides: AlignmentGuides,
}

/// Resize state machine: `Idle -> Resizing(direction) -> Idle`.
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    state: ResizeState,
}

/// Everything a resize step reads besides the document.
pub struct ResizeContext<'a> {
    pub scale: f64,
    pub engine: &'a SnapEngine,
    pub config: &'a EditorConfig,
    pub measurer: &'a dyn TextMeasurer,
    /// Elements that never act as snap targets, typically the selection.
    pub exclude: &'a [ElementId],
}

fn at_least(value: f64, min: f64) -> f64 {
    if value.is_finite() { value.max(min) } else { min }
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ResizeState::Resizing(_))
    }

    pub fn session(&self) -> Option<&ResizeSession> {
        match &self.state {
            ResizeState::Resizing(session) => Some(session),
            ResizeState::Idle => None,
        }
    }

    pub fn begin(
        &mut self,
        document: &Document,
        id: ElementId,
        direction: ResizeDirection,
        pointer: Point,
        config: &EditorConfig,
    ) -> EditorResult<()> {
        let element = document.get(id).ok_or(EditorError::UnknownElement(id))?;
        if element.locked {
            return Err(EditorError::ModeViolation("element is locked"));
        }

        let mut original = element.bounds();
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(element.width) || !valid(element.height) {
            EditorError::InvalidGeometry {
                id,
                width: element.width,
                height: element.height,
            }
            .log("begin_resize");
            let (w, h) = config.clamp_size(element.width, element.height);
            original = Rect::from_origin_size(element.position(), (w, h));
        }

        let aspect = original.width() / original.height().max(1.0);
        log::debug!("resize begin: {id} {direction:?} from {original:?}");
        self.state = ResizeState::Resizing(ResizeSession {
            id,
            direction,
            start_pointer: pointer,
            original,
            aspect,
            original_font_size: element.font_size(),
        });
        Ok(())
    }

    /// Apply the pointer position to the element being resized.
    pub fn update(
        &mut self,
        document: &mut Document,
        pointer: Point,
        modifiers: Modifiers,
        ctx: &ResizeContext<'_>,
        guides: &mut AlignmentGuides,
    ) -> EditorResult<()> {
        let ResizeState::Resizing(session) = &self.state else {
            return Err(EditorError::NotActive);
        };
        if !ctx.scale.is_finite() || ctx.scale <= 0.0 {
            return Err(EditorError::InvalidInput("zoom scale must be positive"));
        }
        if !pointer.is_finite() {
            return Err(EditorError::InvalidInput("non-finite pointer position"));
        }

        let delta = (pointer - session.start_pointer) / ctx.scale;
        let siblings: Vec<Rect> = document
            .siblings(ctx.exclude)
            .filter(|e| e.id() != session.id)
            .map(|e| e.bounds())
            .collect();
        let mut outcome = compute_resize(
            session,
            delta,
            modifiers.is_symmetric(),
            &siblings,
            document,
            ctx,
        );

        let element = document
            .get_mut(session.id)
            .ok_or(EditorError::UnknownElement(session.id))?;
        if let (Some(size), Some(props)) = (outcome.font_size, element.text_props_mut()) {
            props.font_size = size;
        }

        // Layout decides a text element's height
        if let Some(props) = element.text_props() {
            let measured = at_least(
                ctx.measurer.measure_height(props, outcome.bounds.width()),
                ctx.config.min_height,
            );
            outcome.bounds = anchor_height(outcome.bounds, measured, session, modifiers.is_symmetric());
        }

        element.x = outcome.bounds.x0;
        element.y = outcome.bounds.y0;
        element.width = outcome.bounds.width();
        element.height = outcome.bounds.height();
        element.touch();
        log::trace!("resize update: {:?} -> {:?}", session.direction, outcome.bounds);

        *guides = outcome.guides;
        Ok(())
    }

    pub fn end(&mut self, guides: &mut AlignmentGuides) -> EditorResult<ResizeSession> {
        match std::mem::take(&mut self.state) {
            ResizeState::Resizing(session) => {
                guides.clear();
                log::debug!("resize end: {}", session.id);
                Ok(session)
            }
            ResizeState::Idle => Err(EditorError::NotActive),
        }
    }

    /// Abort the gesture and restore the original geometry and font size.
    pub fn cancel(&mut self, document: &mut Document, guides: &mut AlignmentGuides) -> EditorResult<()> {
        let ResizeState::Resizing(session) = std::mem::take(&mut self.state) else {
            return Err(EditorError::NotActive);
        };
        if let Some(element) = document.get_mut(session.id) {
            element.x = session.original.x0;
            element.y = session.original.y0;
            element.width = session.original.width();
            element.height = session.original.height();
            if let (Some(size), Some(props)) = (session.original_font_size, element.text_props_mut()) {
                props.font_size = size;
            }
        }
        guides.clear();
        log::debug!("resize cancelled: {}", session.id);
        Ok(())
    }

    /// Drop the gesture if it targets `id` (the element was deleted).
    pub fn forget(&mut self, id: ElementId) {
        if self.session().is_some_and(|s| s.id == id) {
            self.state = ResizeState::Idle;
        }
    }
}

/// Compute new bounds for `session` given the logical pointer offset.
pub fn compute_resize(
    session: &ResizeSession,
    delta: Vec2,
    symmetric: bool,
    siblings: &[Rect],
    document: &Document,
    ctx: &ResizeContext<'_>,
) -> ResizeOutcome {
    if session.direction.is_corner() {
        corner_resize(session, delta, symmetric, siblings, document, ctx)
    } else {
        edge_resize(session, delta, symmetric, siblings, document, ctx)
    }
}

/// One dimension of an edge resize.
///
/// `sign` is -1 when the start edge moves, 1 when the end edge moves.
fn resize_span(
    start: f64,
    end: f64,
    offset: f64,
    sign: f64,
    min: f64,
    symmetric: bool,
    snap: impl Fn(f64) -> (f64, Vec<f64>),
) -> (f64, f64, Vec<f64>) {
    let length = end - start;
    if symmetric {
        let center = (start + end) / 2.0;
        let size = at_least(length + 2.0 * sign * offset, min);
        return (center - size / 2.0, size, Vec::new());
    }
    if sign > 0.0 {
        let (edge, guides) = snap(end + offset);
        let size = at_least(edge - start, min);
        (start, size, guides)
    } else {
        let (edge, guides) = snap(start + offset);
        let size = at_least(end - edge, min);
        (end - size, size, guides)
    }
}

fn snapper<'a>(
    axis: Axis,
    siblings: &'a [Rect],
    document: &'a Document,
    engine: &'a SnapEngine,
) -> impl Fn(f64) -> (f64, Vec<f64>) + 'a {
    move |value| {
        let snap = engine.snap_edge(axis, value, siblings, document.canvas);
        (value + snap.shift, snap.guides)
    }
}

fn edge_resize(
    session: &ResizeSession,
    delta: Vec2,
    symmetric: bool,
    siblings: &[Rect],
    document: &Document,
    ctx: &ResizeContext<'_>,
) -> ResizeOutcome {
    let o = session.original;
    let mut bounds = o;
    let mut guides = AlignmentGuides::default();

    let sx = session.direction.x_sign();
    if sx != 0.0 {
        let snap = snapper(Axis::X, siblings, document, ctx.engine);
        let (x, w, g) = resize_span(o.x0, o.x1, delta.x, sx, ctx.config.min_width, symmetric, snap);
        bounds.x0 = x;
        bounds.x1 = x + w;
        guides.extend(Axis::X, g);
    }

    let sy = session.direction.y_sign();
    if sy != 0.0 {
        let snap = snapper(Axis::Y, siblings, document, ctx.engine);
        let (y, h, g) = resize_span(o.y0, o.y1, delta.y, sy, ctx.config.min_height, symmetric, snap);
        bounds.y0 = y;
        bounds.y1 = y + h;
        guides.extend(Axis::Y, g);
    }

    ResizeOutcome {
        bounds,
        font_size: session.original_font_size,
        guides,
    }
}

fn corner_resize(
    session: &ResizeSession,
    delta: Vec2,
    symmetric: bool,
    siblings: &[Rect],
    document: &Document,
    ctx: &ResizeContext<'_>,
) -> ResizeOutcome {
    let o = session.original;
    let aspect = session.aspect;
    let sx = session.direction.x_sign();
    let sy = session.direction.y_sign();
    let factor = if symmetric { 2.0 } else { 1.0 };
    let ow = o.width();
    let oh = o.height().max(1.0);

    let width_from_x = ow + factor * sx * delta.x;
    let height_from_y = oh + factor * sy * delta.y;
    let x_dominant = (width_from_x / ow - 1.0).abs() >= (height_from_y / oh - 1.0).abs();

    let mut guides = AlignmentGuides::default();
    let mut width = if x_dominant {
        if symmetric {
            width_from_x
        } else {
            let moving = if sx > 0.0 { o.x0 + width_from_x } else { o.x1 - width_from_x };
            let snap = ctx.engine.snap_edge(Axis::X, moving, siblings, document.canvas);
            guides.extend(Axis::X, snap.guides);
            let edge = moving + snap.shift;
            if sx > 0.0 { edge - o.x0 } else { o.x1 - edge }
        }
    } else {
        let height = if symmetric {
            height_from_y
        } else {
            let moving = if sy > 0.0 { o.y0 + height_from_y } else { o.y1 - height_from_y };
            let snap = ctx.engine.snap_edge(Axis::Y, moving, siblings, document.canvas);
            guides.extend(Axis::Y, snap.guides);
            let edge = moving + snap.shift;
            if sy > 0.0 { edge - o.y0 } else { o.y1 - edge }
        };
        height * aspect
    };

    // Raise width until both minimums hold at this aspect
    let min_width = ctx.config.min_width.max(ctx.config.min_height * aspect);
    width = at_least(width, min_width);
    let height = width / aspect;

    let (x0, y0) = if symmetric {
        let c = o.center();
        (c.x - width / 2.0, c.y - height / 2.0)
    } else {
        (
            if sx > 0.0 { o.x0 } else { o.x1 - width },
            if sy > 0.0 { o.y0 } else { o.y1 - height },
        )
    };

    let font_size = session.original_font_size.map(|size| {
        let scaled = (size * width / ow).round();
        at_least(scaled, ctx.config.min_font_size)
    });

    ResizeOutcome {
        bounds: Rect::new(x0, y0, x0 + width, y0 + height),
        font_size,
        guides,
    }
}

/// Replace the height of `bounds` with `height`, keeping the edge opposite the
/// dragged handle in place.
fn anchor_height(bounds: Rect, height: f64, session: &ResizeSession, symmetric: bool) -> Rect {
    let y0 = if symmetric && session.direction.y_sign() != 0.0 {
        bounds.center().y - height / 2.0
    } else if session.direction.y_sign() < 0.0 {
        bounds.y1 - height
    } else {
        bounds.y0
    };
    Rect::new(bounds.x0, y0, bounds.x1, y0 + height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CanvasSize;
    use crate::element::{ApproximateTextMeasurer, Element, ElementKind, ShapeStyle, TextProps};
    use crate::snap::SnapPolicy;

    const EPS: f64 = 1e-6;

    struct FixedMeasurer(f64);

    impl TextMeasurer for FixedMeasurer {
        fn measure_height(&self, _props: &TextProps, _width: f64) -> f64 {
            self.0
        }
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::new(ElementKind::Rectangle(ShapeStyle::default()), x, y, w, h)
    }

    fn run(
        doc: &mut Document,
        id: ElementId,
        direction: ResizeDirection,
        to: Point,
        modifiers: Modifiers,
        engine: &SnapEngine,
        measurer: &dyn TextMeasurer,
    ) -> AlignmentGuides {
        let config = EditorConfig::default();
        let ctx = ResizeContext {
            scale: 1.0,
            engine,
            config: &config,
            measurer,
            exclude: &[],
        };
        let mut guides = AlignmentGuides::default();
        let mut resize = ResizeController::new();
        resize.begin(doc, id, direction, Point::ZERO, &config).unwrap();
        resize.update(doc, to, modifiers, &ctx, &mut guides).unwrap();
        guides
    }

    fn no_snap() -> SnapEngine {
        SnapEngine::new(0.0, SnapPolicy::Nearest)
    }

    #[test]
    fn test_east_edge_changes_width_only() {
        let mut doc = Document::default();
        let id = doc.add(rect(100.0, 100.0, 200.0, 100.0));
        run(&mut doc, id, ResizeDirection::E, Point::new(50.0, 30.0), Modifiers::NONE, &no_snap(), &ApproximateTextMeasurer);
        let e = doc.get(id).unwrap();
        assert_eq!(e.bounds(), Rect::new(100.0, 100.0, 350.0, 200.0));
    }

    #[test]
    fn test_west_edge_anchors_right() {
        let mut doc = Document::default();
        let id = doc.add(rect(100.0, 100.0, 200.0, 100.0));
        run(&mut doc, id, ResizeDirection::W, Point::new(500.0, 0.0), Modifiers::NONE, &no_snap(), &ApproximateTextMeasurer);
        let e = doc.get(id).unwrap();
        assert!((e.width - 50.0).abs() < EPS);
        assert!((e.x + e.width - 300.0).abs() < EPS);
    }

    #[test]
    fn test_north_edge_minimum() {
        let mut doc = Document::default();
        let id = doc.add(rect(100.0, 100.0, 200.0, 100.0));
        run(&mut doc, id, ResizeDirection::N, Point::new(0.0, 300.0), Modifiers::NONE, &no_snap(), &ApproximateTextMeasurer);
        let e = doc.get(id).unwrap();
        assert!((e.height - 20.0).abs() < EPS);
        assert!((e.y - 180.0).abs() < EPS);
    }

    #[test]
    fn test_corner_preserves_aspect() {
        let mut doc = Document::default();
        let id = doc.add(rect(100.0, 100.0, 200.0, 100.0));
        run(&mut doc, id, ResizeDirection::SE, Point::new(37.0, 11.0), Modifiers::NONE, &no_snap(), &ApproximateTextMeasurer);
        let e = doc.get(id).unwrap();
        assert!((e.width - 237.0).abs() < EPS);
        assert!((e.width / e.height - 2.0).abs() < EPS);
        assert_eq!(e.position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_corner_dominant_axis_is_vertical() {
        let mut doc = Document::default();
        let id = doc.add(rect(400.0, 400.0, 200.0, 100.0));
        run(&mut doc, id, ResizeDirection::NW, Point::new(-10.0, -50.0), Modifiers::NONE, &no_snap(), &ApproximateTextMeasurer);
        let e = doc.get(id).unwrap();
        assert!((e.height - 150.0).abs() < EPS);
        assert!((e.width - 300.0).abs() < EPS);
        // Opposite corner stays put
        assert!((e.x + e.width - 600.0).abs() < EPS);
        assert!((e.y + e.height - 500.0).abs() < EPS);
    }

    #[test]
    fn test_corner_minimum_keeps_aspect() {
        let mut doc = Document::default();
        let id = doc.add(rect(100.0, 100.0, 100.0, 50.0));
        run(&mut doc, id, ResizeDirection::SE, Point::new(-500.0, -500.0), Modifiers::NONE, &no_snap(), &ApproximateTextMeasurer);
        let e = doc.get(id).unwrap();
        assert!(e.width >= 50.0 && e.height >= 20.0);
        assert!((e.width / e.height - 2.0).abs() < EPS);
    }

    #[test]
    fn test_tall_element_minimum() {
        let mut doc = Document::default();
        let id = doc.add(rect(100.0, 100.0, 60.0, 300.0));
        run(&mut doc, id, ResizeDirection::SW, Point::new(1000.0, -1000.0), Modifiers::NONE, &no_snap(), &ApproximateTextMeasurer);
        let e = doc.get(id).unwrap();
        assert!(e.width >= 50.0 - EPS);
        assert!(e.height >= 20.0 - EPS);
        assert!((e.width / e.height - 0.2).abs() < EPS);
    }

    #[test]
    fn test_text_corner_scales_font() {
        let mut doc = Document::default();
        let props = TextProps::new("Heading").with_font_size(36.0);
        let id = doc.add(Element::new(ElementKind::Text(props), 100.0, 100.0, 200.0, 50.0));
        run(&mut doc, id, ResizeDirection::SE, Point::new(100.0, 0.0), Modifiers::NONE, &no_snap(), &FixedMeasurer(70.0));
        let e = doc.get(id).unwrap();
        assert!((e.width - 300.0).abs() < EPS);
        assert_eq!(e.font_size(), Some(54.0));
        // Measured height wins over the geometric 75
        assert!((e.height - 70.0).abs() < EPS);
    }

    #[test]
    fn test_text_font_floor() {
        let mut doc = Document::default();
        let props = TextProps::new("x").with_font_size(10.0);
        let id = doc.add(Element::new(ElementKind::Text(props), 100.0, 100.0, 400.0, 40.0));
        run(&mut doc, id, ResizeDirection::SE, Point::new(-350.0, 0.0), Modifiers::NONE, &no_snap(), &FixedMeasurer(20.0));
        assert_eq!(doc.get(id).unwrap().font_size(), Some(8.0));
    }

    #[test]
    fn test_text_edge_keeps_font_and_anchor() {
        let mut doc = Document::default();
        let props = TextProps::new("Body").with_font_size(24.0);
        let id = doc.add(Element::new(ElementKind::Text(props), 100.0, 300.0, 200.0, 60.0));
        run(&mut doc, id, ResizeDirection::N, Point::new(0.0, -40.0), Modifiers::NONE, &no_snap(), &FixedMeasurer(5.0));
        let e = doc.get(id).unwrap();
        assert_eq!(e.font_size(), Some(24.0));
        // Measured height clamps to the minimum, bottom edge stays
        assert!((e.height - 20.0).abs() < EPS);
        assert!((e.y + e.height - 360.0).abs() < EPS);
    }

    #[test]
    fn test_symmetric_resize_from_center() {
        let mut doc = Document::default();
        let id = doc.add(rect(400.0, 400.0, 200.0, 100.0));
        let modifiers = Modifiers { alt: true, shift: true, ..Default::default() };
        run(&mut doc, id, ResizeDirection::E, Point::new(30.0, 0.0), modifiers, &SnapEngine::default(), &ApproximateTextMeasurer);
        let e = doc.get(id).unwrap();
        assert!((e.width - 260.0).abs() < EPS);
        assert!((e.bounds().center().x - 500.0).abs() < EPS);
    }

    #[test]
    fn test_symmetric_corner_keeps_center() {
        let mut doc = Document::default();
        let id = doc.add(rect(400.0, 400.0, 200.0, 100.0));
        let modifiers = Modifiers { alt: true, shift: true, ..Default::default() };
        let guides = run(&mut doc, id, ResizeDirection::SE, Point::new(30.0, 0.0), modifiers, &SnapEngine::default(), &ApproximateTextMeasurer);
        let e = doc.get(id).unwrap();
        assert!((e.width - 260.0).abs() < EPS);
        assert!((e.width / e.height - 2.0).abs() < EPS);
        assert!((e.bounds().center().x - 500.0).abs() < EPS);
        assert!((e.bounds().center().y - 450.0).abs() < EPS);
        assert!(guides.is_empty());
    }

    #[test]
    fn test_symmetric_corner_minimum_keeps_center() {
        let mut doc = Document::default();
        let id = doc.add(rect(400.0, 400.0, 200.0, 100.0));
        let modifiers = Modifiers { alt: true, shift: true, ..Default::default() };
        run(&mut doc, id, ResizeDirection::NW, Point::new(500.0, 0.0), modifiers, &no_snap(), &ApproximateTextMeasurer);
        let e = doc.get(id).unwrap();
        // 2:1 at the 20 height floor
        assert!((e.width - 50.0).abs() < EPS);
        assert!((e.height - 25.0).abs() < EPS);
        assert!((e.bounds().center().x - 500.0).abs() < EPS);
        assert!((e.bounds().center().y - 450.0).abs() < EPS);
    }

    #[test]
    fn test_symmetric_text_keeps_center() {
        let mut doc = Document::default();
        let props = TextProps::new("Heading").with_font_size(36.0);
        let id = doc.add(Element::new(ElementKind::Text(props), 100.0, 100.0, 200.0, 50.0));
        let modifiers = Modifiers { alt: true, shift: true, ..Default::default() };
        run(&mut doc, id, ResizeDirection::SE, Point::new(30.0, 0.0), modifiers, &no_snap(), &FixedMeasurer(70.0));
        let e = doc.get(id).unwrap();
        assert!((e.width - 260.0).abs() < EPS);
        assert_eq!(e.font_size(), Some(47.0));
        // Measured height grows about the center
        assert!((e.height - 70.0).abs() < EPS);
        assert!((e.bounds().center().x - 200.0).abs() < EPS);
        assert!((e.bounds().center().y - 125.0).abs() < EPS);
    }

    #[test]
    fn test_edge_ignores_excluded() {
        let mut doc = Document::new(CanvasSize::new(1000.0, 800.0));
        let id = doc.add(rect(100.0, 100.0, 200.0, 100.0));
        let other = doc.add(rect(320.0, 600.0, 50.0, 50.0));
        let config = EditorConfig::default();
        let engine = SnapEngine::default();
        let exclude = [id, other];
        let ctx = ResizeContext {
            scale: 1.0,
            engine: &engine,
            config: &config,
            measurer: &ApproximateTextMeasurer,
            exclude: &exclude,
        };
        let mut guides = AlignmentGuides::default();
        let mut resize = ResizeController::new();
        resize.begin(&doc, id, ResizeDirection::E, Point::ZERO, &config).unwrap();
        resize.update(&mut doc, Point::new(12.0, 0.0), Modifiers::NONE, &ctx, &mut guides).unwrap();
        assert!((doc.get(id).unwrap().width - 212.0).abs() < EPS);
        assert!(guides.is_empty());
    }

    #[test]
    fn test_edge_snaps_to_sibling() {
        let mut doc = Document::new(CanvasSize::new(1000.0, 800.0));
        let id = doc.add(rect(100.0, 100.0, 200.0, 100.0));
        doc.add(rect(320.0, 600.0, 50.0, 50.0));
        let guides = run(&mut doc, id, ResizeDirection::E, Point::new(12.0, 0.0), Modifiers::NONE, &SnapEngine::default(), &ApproximateTextMeasurer);
        let e = doc.get(id).unwrap();
        assert!((e.x + e.width - 320.0).abs() < EPS);
        assert_eq!(guides.vertical, vec![320.0]);
        assert!(guides.horizontal.is_empty());
    }

    #[test]
    fn test_zero_height_aspect_guard() {
        let mut doc = Document::default();
        let id = doc.add(rect(100.0, 100.0, 100.0, 0.0));
        let config = EditorConfig::default();
        let mut resize = ResizeController::new();
        resize.begin(&doc, id, ResizeDirection::SE, Point::ZERO, &config).unwrap();
        let session = resize.session().unwrap();
        assert!(session.aspect.is_finite());
        assert!(session.original.height() >= 1.0);
    }

    #[test]
    fn test_cancel_restores() {
        let mut doc = Document::default();
        let props = TextProps::new("Heading").with_font_size(36.0);
        let id = doc.add(Element::new(ElementKind::Text(props), 100.0, 100.0, 200.0, 50.0));
        let config = EditorConfig::default();
        let engine = no_snap();
        let ctx = ResizeContext {
            scale: 1.0,
            engine: &engine,
            config: &config,
            measurer: &ApproximateTextMeasurer,
            exclude: &[],
        };
        let mut guides = AlignmentGuides::default();
        let mut resize = ResizeController::new();
        resize.begin(&doc, id, ResizeDirection::SE, Point::ZERO, &config).unwrap();
        resize.update(&mut doc, Point::new(80.0, 0.0), Modifiers::NONE, &ctx, &mut guides).unwrap();
        resize.cancel(&mut doc, &mut guides).unwrap();

        let e = doc.get(id).unwrap();
        assert_eq!(e.bounds(), Rect::new(100.0, 100.0, 300.0, 150.0));
        assert_eq!(e.font_size(), Some(36.0));
        assert!(!resize.is_active());
    }

    #[test]
    fn test_end_while_idle() {
        let mut resize = ResizeController::new();
        let mut guides = AlignmentGuides::default();
        assert!(matches!(resize.end(&mut guides), Err(EditorError::NotActive)));
    }

    #[test]
    fn test_locked_rejected() {
        let mut doc = Document::default();
        let mut element = rect(0.0, 0.0, 100.0, 100.0);
        element.locked = true;
        let id = doc.add(element);
        let mut resize = ResizeController::new();
        let result = resize.begin(&doc, id, ResizeDirection::E, Point::ZERO, &EditorConfig::default());
        assert!(matches!(result, Err(EditorError::ModeViolation(_))));
    }
}
