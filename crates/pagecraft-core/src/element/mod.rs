//! Element definitions for the design surface.

mod style;
mod text;

pub use style::{SerializableColor, ShapeStyle};
pub use text::{
    ApproximateTextMeasurer, FontFamily, TextAlign, TextFormat, TextMeasurer, TextProps,
};

use crate::config::{MIN_HEIGHT, MIN_WIDTH};
use crate::document::CanvasSize;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Arrow-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowProps {
    #[serde(default)]
    pub style: ShapeStyle,
    #[serde(default)]
    pub start_head: bool,
    #[serde(default = "default_true")]
    pub end_head: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ArrowProps {
    fn default() -> Self {
        Self {
            style: ShapeStyle::default(),
            start_head: false,
            end_head: true,
        }
    }
}

/// Image-specific fields. The pixels live with the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageProps {
    /// Opaque reference (URL, asset key) owned by the host.
    pub source: String,
    pub natural_width: f64,
    pub natural_height: f64,
}

/// Element type together with its type-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    Text(TextProps),
    Rectangle(ShapeStyle),
    Circle(ShapeStyle),
    Line(ShapeStyle),
    Arrow(ArrowProps),
    Image(ImageProps),
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "text",
            ElementKind::Rectangle(_) => "rectangle",
            ElementKind::Circle(_) => "circle",
            ElementKind::Line(_) => "line",
            ElementKind::Arrow(_) => "arrow",
            ElementKind::Image(_) => "image",
        }
    }

    /// Shape style for kinds that have a border and fill.
    pub fn shape_style_mut(&mut self) -> Option<&mut ShapeStyle> {
        match self {
            ElementKind::Rectangle(s) | ElementKind::Circle(s) | ElementKind::Line(s) => Some(s),
            ElementKind::Arrow(a) => Some(&mut a.style),
            ElementKind::Text(_) | ElementKind::Image(_) => None,
        }
    }
}

/// A positioned element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default = "Uuid::new_v4")]
    pub(crate) id: ElementId,
    /// Logical top-left x.
    pub x: f64,
    /// Logical top-left y.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Locked elements cannot be dragged or resized.
    #[serde(default)]
    pub locked: bool,
    /// Set by the factories, cleared on the first edit.
    #[serde(default)]
    pub is_new: bool,
    pub kind: ElementKind,
}

impl Element {
    /// Default size of a new rectangle.
    pub const DEFAULT_RECT_SIZE: Size = Size::new(200.0, 120.0);
    /// Default diameter of a new circle.
    pub const DEFAULT_CIRCLE_DIAMETER: f64 = 150.0;
    /// Default length of a new line or arrow.
    pub const DEFAULT_LINE_LENGTH: f64 = 200.0;
    /// Default width of a new text box.
    pub const DEFAULT_TEXT_WIDTH: f64 = 300.0;

    /// Create an element with explicit geometry.
    pub fn new(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            locked: false,
            is_new: false,
            kind,
        }
    }

    /// Place `kind` at the center of the canvas with the given size.
    fn centered(kind: ElementKind, canvas: CanvasSize, size: Size) -> Self {
        let center = canvas.center();
        let mut element = Self::new(
            kind,
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        );
        element.is_new = true;
        element
    }

    /// New text element centered on the canvas, sized by `measurer`.
    pub fn text(canvas: CanvasSize, props: TextProps, measurer: &dyn TextMeasurer) -> Self {
        let width = Self::DEFAULT_TEXT_WIDTH.min(canvas.width).max(MIN_WIDTH);
        let height = measurer.measure_height(&props, width).max(MIN_HEIGHT);
        Self::centered(ElementKind::Text(props), canvas, Size::new(width, height))
    }

    pub fn rectangle(canvas: CanvasSize) -> Self {
        Self::centered(
            ElementKind::Rectangle(ShapeStyle::default()),
            canvas,
            Self::DEFAULT_RECT_SIZE,
        )
    }

    pub fn circle(canvas: CanvasSize) -> Self {
        let d = Self::DEFAULT_CIRCLE_DIAMETER;
        Self::centered(
            ElementKind::Circle(ShapeStyle::default()),
            canvas,
            Size::new(d, d),
        )
    }

    pub fn line(canvas: CanvasSize) -> Self {
        Self::centered(
            ElementKind::Line(ShapeStyle::default()),
            canvas,
            Size::new(Self::DEFAULT_LINE_LENGTH, MIN_HEIGHT),
        )
    }

    pub fn arrow(canvas: CanvasSize) -> Self {
        Self::centered(
            ElementKind::Arrow(ArrowProps::default()),
            canvas,
            Size::new(Self::DEFAULT_LINE_LENGTH, MIN_HEIGHT),
        )
    }

    /// New image centered on the canvas, scaled down to fit half of it.
    pub fn image(canvas: CanvasSize, source: impl Into<String>, natural: Size) -> Self {
        let natural_w = if natural.width > 0.0 { natural.width } else { MIN_WIDTH };
        let natural_h = if natural.height > 0.0 { natural.height } else { MIN_HEIGHT };
        let fit = (canvas.width * 0.5 / natural_w)
            .min(canvas.height * 0.5 / natural_h)
            .min(1.0);
        let size = Size::new(
            (natural_w * fit).max(MIN_WIDTH),
            (natural_h * fit).max(MIN_HEIGHT),
        );
        Self::centered(
            ElementKind::Image(ImageProps {
                source: source.into(),
                natural_width: natural_w,
                natural_height: natural_h,
            }),
            canvas,
            size,
        )
    }

    /// Builder-style override of the generated id (hosts restoring records).
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounding box in logical coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn text_props(&self) -> Option<&TextProps> {
        match &self.kind {
            ElementKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn text_props_mut(&mut self) -> Option<&mut TextProps> {
        match &mut self.kind {
            ElementKind::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Font size for text elements.
    pub fn font_size(&self) -> Option<f64> {
        self.text_props().map(|t| t.font_size)
    }

    /// Mark the element as edited.
    pub(crate) fn touch(&mut self) {
        self.is_new = false;
    }
}
