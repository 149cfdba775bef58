//! Pagecraft Core Library
//!
//! Canvas geometry engine for the pagecraft design surface: element records,
//! zoom and coordinate transforms, alignment snapping, and the drag and resize
//! gestures a host UI drives through [`Editor`].

pub mod config;
pub mod document;
pub mod drag;
pub mod editor;
pub mod element;
pub mod error;
pub mod handles;
pub mod input;
pub mod resize;
pub mod selection;
pub mod snap;
pub mod viewport;

pub use config::EditorConfig;
pub use document::{CanvasSize, Document};
pub use drag::DragController;
pub use editor::{Editor, HitTarget};
pub use element::{Element, ElementId, ElementKind, ShapeStyle, TextFormat, TextMeasurer, TextProps};
pub use error::{EditorError, EditorResult};
pub use handles::{HandleVisibility, ResizeDirection};
pub use input::{Modifiers, MoveCoalescer, PointerSample};
pub use resize::ResizeController;
pub use selection::{CanvasSelection, EditMode, ElementSelection, SelectionStore};
pub use snap::{AlignmentGuides, SnapEngine, SnapPolicy, SnapResult};
pub use viewport::{Viewport, ViewportTracker};
