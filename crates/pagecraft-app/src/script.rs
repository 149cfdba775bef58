//! Gesture scripts: a document plus the pointer events a user would produce.

use kurbo::{Point, Rect};
use pagecraft_core::{
    AlignmentGuides, CanvasSize, EditMode, Editor, EditorConfig, Element, Modifiers,
    ResizeDirection, ShapeStyle, TextFormat,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pixel size of the host's canvas container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

/// A script file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Script {
    pub canvas: CanvasSize,
    /// Explicit zoom. Applied after fitting to `container`.
    pub zoom: Option<u32>,
    pub container: Option<ContainerSize>,
    pub elements: Vec<Element>,
    pub steps: Vec<Step>,
}

/// One host event. Pointer coordinates are screen pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Select {
        id: Uuid,
        #[serde(default)]
        additive: bool,
    },
    SelectCanvas {
        selected: bool,
    },
    ClickOutside,
    ClearSelection,
    SetMode {
        mode: EditMode,
    },
    BeginDrag {
        id: Uuid,
        x: f64,
        y: f64,
    },
    UpdateDrag {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
    },
    EndDrag,
    CancelDrag,
    BeginResize {
        id: Uuid,
        direction: ResizeDirection,
        x: f64,
        y: f64,
    },
    UpdateResize {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
    },
    EndResize,
    CancelResize,
    /// Buffered move, applied on the next `tick`.
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
    },
    Tick,
    SetZoom {
        zoom: u32,
    },
    ZoomIn,
    ZoomOut,
    FitToContainer {
        width: f64,
        height: f64,
    },
    DeleteElement {
        id: Uuid,
    },
    DeleteSelected,
    SetLocked {
        id: Uuid,
        locked: bool,
    },
    UpdateTextFormat {
        id: Uuid,
        format: TextFormat,
    },
    UpdateShapeStyle {
        id: Uuid,
        style: ShapeStyle,
    },
}

fn modifiers(shift: bool, alt: bool) -> Modifiers {
    Modifiers {
        shift,
        alt,
        ..Modifiers::NONE
    }
}

/// Selection as reported in the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionOutput {
    pub elements: Vec<Uuid>,
    pub canvas: bool,
    pub mode: EditMode,
}

/// Where an element ends up on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportEntry {
    pub id: Uuid,
    pub rect: Rect,
}

/// State after the last step.
#[derive(Debug, Clone, Serialize)]
pub struct Output {
    pub zoom: u32,
    pub elements: Vec<Element>,
    pub guides: AlignmentGuides,
    pub selection: SelectionOutput,
    pub viewport: Vec<ViewportEntry>,
}

/// Top-left of a canvas centered in `container` at `scale`.
fn canvas_origin(canvas: CanvasSize, container: Option<ContainerSize>, scale: f64) -> Point {
    match container {
        Some(c) => Point::new(
            ((c.width - canvas.width * scale) / 2.0).max(0.0),
            ((c.height - canvas.height * scale) / 2.0).max(0.0),
        ),
        None => Point::ZERO,
    }
}

/// Play `script` against a fresh editor.
pub fn run(script: &Script, config: EditorConfig) -> Output {
    let mut editor = Editor::new(script.canvas, config);
    for element in &script.elements {
        editor.add_element(element.clone());
    }
    if let Some(container) = script.container {
        editor.fit_to_container(container.width, container.height);
    }
    if let Some(zoom) = script.zoom {
        editor.set_zoom(zoom);
    }

    log::debug!(
        "running {} steps over {} elements",
        script.steps.len(),
        script.elements.len()
    );
    for (index, step) in script.steps.iter().enumerate() {
        log::trace!("step {index}: {step:?}");
        apply(&mut editor, step);
    }

    let origin = canvas_origin(editor.canvas(), script.container, editor.scale());
    let viewport = editor
        .elements()
        .filter_map(|e| {
            editor
                .viewport_rect(e.id(), origin)
                .map(|rect| ViewportEntry { id: e.id(), rect })
        })
        .collect();

    Output {
        zoom: editor.zoom(),
        elements: editor.elements().cloned().collect(),
        guides: editor.alignment_guides().clone(),
        selection: SelectionOutput {
            elements: editor.selection().selected().to_vec(),
            canvas: editor.selection().is_canvas_selected(),
            mode: editor.mode(),
        },
        viewport,
    }
}

fn apply(editor: &mut Editor, step: &Step) {
    match step {
        Step::Select { id, additive } => editor.select(*id, *additive),
        Step::SelectCanvas { selected } => editor.select_canvas(*selected),
        Step::ClickOutside => editor.click_outside(),
        Step::ClearSelection => editor.clear_selection(),
        Step::SetMode { mode } => editor.set_mode(*mode),
        Step::BeginDrag { id, x, y } => editor.begin_drag(*id, *x, *y),
        Step::UpdateDrag { x, y, shift, alt } => editor.update_drag(*x, *y, modifiers(*shift, *alt)),
        Step::EndDrag => editor.end_drag(),
        Step::CancelDrag => editor.cancel_drag(),
        Step::BeginResize { id, direction, x, y } => editor.begin_resize(*id, *direction, *x, *y),
        Step::UpdateResize { x, y, shift, alt } => {
            editor.update_resize(*x, *y, modifiers(*shift, *alt))
        }
        Step::EndResize => editor.end_resize(),
        Step::CancelResize => editor.cancel_resize(),
        Step::PointerMove { x, y, shift, alt } => {
            editor.queue_pointer_move(*x, *y, modifiers(*shift, *alt))
        }
        Step::Tick => {
            editor.tick();
        }
        Step::SetZoom { zoom } => editor.set_zoom(*zoom),
        Step::ZoomIn => editor.zoom_in(),
        Step::ZoomOut => editor.zoom_out(),
        Step::FitToContainer { width, height } => editor.fit_to_container(*width, *height),
        Step::DeleteElement { id } => editor.delete_element(*id),
        Step::DeleteSelected => {
            editor.delete_selected();
        }
        Step::SetLocked { id, locked } => editor.set_locked(*id, *locked),
        Step::UpdateTextFormat { id, format } => editor.update_text_format(*id, format),
        Step::UpdateShapeStyle { id, style } => editor.update_shape_style(*id, style.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const A: &str = "00000000-0000-4000-8000-00000000000a";
    const B: &str = "00000000-0000-4000-8000-00000000000b";

    fn rect_json(id: &str, x: f64, y: f64) -> serde_json::Value {
        json!({
            "id": id,
            "x": x, "y": y, "width": 50.0, "height": 30.0,
            "kind": {"type": "rectangle", "border_color": {"r": 0, "g": 0, "b": 0, "a": 255}, "border_width": 2.0}
        })
    }

    fn script(value: serde_json::Value) -> Script {
        serde_json::from_value(value).unwrap()
    }

    fn unsnapped() -> EditorConfig {
        EditorConfig {
            snap_threshold: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_multi_select_drag() {
        let script = script(json!({
            "elements": [rect_json(A, 10.0, 10.0), rect_json(B, 50.0, 10.0)],
            "steps": [
                {"op": "select", "id": A},
                {"op": "select", "id": B, "additive": true},
                {"op": "begin_drag", "id": A, "x": 0, "y": 0},
                {"op": "update_drag", "x": 20, "y": 5},
                {"op": "end_drag"}
            ]
        }));
        let output = run(&script, unsnapped());
        assert_eq!(output.elements[0].position(), Point::new(30.0, 15.0));
        assert_eq!(output.elements[1].position(), Point::new(70.0, 15.0));
        assert!(output.guides.is_empty());
        assert_eq!(output.selection.elements.len(), 2);
    }

    #[test]
    fn test_guides_reported_mid_gesture() {
        let script = script(json!({
            "canvas": {"width": 1000, "height": 800},
            "elements": [rect_json(A, 300.0, 300.0)],
            "steps": [
                {"op": "begin_drag", "id": A, "x": 0, "y": 0},
                {"op": "pointer_move", "x": 100, "y": 0},
                {"op": "pointer_move", "x": 188, "y": 0},
                {"op": "tick"}
            ]
        }));
        let output = run(&script, EditorConfig::default());
        // Left edge 488 snaps to the canvas center at 500
        assert!((output.elements[0].x - 500.0).abs() < 1e-9);
        assert_eq!(output.guides.vertical, vec![500.0]);
    }

    #[test]
    fn test_unknown_ids_skipped() {
        let script = script(json!({
            "elements": [rect_json(A, 10.0, 10.0)],
            "steps": [
                {"op": "select", "id": B},
                {"op": "begin_drag", "id": B, "x": 0, "y": 0},
                {"op": "update_drag", "x": 100, "y": 100},
                {"op": "end_drag"}
            ]
        }));
        let output = run(&script, EditorConfig::default());
        assert_eq!(output.elements[0].position(), Point::new(10.0, 10.0));
        assert!(output.selection.elements.is_empty());
    }

    #[test]
    fn test_container_fit_and_explicit_zoom() {
        let fitted = run(
            &script(json!({"container": {"width": 960, "height": 540}})),
            EditorConfig::default(),
        );
        assert_eq!(fitted.zoom, 42);

        let zoomed = run(
            &script(json!({"container": {"width": 960, "height": 540}, "zoom": 150})),
            EditorConfig::default(),
        );
        assert_eq!(zoomed.zoom, 150);
    }

    #[test]
    fn test_text_resize_script() {
        let script = script(json!({
            "elements": [{
                "id": A, "x": 100, "y": 100, "width": 200, "height": 50,
                "kind": {"type": "text", "content": "Title", "font_size": 36}
            }],
            "steps": [
                {"op": "begin_resize", "id": A, "direction": "se", "x": 0, "y": 0},
                {"op": "update_resize", "x": 100, "y": 0},
                {"op": "end_resize"}
            ]
        }));
        let output = run(&script, unsnapped());
        assert_eq!(output.elements[0].font_size(), Some(54.0));
        assert!((output.elements[0].width - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_viewport_entries_centered() {
        let script = script(json!({
            "canvas": {"width": 1000, "height": 500},
            "container": {"width": 1080, "height": 1080},
            "elements": [rect_json(A, 0.0, 0.0)]
        }));
        let output = run(&script, EditorConfig::default());
        assert_eq!(output.zoom, 100);
        assert_eq!(output.viewport[0].rect, Rect::new(40.0, 290.0, 90.0, 320.0));
    }
}
