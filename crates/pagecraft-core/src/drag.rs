//! Move gesture for one element and the selection moving with it.

use crate::document::Document;
use crate::element::ElementId;
use crate::error::{EditorError, EditorResult};
use crate::snap::{AlignmentGuides, SnapEngine};
use kurbo::{Point, Rect, Vec2};

/// State captured when a drag starts.
///
/// Every update is computed from these originals and the pointer offset since
/// the start, so rounding never accumulates.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// The element under the pointer. It is the only one that snaps.
    pub lead: ElementId,
    /// Pointer position at gesture start, in screen pixels.
    pub start_pointer: Point,
    /// Original top-left of the lead, then of each follower.
    originals: Vec<(ElementId, Point)>,
    /// Logical offset applied by the last update.
    delta: Vec2,
}

impl DragSession {
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// IDs of every element moving with this gesture, lead first.
    pub fn moving(&self) -> Vec<ElementId> {
        self.originals.iter().map(|(id, _)| *id).collect()
    }

    pub fn original_position(&self, id: ElementId) -> Option<Point> {
        self.originals.iter().find(|(e, _)| *e == id).map(|(_, p)| *p)
    }
}

#[derive(Debug, Clone, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Drag state machine: `Idle -> Dragging(lead) -> Idle`.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Start dragging `lead`. `followers` are the other selected elements;
    /// locked or unknown ones are left behind.
    pub fn begin(
        &mut self,
        document: &Document,
        lead: ElementId,
        followers: &[ElementId],
        pointer: Point,
    ) -> EditorResult<()> {
        let element = document.get(lead).ok_or(EditorError::UnknownElement(lead))?;
        if element.locked {
            return Err(EditorError::ModeViolation("element is locked"));
        }

        let mut originals = vec![(lead, element.position())];
        for &id in followers {
            if id == lead || originals.iter().any(|(e, _)| *e == id) {
                continue;
            }
            match document.get(id) {
                Some(follower) if !follower.locked => originals.push((id, follower.position())),
                Some(_) => log::trace!("drag: locked follower {id} stays"),
                None => log::warn!("drag: unknown follower {id} skipped"),
            }
        }

        log::debug!("drag begin: lead {lead}, {} followers", originals.len() - 1);
        self.state = DragState::Dragging(DragSession {
            lead,
            start_pointer: pointer,
            originals,
            delta: Vec2::ZERO,
        });
        Ok(())
    }

    /// Move the dragged elements to follow `pointer`.
    ///
    /// The lead is snapped against every element outside the moving set and
    /// the canvas; followers get the raw offset. `guides` is replaced with the
    /// lead's alignment guides.
    pub fn update(
        &mut self,
        document: &mut Document,
        pointer: Point,
        scale: f64,
        engine: &SnapEngine,
        guides: &mut AlignmentGuides,
    ) -> EditorResult<()> {
        let DragState::Dragging(session) = &mut self.state else {
            return Err(EditorError::NotActive);
        };
        if !scale.is_finite() || scale <= 0.0 {
            return Err(EditorError::InvalidInput("zoom scale must be positive"));
        }
        if !pointer.is_finite() {
            return Err(EditorError::InvalidInput("non-finite pointer position"));
        }

        let delta = (pointer - session.start_pointer) / scale;
        session.delta = delta;

        let moving = session.moving();
        let siblings: Vec<Rect> = document.siblings(&moving).map(|e| e.bounds()).collect();
        let canvas = document.canvas;

        let (lead_id, lead_origin) = session.originals[0];
        let lead = document
            .get_mut(lead_id)
            .ok_or(EditorError::UnknownElement(lead_id))?;
        let candidate = Rect::from_origin_size(lead_origin + delta, lead.size());
        let snap = engine.snap_position(candidate, &siblings, canvas);
        lead.set_position(snap.point);
        lead.touch();
        log::trace!("drag update: delta {delta:?}, lead at {:?}", snap.point);

        for &(id, origin) in &session.originals[1..] {
            if let Some(follower) = document.get_mut(id) {
                follower.set_position(origin + delta);
                follower.touch();
            }
        }

        *guides = snap.guides;
        Ok(())
    }

    /// Finish the gesture. Positions are already committed by `update`.
    pub fn end(&mut self, guides: &mut AlignmentGuides) -> EditorResult<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                guides.clear();
                log::debug!("drag end: lead {}, delta {:?}", session.lead, session.delta);
                Ok(session)
            }
            DragState::Idle => Err(EditorError::NotActive),
        }
    }

    /// Abort the gesture, putting every moved element back.
    pub fn cancel(&mut self, document: &mut Document, guides: &mut AlignmentGuides) -> EditorResult<()> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return Err(EditorError::NotActive);
        };
        for (id, origin) in session.originals {
            if let Some(element) = document.get_mut(id) {
                element.set_position(origin);
            }
        }
        guides.clear();
        log::debug!("drag cancelled: lead {}", session.lead);
        Ok(())
    }

    /// Drop the gesture if it involves `id` (the element was deleted).
    pub fn forget(&mut self, id: ElementId) {
        let lead_gone = match &mut self.state {
            DragState::Dragging(session) if session.lead == id => true,
            DragState::Dragging(session) => {
                session.originals.retain(|(e, _)| *e != id);
                false
            }
            DragState::Idle => false,
        };
        if lead_gone {
            self.state = DragState::Idle;
        }
    }
}
