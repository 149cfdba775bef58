//! Resize handles and when to show them.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The handle being dragged during a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    N,
    S,
    E,
    W,
    NW,
    NE,
    SW,
    SE,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::NW,
        ResizeDirection::N,
        ResizeDirection::NE,
        ResizeDirection::E,
        ResizeDirection::SE,
        ResizeDirection::S,
        ResizeDirection::SW,
        ResizeDirection::W,
    ];

    /// Corner handles keep the aspect ratio.
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            ResizeDirection::NW | ResizeDirection::NE | ResizeDirection::SW | ResizeDirection::SE
        )
    }

    /// Horizontal component: -1 moves the left edge, 1 the right edge, 0 neither.
    pub fn x_sign(self) -> f64 {
        match self {
            ResizeDirection::W | ResizeDirection::NW | ResizeDirection::SW => -1.0,
            ResizeDirection::E | ResizeDirection::NE | ResizeDirection::SE => 1.0,
            ResizeDirection::N | ResizeDirection::S => 0.0,
        }
    }

    /// Vertical component: -1 moves the top edge, 1 the bottom edge, 0 neither.
    pub fn y_sign(self) -> f64 {
        match self {
            ResizeDirection::N | ResizeDirection::NW | ResizeDirection::NE => -1.0,
            ResizeDirection::S | ResizeDirection::SW | ResizeDirection::SE => 1.0,
            ResizeDirection::E | ResizeDirection::W => 0.0,
        }
    }

    /// Where this handle sits on `bounds`.
    pub fn position(self, bounds: Rect) -> Point {
        let center = bounds.center();
        let x = match self.x_sign() {
            s if s < 0.0 => bounds.x0,
            s if s > 0.0 => bounds.x1,
            _ => center.x,
        };
        let y = match self.y_sign() {
            s if s < 0.0 => bounds.y0,
            s if s > 0.0 => bounds.y1,
            _ => center.y,
        };
        Point::new(x, y)
    }
}

/// Which handles a host should draw for an element at the current zoom.
///
/// Purely presentational: at small on-screen sizes the edge handles would
/// overlap the corners, so they are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleVisibility {
    pub corners: bool,
    /// n and s handles.
    pub vertical_edges: bool,
    /// e and w handles.
    pub horizontal_edges: bool,
}

impl HandleVisibility {
    /// Edge handles need this many handle sizes of room along their edge.
    pub const EDGE_ROOM_FACTOR: f64 = 3.0;

    /// Compute visibility from the element's logical size, the zoom scale and
    /// the handle size in screen pixels.
    pub fn compute(width: f64, height: f64, scale: f64, handle_size: f64) -> Self {
        let min_room = handle_size * Self::EDGE_ROOM_FACTOR;
        Self {
            corners: true,
            vertical_edges: width * scale >= min_room,
            horizontal_edges: height * scale >= min_room,
        }
    }

    /// The visible handles in drawing order.
    pub fn visible(&self) -> Vec<ResizeDirection> {
        ResizeDirection::ALL
            .into_iter()
            .filter(|&d| self.shows(d))
            .collect()
    }

    pub fn shows(&self, direction: ResizeDirection) -> bool {
        match direction {
            ResizeDirection::N | ResizeDirection::S => self.vertical_edges,
            ResizeDirection::E | ResizeDirection::W => self.horizontal_edges,
            _ => self.corners,
        }
    }
}

/// Find which visible handle (if any) is under `point`.
pub fn hit_test_handles(
    bounds: Rect,
    visibility: HandleVisibility,
    point: Point,
    tolerance: f64,
) -> Option<ResizeDirection> {
    visibility.visible().into_iter().find(|d| {
        let handle = d.position(bounds);
        let dx = point.x - handle.x;
        let dy = point.y - handle.y;
        dx * dx + dy * dy <= tolerance * tolerance
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signs() {
        assert_eq!(ResizeDirection::NW.x_sign(), -1.0);
        assert_eq!(ResizeDirection::NW.y_sign(), -1.0);
        assert_eq!(ResizeDirection::E.y_sign(), 0.0);
        assert!(ResizeDirection::SE.is_corner());
        assert!(!ResizeDirection::S.is_corner());
    }

    #[test]
    fn test_handle_positions() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(ResizeDirection::SE.position(bounds), Point::new(100.0, 50.0));
        assert_eq!(ResizeDirection::N.position(bounds), Point::new(50.0, 0.0));
        assert_eq!(ResizeDirection::W.position(bounds), Point::new(0.0, 25.0));
    }

    #[test]
    fn test_small_elements_hide_edge_handles() {
        let visibility = HandleVisibility::compute(200.0, 20.0, 1.0, 8.0);
        assert!(visibility.vertical_edges);
        assert!(!visibility.horizontal_edges);
        assert_eq!(visibility.visible().len(), 6);

        let zoomed = HandleVisibility::compute(200.0, 20.0, 2.0, 8.0);
        assert!(zoomed.horizontal_edges);
        assert_eq!(zoomed.visible().len(), 8);
    }

    #[test]
    fn test_hit_test() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let visibility = HandleVisibility::compute(100.0, 100.0, 1.0, 8.0);
        assert_eq!(
            hit_test_handles(bounds, visibility, Point::new(98.0, 101.0), 6.0),
            Some(ResizeDirection::SE)
        );
        assert_eq!(hit_test_handles(bounds, visibility, Point::new(30.0, 30.0), 6.0), None);
    }
}
