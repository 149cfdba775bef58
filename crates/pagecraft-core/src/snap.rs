//! Alignment snapping against the canvas and sibling elements.
//!
//! Each axis is handled independently. On the x axis the lead element's left,
//! center and right are compared with the canvas center, the canvas edges and
//! every sibling's left, center and right (top/center/bottom on y). A feature
//! within the threshold of a target is moved onto it exactly and the target is
//! reported as a guide.

use crate::config::EditorConfig;
use crate::document::CanvasSize;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Two coordinates closer than this are considered aligned.
const ALIGN_EPSILON: f64 = 1e-6;

/// Which match wins when several targets are within the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapPolicy {
    /// Smallest distance wins; equal distances go to the earliest target
    /// (canvas center, then canvas edges, then siblings in paint order).
    #[default]
    Nearest,
    /// Targets are applied one after another and the last match overwrites
    /// earlier ones. Every match is reported as a guide.
    LastMatch,
}

/// Axis of a snap computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Type of snap target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTargetKind {
    CanvasCenter,
    CanvasEdge,
    /// Left/right or top/bottom edge of a sibling.
    SiblingEdge,
    SiblingCenter,
}

/// A coordinate on one axis that can be snapped to.
#[derive(Debug, Clone, Copy)]
pub struct SnapTarget {
    pub value: f64,
    pub kind: SnapTargetKind,
}

/// Live alignment guides in logical coordinates.
///
/// Vertical guides are x positions, horizontal guides are y positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentGuides {
    pub horizontal: Vec<f64>,
    pub vertical: Vec<f64>,
}

impl AlignmentGuides {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    pub fn clear(&mut self) {
        self.horizontal.clear();
        self.vertical.clear();
    }

    /// Add a guide for a snap on `axis`, skipping duplicates.
    pub fn push(&mut self, axis: Axis, value: f64) {
        let list = match axis {
            Axis::X => &mut self.vertical,
            Axis::Y => &mut self.horizontal,
        };
        if !list.iter().any(|v| (v - value).abs() < ALIGN_EPSILON) {
            list.push(value);
        }
    }

    pub fn extend(&mut self, axis: Axis, values: impl IntoIterator<Item = f64>) {
        for value in values {
            self.push(axis, value);
        }
    }
}

/// Outcome of snapping a set of features on one axis.
#[derive(Debug, Clone, Default)]
pub struct AxisSnap {
    /// Amount to add to every feature.
    pub shift: f64,
    pub snapped: bool,
    pub guides: Vec<f64>,
}

/// Result of snapping an element position.
#[derive(Debug, Clone)]
pub struct SnapResult {
    /// The snapped top-left.
    pub point: Point,
    pub snapped_x: bool,
    pub snapped_y: bool,
    pub guides: AlignmentGuides,
}

impl SnapResult {
    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Collect the snap targets on one axis, in evaluation order.
pub fn collect_targets(axis: Axis, siblings: &[Rect], canvas: CanvasSize) -> Vec<SnapTarget> {
    let extent = match axis {
        Axis::X => canvas.width,
        Axis::Y => canvas.height,
    };
    let mut targets = Vec::with_capacity(3 + siblings.len() * 3);
    targets.push(SnapTarget { value: extent / 2.0, kind: SnapTargetKind::CanvasCenter });
    targets.push(SnapTarget { value: 0.0, kind: SnapTargetKind::CanvasEdge });
    targets.push(SnapTarget { value: extent, kind: SnapTargetKind::CanvasEdge });

    for bounds in siblings {
        let (start, end) = span(*bounds, axis);
        targets.push(SnapTarget { value: start, kind: SnapTargetKind::SiblingEdge });
        targets.push(SnapTarget { value: (start + end) / 2.0, kind: SnapTargetKind::SiblingCenter });
        targets.push(SnapTarget { value: end, kind: SnapTargetKind::SiblingEdge });
    }
    targets
}

fn span(rect: Rect, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::X => (rect.x0, rect.x1),
        Axis::Y => (rect.y0, rect.y1),
    }
}

/// Snapping engine configured with a threshold and a tie-break policy.
#[derive(Debug, Clone, Copy)]
pub struct SnapEngine {
    pub threshold: f64,
    pub policy: SnapPolicy,
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl SnapEngine {
    pub fn new(threshold: f64, policy: SnapPolicy) -> Self {
        Self { threshold, policy }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.snap_threshold, config.snap_policy)
    }

    /// Snap the features of one axis to the given targets.
    pub fn snap_axis(&self, features: &[f64], targets: &[SnapTarget]) -> AxisSnap {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return AxisSnap::default();
        }
        match self.policy {
            SnapPolicy::Nearest => self.snap_nearest(features, targets),
            SnapPolicy::LastMatch => self.snap_last_match(features, targets),
        }
    }

    fn snap_nearest(&self, features: &[f64], targets: &[SnapTarget]) -> AxisSnap {
        let mut best: Option<(f64, f64)> = None; // (distance, shift)
        for target in targets {
            for &feature in features {
                let distance = (target.value - feature).abs();
                if distance >= self.threshold {
                    continue;
                }
                if best.is_none_or(|(d, _)| distance < d) {
                    best = Some((distance, target.value - feature));
                }
            }
        }

        let Some((_, shift)) = best else {
            return AxisSnap::default();
        };

        // Report everything the snapped features now line up with
        let mut guides: Vec<f64> = Vec::new();
        for target in targets {
            let aligned = features
                .iter()
                .any(|f| (f + shift - target.value).abs() < ALIGN_EPSILON);
            if aligned && !guides.iter().any(|g| (g - target.value).abs() < ALIGN_EPSILON) {
                guides.push(target.value);
            }
        }

        AxisSnap { shift, snapped: true, guides }
    }

    fn snap_last_match(&self, features: &[f64], targets: &[SnapTarget]) -> AxisSnap {
        let mut shift = 0.0;
        let mut snapped = false;
        let mut guides: Vec<f64> = Vec::new();
        for target in targets {
            for &feature in features {
                let current = feature + shift;
                if (target.value - current).abs() < self.threshold {
                    shift += target.value - current;
                    snapped = true;
                    if !guides.iter().any(|g| (g - target.value).abs() < ALIGN_EPSILON) {
                        guides.push(target.value);
                    }
                }
            }
        }
        AxisSnap { shift, snapped, guides }
    }

    /// Snap a candidate element rect by moving it; its size never changes.
    pub fn snap_position(&self, candidate: Rect, siblings: &[Rect], canvas: CanvasSize) -> SnapResult {
        let mut guides = AlignmentGuides::default();
        let mut point = candidate.origin();

        let x = self.snap_axis(
            &[candidate.x0, candidate.center().x, candidate.x1],
            &collect_targets(Axis::X, siblings, canvas),
        );
        point.x += x.shift;
        guides.extend(Axis::X, x.guides);

        let y = self.snap_axis(
            &[candidate.y0, candidate.center().y, candidate.y1],
            &collect_targets(Axis::Y, siblings, canvas),
        );
        point.y += y.shift;
        guides.extend(Axis::Y, y.guides);

        SnapResult {
            point,
            snapped_x: x.snapped,
            snapped_y: y.snapped,
            guides,
        }
    }

    /// Snap a single moving edge coordinate (resize).
    pub fn snap_edge(&self, axis: Axis, value: f64, siblings: &[Rect], canvas: CanvasSize) -> AxisSnap {
        self.snap_axis(&[value], &collect_targets(axis, siblings, canvas))
    }
}
