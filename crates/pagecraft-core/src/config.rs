//! Tunable constants for the geometry engine.

use crate::snap::SnapPolicy;
use serde::{Deserialize, Serialize};

/// Minimum element width after any resize (logical units).
pub const MIN_WIDTH: f64 = 50.0;
/// Minimum element height after any resize (logical units).
pub const MIN_HEIGHT: f64 = 20.0;
/// Smallest font size a corner resize may produce.
pub const MIN_FONT_SIZE: f64 = 8.0;
/// Snap distance in logical units.
pub const SNAP_THRESHOLD: f64 = 20.0;
/// Lowest zoom percentage.
pub const MIN_ZOOM: u32 = 5;
/// Highest zoom percentage.
pub const MAX_ZOOM: u32 = 400;

/// Engine configuration.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum distance at which an edge or center locks onto a guide.
    pub snap_threshold: f64,
    /// Tie-break rule when several targets are within the threshold.
    pub snap_policy: SnapPolicy,
    pub min_width: f64,
    pub min_height: f64,
    pub min_font_size: f64,
    pub min_zoom: u32,
    pub max_zoom: u32,
    /// Zoom percentage added or removed by `zoom_in` / `zoom_out`.
    pub zoom_step: u32,
    /// Horizontal space reserved around the canvas by the host UI, in pixels.
    pub fit_margin_x: f64,
    /// Vertical space reserved around the canvas by the host UI, in pixels.
    pub fit_margin_y: f64,
    /// Lowest zoom `fit_to_container` will ever produce.
    pub fit_floor_zoom: u32,
    /// Viewport rects are recomputed only when a dimension moves more than this.
    pub viewport_epsilon: f64,
    /// Minimum time between viewport recomputations (~60 fps).
    pub frame_interval_ms: u64,
    /// Resize handle size in screen pixels.
    pub handle_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: SNAP_THRESHOLD,
            snap_policy: SnapPolicy::default(),
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
            min_font_size: MIN_FONT_SIZE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: 10,
            fit_margin_x: 80.0,
            fit_margin_y: 80.0,
            fit_floor_zoom: 5,
            viewport_epsilon: 0.5,
            frame_interval_ms: 16,
            handle_size: 8.0,
        }
    }
}

impl EditorConfig {
    /// Clamp a candidate size to the configured minimums.
    ///
    /// Non-finite values collapse to the minimum as well.
    pub fn clamp_size(&self, width: f64, height: f64) -> (f64, f64) {
        let w = if width.is_finite() { width.max(self.min_width) } else { self.min_width };
        let h = if height.is_finite() { height.max(self.min_height) } else { self.min_height };
        (w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert!((config.snap_threshold - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.snap_policy, SnapPolicy::Nearest);
        assert_eq!(config.min_zoom, 5);
        assert_eq!(config.max_zoom, 400);
    }

    #[test]
    fn test_partial_json() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "snap_threshold": 8.0, "snap_policy": "last_match" }"#)
                .unwrap();
        assert!((config.snap_threshold - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.snap_policy, SnapPolicy::LastMatch);
        assert!((config.min_width - MIN_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_size() {
        let config = EditorConfig::default();
        assert_eq!(config.clamp_size(10.0, 5.0), (50.0, 20.0));
        assert_eq!(config.clamp_size(f64::NAN, f64::INFINITY), (50.0, 20.0));
        assert_eq!(config.clamp_size(120.0, 80.0), (120.0, 80.0));
    }
}
