//! Pointer input: modifier keys, samples and per-tick move coalescing.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Alt+Shift resizes from the element center.
    pub fn is_symmetric(&self) -> bool {
        self.alt && self.shift
    }
}

/// One pointer position in screen pixels, with the modifiers held at the time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Point,
    pub modifiers: Modifiers,
}

impl PointerSample {
    pub fn new(position: Point, modifiers: Modifiers) -> Self {
        Self { position, modifiers }
    }
}

/// Buffers pointer moves between ticks.
///
/// Only the latest sample survives; a tick consumes it.
#[derive(Debug, Clone, Default)]
pub struct MoveCoalescer {
    pending: Option<PointerSample>,
    dropped: u64,
}

impl MoveCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: PointerSample) {
        if self.pending.replace(sample).is_some() {
            self.dropped += 1;
        }
    }

    /// The most recent sample since the last call, if any.
    pub fn take(&mut self) -> Option<PointerSample> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Discard a pending sample (gesture ended before the tick).
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// How many samples were superseded before being processed.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_needs_alt_and_shift() {
        let alt = Modifiers { alt: true, ..Default::default() };
        let both = Modifiers { alt: true, shift: true, ..Default::default() };
        assert!(!alt.is_symmetric());
        assert!(both.is_symmetric());
        assert!(!Modifiers::NONE.is_symmetric());
    }

    #[test]
    fn test_coalescer_keeps_latest() {
        let mut coalescer = MoveCoalescer::new();
        for i in 0..5 {
            coalescer.push(PointerSample::new(Point::new(f64::from(i), 0.0), Modifiers::NONE));
        }
        let sample = coalescer.take();
        assert_eq!(sample.map(|s| s.position), Some(Point::new(4.0, 0.0)));
        assert_eq!(coalescer.dropped(), 4);
        assert!(coalescer.take().is_none());
    }

    #[test]
    fn test_modifiers_partial_json() {
        let modifiers: Modifiers = serde_json::from_str(r#"{"shift": true}"#).unwrap();
        assert!(modifiers.shift);
        assert!(!modifiers.alt);
    }
}
