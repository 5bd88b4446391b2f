// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture and cross-gesture classifier state.

use kurbo::{Point, Vec2};

use crate::drag::DeltaTracker;

/// Working state for one touch-down-to-release cycle.
///
/// Created when a gesture starts and dropped when it is released or
/// terminated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSession {
    /// Single-finger displacement tracking.
    pub drag: DeltaTracker,
    /// Two-finger span seen by the previous move, if any.
    pub last_span: Option<f64>,
    /// Pinch midpoint relative to the viewport centre, captured at start.
    pub center_diff: Vec2,
    /// Time the gesture started.
    pub start_ms: u64,
    /// The gesture began as the second tap of a double tap.
    pub is_double_click: bool,
    /// The long-press timer fired during this gesture.
    pub is_long_press: bool,
    /// The gesture moved mostly horizontally once past the motion threshold.
    pub is_horizontal: bool,
}

impl GestureSession {
    /// Starts a session at `start_ms`.
    #[must_use]
    pub fn new(start_ms: u64) -> Self {
        Self {
            start_ms,
            ..Self::default()
        }
    }

    /// Returns `true` if this gesture has already been resolved as a double
    /// tap or a long press, which suppresses tap and settle handling.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.is_double_click || self.is_long_press
    }
}

/// Remembers the last single-finger press so the next one can pair with it.
///
/// Lives across gestures for the lifetime of the classifier.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DoubleClickTracker {
    last_click: Option<(u64, Point)>,
}

impl DoubleClickTracker {
    /// Returns `true` if a press at `now_ms` pairs with the recorded one.
    #[must_use]
    pub fn pairs_with(&self, now_ms: u64, interval_ms: u64) -> bool {
        self.last_click
            .is_some_and(|(at, _)| now_ms.saturating_sub(at) < interval_ms)
    }

    /// Records a press as the first half of a potential double tap.
    pub fn record(&mut self, now_ms: u64, position: Point) {
        self.last_click = Some((now_ms, position));
    }

    /// Forgets the recorded press, so a third tap cannot pair again.
    pub fn clear(&mut self) {
        self.last_click = None;
    }

    /// Time of the recorded press.
    #[must_use]
    pub fn last_click_ms(&self) -> Option<u64> {
        self.last_click.map(|(at, _)| at)
    }

    /// Position of the recorded press.
    #[must_use]
    pub fn last_click_position(&self) -> Option<Point> {
        self.last_click.map(|(_, position)| position)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{DoubleClickTracker, GestureSession};

    #[test]
    fn empty_tracker_never_pairs() {
        let tracker = DoubleClickTracker::default();
        assert!(!tracker.pairs_with(0, 175));
        assert_eq!(tracker.last_click_ms(), None);
    }

    #[test]
    fn pairs_strictly_inside_the_interval() {
        let mut tracker = DoubleClickTracker::default();
        tracker.record(1_000, Point::new(5.0, 5.0));

        assert!(tracker.pairs_with(1_100, 175));
        assert!(tracker.pairs_with(1_174, 175));
        assert!(!tracker.pairs_with(1_175, 175));
        assert_eq!(tracker.last_click_position(), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn clear_prevents_pairing() {
        let mut tracker = DoubleClickTracker::default();
        tracker.record(1_000, Point::ZERO);
        tracker.clear();
        assert!(!tracker.pairs_with(1_010, 175));
    }

    #[test]
    fn resolved_sessions() {
        let mut session = GestureSession::new(42);
        assert_eq!(session.start_ms, 42);
        assert!(!session.is_resolved());

        session.is_long_press = true;
        assert!(session.is_resolved());
    }
}
