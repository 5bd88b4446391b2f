// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture classifier: turns a touch stream into taps, presses, pans and pinches.
//!
//! ## Usage
//!
//! 1) Call [`GestureClassifier::on_start`] when the first finger lands. It may
//!    recognize a double tap right away.
//! 2) Call [`GestureClassifier::on_move`] for every move; it returns the pan or
//!    pinch delta to apply.
//! 3) Call [`GestureClassifier::on_release`] when the fingers lift; it tells
//!    you whether to settle the transform, or that a tap is pending.
//! 4) Call [`GestureClassifier::poll`] whenever the host clock advances past
//!    [`GestureClassifier::next_deadline`] to receive long presses and taps.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size, Vec2};
//! use pinchzoom_gesture::{
//!     ClassifierConfig, GestureClassifier, GestureEvent, GestureRelease, ReleaseAction,
//!     TouchPoint,
//! };
//!
//! let viewport = Size::new(300.0, 300.0);
//! let mut classifier = GestureClassifier::new(ClassifierConfig::default());
//! let touch = TouchPoint::new(0, Point::new(100.0, 120.0), 1_000);
//!
//! assert_eq!(classifier.on_start(&[touch], viewport, 1_000), None);
//! let release = GestureRelease::new(Vec2::ZERO, Vec2::ZERO, 1, touch.tap_point());
//! assert_eq!(classifier.on_release(release, 1_050), ReleaseAction::TapPending);
//!
//! // The tap is held back for the double-tap interval.
//! assert!(classifier.poll(1_100).is_empty());
//! assert_eq!(
//!     classifier.poll(1_300),
//!     vec![GestureEvent::Tap(touch.tap_point())]
//! );
//! ```

use alloc::vec::Vec;

use kurbo::{Size, Vec2};
use pinchzoom_timing::{TimerId, TimerQueue};

use crate::session::{DoubleClickTracker, GestureSession};
use crate::touch::{TapPoint, TouchPoint, pinch_anchor, pinch_span};

/// Thresholds and delays used for classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierConfig {
    /// Maximum time between two presses for them to form a double tap. Also
    /// the delay before a single tap is reported.
    pub double_click_interval_ms: u64,
    /// Hold time before a press becomes a long press.
    pub long_press_delay_ms: u64,
    /// Release displacement below which a one-finger gesture is a tap.
    pub click_distance: f64,
    /// Accumulated motion on either axis that disqualifies a long press.
    pub motion_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            double_click_interval_ms: 175,
            long_press_delay_ms: 800,
            click_distance: 10.0,
            motion_threshold: 5.0,
        }
    }
}

/// A discrete gesture recognized by the classifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A single tap, reported once the double-tap window has passed.
    Tap(TapPoint),
    /// The second press of a double tap.
    DoubleTap(TapPoint),
    /// A press held without moving for the long-press delay.
    LongPress(TapPoint),
}

/// What to do with a move event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveAction {
    /// Nothing: the gesture is a double tap or no gesture is active.
    Ignored,
    /// A single-finger drag.
    Pan {
        /// Displacement since the previous move.
        delta: Vec2,
        /// Whether the gesture has been flagged as mostly horizontal.
        horizontal: bool,
    },
    /// A two-finger pinch.
    Pinch {
        /// Current distance between the fingers.
        span: f64,
        /// Change since the previous pinch move; `None` on the first one.
        span_delta: Option<f64>,
        /// Pinch midpoint relative to the viewport centre at gesture start.
        anchor: Vec2,
    },
}

/// Host data for a gesture release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureRelease {
    /// Total displacement of the gesture.
    pub delta: Vec2,
    /// Exit velocity.
    pub velocity: Vec2,
    /// Number of touches that ended.
    pub touch_count: usize,
    /// Where the release happened.
    pub point: TapPoint,
}

impl GestureRelease {
    /// Bundles release data.
    #[must_use]
    pub fn new(delta: Vec2, velocity: Vec2, touch_count: usize, point: TapPoint) -> Self {
        Self {
            delta,
            velocity,
            touch_count,
            point,
        }
    }
}

/// What to do once a gesture is released.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReleaseAction {
    /// The gesture was a double tap or a long press; nothing more to do.
    Suppressed,
    /// A single tap was scheduled and will surface through
    /// [`GestureClassifier::poll`] unless a new gesture starts first.
    TapPending,
    /// A pan, pinch or swipe ended; settle the transform.
    Settle {
        /// Exit velocity of the gesture.
        velocity: Vec2,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum GestureTimer {
    LongPress(TapPoint),
    Tap(TapPoint),
}

/// Classifies a shared touch stream into discrete and continuous gestures.
///
/// Long-press and deferred-tap detection use cancellable timers owned by the
/// classifier. Every gesture start cancels both, so a pending single tap is
/// dropped when a second press arrives (and may turn into a double tap).
#[derive(Clone, Debug)]
pub struct GestureClassifier {
    config: ClassifierConfig,
    session: Option<GestureSession>,
    double_click: DoubleClickTracker,
    timers: TimerQueue<GestureTimer>,
    long_press: Option<TimerId>,
    pending_tap: Option<TimerId>,
}

impl GestureClassifier {
    /// Creates an idle classifier.
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            session: None,
            double_click: DoubleClickTracker::default(),
            timers: TimerQueue::new(),
            long_press: None,
            pending_tap: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Replaces the configuration. Already armed timers keep their deadlines.
    pub fn set_config(&mut self, config: ClassifierConfig) {
        self.config = config;
    }

    /// The active gesture, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Last two-finger span of the active gesture.
    #[must_use]
    pub fn pinch_span(&self) -> Option<f64> {
        self.session.as_ref().and_then(|s| s.last_span)
    }

    /// Cross-gesture double-tap state.
    #[must_use]
    pub fn double_click(&self) -> &DoubleClickTracker {
        &self.double_click
    }

    /// Deadline of the next long press or deferred tap, if one is armed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Starts a gesture.
    ///
    /// Drops any pending single tap, captures the pinch anchor for
    /// multi-touch starts and arms the long-press timer. A single touch that
    /// lands within the double-tap interval of the previous one is reported
    /// as [`GestureEvent::DoubleTap`] and marks the whole gesture as a double
    /// tap; otherwise the press is recorded for future pairing.
    pub fn on_start(
        &mut self,
        touches: &[TouchPoint],
        viewport: Size,
        now_ms: u64,
    ) -> Option<GestureEvent> {
        cancel(&mut self.timers, &mut self.pending_tap);
        cancel(&mut self.timers, &mut self.long_press);

        let mut session = GestureSession::new(now_ms);
        if let [a, b, ..] = touches {
            let centre = (viewport.to_vec2() / 2.0).to_point();
            session.center_diff = pinch_anchor(a.page, b.page, centre);
        }

        let mut event = None;
        if let Some(first) = touches.first() {
            let deadline = now_ms.saturating_add(self.config.long_press_delay_ms);
            self.long_press = Some(
                self.timers
                    .schedule(deadline, GestureTimer::LongPress(first.tap_point())),
            );

            if touches.len() == 1 {
                if self
                    .double_click
                    .pairs_with(now_ms, self.config.double_click_interval_ms)
                {
                    log::debug!("double tap at {:?}", first.page);
                    self.double_click.clear();
                    cancel(&mut self.timers, &mut self.long_press);
                    session.is_double_click = true;
                    event = Some(GestureEvent::DoubleTap(first.tap_point()));
                } else {
                    self.double_click.record(now_ms, first.page);
                }
            }
        }

        self.session = Some(session);
        event
    }

    /// Classifies a move event.
    ///
    /// `cumulative` is the displacement since the gesture started, as
    /// reported by the input source.
    pub fn on_move(&mut self, touches: &[TouchPoint], cumulative: Vec2) -> MoveAction {
        let Some(session) = self.session.as_mut() else {
            return MoveAction::Ignored;
        };
        if session.is_double_click {
            return MoveAction::Ignored;
        }

        if let [a, b, ..] = touches {
            cancel(&mut self.timers, &mut self.long_press);
            let span = pinch_span(a.page, b.page);
            let span_delta = session.last_span.map(|last| span - last);
            session.last_span = Some(span);
            log::trace!("pinch span={span} delta={span_delta:?}");
            return MoveAction::Pinch {
                span,
                span_delta,
                anchor: session.center_diff,
            };
        }

        let delta = session.drag.update(cumulative);
        let total = session.drag.total;
        let threshold = self.config.motion_threshold;
        if total.x.abs() > threshold || total.y.abs() > threshold {
            cancel(&mut self.timers, &mut self.long_press);
            if delta.x.abs() > delta.y.abs() {
                session.is_horizontal = true;
            }
        }
        MoveAction::Pan {
            delta,
            horizontal: session.is_horizontal,
        }
    }

    /// Ends the gesture and decides what it was.
    pub fn on_release(&mut self, release: GestureRelease, now_ms: u64) -> ReleaseAction {
        cancel(&mut self.timers, &mut self.long_press);
        let session = self.session.take().unwrap_or_default();
        if session.is_resolved() {
            return ReleaseAction::Suppressed;
        }

        let distance = libm::hypot(release.delta.x, release.delta.y);
        if release.touch_count == 1 && distance < self.config.click_distance {
            let deadline = now_ms.saturating_add(self.config.double_click_interval_ms);
            log::debug!("tap pending until {deadline}");
            self.pending_tap = Some(
                self.timers
                    .schedule(deadline, GestureTimer::Tap(release.point)),
            );
            return ReleaseAction::TapPending;
        }
        ReleaseAction::Settle {
            velocity: release.velocity,
        }
    }

    /// Abandons the gesture without classifying it.
    ///
    /// The long press is cancelled; a tap scheduled by an earlier gesture is
    /// left alone.
    pub fn on_terminate(&mut self) {
        cancel(&mut self.timers, &mut self.long_press);
        self.session = None;
    }

    /// Fires every timer due at `now_ms`, in deadline order.
    pub fn poll(&mut self, now_ms: u64) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        while let Some((id, timer)) = self.timers.pop_due(now_ms) {
            match timer {
                GestureTimer::LongPress(point) => {
                    if self.long_press == Some(id) {
                        self.long_press = None;
                    }
                    if let Some(session) = self.session.as_mut() {
                        session.is_long_press = true;
                    }
                    log::debug!("long press at {:?}", point.page);
                    events.push(GestureEvent::LongPress(point));
                }
                GestureTimer::Tap(point) => {
                    if self.pending_tap == Some(id) {
                        self.pending_tap = None;
                    }
                    log::debug!("tap at {:?}", point.page);
                    events.push(GestureEvent::Tap(point));
                }
            }
        }
        events
    }
}

fn cancel(timers: &mut TimerQueue<GestureTimer>, slot: &mut Option<TimerId>) {
    if let Some(id) = slot.take() {
        timers.cancel(id);
    }
}
