// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications produced by [`ImageZoom`](crate::ImageZoom).

use kurbo::{Size, Vec2};
use pinchzoom_gesture::TapPoint;
use pinchzoom_view::ZoomTransform;

/// Why a [`MoveEvent`] was emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// A live pan or pinch step.
    Gesture,
    /// A gesture was released and settled.
    Release,
    /// A [`center_on`](crate::ImageZoom::center_on) animation completed, or
    /// a double-tap zoom toggle was issued.
    CenterOn,
}

/// Snapshot of the canonical transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveEvent {
    /// What caused the move.
    pub kind: MoveKind,
    /// Offset in unscaled image units.
    pub offset: Vec2,
    /// Current scale.
    pub scale: f64,
    /// Most recent two-finger span of the current gesture, if any.
    pub pinch_span: Option<f64>,
}

impl MoveEvent {
    pub(crate) fn new(kind: MoveKind, transform: ZoomTransform, pinch_span: Option<f64>) -> Self {
        Self {
            kind,
            offset: transform.offset,
            scale: transform.scale,
            pinch_span,
        }
    }
}

/// Everything [`ImageZoom`](crate::ImageZoom) reports back to its host.
///
/// Hosts match on the variants they care about and ignore the rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomEvent {
    /// A single tap, delivered after the double-tap window closed.
    Tap(TapPoint),
    /// The second press of a double tap.
    DoubleTap(TapPoint),
    /// A press held in place for the long-press delay.
    LongPress(TapPoint),
    /// A pull-down passed the dismissal threshold. The host is expected to
    /// close the view.
    SwipeDown,
    /// Horizontal rubber-band magnitude; `0.0` when it returns to rest.
    HorizontalOverflow(f64),
    /// The transform changed.
    Move(MoveEvent),
    /// The viewport was resized.
    LayoutChanged(Size),
    /// A pan, pinch or swipe was released. Sent before the transform settles.
    Released {
        /// Exit velocity of the gesture.
        velocity: Vec2,
        /// Scale at release time.
        scale: f64,
    },
}
