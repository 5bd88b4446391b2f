// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the canonical transform and the rendering side.

use alloc::vec::Vec;

use pinchzoom_view::{FieldUpdate, TransformField, ZoomTransform};
use smallvec::SmallVec;

/// Handle for an animation started through [`TweenTarget::animate`].
///
/// Report completion back through
/// [`ImageZoom::tween_finished`](crate::ImageZoom::tween_finished).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenId(pub u64);

/// One scalar tween request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    /// Field being animated.
    pub field: TransformField,
    /// Value the field was last written with.
    pub from: f64,
    /// Value to end at.
    pub to: f64,
    /// Duration in milliseconds.
    pub duration_ms: u32,
    /// Caller preference for compositor-driven animation. Not interpreted.
    pub hardware_accelerated: bool,
}

/// A rendering backend that displays the transform.
///
/// Implementations receive explicit writes only and never report values
/// back; the canonical transform lives in [`ImageZoom`](crate::ImageZoom).
/// Several animations on different fields may be in flight at once, and a
/// live [`set_immediate`](Self::set_immediate) on a field that is still
/// animating wins.
pub trait TweenTarget {
    /// Overwrite the displayed value of `field` right away.
    fn set_immediate(&mut self, field: TransformField, value: f64);

    /// Start animating a field, returning a handle whose completion is
    /// reported later.
    fn animate(&mut self, animation: Animation) -> TweenId;
}

/// A target that applies every animation instantly.
///
/// Useful for tests, headless hosts and anywhere the intermediate frames do
/// not matter. Animation handles are queued as finished right away; hand
/// them back with [`InstantTarget::drain_finished`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstantTarget {
    /// The displayed transform.
    pub transform: ZoomTransform,
    next_id: u64,
    finished: Vec<TweenId>,
}

impl InstantTarget {
    /// Creates a target showing the identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transform: ZoomTransform::IDENTITY,
            next_id: 0,
            finished: Vec::new(),
        }
    }

    /// Takes the handles of every animation started so far.
    pub fn drain_finished(&mut self) -> Vec<TweenId> {
        core::mem::take(&mut self.finished)
    }
}

impl TweenTarget for InstantTarget {
    fn set_immediate(&mut self, field: TransformField, value: f64) {
        self.transform.set(field, value);
    }

    fn animate(&mut self, animation: Animation) -> TweenId {
        self.transform.set(animation.field, animation.to);
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.finished.push(id);
        id
    }
}

/// Handles of the animations started by one batch of writes.
pub(crate) type Started = SmallVec<[TweenId; 3]>;

/// Last values written toward the rendering side.
///
/// Supplies `from` for every [`Animation`], since targets never report their
/// state back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RenderMirror {
    pub(crate) written: ZoomTransform,
}

impl RenderMirror {
    pub(crate) fn new() -> Self {
        Self {
            written: ZoomTransform::IDENTITY,
        }
    }

    /// Forwards `updates` to `target` in order.
    pub(crate) fn write<T: TweenTarget + ?Sized>(
        &mut self,
        updates: &[FieldUpdate],
        hardware_accelerated: bool,
        target: &mut T,
    ) -> Started {
        let mut started = Started::new();
        for update in updates {
            match *update {
                FieldUpdate::Set { field, value } => target.set_immediate(field, value),
                FieldUpdate::Animate {
                    field,
                    to,
                    duration_ms,
                } => started.push(target.animate(Animation {
                    field,
                    from: self.written.get(field),
                    to,
                    duration_ms,
                    hardware_accelerated,
                })),
            }
            self.written.set(update.field(), update.target());
        }
        started
    }
}
