// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::transform::{FieldUpdate, TransformField, Updates};
use crate::view::ZoomView;

/// Duration of every settle correction.
pub const SETTLE_DURATION_MS: u32 = 100;

/// Behaviour switches consulted by [`ZoomView::settle`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SettleOptions {
    /// Whether a swipe-down past the threshold dismisses.
    pub swipe_down_enabled: bool,
    /// Swipe-down distance that must be exceeded to dismiss.
    pub swipe_down_threshold: f64,
    /// Whether the image snaps back to unit scale and recentres.
    pub center_focus: bool,
}

/// Outcome of [`ZoomView::settle`].
#[derive(Clone, Debug, PartialEq)]
pub enum Settled {
    /// The swipe-down passed its threshold. The transform was left alone;
    /// only the overflow counters were reset.
    Dismissed {
        /// Set when a non-zero horizontal overflow was reset.
        overflow_released: bool,
    },
    /// The transform was corrected into bounds.
    Clamped {
        /// Correction tweens. Several may target different fields at once.
        updates: Updates,
        /// Set when a non-zero horizontal overflow was reset.
        overflow_released: bool,
    },
}

impl ZoomView {
    /// Decides the resting transform after a pan, pinch or swipe ends.
    ///
    /// A swipe-down beyond the threshold skips every correction and yields
    /// [`Settled::Dismissed`]. Otherwise each of the following checks runs in
    /// order, independently:
    ///
    /// 1. with center focus, a scale below one animates back to one;
    /// 2. an axis whose scaled image fits the viewport animates its offset
    ///    to zero;
    /// 3. an axis whose scaled image overflows the viewport is clamped to
    ///    its edges, animating only if the clamp changed the offset;
    /// 4. with center focus, unit scale animates both offsets to zero.
    ///
    /// Both overflow counters are zeroed in either case.
    pub fn settle(&mut self, options: SettleOptions) -> Settled {
        if options.swipe_down_enabled && self.overflow.swipe_down > options.swipe_down_threshold {
            log::debug!("swipe-down past threshold: {}", self.overflow.swipe_down);
            let overflow_released = self.reset_overflow();
            return Settled::Dismissed { overflow_released };
        }

        let mut updates = Updates::new();
        let mut animate = |field, to| {
            updates.push(FieldUpdate::Animate {
                field,
                to,
                duration_ms: SETTLE_DURATION_MS,
            });
        };

        if options.center_focus && self.transform.scale < 1.0 {
            self.transform.scale = 1.0;
            animate(TransformField::Scale, 1.0);
        }
        if self.fits_horizontally() {
            self.transform.offset.x = 0.0;
            animate(TransformField::OffsetX, 0.0);
        }
        if self.fits_vertically() {
            self.transform.offset.y = 0.0;
            animate(TransformField::OffsetY, 0.0);
        } else {
            let limit = self.vertical_limit();
            let y = self.transform.offset.y;
            let clamped = y.max(-limit).min(limit);
            if clamped != y {
                self.transform.offset.y = clamped;
                animate(TransformField::OffsetY, clamped);
            }
        }
        if !self.fits_horizontally() {
            let limit = self.horizontal_limit();
            let x = self.transform.offset.x;
            let clamped = x.max(-limit).min(limit);
            if clamped != x {
                self.transform.offset.x = clamped;
                animate(TransformField::OffsetX, clamped);
            }
        }
        if options.center_focus && self.transform.scale == 1.0 {
            self.transform.offset.x = 0.0;
            self.transform.offset.y = 0.0;
            animate(TransformField::OffsetX, 0.0);
            animate(TransformField::OffsetY, 0.0);
        }

        let overflow_released = self.reset_overflow();
        log::debug!("settled at {:?}", self.transform);
        Settled::Clamped {
            updates,
            overflow_released,
        }
    }
}
