// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Nudge applied to the horizontal overflow counter when a pan is clamped at
/// an edge, so that the next drag in the same direction is absorbed as
/// overflow instead of re-running the clamp.
pub const CLAMP_NUDGE: f64 = 1e-10;

/// Rubber-band counters for drag distance beyond the pannable bounds.
///
/// Both counters are reset at gesture start and when a gesture settles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Overflow {
    /// Horizontal drag absorbed past the edges. Positive when dragging right
    /// past the left edge of the image, negative when dragging left past the
    /// right edge. Bounded by the configured maximum overflow.
    pub horizontal: f64,
    /// Accumulated downward drag while the image fits vertically.
    pub swipe_down: f64,
}

impl Overflow {
    /// Returns `true` if both counters are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.horizontal == 0.0 && self.swipe_down == 0.0
    }
}

/// Horizontal pan regime for the current transform and overflow state.
///
/// Each zone has its own rule for splitting a horizontal drag delta into
/// absorbed overflow and real offset change:
///
/// | Zone            | Drag toward centre                  | Drag away from centre |
/// |-----------------|-------------------------------------|-----------------------|
/// | `ContentFits`   | absorbed                            | absorbed              |
/// | `OverflowLeft`  | drains overflow, remainder applied  | absorbed              |
/// | `OverflowRight` | drains overflow, remainder applied  | absorbed              |
/// | `Free`          | applied                             | applied, then clamped |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalZone {
    /// The scaled image is no wider than the viewport; nothing can pan.
    ContentFits,
    /// Overflow is active from dragging left past the right edge.
    OverflowLeft,
    /// Overflow is active from dragging right past the left edge.
    OverflowRight,
    /// No overflow; the image pans freely within its bounds.
    Free,
}

/// How a horizontal drag delta was split by [`split_horizontal`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizontalSplit {
    /// Overflow counter after absorbing its share of the drag.
    pub overflow: f64,
    /// Portion of the drag to apply as a real offset change.
    pub applied: f64,
    /// Set when an active overflow was fully drained by this drag.
    pub released: bool,
}

/// Splits a horizontal drag delta between the overflow counter and the
/// offset according to `zone`.
#[must_use]
pub fn split_horizontal(zone: HorizontalZone, overflow: f64, dx: f64) -> HorizontalSplit {
    let absorbed = HorizontalSplit {
        overflow: overflow + dx,
        applied: 0.0,
        released: false,
    };
    let toward_centre = match zone {
        HorizontalZone::ContentFits => return absorbed,
        HorizontalZone::Free => {
            return HorizontalSplit {
                overflow,
                applied: dx,
                released: false,
            };
        }
        HorizontalZone::OverflowRight => dx < 0.0,
        HorizontalZone::OverflowLeft => dx > 0.0,
    };
    if !toward_centre {
        return absorbed;
    }
    if overflow.abs() > dx.abs() {
        absorbed
    } else {
        HorizontalSplit {
            overflow: 0.0,
            applied: dx + overflow,
            released: true,
        }
    }
}
