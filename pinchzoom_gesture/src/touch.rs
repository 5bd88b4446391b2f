// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input records.

use kurbo::{Point, Vec2};

/// One touch point as delivered by the host input source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// Host-assigned identifier, stable for the lifetime of the touch.
    pub id: u64,
    /// Position in page (screen) coordinates.
    pub page: Point,
    /// Position relative to the touched element.
    pub local: Point,
    /// Event time in milliseconds on the host's monotonic clock.
    pub timestamp_ms: u64,
}

impl TouchPoint {
    /// Creates a touch whose page and local positions coincide.
    #[must_use]
    pub fn new(id: u64, position: Point, timestamp_ms: u64) -> Self {
        Self {
            id,
            page: position,
            local: position,
            timestamp_ms,
        }
    }

    /// The coordinates reported with tap-like events.
    #[must_use]
    pub fn tap_point(&self) -> TapPoint {
        TapPoint {
            page: self.page,
            local: self.local,
        }
    }
}

/// Where a tap, double tap or long press happened.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TapPoint {
    /// Page (screen) coordinates.
    pub page: Point,
    /// Element-local coordinates.
    pub local: Point,
}

/// Distance between two touches, rounded to one decimal place.
///
/// Rounding keeps sub-pixel sensor jitter from turning into zoom noise.
#[must_use]
pub fn pinch_span(a: Point, b: Point) -> f64 {
    let d = b - a;
    libm::round(libm::hypot(d.x, d.y) * 10.0) / 10.0
}

/// Offset of the midpoint of two touches from the centre of `viewport`.
#[must_use]
pub fn pinch_anchor(a: Point, b: Point, viewport_center: Point) -> Vec2 {
    a.midpoint(b) - viewport_center
}
