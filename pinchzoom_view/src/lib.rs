// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchzoom View: pan/zoom state for an image inside a fixed viewport.
//!
//! This crate is the transform half of a pinch-zoomable image surface. It
//! owns the canonical `(offset, scale)` transform and:
//! - Applies single-finger pan deltas, absorbing drag beyond the image edges
//!   into a rubber-band overflow counter instead of showing empty borders.
//! - Applies pinch span changes as zoom anchored at the pinch midpoint.
//! - Toggles double-tap zoom and animates to caller-chosen targets.
//! - Settles the transform back into bounds when a gesture ends, or reports
//!   that a pull-down swipe should dismiss the view.
//!
//! It does **not** render or animate anything. Every change is reported as a
//! list of [`FieldUpdate`]s: `Set` for live gesture updates, `Animate` for
//! corrections. The rendering side mirrors those writes; it never feeds
//! values back.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use pinchzoom_view::{PanOptions, SettleOptions, Settled, ZoomView};
//!
//! // A tall image: 300x600 inside a 300x300 viewport.
//! let mut view = ZoomView::new(Size::new(300.0, 300.0), Size::new(300.0, 600.0));
//!
//! // Drag down by 50 pixels.
//! let out = view.apply_pan(Vec2::new(0.0, 50.0), PanOptions::default());
//! assert_eq!(view.transform().offset.y, 50.0);
//! assert!(!out.updates.is_empty());
//!
//! // Release: the offset is already within the 150 pixel limit.
//! let settled = view.settle(SettleOptions::default());
//! assert!(matches!(settled, Settled::Clamped { .. }));
//! assert_eq!(view.transform().offset.y, 50.0);
//! ```
//!
//! ## Design notes
//!
//! - Offsets are in unscaled image units; on screen they move by
//!   `offset * scale`. [`ZoomTransform::to_affine`] gives the full mapping.
//! - Only the horizontal axis has a rubber band. A taller-than-viewport image
//!   pans vertically without constraint until it settles, and a swipe-down
//!   is only reachable while the image fits vertically.
//! - The horizontal pan rules form a small decision table keyed by
//!   [`HorizontalZone`]; [`split_horizontal`] exposes it on its own.
//!
//! This crate is `no_std`.

#![no_std]

mod overflow;
mod settle;
mod transform;
mod view;

pub use overflow::{CLAMP_NUDGE, HorizontalSplit, HorizontalZone, Overflow, split_horizontal};
pub use settle::{SETTLE_DURATION_MS, SettleOptions, Settled};
pub use transform::{FieldUpdate, TransformField, Updates, ZoomTransform};
pub use view::{
    CENTER_ON_DURATION_MS, DOUBLE_TAP_SCALE, PINCH_SPAN_PER_SCALE, PanOptions, PanOutcome,
    SWIPE_DOWN_SCALE_FLOOR, SWIPE_DOWN_SPAN_PER_SCALE, TOGGLE_DURATION_MS, ZoomView,
    ZoomViewDebugInfo,
};
