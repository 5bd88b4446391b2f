// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchzoom: a pinch-zoomable image surface without the rendering.
//!
//! [`ImageZoom`] interprets a multi-touch stream on an image shown inside a
//! fixed viewport and maintains the resulting pan/zoom transform. It tells
//! taps, double taps, long presses, pans, pinches and pull-down swipes apart;
//! keeps the image inside the viewport with a horizontal rubber band; and
//! settles the transform into bounds once a gesture ends.
//!
//! The crate is driven entirely by the host:
//!
//! - touch input arrives through [`ImageZoom::gesture_start`],
//!   [`ImageZoom::gesture_move`], [`ImageZoom::gesture_release`] and
//!   [`ImageZoom::gesture_terminate`];
//! - time only advances when the host calls [`ImageZoom::poll_timers`];
//! - transform changes are written to a [`TweenTarget`], which owns the
//!   actual animation and reports finished tweens back through
//!   [`ImageZoom::tween_finished`].
//!
//! Every entry point returns the [`ZoomEvent`]s it produced.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use pinchzoom::{
//!     GestureRelease, ImageZoom, InstantTarget, MoveKind, TouchPoint, ZoomConfig, ZoomEvent,
//! };
//!
//! // A 300x600 image in a 300x300 viewport; center focus off so the offset
//! // can rest away from the centre.
//! let config = ZoomConfig::new(Size::new(300.0, 300.0), Size::new(300.0, 600.0))
//!     .with_center_focus(false);
//! let mut zoom = ImageZoom::new(config);
//! let mut target = InstantTarget::new();
//!
//! let touch = TouchPoint::new(0, Point::new(150.0, 150.0), 0);
//! zoom.gesture_start(&[touch], 0, &mut target);
//! zoom.gesture_move(&[touch], Vec2::ZERO, &mut target);
//! zoom.gesture_move(&[touch], Vec2::new(0.0, 50.0), &mut target);
//!
//! let release = GestureRelease::new(Vec2::new(0.0, 50.0), Vec2::ZERO, 1, touch.tap_point());
//! let events = zoom.gesture_release(release, 120, &mut target);
//!
//! assert!(matches!(events[0], ZoomEvent::Released { .. }));
//! assert!(matches!(
//!     events.last(),
//!     Some(ZoomEvent::Move(m)) if m.kind == MoveKind::Release
//! ));
//! assert_eq!(zoom.transform().offset.y, 50.0);
//! assert_eq!(target.transform.offset.y, 50.0);
//! ```
//!
//! ## Crates
//!
//! The pieces are usable on their own:
//!
//! - `pinchzoom_gesture`: the gesture classifier.
//! - `pinchzoom_view`: transform state, overflow tracking and settling.
//! - `pinchzoom_timing`: the timer queue behind long presses and deferred taps.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod config;
mod event;
mod tween;
mod zoom;

pub use config::{ConfigError, ZoomConfig};
pub use event::{MoveEvent, MoveKind, ZoomEvent};
pub use tween::{Animation, InstantTarget, TweenId, TweenTarget};
pub use zoom::{CenterOn, ImageZoom};

pub use pinchzoom_gesture::{GestureRelease, TapPoint, TouchPoint};
pub use pinchzoom_view::{Overflow, TransformField, ZoomTransform};
