// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinchzoom Gesture: touch gesture classification for pinch-zoomable surfaces.
//!
//! One touch stream can mean several things. This crate tells them apart and
//! keeps just enough state across events to do so:
//!
//! - [`touch`]: Touch records plus the pinch span and anchor helpers
//! - [`drag`]: Per-event deltas from a cumulative displacement
//! - [`session`]: Per-gesture flags and cross-gesture double-tap memory
//! - [`classifier`]: The [`GestureClassifier`] state machine itself
//!
//! ## Recognized gestures
//!
//! - **Tap**: one finger, released within the click distance. Reported only
//!   after the double-tap interval has passed without a second press.
//! - **Double tap**: a second single-finger press within the interval of the
//!   first. Reported immediately at press time.
//! - **Long press**: a press held for the long-press delay without moving
//!   past the motion threshold or adding a second finger.
//! - **Pan** and **pinch**: continuous one- and two-finger motion, reported
//!   as deltas for a transform to consume.
//!
//! Time is supplied by the host as milliseconds on a monotonic clock. Nothing
//! in the crate reads a clock or spawns a timer; call
//! [`GestureClassifier::poll`] once [`GestureClassifier::next_deadline`]
//! has passed.
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use pinchzoom_gesture::{ClassifierConfig, GestureClassifier, GestureEvent, TouchPoint};
//!
//! let mut classifier = GestureClassifier::new(ClassifierConfig::default());
//! let touch = TouchPoint::new(7, Point::new(50.0, 50.0), 0);
//!
//! classifier.on_start(&[touch], Size::new(200.0, 200.0), 0);
//! assert_eq!(classifier.next_deadline(), Some(800));
//! assert_eq!(
//!     classifier.poll(800),
//!     vec![GestureEvent::LongPress(touch.tap_point())]
//! );
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod classifier;
pub mod drag;
pub mod session;
pub mod touch;

pub use classifier::{
    ClassifierConfig, GestureClassifier, GestureEvent, GestureRelease, MoveAction, ReleaseAction,
};
pub use session::{DoubleClickTracker, GestureSession};
pub use touch::{TapPoint, TouchPoint, pinch_anchor, pinch_span};
