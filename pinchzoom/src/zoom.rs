// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Size, Vec2};
use pinchzoom_gesture::{
    GestureClassifier, GestureEvent, GestureRelease, MoveAction, ReleaseAction, TouchPoint,
};
use pinchzoom_view::{
    CENTER_ON_DURATION_MS, FieldUpdate, Overflow, Settled, ZoomTransform, ZoomView,
};

use crate::config::{ConfigError, ZoomConfig};
use crate::event::{MoveEvent, MoveKind, ZoomEvent};
use crate::tween::{RenderMirror, Started, TweenId, TweenTarget};

/// Target of [`ImageZoom::center_on`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterOn {
    /// Horizontal offset in unscaled image units.
    pub x: f64,
    /// Vertical offset in unscaled image units.
    pub y: f64,
    /// Scale to zoom to. Not clamped to the pinch limits.
    pub scale: f64,
    /// Animation length.
    pub duration_ms: u32,
}

impl CenterOn {
    /// A target animated over the default 300 ms.
    #[must_use]
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self {
            x,
            y,
            scale,
            duration_ms: CENTER_ON_DURATION_MS,
        }
    }

    /// Overrides the animation length.
    #[must_use]
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    fn transform(&self) -> ZoomTransform {
        ZoomTransform::new(Vec2::new(self.x, self.y), self.scale)
    }
}

/// A pinch-zoomable image: gesture classification, transform state and
/// settling behind one event-driven API.
///
/// The host feeds touch events, timer ticks and tween completions in; each
/// entry point returns the [`ZoomEvent`]s it produced, in order, and writes
/// transform changes to the [`TweenTarget`] it is given. All calls are
/// expected on one thread, one at a time.
#[derive(Clone, Debug)]
pub struct ImageZoom {
    config: ZoomConfig,
    view: ZoomView,
    classifier: GestureClassifier,
    mirror: RenderMirror,
    last_center_on: Option<CenterOn>,
    center_on_pending: Started,
}

impl ImageZoom {
    /// Creates a component at the identity transform.
    ///
    /// The configuration is used as given. See [`ImageZoom::try_new`] for a
    /// checked variant.
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        let mut view = ZoomView::new(config.viewport, config.content);
        view.set_scale_limits(config.min_scale, config.max_scale);
        view.set_max_overflow(config.max_overflow);
        Self {
            classifier: GestureClassifier::new(config.classifier()),
            config,
            view,
            mirror: RenderMirror::new(),
            last_center_on: None,
            center_on_pending: Started::new(),
        }
    }

    /// Creates a component after [validating](ZoomConfig::validate) `config`.
    pub fn try_new(config: ZoomConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// The current transform is kept as is, even if it falls outside new
    /// scale limits; the next gesture brings it back in range.
    pub fn set_config(&mut self, config: ZoomConfig) {
        self.view.set_viewport(config.viewport);
        self.view.set_content(config.content);
        self.view.set_scale_limits(config.min_scale, config.max_scale);
        self.view.set_max_overflow(config.max_overflow);
        self.classifier.set_config(config.classifier());
        self.config = config;
    }

    /// The canonical transform.
    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.view.transform()
    }

    /// Rubber-band counters.
    #[must_use]
    pub fn overflow(&self) -> Overflow {
        self.view.overflow()
    }

    /// Transform state machine.
    #[must_use]
    pub fn view(&self) -> &ZoomView {
        &self.view
    }

    /// Gesture classifier.
    #[must_use]
    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Deadline of the next long-press or tap timer.
    ///
    /// Call [`ImageZoom::poll_timers`] once the host clock reaches it.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.classifier.next_deadline()
    }

    /// First finger(s) down.
    ///
    /// Clears the rubber-band counters, drops any pending single tap and may
    /// recognize a double tap, which toggles zoom at the tapped point when
    /// enabled.
    pub fn gesture_start<T: TweenTarget>(
        &mut self,
        touches: &[TouchPoint],
        now_ms: u64,
        target: &mut T,
    ) -> Vec<ZoomEvent> {
        let mut events = Vec::new();
        if self.view.reset_overflow() {
            events.push(ZoomEvent::HorizontalOverflow(0.0));
        }

        let viewport = self.view.viewport();
        let Some(GestureEvent::DoubleTap(point)) =
            self.classifier.on_start(touches, viewport, now_ms)
        else {
            return events;
        };
        events.push(ZoomEvent::DoubleTap(point));
        if self.config.double_click_zoom_enabled {
            let updates = self.view.toggle_zoom_at(point.page);
            self.write(&updates, target);
            events.push(self.move_event(MoveKind::CenterOn));
        }
        events
    }

    /// Finger(s) moved. `cumulative` is the displacement since the gesture
    /// started.
    pub fn gesture_move<T: TweenTarget>(
        &mut self,
        touches: &[TouchPoint],
        cumulative: Vec2,
        target: &mut T,
    ) -> Vec<ZoomEvent> {
        let mut events = Vec::new();
        match self.classifier.on_move(touches, cumulative) {
            MoveAction::Ignored => return events,
            MoveAction::Pan { delta, horizontal } => {
                if self.config.pan_enabled {
                    let outcome = self
                        .view
                        .apply_pan(delta, self.config.pan_options(horizontal));
                    self.write(&outcome.updates, target);
                    events.extend(
                        outcome
                            .overflow_reports
                            .into_iter()
                            .map(ZoomEvent::HorizontalOverflow),
                    );
                }
            }
            MoveAction::Pinch {
                span_delta, anchor, ..
            } => {
                if let (true, Some(span_delta)) = (self.config.pinch_enabled, span_delta) {
                    let updates = self.view.apply_pinch(span_delta, anchor);
                    self.write(&updates, target);
                }
            }
        }
        events.push(self.move_event(MoveKind::Gesture));
        events
    }

    /// Finger(s) lifted.
    ///
    /// Taps are deferred to [`ImageZoom::poll_timers`]. A finished pan,
    /// pinch or swipe reports [`ZoomEvent::Released`] and settles: either
    /// [`ZoomEvent::SwipeDown`] with the transform left alone, or correction
    /// animations followed by a [`MoveKind::Release`] move. Both paths reset
    /// the overflow counters.
    pub fn gesture_release<T: TweenTarget>(
        &mut self,
        release: GestureRelease,
        now_ms: u64,
        target: &mut T,
    ) -> Vec<ZoomEvent> {
        let mut events = Vec::new();
        let ReleaseAction::Settle { velocity } = self.classifier.on_release(release, now_ms)
        else {
            return events;
        };
        events.push(ZoomEvent::Released {
            velocity,
            scale: self.view.transform().scale,
        });

        match self.view.settle(self.config.settle_options()) {
            Settled::Dismissed { overflow_released } => {
                if overflow_released {
                    events.push(ZoomEvent::HorizontalOverflow(0.0));
                }
                events.push(ZoomEvent::SwipeDown);
            }
            Settled::Clamped {
                updates,
                overflow_released,
            } => {
                self.write(&updates, target);
                if overflow_released {
                    events.push(ZoomEvent::HorizontalOverflow(0.0));
                }
                events.push(self.move_event(MoveKind::Release));
            }
        }
        events
    }

    /// The host took the touch stream away. Nothing settles.
    pub fn gesture_terminate(&mut self) {
        self.classifier.on_terminate();
    }

    /// Fires long-press and deferred-tap timers due at `now_ms`.
    pub fn poll_timers(&mut self, now_ms: u64) -> Vec<ZoomEvent> {
        self.classifier
            .poll(now_ms)
            .into_iter()
            .map(|event| match event {
                GestureEvent::Tap(point) => ZoomEvent::Tap(point),
                GestureEvent::DoubleTap(point) => ZoomEvent::DoubleTap(point),
                GestureEvent::LongPress(point) => ZoomEvent::LongPress(point),
            })
            .collect()
    }

    /// The tween `id` completed.
    ///
    /// Once every animation of the latest [`ImageZoom::center_on`] has
    /// finished, this reports a [`MoveKind::CenterOn`] move. Other handles
    /// are ignored.
    pub fn tween_finished(&mut self, id: TweenId) -> Vec<ZoomEvent> {
        let mut events = Vec::new();
        let Some(index) = self.center_on_pending.iter().position(|&p| p == id) else {
            return events;
        };
        self.center_on_pending.remove(index);
        if self.center_on_pending.is_empty() {
            events.push(self.move_event(MoveKind::CenterOn));
        }
        events
    }

    /// The viewport was resized.
    pub fn handle_layout(&mut self, viewport: Size) -> Vec<ZoomEvent> {
        self.config.viewport = viewport;
        self.view.set_viewport(viewport);
        alloc::vec![ZoomEvent::LayoutChanged(viewport)]
    }

    /// Jumps to the identity transform without animation.
    pub fn reset<T: TweenTarget>(&mut self, target: &mut T) {
        let updates = self.view.reset();
        self.write(&updates, target);
        self.forget_center_on();
    }

    /// Returns to unit scale, writing only the scale.
    ///
    /// The canonical offsets are zeroed too; the displayed offsets catch up
    /// at the next write.
    pub fn reset_scale<T: TweenTarget>(&mut self, target: &mut T) {
        let updates = self.view.reset_scale();
        self.write(&updates, target);
        self.forget_center_on();
    }

    /// Animates to `center`.
    ///
    /// Asking for the same target as the previous call does nothing, so an
    /// in-flight animation is never restarted. Completion is reported
    /// through [`ImageZoom::tween_finished`].
    pub fn center_on<T: TweenTarget>(
        &mut self,
        center: CenterOn,
        target: &mut T,
    ) -> Vec<ZoomEvent> {
        let mut events = Vec::new();
        if self.last_center_on == Some(center) {
            log::debug!("center_on target unchanged, skipping");
            return events;
        }
        self.last_center_on = Some(center);

        let updates = self.view.center_on(center.transform(), center.duration_ms);
        self.center_on_pending = self.write(&updates, target);
        if self.center_on_pending.is_empty() {
            events.push(self.move_event(MoveKind::CenterOn));
        }
        events
    }

    fn forget_center_on(&mut self) {
        self.last_center_on = None;
        self.center_on_pending.clear();
    }

    fn write<T: TweenTarget>(&mut self, updates: &[FieldUpdate], target: &mut T) -> Started {
        log::trace!("writing {} field updates", updates.len());
        self.mirror
            .write(updates, self.config.hardware_accelerated, target)
    }

    fn move_event(&self, kind: MoveKind) -> ZoomEvent {
        ZoomEvent::Move(MoveEvent::new(
            kind,
            self.view.transform(),
            self.classifier.pinch_span(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Size, Vec2};
    use pinchzoom_gesture::{GestureRelease, TouchPoint};

    use pinchzoom_view::TransformField;

    use super::{CenterOn, ImageZoom};
    use crate::config::ZoomConfig;
    use crate::event::{MoveKind, ZoomEvent};
    use crate::tween::{Animation, InstantTarget, TweenId, TweenTarget};

    /// Shows everything instantly and keeps every animation it was asked for.
    #[derive(Default)]
    struct Recorder {
        shown: InstantTarget,
        animations: Vec<Animation>,
    }

    impl TweenTarget for Recorder {
        fn set_immediate(&mut self, field: TransformField, value: f64) {
            self.shown.set_immediate(field, value);
        }

        fn animate(&mut self, animation: Animation) -> TweenId {
            self.animations.push(animation);
            self.shown.animate(animation)
        }
    }

    fn zoom() -> ImageZoom {
        ImageZoom::new(ZoomConfig::new(
            Size::new(300.0, 300.0),
            Size::new(300.0, 300.0),
        ))
    }

    #[test]
    fn center_on_reports_once_all_tweens_finish() {
        let mut zoom = zoom();
        let mut target = Recorder::default();

        assert!(
            zoom.center_on(CenterOn::new(10.0, -5.0, 2.0), &mut target)
                .is_empty()
        );
        assert_eq!(target.animations.len(), 3);
        assert!(target.animations.iter().all(|a| a.duration_ms == 300));
        let finished = target.shown.drain_finished();
        assert_eq!(finished.len(), 3);

        assert!(zoom.tween_finished(finished[0]).is_empty());
        assert!(zoom.tween_finished(TweenId(999)).is_empty());
        assert!(zoom.tween_finished(finished[1]).is_empty());
        let events = zoom.tween_finished(finished[2]);
        assert!(matches!(
            events.as_slice(),
            [ZoomEvent::Move(m)] if m.kind == MoveKind::CenterOn && m.scale == 2.0
        ));
        assert_eq!(target.shown.transform.offset, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn center_on_duration_can_be_overridden() {
        let mut zoom = zoom();
        let mut target = Recorder::default();
        zoom.center_on(CenterOn::new(0.0, 0.0, 2.0).with_duration(50), &mut target);

        assert_eq!(target.animations.len(), 3);
        assert!(target.animations.iter().all(|a| a.duration_ms == 50));
    }

    #[test]
    fn repeated_center_on_is_a_no_op() {
        let mut zoom = zoom();
        let mut target = InstantTarget::new();
        let center = CenterOn::new(0.0, 0.0, 3.0).with_duration(50);

        zoom.center_on(center, &mut target);
        assert_eq!(target.drain_finished().len(), 3);
        zoom.center_on(center, &mut target);
        assert!(target.drain_finished().is_empty());

        // After a reset the same target animates again.
        zoom.reset(&mut target);
        zoom.center_on(center, &mut target);
        assert_eq!(target.drain_finished().len(), 3);
    }

    #[test]
    fn layout_change_is_reported() {
        let mut zoom = zoom();
        let size = Size::new(200.0, 100.0);
        assert_eq!(zoom.handle_layout(size), [ZoomEvent::LayoutChanged(size)]);
        assert_eq!(zoom.view().viewport(), size);
        assert_eq!(zoom.config().viewport, size);
    }

    #[test]
    fn terminate_skips_settling() {
        let mut zoom = zoom();
        let mut target = InstantTarget::new();
        let t = TouchPoint::new(0, Point::new(150.0, 150.0), 0);
        zoom.gesture_start(&[t], 0, &mut target);
        zoom.gesture_move(&[t], Vec2::ZERO, &mut target);
        zoom.gesture_terminate();

        assert!(zoom.classifier().session().is_none());
        assert!(zoom.poll_timers(10_000).is_empty());
        // A release without a live session still settles.
        let release = GestureRelease::new(Vec2::new(50.0, 0.0), Vec2::ZERO, 1, t.tap_point());
        assert!(matches!(
            zoom.gesture_release(release, 100, &mut target).first(),
            Some(ZoomEvent::Released { .. })
        ));
    }
}
