// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};
use smallvec::SmallVec;

use crate::overflow::{CLAMP_NUDGE, HorizontalZone, Overflow, split_horizontal};
use crate::transform::{FieldUpdate, TransformField, Updates, ZoomTransform, animate_all, set_all};

/// Pixels of pinch span change per unit of scale change.
pub const PINCH_SPAN_PER_SCALE: f64 = 200.0;

/// Pixels of downward swipe per unit of scale lost while pulling to dismiss.
pub const SWIPE_DOWN_SPAN_PER_SCALE: f64 = 1000.0;

/// Smallest scale a swipe-down can shrink the image to.
///
/// The shrink ignores the configured scale limits; this only keeps the scale
/// positive on very long pulls.
pub const SWIPE_DOWN_SCALE_FLOOR: f64 = 0.01;

/// Scale a double tap zooms into from unit scale.
pub const DOUBLE_TAP_SCALE: f64 = 2.0;

/// Duration of the double-tap zoom toggle.
pub const TOGGLE_DURATION_MS: u32 = 100;

/// Default duration of [`ZoomView::center_on`].
pub const CENTER_ON_DURATION_MS: u32 = 300;

/// Per-move context for [`ZoomView::apply_pan`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanOptions {
    /// Whether pulling down while the image fits vertically starts a
    /// swipe-down.
    pub swipe_down_enabled: bool,
    /// Whether the current gesture has been classified as horizontal, which
    /// rules out a swipe-down.
    pub horizontal: bool,
}

/// Result of [`ZoomView::apply_pan`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanOutcome {
    /// Writes toward the rendering side.
    pub updates: Updates,
    /// Horizontal overflow values to report, in order.
    pub overflow_reports: SmallVec<[f64; 2]>,
}

/// Pan/zoom state of an image inside a fixed viewport.
///
/// `ZoomView` owns the canonical transform. It applies pan and pinch deltas,
/// enforces the horizontal bounds through the rubber-band [`Overflow`]
/// counter, and reports every resulting change as [`FieldUpdate`]s for the
/// rendering side to mirror.
#[derive(Clone, Debug)]
pub struct ZoomView {
    pub(crate) viewport: Size,
    pub(crate) content: Size,
    pub(crate) min_scale: f64,
    pub(crate) max_scale: f64,
    pub(crate) max_overflow: f64,
    pub(crate) transform: ZoomTransform,
    pub(crate) overflow: Overflow,
}

impl ZoomView {
    /// Creates a view of `content` inside `viewport` at the identity transform.
    ///
    /// Scale limits default to `[0.6, 10.0]` and the maximum overflow to
    /// `100.0`.
    #[must_use]
    pub fn new(viewport: Size, content: Size) -> Self {
        Self {
            viewport,
            content,
            min_scale: 0.6,
            max_scale: 10.0,
            max_overflow: 100.0,
            transform: ZoomTransform::IDENTITY,
            overflow: Overflow::default(),
        }
    }

    /// Current canonical transform.
    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    /// Current overflow counters.
    #[must_use]
    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// Viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Sets the viewport size. The transform is left as is.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Unscaled image size.
    #[must_use]
    pub fn content(&self) -> Size {
        self.content
    }

    /// Sets the unscaled image size. The transform is left as is.
    pub fn set_content(&mut self, content: Size) {
        self.content = content;
    }

    /// Sets the scale range pinching is clamped to.
    ///
    /// The provided range is normalized so that `min_scale <= max_scale`.
    /// The current scale is not touched.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
    }

    /// Sets the bound on the horizontal overflow magnitude.
    pub fn set_max_overflow(&mut self, max_overflow: f64) {
        self.max_overflow = max_overflow.abs();
    }

    /// Zeroes both overflow counters.
    ///
    /// Returns `true` if a non-zero horizontal overflow was released.
    pub fn reset_overflow(&mut self) -> bool {
        let released = self.overflow.horizontal != 0.0;
        self.overflow = Overflow::default();
        released
    }

    /// Current horizontal pan regime.
    #[must_use]
    pub fn horizontal_zone(&self) -> HorizontalZone {
        if self.content.width * self.transform.scale <= self.viewport.width {
            HorizontalZone::ContentFits
        } else if self.overflow.horizontal > 0.0 {
            HorizontalZone::OverflowRight
        } else if self.overflow.horizontal < 0.0 {
            HorizontalZone::OverflowLeft
        } else {
            HorizontalZone::Free
        }
    }

    /// Largest horizontal offset magnitude that keeps the viewport covered.
    #[must_use]
    pub fn horizontal_limit(&self) -> f64 {
        axis_limit(self.content.width, self.viewport.width, self.transform.scale)
    }

    /// Largest vertical offset magnitude that keeps the viewport covered.
    #[must_use]
    pub fn vertical_limit(&self) -> f64 {
        axis_limit(self.content.height, self.viewport.height, self.transform.scale)
    }

    pub(crate) fn fits_horizontally(&self) -> bool {
        self.content.width * self.transform.scale <= self.viewport.width
    }

    pub(crate) fn fits_vertically(&self) -> bool {
        self.content.height * self.transform.scale <= self.viewport.height
    }

    /// Applies an incremental single-finger drag.
    ///
    /// Horizontally, the drag is split between the overflow counter and the
    /// offset (see [`HorizontalZone`]); the offset is hard-clamped to the
    /// image edges and the overflow to the configured maximum. Horizontal
    /// handling is skipped while a swipe-down is in progress.
    ///
    /// Vertically, a taller-than-viewport image pans without constraint.
    /// Otherwise, with swipe-down enabled on a non-horizontal gesture, the
    /// drag feeds the swipe-down counter; once that is positive the image
    /// follows the finger and shrinks as it is pulled down.
    pub fn apply_pan(&mut self, delta: Vec2, options: PanOptions) -> PanOutcome {
        let mut out = PanOutcome::default();
        if self.overflow.swipe_down == 0.0 {
            self.pan_horizontal(delta.x, &mut out);
        }
        self.pan_vertical(delta.y, options, &mut out.updates);
        out
    }

    fn pan_horizontal(&mut self, dx: f64, out: &mut PanOutcome) {
        let before = self.overflow.horizontal;
        let zone = self.horizontal_zone();
        let split = split_horizontal(zone, before, dx);
        self.overflow.horizontal = split.overflow;

        if zone != HorizontalZone::ContentFits {
            let scale = self.transform.scale;
            let limit = self.horizontal_limit();
            let mut x = self.transform.offset.x + split.applied / scale;
            if x < -limit {
                x = -limit;
                self.overflow.horizontal -= CLAMP_NUDGE;
            } else if x > limit {
                x = limit;
                self.overflow.horizontal += CLAMP_NUDGE;
            }
            self.transform.offset.x = x;
            out.updates.push(FieldUpdate::Set {
                field: TransformField::OffsetX,
                value: x,
            });
        }

        let max = self.max_overflow;
        self.overflow.horizontal = self.overflow.horizontal.max(-max).min(max);

        let after = self.overflow.horizontal;
        if split.released {
            out.overflow_reports.push(0.0);
        }
        if after != 0.0 {
            out.overflow_reports.push(after);
        } else if before != 0.0 && !split.released {
            out.overflow_reports.push(0.0);
        }
        log::trace!("pan x: zone={zone:?} dx={dx} overflow={after}");
    }

    fn pan_vertical(&mut self, dy: f64, options: PanOptions, updates: &mut Updates) {
        if !self.fits_vertically() {
            self.transform.offset.y += dy / self.transform.scale;
            updates.push(FieldUpdate::Set {
                field: TransformField::OffsetY,
                value: self.transform.offset.y,
            });
            return;
        }
        // A taller image never enters swipe-down; only a fitting one does.
        if !options.swipe_down_enabled || options.horizontal {
            return;
        }
        self.overflow.swipe_down += dy;
        if self.overflow.swipe_down > 0.0 {
            self.transform.offset.y += dy / self.transform.scale;
            let shrunk = self.transform.scale - dy / SWIPE_DOWN_SPAN_PER_SCALE;
            self.transform.scale = shrunk.max(SWIPE_DOWN_SCALE_FLOOR);
            updates.push(FieldUpdate::Set {
                field: TransformField::OffsetY,
                value: self.transform.offset.y,
            });
            updates.push(FieldUpdate::Set {
                field: TransformField::Scale,
                value: self.transform.scale,
            });
        }
    }

    /// Applies a change of the two-finger span.
    ///
    /// Every [`PINCH_SPAN_PER_SCALE`] pixels of span change the scale by one,
    /// clamped to the configured limits. The offset is corrected by
    /// `anchor * scale_delta / new_scale`, where `anchor` is the pinch
    /// midpoint relative to the viewport centre, so the image zooms toward
    /// the fingers. An anchor of zero is a pure zoom.
    pub fn apply_pinch(&mut self, span_delta: f64, anchor: Vec2) -> Updates {
        let before = self.transform.scale;
        let scale = self.clamp_scale(before + span_delta / PINCH_SPAN_PER_SCALE);
        self.transform.scale = scale;
        self.transform.offset -= anchor * (scale - before) / scale;
        log::trace!("pinch: span_delta={span_delta} scale={scale}");
        set_all(&self.transform)
    }

    /// Toggles between unit scale and [`DOUBLE_TAP_SCALE`].
    ///
    /// Away from unit scale this returns to the identity transform. At unit
    /// scale it zooms in anchored at `point` (in viewport coordinates), so
    /// the tapped part of the image stays under the finger. Both directions
    /// are animated over [`TOGGLE_DURATION_MS`].
    pub fn toggle_zoom_at(&mut self, point: Point) -> Updates {
        if self.transform.scale != 1.0 {
            self.transform = ZoomTransform::IDENTITY;
        } else {
            let before = self.transform.scale;
            let scale = DOUBLE_TAP_SCALE;
            let centre = self.viewport.to_vec2() / 2.0;
            self.transform = ZoomTransform::new(
                (centre - point.to_vec2()) * (scale - before) / scale,
                scale,
            );
        }
        log::debug!("toggle zoom at {point:?}: {:?}", self.transform);
        animate_all(&self.transform, TOGGLE_DURATION_MS)
    }

    /// Jumps the canonical transform to `target` and animates the rendered
    /// transform there over `duration_ms`.
    pub fn center_on(&mut self, target: ZoomTransform, duration_ms: u32) -> Updates {
        self.transform = target;
        animate_all(&self.transform, duration_ms)
    }

    /// Returns to the identity transform without animation.
    pub fn reset(&mut self) -> Updates {
        self.transform = ZoomTransform::IDENTITY;
        set_all(&self.transform)
    }

    /// Returns the canonical transform to identity, writing only the scale.
    ///
    /// The rendered offset keeps its value until the next offset write.
    pub fn reset_scale(&mut self) -> Updates {
        self.transform = ZoomTransform::IDENTITY;
        let mut updates = Updates::new();
        updates.push(FieldUpdate::Set {
            field: TransformField::Scale,
            value: 1.0,
        });
        updates
    }

    pub(crate) fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomViewDebugInfo {
        ZoomViewDebugInfo {
            viewport: self.viewport,
            content: self.content,
            transform: self.transform,
            overflow: self.overflow,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            max_overflow: self.max_overflow,
            horizontal_zone: self.horizontal_zone(),
        }
    }
}

fn axis_limit(content: f64, viewport: f64, scale: f64) -> f64 {
    (content * scale - viewport) / 2.0 / scale
}

/// Debug snapshot of a [`ZoomView`].
#[derive(Clone, Copy, Debug)]
pub struct ZoomViewDebugInfo {
    /// Viewport size.
    pub viewport: Size,
    /// Unscaled image size.
    pub content: Size,
    /// Canonical transform.
    pub transform: ZoomTransform,
    /// Overflow counters.
    pub overflow: Overflow,
    /// Minimum pinch scale.
    pub min_scale: f64,
    /// Maximum pinch scale.
    pub max_scale: f64,
    /// Bound on the horizontal overflow magnitude.
    pub max_overflow: f64,
    /// Current horizontal pan regime.
    pub horizontal_zone: HorizontalZone,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{PanOptions, SWIPE_DOWN_SCALE_FLOOR, ZoomView};
    use crate::overflow::{CLAMP_NUDGE, HorizontalZone};
    use crate::transform::{FieldUpdate, TransformField, ZoomTransform};

    fn wide_view() -> ZoomView {
        // 600 wide image in a 300 wide viewport: offset limit is 150.
        ZoomView::new(Size::new(300.0, 300.0), Size::new(600.0, 300.0))
    }

    fn pan(view: &mut ZoomView, dx: f64, dy: f64) -> super::PanOutcome {
        view.apply_pan(Vec2::new(dx, dy), PanOptions::default())
    }

    #[test]
    fn horizontal_pan_within_bounds_moves_offset() {
        let mut view = wide_view();
        let out = pan(&mut view, 40.0, 0.0);

        assert_eq!(view.transform().offset.x, 40.0);
        assert_eq!(view.overflow().horizontal, 0.0);
        assert!(out.overflow_reports.is_empty());
        assert!(out.updates.contains(&FieldUpdate::Set {
            field: TransformField::OffsetX,
            value: 40.0,
        }));
    }

    #[test]
    fn clamping_at_the_edge_nudges_overflow() {
        let mut view = wide_view();
        pan(&mut view, 200.0, 0.0);

        assert_eq!(view.transform().offset.x, 150.0);
        assert_eq!(view.overflow().horizontal, CLAMP_NUDGE);
        assert_eq!(view.horizontal_zone(), HorizontalZone::OverflowRight);

        // Further drag is absorbed rather than applied.
        let out = pan(&mut view, 30.0, 0.0);
        assert_eq!(view.transform().offset.x, 150.0);
        assert!((view.overflow().horizontal - 30.0).abs() < 1e-6);
        assert_eq!(out.overflow_reports.len(), 1);
    }

    #[test]
    fn dragging_back_drains_overflow_then_pans() {
        let mut view = wide_view();
        pan(&mut view, 200.0, 0.0);
        pan(&mut view, 30.0, 0.0);

        let out = pan(&mut view, -20.0, 0.0);
        assert_eq!(view.transform().offset.x, 150.0);
        assert!(view.overflow().horizontal > 0.0);
        assert!(!out.overflow_reports.contains(&0.0));

        let out = pan(&mut view, -20.0, 0.0);
        assert_eq!(view.overflow().horizontal, 0.0);
        assert!((view.transform().offset.x - 140.0).abs() < 1e-6);
        assert_eq!(out.overflow_reports.as_slice(), &[0.0]);
    }

    #[test]
    fn overflow_is_bounded_by_max_overflow() {
        let mut view = ZoomView::new(Size::new(300.0, 300.0), Size::new(300.0, 300.0));
        view.set_max_overflow(50.0);

        for _ in 0..10 {
            let out = pan(&mut view, -20.0, 0.0);
            for reported in out.overflow_reports {
                assert!(reported.abs() <= 50.0);
            }
        }
        assert_eq!(view.overflow().horizontal, -50.0);
        assert_eq!(view.transform().offset.x, 0.0);
    }

    #[test]
    fn fitting_content_reports_zero_once_when_overflow_returns() {
        let mut view = ZoomView::new(Size::new(300.0, 300.0), Size::new(300.0, 300.0));
        pan(&mut view, 10.0, 0.0);
        let out = pan(&mut view, -10.0, 0.0);
        assert_eq!(out.overflow_reports.as_slice(), &[0.0]);

        let out = pan(&mut view, 0.0, 5.0);
        assert!(out.overflow_reports.is_empty());
    }

    #[test]
    fn tall_content_pans_vertically_without_clamping() {
        let mut view = ZoomView::new(Size::new(300.0, 300.0), Size::new(300.0, 600.0));
        pan(&mut view, 0.0, 500.0);
        assert_eq!(view.transform().offset.y, 500.0);
    }

    #[test]
    fn fitting_content_ignores_vertical_drag_without_swipe_down() {
        let mut view = ZoomView::new(Size::new(300.0, 300.0), Size::new(300.0, 300.0));
        let out = pan(&mut view, 0.0, 40.0);
        assert_eq!(view.transform(), ZoomTransform::IDENTITY);
        assert!(out.updates.is_empty());
    }

    #[test]
    fn swipe_down_follows_finger_and_shrinks() {
        let mut view = ZoomView::new(Size::new(300.0, 300.0), Size::new(300.0, 300.0));
        let options = PanOptions {
            swipe_down_enabled: true,
            horizontal: false,
        };
        view.apply_pan(Vec2::new(0.0, 100.0), options);

        assert_eq!(view.overflow().swipe_down, 100.0);
        assert_eq!(view.transform().offset.y, 100.0);
        assert!((view.transform().scale - 0.9).abs() < 1e-9);
    }

    #[test]
    fn swipe_down_needs_positive_accumulation() {
        let mut view = ZoomView::new(Size::new(300.0, 300.0), Size::new(300.0, 300.0));
        let options = PanOptions {
            swipe_down_enabled: true,
            horizontal: false,
        };
        view.apply_pan(Vec2::new(0.0, -30.0), options);
        assert_eq!(view.overflow().swipe_down, -30.0);
        assert_eq!(view.transform(), ZoomTransform::IDENTITY);
    }

    #[test]
    fn horizontal_gestures_never_swipe_down() {
        let mut view = ZoomView::new(Size::new(300.0, 300.0), Size::new(300.0, 300.0));
        let options = PanOptions {
            swipe_down_enabled: true,
            horizontal: true,
        };
        view.apply_pan(Vec2::new(0.0, 100.0), options);
        assert_eq!(view.overflow().swipe_down, 0.0);
    }

    #[test]
    fn swipe_down_shrink_ignores_min_scale() {
        let mut view = ZoomView::new(Size::new(300.0, 300.0), Size::new(300.0, 300.0));
        view.set_scale_limits(1.0, 4.0);
        let options = PanOptions {
            swipe_down_enabled: true,
            horizontal: false,
        };
        view.apply_pan(Vec2::new(0.0, 100.0), options);
        assert!((view.transform().scale - 0.9).abs() < 1e-9);
    }

    #[test]
    fn long_swipe_down_keeps_scale_positive() {
        let mut view = ZoomView::new(Size::new(300.0, 300.0), Size::new(300.0, 300.0));
        let options = PanOptions {
            swipe_down_enabled: true,
            horizontal: false,
        };
        view.apply_pan(Vec2::new(0.0, 2_000.0), options);
        assert_eq!(view.transform().scale, SWIPE_DOWN_SCALE_FLOOR);
        assert!(view.transform().offset.y.is_finite());
    }

    #[test]
    fn pinch_changes_scale_by_span_over_200() {
        let mut view = wide_view();
        view.apply_pinch(40.0, Vec2::ZERO);
        assert!((view.transform().scale - 1.2).abs() < 1e-9);
        assert_eq!(view.transform().offset, Vec2::ZERO);
    }

    #[test]
    fn centred_pinch_never_translates() {
        let mut view = wide_view();
        for delta in [120.0, -300.0, 5_000.0, -5_000.0] {
            view.apply_pinch(delta, Vec2::ZERO);
            assert_eq!(view.transform().offset, Vec2::ZERO);
        }
    }

    #[test]
    fn pinch_clamps_to_limits() {
        let mut view = wide_view();
        view.set_scale_limits(3.0, 0.5);
        view.apply_pinch(10_000.0, Vec2::ZERO);
        assert_eq!(view.transform().scale, 3.0);
        view.apply_pinch(-10_000.0, Vec2::ZERO);
        assert_eq!(view.transform().scale, 0.5);
    }

    #[test]
    fn pinch_from_unit_scale_keeps_anchor_in_place() {
        let viewport = Size::new(300.0, 300.0);
        let content = Size::new(300.0, 300.0);
        let mut view = ZoomView::new(viewport, content);
        let fingers = Point::new(200.0, 100.0);
        let anchor = fingers - Point::new(150.0, 150.0);

        let before = view.transform().to_affine(viewport, content).inverse() * fingers;
        view.apply_pinch(200.0, anchor);
        let after = view.transform().to_affine(viewport, content) * before;

        assert!((after.x - fingers.x).abs() < 1e-9);
        assert!((after.y - fingers.y).abs() < 1e-9);
    }

    #[test]
    fn double_toggle_returns_to_identity() {
        let mut view = wide_view();
        let point = Point::new(80.0, 220.0);

        let updates = view.toggle_zoom_at(point);
        assert_eq!(view.transform().scale, 2.0);
        assert_eq!(view.transform().offset, Vec2::new(35.0, -35.0));
        assert!(updates.iter().all(|u| matches!(
            u,
            FieldUpdate::Animate {
                duration_ms: 100,
                ..
            }
        )));

        view.toggle_zoom_at(point);
        assert_eq!(view.transform(), ZoomTransform::IDENTITY);
    }

    #[test]
    fn reset_scale_only_writes_scale() {
        let mut view = wide_view();
        view.apply_pinch(200.0, Vec2::new(10.0, 10.0));
        let updates = view.reset_scale();

        assert_eq!(view.transform(), ZoomTransform::IDENTITY);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].field(), TransformField::Scale);
    }

    #[test]
    fn debug_info_reflects_state() {
        let mut view = wide_view();
        view.set_scale_limits(0.5, 4.0);
        pan(&mut view, 10.0, 0.0);

        let info = view.debug_info();
        assert_eq!(info.viewport, Size::new(300.0, 300.0));
        assert_eq!(info.transform.offset.x, 10.0);
        assert_eq!(info.horizontal_zone, HorizontalZone::Free);
        assert!(info.min_scale <= info.max_scale);
    }
}
