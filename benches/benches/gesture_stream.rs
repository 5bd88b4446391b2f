// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use pinchzoom::{GestureRelease, ImageZoom, InstantTarget, TouchPoint, ZoomConfig};
use pinchzoom_view::{PanOptions, ZoomView};

const VIEWPORT: Size = Size::new(390.0, 844.0);

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    /// Uniform in `[-1, 1)`.
    fn jitter(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX) * 2.0 - 1.0
    }
}

/// Cumulative displacements of a wobbly drag with `steps` moves.
fn drag_path(steps: usize, seed: u64) -> Vec<Vec2> {
    let mut rng = Lcg::new(seed);
    let mut at = Vec2::ZERO;
    (0..steps)
        .map(|_| {
            at += Vec2::new(8.0 * rng.jitter(), 3.0 + 2.0 * rng.jitter());
            at
        })
        .collect()
}

fn run_drag(zoom: &mut ImageZoom, target: &mut InstantTarget, path: &[Vec2]) -> usize {
    let touch = TouchPoint::new(0, Point::new(195.0, 422.0), 0);
    let mut events = zoom.gesture_start(&[touch], 0, target).len();
    for &cumulative in path {
        events += zoom.gesture_move(&[touch], cumulative, target).len();
    }
    let total = path.last().copied().unwrap_or(Vec2::ZERO);
    let release = GestureRelease::new(total, Vec2::ZERO, 1, touch.tap_point());
    events += zoom.gesture_release(release, 500, target).len();
    events
}

fn run_pinch(zoom: &mut ImageZoom, target: &mut InstantTarget, steps: usize) -> usize {
    let a = TouchPoint::new(0, Point::new(150.0, 400.0), 0);
    let mut events = 0;
    let b_at = |i: usize| {
        let spread = 60.0 + 2.5 * i as f64;
        TouchPoint::new(1, Point::new(150.0 + spread, 440.0), 0)
    };
    events += zoom.gesture_start(&[a, b_at(0)], 0, target).len();
    for i in 0..steps {
        events += zoom.gesture_move(&[a, b_at(i)], Vec2::ZERO, target).len();
    }
    let release = GestureRelease::new(Vec2::ZERO, Vec2::ZERO, 2, a.tap_point());
    events += zoom.gesture_release(release, 500, target).len();
    events
}

fn bench_gesture_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinchzoom");
    group.sample_size(50);

    for &steps in &[16_usize, 256, 4_096] {
        let path = drag_path(steps, 0x5EED_0000_0000_0001);

        group.bench_function(format!("view_apply_pan(steps={steps})"), |b| {
            b.iter_batched(
                || ZoomView::new(VIEWPORT, Size::new(1_200.0, 900.0)),
                |mut view| {
                    let mut last = Vec2::ZERO;
                    for &cumulative in &path {
                        black_box(view.apply_pan(cumulative - last, PanOptions::default()));
                        last = cumulative;
                    }
                    black_box(view);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("image_zoom_drag(steps={steps})"), |b| {
            let config = ZoomConfig::new(VIEWPORT, Size::new(1_200.0, 900.0));
            b.iter_batched(
                || (ImageZoom::new(config), InstantTarget::new()),
                |(mut zoom, mut target)| {
                    black_box(run_drag(&mut zoom, &mut target, &path));
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("image_zoom_swipe_down(steps={steps})"), |b| {
            let config = ZoomConfig::new(VIEWPORT, Size::new(390.0, 600.0)).with_swipe_down(true);
            b.iter_batched(
                || (ImageZoom::new(config), InstantTarget::new()),
                |(mut zoom, mut target)| {
                    black_box(run_drag(&mut zoom, &mut target, &path));
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("image_zoom_pinch(steps={steps})"), |b| {
            let config = ZoomConfig::new(VIEWPORT, Size::new(1_200.0, 900.0));
            b.iter_batched(
                || (ImageZoom::new(config), InstantTarget::new()),
                |(mut zoom, mut target)| {
                    black_box(run_pinch(&mut zoom, &mut target, steps));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gesture_stream);
criterion_main!(benches);
