// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use pinchzoom_gesture::{ClassifierConfig, GestureClassifier, GestureRelease, TouchPoint};
use pinchzoom_timing::TimerQueue;

fn bench_timers(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinchzoom_timing");

    for &n in &[16_u64, 1_024] {
        group.bench_function(format!("schedule_then_drain(n={n})"), |b| {
            b.iter_batched(
                TimerQueue::<u64>::new,
                |mut queue| {
                    // Interleaved deadlines exercise the sorted insert.
                    for i in 0..n {
                        queue.schedule((i * 7_919) % 1_000, i);
                    }
                    while let Some(fired) = queue.pop_due(1_000) {
                        black_box(fired);
                    }
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("schedule_cancel(n={n})"), |b| {
            b.iter_batched(
                TimerQueue::<u64>::new,
                |mut queue| {
                    for i in 0..n {
                        let id = queue.schedule(i, i);
                        black_box(queue.cancel(id));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    // Tap, tap, tap: every press cancels and re-arms the classifier's timers.
    group.bench_function("classifier_tap_storm", |b| {
        let viewport = Size::new(390.0, 844.0);
        b.iter_batched(
            || GestureClassifier::new(ClassifierConfig::default()),
            |mut classifier| {
                for i in 0..256_u64 {
                    let now = i * 120;
                    let touch = TouchPoint::new(i, Point::new(100.0, 100.0), now);
                    black_box(classifier.on_start(&[touch], viewport, now));
                    let release =
                        GestureRelease::new(Vec2::ZERO, Vec2::ZERO, 1, touch.tap_point());
                    black_box(classifier.on_release(release, now + 30));
                    black_box(classifier.poll(now + 60));
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_timers);
criterion_main!(benches);
