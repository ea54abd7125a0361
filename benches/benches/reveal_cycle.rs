// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use understory_reveal::RevealController;
use understory_reveal::animation::{OffsetAnimation, ease};
use understory_reveal::gesture::GestureEvent;
use understory_reveal::options::{AnimationCurve, AnimationType, RevealOptions};

const FRAME: Duration = Duration::from_millis(16);

fn controller() -> RevealController<u32> {
    RevealController::new(0, Some(1), RevealOptions::default())
}

/// Press, `moves` drag samples, release, then tick until settled.
fn drag_cycle(reveal: &mut RevealController<u32>, moves: u32) {
    reveal.handle_gesture(GestureEvent::Began {
        position: Point::new(10.0, 100.0),
    });
    for i in 1..=moves {
        let x = 10.0 + 400.0 * f64::from(i) / f64::from(moves);
        reveal.handle_gesture(GestureEvent::Moved {
            position: Point::new(x, 100.0),
            velocity: Vec2::new(600.0, 0.0),
        });
    }
    reveal.handle_gesture(GestureEvent::Ended {
        velocity: Vec2::new(600.0, 0.0),
    });
    while reveal.is_animating() {
        reveal.tick(FRAME);
    }
    black_box(reveal.take_events());
}

fn bench_drag_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_drag_cycle");
    for moves in [8_u32, 64, 512] {
        group.bench_function(format!("moves_{moves}"), |b| {
            b.iter_batched(
                controller,
                |mut reveal| drag_cycle(&mut reveal, moves),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_animation(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_animation");
    for (name, curve, kind) in [
        ("linear_static", AnimationCurve::Linear, AnimationType::Static),
        ("ease_in_out_static", AnimationCurve::EaseInOut, AnimationType::Static),
        ("ease_out_bouncy", AnimationCurve::EaseOut, AnimationType::Bouncy),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut anim =
                    OffsetAnimation::new(0.0, 260.0, Duration::from_millis(185), curve, kind);
                loop {
                    let step = anim.advance(black_box(FRAME));
                    if step.finished {
                        break black_box(step.offset);
                    }
                }
            });
        });
    }
    group.bench_function("ease_sample_1k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..1000 {
                acc += ease(AnimationCurve::EaseInOut, f64::from(i) / 1000.0);
            }
            black_box(acc)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_drag_cycle, bench_animation);
criterion_main!(benches);
