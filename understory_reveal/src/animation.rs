// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset animation: time-based interpolation between two front content offsets.
//!
//! An [`OffsetAnimation`] is advanced by the host's frame clock through
//! [`OffsetAnimation::advance`]. The last [`Step`] it produces lands exactly on the
//! target and is the only one marked finished. Cancelling returns the last applied
//! offset so a new transition can start from there.
//!
//! ## Bouncy settling
//!
//! With [`AnimationType::Bouncy`] the main pass is followed by two parabolic arcs
//! that overshoot the target in the direction of travel and return to it, each
//! half as high as the previous one. The resting offset is unaffected.

use core::time::Duration;

use kurbo::{CubicBez, ParamCurve};

use crate::options::{AnimationCurve, AnimationType};

/// Overshoot of each bounce arc, as a fraction of the distance travelled.
const BOUNCE_AMPLITUDES: [f64; 2] = [0.06, 0.03];
/// Length of each bounce arc, as a fraction of the main duration.
const BOUNCE_LENGTH: f64 = 0.3;

/// Map linear progress `t` in `[0, 1]` through `curve`.
pub fn ease(curve: AnimationCurve, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match curve {
        AnimationCurve::Linear => t,
        AnimationCurve::EaseIn => cubic_ease(0.42, 0.0, 1.0, 1.0, t),
        AnimationCurve::EaseOut => cubic_ease(0.0, 0.0, 0.58, 1.0, t),
        AnimationCurve::EaseInOut => cubic_ease(0.42, 0.0, 0.58, 1.0, t),
    }
}

/// Evaluate a unit timing Bézier with control points `(x1, y1)`, `(x2, y2)` at `x`.
///
/// Control x-coordinates must lie in `[0, 1]`, which keeps x monotonic in the curve
/// parameter so bisection converges.
fn cubic_ease(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    let curve = CubicBez::new((0.0, 0.0), (x1, y1), (x2, y2), (1.0, 1.0));
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..48 {
        let mid = 0.5 * (lo + hi);
        if curve.eval(mid).x < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    curve.eval(0.5 * (lo + hi)).y
}

/// One sample of an [`OffsetAnimation`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    /// Offset to apply for this frame.
    pub offset: f64,
    /// Whether the animation has reached its target. Reported exactly once.
    pub finished: bool,
}

/// Interpolates the front content offset from `from` to `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetAnimation {
    from: f64,
    to: f64,
    duration: Duration,
    curve: AnimationCurve,
    kind: AnimationType,
    elapsed: Duration,
    current: f64,
    finished: bool,
}

impl OffsetAnimation {
    /// Create an animation that has not yet produced a frame.
    pub fn new(
        from: f64,
        to: f64,
        duration: Duration,
        curve: AnimationCurve,
        kind: AnimationType,
    ) -> Self {
        Self {
            from,
            to,
            duration,
            curve,
            kind,
            elapsed: Duration::ZERO,
            current: from,
            finished: false,
        }
    }

    /// Starting offset.
    pub fn start(&self) -> f64 {
        self.from
    }

    /// Target offset.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Move the target, keeping the start and elapsed time. Used when the host resizes mid-flight.
    pub fn retarget(&mut self, to: f64) {
        self.to = to;
    }

    /// Last applied offset.
    pub fn value(&self) -> f64 {
        self.current
    }

    /// Whether the final step has been produced.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Duration including any bounce arcs.
    pub fn total_duration(&self) -> Duration {
        match self.kind {
            AnimationType::Static => self.duration,
            AnimationType::Bouncy => {
                let arcs = BOUNCE_LENGTH * BOUNCE_AMPLITUDES.len() as f64;
                self.duration + self.duration.mul_f64(arcs)
            }
        }
    }

    /// Advance the clock by `dt` and sample.
    ///
    /// After the finishing step, further calls keep returning the target with
    /// `finished: false` so that completion is observed only once.
    pub fn advance(&mut self, dt: Duration) -> Step {
        if self.finished {
            return Step {
                offset: self.to,
                finished: false,
            };
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.total_duration() {
            self.finished = true;
            self.current = self.to;
        } else {
            self.current = self.sample(self.elapsed);
        }
        log::trace!("animation step at {:?}: {}", self.elapsed, self.current);
        Step {
            offset: self.current,
            finished: self.finished,
        }
    }

    /// Stop the animation and return the last applied offset.
    pub fn cancel(self) -> f64 {
        self.current
    }

    fn sample(&self, at: Duration) -> f64 {
        let main = self.duration.as_secs_f64();
        let t = at.as_secs_f64();
        if t < main {
            let p = ease(self.curve, t / main);
            return self.from + (self.to - self.from) * p;
        }
        let arc = main * BOUNCE_LENGTH;
        let travel = self.to - self.from;
        let mut start = main;
        for amplitude in BOUNCE_AMPLITUDES {
            if t < start + arc {
                let u = (t - start) / arc;
                return self.to + travel * amplitude * 4.0 * u * (1.0 - u);
            }
            start += arc;
        }
        self.to
    }
}
