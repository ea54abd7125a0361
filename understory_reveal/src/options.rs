// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed configuration for the reveal controller.
//!
//! ## Overview
//!
//! [`RevealOptions`] holds every tunable. Build it from [`Default`] and the setters,
//! or from a key/value mapping with [`RevealOptions::from_entries`]. Both paths run
//! the same validation.
//!
//! ## Write policy
//!
//! Every setter either stores the new value or returns
//! [`RevealError::InvalidOptionKind`] and keeps the old one. Writes take effect on
//! the next transition; an animation that is already running keeps the duration,
//! curve, and type it started with.
//!
//! ```
//! use understory_reveal::options::{AnimationCurve, OptionValue, RevealOptions};
//!
//! let opts = RevealOptions::from_entries([
//!     ("animationDuration", OptionValue::Number(0.25)),
//!     ("animationCurve", OptionValue::Text("easeOut")),
//!     ("someFutureKey", OptionValue::Bool(true)),
//! ])
//! .unwrap();
//! assert_eq!(opts.animation_curve(), AnimationCurve::EaseOut);
//! assert!(opts.allows_overdraw());
//! ```

use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use crate::error::RevealError;

/// Timing curve applied to automatic front content movement.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AnimationCurve {
    /// Constant speed.
    #[default]
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow finish.
    EaseOut,
    /// Slow start and finish.
    EaseInOut,
}

impl AnimationCurve {
    /// Parse the option-mapping spelling of a curve.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Self::Linear),
            "easeIn" => Some(Self::EaseIn),
            "easeOut" => Some(Self::EaseOut),
            "easeInOut" => Some(Self::EaseInOut),
            _ => None,
        }
    }
}

/// How the front content settles after an automatic movement.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AnimationType {
    /// A single monotonic interpolation to the target.
    #[default]
    Static,
    /// The interpolation is followed by a short decaying overshoot past the target.
    Bouncy,
}

impl AnimationType {
    /// Parse the option-mapping spelling of a type.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "static" => Some(Self::Static),
            "bouncy" => Some(Self::Bouncy),
            _ => None,
        }
    }
}

/// Names recognized in an option mapping.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OptionKey {
    /// `animationDuration`: seconds, finite and non-negative.
    AnimationDuration,
    /// `animationCurve`: an [`AnimationCurve`].
    AnimationCurve,
    /// `animationType`: an [`AnimationType`].
    AnimationType,
    /// `allowsOverdraw`: bool.
    AllowsOverdraw,
    /// `quickSwipeVelocity`: units per second, finite and positive.
    QuickSwipeVelocity,
    /// `disablesFrontViewInteraction`: bool.
    DisablesFrontViewInteraction,
    /// `recognizesPanningOnFrontView`: bool.
    RecognizesPanningOnFrontView,
    /// `recognizesResetTapOnFrontView`: bool.
    RecognizesResetTapOnFrontView,
}

impl OptionKey {
    /// All recognized keys, in mapping order.
    pub const ALL: [Self; 8] = [
        Self::AnimationDuration,
        Self::AnimationCurve,
        Self::AnimationType,
        Self::AllowsOverdraw,
        Self::QuickSwipeVelocity,
        Self::DisablesFrontViewInteraction,
        Self::RecognizesPanningOnFrontView,
        Self::RecognizesResetTapOnFrontView,
    ];

    /// The mapping spelling of this key.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AnimationDuration => "animationDuration",
            Self::AnimationCurve => "animationCurve",
            Self::AnimationType => "animationType",
            Self::AllowsOverdraw => "allowsOverdraw",
            Self::QuickSwipeVelocity => "quickSwipeVelocity",
            Self::DisablesFrontViewInteraction => "disablesFrontViewInteraction",
            Self::RecognizesPanningOnFrontView => "recognizesPanningOnFrontView",
            Self::RecognizesResetTapOnFrontView => "recognizesResetTapOnFrontView",
        }
    }

    /// Look up a key by its mapping spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A loosely typed option value, as found in a mapping.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OptionValue<'a> {
    /// A real number.
    Number(f64),
    /// A flag.
    Bool(bool),
    /// A curve.
    Curve(AnimationCurve),
    /// An animation type.
    Type(AnimationType),
    /// A textual spelling, accepted for curves and animation types.
    Text(&'a str),
}

const EXPECT_SECONDS: &str = "a finite, non-negative number of seconds";
const EXPECT_VELOCITY: &str = "a finite, positive number of units per second";
const EXPECT_BOOL: &str = "a bool";
const EXPECT_CURVE: &str = "a curve (linear, easeIn, easeOut, easeInOut)";
const EXPECT_TYPE: &str = "an animation type (static, bouncy)";

/// Validated configuration of a reveal controller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevealOptions {
    animation_duration: Duration,
    animation_curve: AnimationCurve,
    animation_type: AnimationType,
    allows_overdraw: bool,
    quick_swipe_velocity: f64,
    disables_front_view_interaction: bool,
    recognizes_panning_on_front_view: bool,
    recognizes_reset_tap_on_front_view: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            animation_duration: Self::DEFAULT_ANIMATION_DURATION,
            animation_curve: AnimationCurve::Linear,
            animation_type: AnimationType::Static,
            allows_overdraw: true,
            quick_swipe_velocity: Self::DEFAULT_QUICK_SWIPE_VELOCITY,
            disables_front_view_interaction: true,
            recognizes_panning_on_front_view: true,
            recognizes_reset_tap_on_front_view: true,
        }
    }
}

impl RevealOptions {
    /// Default duration of automatic front content movement (0.185 s).
    pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(185);
    /// Default quick-swipe release velocity, in units per second.
    pub const DEFAULT_QUICK_SWIPE_VELOCITY: f64 = 800.0;

    /// Build options from a mapping of option name to value.
    ///
    /// Missing keys keep their defaults and unrecognized keys are ignored.
    /// The first value of the wrong kind fails the whole construction.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, RevealError>
    where
        I: IntoIterator<Item = (&'a str, OptionValue<'a>)>,
    {
        let mut opts = Self::default();
        for (name, value) in entries {
            match OptionKey::from_name(name) {
                Some(key) => opts.set(key, value)?,
                None => log::debug!("ignoring unrecognized reveal option `{name}`"),
            }
        }
        Ok(opts)
    }

    /// Snapshot of every option as a key/value pair.
    ///
    /// Feeding the result back through [`from_entries`](Self::from_entries) reproduces `self`.
    pub fn entries(&self) -> Vec<(OptionKey, OptionValue<'static>)> {
        OptionKey::ALL.into_iter().map(|k| (k, self.get(k))).collect()
    }

    /// Read one option as a loosely typed value.
    pub fn get(&self, key: OptionKey) -> OptionValue<'static> {
        match key {
            OptionKey::AnimationDuration => {
                OptionValue::Number(self.animation_duration.as_secs_f64())
            }
            OptionKey::AnimationCurve => OptionValue::Curve(self.animation_curve),
            OptionKey::AnimationType => OptionValue::Type(self.animation_type),
            OptionKey::AllowsOverdraw => OptionValue::Bool(self.allows_overdraw),
            OptionKey::QuickSwipeVelocity => OptionValue::Number(self.quick_swipe_velocity),
            OptionKey::DisablesFrontViewInteraction => {
                OptionValue::Bool(self.disables_front_view_interaction)
            }
            OptionKey::RecognizesPanningOnFrontView => {
                OptionValue::Bool(self.recognizes_panning_on_front_view)
            }
            OptionKey::RecognizesResetTapOnFrontView => {
                OptionValue::Bool(self.recognizes_reset_tap_on_front_view)
            }
        }
    }

    /// Write one option from a loosely typed value.
    pub fn set(&mut self, key: OptionKey, value: OptionValue<'_>) -> Result<(), RevealError> {
        let result = match key {
            OptionKey::AnimationDuration => match value {
                OptionValue::Number(secs) => self.set_animation_duration_secs(secs),
                _ => Err(invalid(key, EXPECT_SECONDS)),
            },
            OptionKey::AnimationCurve => {
                let curve = match value {
                    OptionValue::Curve(c) => Some(c),
                    OptionValue::Text(name) => AnimationCurve::from_name(name),
                    _ => None,
                };
                curve
                    .map(|c| self.set_animation_curve(c))
                    .ok_or(invalid(key, EXPECT_CURVE))
            }
            OptionKey::AnimationType => {
                let ty = match value {
                    OptionValue::Type(t) => Some(t),
                    OptionValue::Text(name) => AnimationType::from_name(name),
                    _ => None,
                };
                ty.map(|t| self.set_animation_type(t))
                    .ok_or(invalid(key, EXPECT_TYPE))
            }
            OptionKey::QuickSwipeVelocity => match value {
                OptionValue::Number(v) => self.set_quick_swipe_velocity(v),
                _ => Err(invalid(key, EXPECT_VELOCITY)),
            },
            OptionKey::AllowsOverdraw
            | OptionKey::DisablesFrontViewInteraction
            | OptionKey::RecognizesPanningOnFrontView
            | OptionKey::RecognizesResetTapOnFrontView => match value {
                OptionValue::Bool(b) => {
                    *self.flag_mut(key) = b;
                    Ok(())
                }
                _ => Err(invalid(key, EXPECT_BOOL)),
            },
        };
        if let Err(e) = &result {
            log::debug!("rejected reveal option write: {e}");
        }
        result
    }

    fn flag_mut(&mut self, key: OptionKey) -> &mut bool {
        match key {
            OptionKey::DisablesFrontViewInteraction => &mut self.disables_front_view_interaction,
            OptionKey::RecognizesPanningOnFrontView => &mut self.recognizes_panning_on_front_view,
            OptionKey::RecognizesResetTapOnFrontView => {
                &mut self.recognizes_reset_tap_on_front_view
            }
            _ => &mut self.allows_overdraw,
        }
    }

    /// Duration of automatic front content movement.
    pub fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    /// Set the animation duration.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.animation_duration = duration;
    }

    /// Set the animation duration from seconds.
    ///
    /// Rejects negative, NaN, infinite, and out-of-range values.
    pub fn set_animation_duration_secs(&mut self, secs: f64) -> Result<(), RevealError> {
        self.animation_duration = duration_from_secs(secs)
            .ok_or(invalid(OptionKey::AnimationDuration, EXPECT_SECONDS))?;
        Ok(())
    }

    /// Timing curve of automatic front content movement.
    pub fn animation_curve(&self) -> AnimationCurve {
        self.animation_curve
    }

    /// Set the timing curve.
    pub fn set_animation_curve(&mut self, curve: AnimationCurve) {
        self.animation_curve = curve;
    }

    /// Settling style of automatic front content movement.
    pub fn animation_type(&self) -> AnimationType {
        self.animation_type
    }

    /// Set the settling style.
    pub fn set_animation_type(&mut self, ty: AnimationType) {
        self.animation_type = ty;
    }

    /// Whether a drag may pull the front content past a panel's reveal width.
    pub fn allows_overdraw(&self) -> bool {
        self.allows_overdraw
    }

    /// Allow or forbid overdraw.
    pub fn set_allows_overdraw(&mut self, allows: bool) {
        self.allows_overdraw = allows;
    }

    /// Release velocity above which a drag resolves regardless of distance.
    pub fn quick_swipe_velocity(&self) -> f64 {
        self.quick_swipe_velocity
    }

    /// Set the quick-swipe velocity. Must be finite and positive.
    pub fn set_quick_swipe_velocity(&mut self, velocity: f64) -> Result<(), RevealError> {
        if !(velocity.is_finite() && velocity > 0.0) {
            return Err(invalid(OptionKey::QuickSwipeVelocity, EXPECT_VELOCITY));
        }
        self.quick_swipe_velocity = velocity;
        Ok(())
    }

    /// Whether the front content stops accepting input while a side panel has focus.
    pub fn disables_front_view_interaction(&self) -> bool {
        self.disables_front_view_interaction
    }

    /// Set front content input gating.
    pub fn set_disables_front_view_interaction(&mut self, disables: bool) {
        self.disables_front_view_interaction = disables;
    }

    /// Whether panning over the front content drives the reveal.
    pub fn recognizes_panning_on_front_view(&self) -> bool {
        self.recognizes_panning_on_front_view
    }

    /// Enable or disable the pan recognizer.
    pub fn set_recognizes_panning_on_front_view(&mut self, recognizes: bool) {
        self.recognizes_panning_on_front_view = recognizes;
    }

    /// Whether a tap on the displaced front content resets to front focus.
    pub fn recognizes_reset_tap_on_front_view(&self) -> bool {
        self.recognizes_reset_tap_on_front_view
    }

    /// Enable or disable the reset tap recognizer.
    pub fn set_recognizes_reset_tap_on_front_view(&mut self, recognizes: bool) {
        self.recognizes_reset_tap_on_front_view = recognizes;
    }
}

/// Convert seconds to a [`Duration`], rounding to the nearest nanosecond so that
/// values read back through [`RevealOptions::get`] reproduce the same duration.
fn duration_from_secs(secs: f64) -> Option<Duration> {
    let nanos = secs * 1e9;
    if !(nanos.is_finite() && nanos >= 0.0 && nanos < 1.8e19) {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "range checked above, and the fraction is rounded away"
    )]
    let nanos = (nanos + 0.5) as u64;
    Some(Duration::from_nanos(nanos))
}

fn invalid(key: OptionKey, expected: &'static str) -> RevealError {
    RevealError::InvalidOptionKind { key, expected }
}
