// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the reveal controller: sides, panel composition, focus states, layout, and events.
//!
//! ## Offsets
//!
//! Every offset in this crate is the horizontal displacement of the front content
//! from its resting position. Positive offsets move the front content rightward and
//! reveal the [`Left`](Side::Left) panel; negative offsets reveal the [`Right`](Side::Right) panel.

use core::fmt;

use kurbo::Size;

/// One of the two side panels.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// Panel revealed by moving the front content rightward.
    Left,
    /// Panel revealed by moving the front content leftward.
    Right,
}

impl Side {
    /// Sign of the offsets that reveal this side: `1.0` for left, `-1.0` for right.
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    /// The side revealed by a given offset, or `None` at rest.
    #[inline]
    pub fn of_offset(offset: f64) -> Option<Self> {
        if offset > 0.0 {
            Some(Self::Left)
        } else if offset < 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }

    /// The opposite side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Which side panels a controller was constructed with.
///
/// Fixed for the lifetime of a controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PanelKind {
    /// Front content only.
    None,
    /// A left panel only.
    Left,
    /// A right panel only.
    Right,
    /// Both side panels.
    Both,
}

impl PanelKind {
    /// Derive the composition from which panels were supplied.
    pub const fn from_presence(left: bool, right: bool) -> Self {
        match (left, right) {
            (false, false) => Self::None,
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            (true, true) => Self::Both,
        }
    }

    /// Whether the panel on `side` exists.
    pub const fn contains(self, side: Side) -> bool {
        matches!(
            (self, side),
            (Self::Both, _) | (Self::Left, Side::Left) | (Self::Right, Side::Right)
        )
    }
}

/// The discrete focus state of a reveal controller.
///
/// Exactly one state is active at any time. Presentation states are reachable
/// only from the side-focused state of the same side.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum RevealState {
    /// Front content at rest, fully in focus.
    #[default]
    FrontFocused,
    /// Left panel revealed at its reveal width.
    LeftFocused,
    /// Right panel revealed at its reveal width.
    RightFocused,
    /// Left panel occupies the full container width.
    LeftFocusedPresentationMode,
    /// Right panel occupies the full container width.
    RightFocusedPresentationMode,
}

impl RevealState {
    /// The side-focused state for `side`.
    pub const fn focused(side: Side) -> Self {
        match side {
            Side::Left => Self::LeftFocused,
            Side::Right => Self::RightFocused,
        }
    }

    /// The presentation state for `side`.
    pub const fn presentation(side: Side) -> Self {
        match side {
            Side::Left => Self::LeftFocusedPresentationMode,
            Side::Right => Self::RightFocusedPresentationMode,
        }
    }

    /// The side this state reveals, if any.
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::FrontFocused => None,
            Self::LeftFocused | Self::LeftFocusedPresentationMode => Some(Side::Left),
            Self::RightFocused | Self::RightFocusedPresentationMode => Some(Side::Right),
        }
    }

    /// Whether this is one of the presentation states.
    pub const fn is_presentation(self) -> bool {
        matches!(
            self,
            Self::LeftFocusedPresentationMode | Self::RightFocusedPresentationMode
        )
    }

    /// The resting offset of this state under `layout`.
    pub fn resting_offset(self, layout: &RevealLayout) -> f64 {
        match self {
            Self::FrontFocused => 0.0,
            Self::LeftFocused => layout.left.min,
            Self::RightFocused => -layout.right.min,
            Self::LeftFocusedPresentationMode => layout.presentation_width(),
            Self::RightFocusedPresentationMode => -layout.presentation_width(),
        }
    }
}

/// Reveal width of one side panel.
///
/// `min` is the offset at which the panel rests when focused. `max` bounds how far
/// an overdrawing drag can pull the front content; it is never reached exactly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WidthRange {
    /// Resting reveal width.
    pub min: f64,
    /// Overdraw limit.
    pub max: f64,
}

impl WidthRange {
    /// Create a range, swapping the bounds if given in the wrong order.
    pub fn new(min: f64, max: f64) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Extra displacement available past `min` while overdrawing.
    #[inline]
    pub fn overdraw_span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for WidthRange {
    fn default() -> Self {
        Self {
            min: 260.0,
            max: 300.0,
        }
    }
}

/// Geometry supplied by the host: container size, panel widths, and which sides
/// support presentation mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevealLayout {
    /// Size of the container hosting the front content.
    pub container: Size,
    /// Width range of the left panel.
    pub left: WidthRange,
    /// Width range of the right panel.
    pub right: WidthRange,
    /// Whether the left panel may enter presentation mode.
    pub left_presentation: bool,
    /// Whether the right panel may enter presentation mode.
    pub right_presentation: bool,
}

impl RevealLayout {
    /// Width range of `side`.
    pub fn range(&self, side: Side) -> WidthRange {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Whether `side` supports presentation mode.
    pub fn supports_presentation(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_presentation,
            Side::Right => self.right_presentation,
        }
    }

    /// Displacement of the front content in presentation mode.
    #[inline]
    pub fn presentation_width(&self) -> f64 {
        self.container.width
    }
}

impl Default for RevealLayout {
    fn default() -> Self {
        Self {
            container: Size::new(320.0, 480.0),
            left: WidthRange::default(),
            right: WidthRange::default(),
            left_presentation: true,
            right_presentation: true,
        }
    }
}

/// Resolved outcome of a finished drag.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Intent {
    /// Settle with the given side revealed.
    Open(Side),
    /// Settle with the front content in focus.
    Close,
    /// Snap back to the state that was active when the drag began.
    NoChange,
}

/// Notifications emitted by the controller, drained with
/// [`RevealController::take_events`](crate::controller::RevealController::take_events).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealEvent {
    /// A side panel is about to gain focus. Sent before the first animated frame.
    SideMenuWillBeShown(Side),
    /// The front content is about to regain focus. Sent before the first animated frame.
    FrontViewWillBeShown,
    /// The front content moved; the payload is the new offset.
    OffsetChanged(f64),
    /// A transition committed.
    StateChanged {
        /// State before the commit.
        from: RevealState,
        /// State after the commit.
        to: RevealState,
    },
    /// The front content started or stopped accepting its own input.
    FrontInteractionChanged(bool),
    /// The front content was replaced.
    FrontReplaced,
}

/// Which gesture recognizer a [`Recognizer`] handle describes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RecognizerKind {
    /// Pan over the front content.
    Pan,
    /// Tap on the displaced front content that resets to front focus.
    ResetTap,
}

/// Read-only handle describing a recognizer the host should install.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Recognizer {
    /// Recognizer kind.
    pub kind: RecognizerKind,
    /// Whether the host should currently deliver this recognizer's input.
    pub enabled: bool,
}
