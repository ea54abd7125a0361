// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture interpreter: turn a drag over the front content into a live offset and a resolved intent.
//!
//! ## Usage
//!
//! 1) On press, build a [`DragContext`] describing where the drag starts and call
//!    [`GestureInterpreter::begin`].
//! 2) On every move, call [`GestureInterpreter::update`] and apply the returned offset.
//! 3) On release, call [`GestureInterpreter::end`] with the release velocity to get a
//!    [`Resolution`]: the state the front content should settle into.
//!
//! The interpreter never touches controller state; the
//! [`RevealController`](crate::controller::RevealController) feeds it and acts on its output.
//!
//! ## Clamping
//!
//! Each direction of travel has a [`Reach`]. A drag cannot cross from one side panel
//! to the other: when it starts with a side panel focused, the opposite direction is
//! [`Reach::Closed`] and the live offset stops at zero. With overdraw allowed, travel
//! past a panel's reveal width is damped so the offset approaches, but never reaches,
//! the panel's maximum width.
//!
//! ## Resolution
//!
//! Two rules, either sufficient; the velocity rule is checked first and wins ties.
//! - Velocity: a release faster than the quick-swipe velocity opens the side it moves
//!   toward, or closes the side it moves away from.
//! - Distance: a drag that moved outward and ends at or past half the reveal width
//!   opens that side; one that moved inward and ends short of half closes it.
//!
//! Otherwise the drag resolves to [`Intent::NoChange`] and snaps back.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_reveal::gesture::{DragContext, GestureInterpreter};
//! use understory_reveal::options::RevealOptions;
//! use understory_reveal::types::{Intent, PanelKind, RevealLayout, RevealState, Side};
//!
//! let ctx = DragContext::new(
//!     RevealState::FrontFocused,
//!     0.0,
//!     PanelKind::Left,
//!     RevealLayout::default(),
//!     &RevealOptions::default(),
//! );
//! let mut drag = GestureInterpreter::new();
//! drag.begin(ctx, Point::new(10.0, 100.0));
//! assert_eq!(drag.update(Point::new(150.0, 104.0)), Some(140.0));
//! let res = drag.end(Vec2::ZERO).unwrap();
//! assert_eq!(res.intent, Intent::Open(Side::Left));
//! assert_eq!(res.target, RevealState::LeftFocused);
//! ```

use kurbo::{Point, Vec2};

use crate::options::RevealOptions;
use crate::types::{Intent, PanelKind, RevealLayout, RevealState, Side, WidthRange};

/// Raw input from the pan recognizer over the front content.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureEvent {
    /// The pointer went down and the pan recognizer began.
    Began {
        /// Pointer position in container coordinates.
        position: Point,
    },
    /// The pointer moved.
    Moved {
        /// Pointer position in container coordinates.
        position: Point,
        /// Instantaneous velocity, in units per second.
        velocity: Vec2,
    },
    /// The pointer was released.
    Ended {
        /// Release velocity, in units per second.
        velocity: Vec2,
    },
    /// The recognizer was cancelled by the host.
    Cancelled,
}

/// How far a drag may travel in one direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Reach {
    /// No travel past zero.
    Closed,
    /// Travel up to the panel's reveal width, and into its overdraw span when allowed.
    Panel(WidthRange),
    /// Travel up to a hard limit; used when dragging out of presentation mode.
    Full(f64),
}

/// Everything the interpreter needs to know about the controller when a drag begins.
///
/// Options are captured here, so writes made during a drag apply from the next one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragContext {
    /// Committed state when the drag began.
    pub origin: RevealState,
    /// Offset of the front content when the drag began.
    pub anchor: f64,
    /// Panels available to reveal.
    pub panels: PanelKind,
    /// Geometry in effect for this drag.
    pub layout: RevealLayout,
    /// Whether travel past a reveal width is allowed.
    pub allows_overdraw: bool,
    /// Release speed that resolves the drag on its own.
    pub quick_swipe_velocity: f64,
}

impl DragContext {
    /// Capture the context for a drag starting at `anchor` in state `origin`.
    pub fn new(
        origin: RevealState,
        anchor: f64,
        panels: PanelKind,
        layout: RevealLayout,
        options: &RevealOptions,
    ) -> Self {
        Self {
            origin,
            anchor,
            panels,
            layout,
            allows_overdraw: options.allows_overdraw(),
            quick_swipe_velocity: options.quick_swipe_velocity(),
        }
    }

    /// Travel allowed toward revealing `side`.
    pub fn reach(&self, side: Side) -> Reach {
        if !self.panels.contains(side) {
            return Reach::Closed;
        }
        match self.origin.side() {
            None => Reach::Panel(self.layout.range(side)),
            Some(s) if s != side => Reach::Closed,
            Some(_) if self.origin.is_presentation() => Reach::Full(self.layout.presentation_width()),
            Some(_) => Reach::Panel(self.layout.range(side)),
        }
    }

    /// Map a raw (unclamped) offset to the live offset shown to the user.
    pub fn clamp(&self, raw: f64) -> f64 {
        let Some(side) = Side::of_offset(raw) else {
            return 0.0;
        };
        let distance = raw * side.sign();
        let limited = match self.reach(side) {
            Reach::Closed => 0.0,
            Reach::Full(limit) => distance.min(limit),
            Reach::Panel(range) => {
                if distance <= range.min {
                    distance
                } else if self.allows_overdraw {
                    range.min + damp(distance - range.min, range.overdraw_span())
                } else {
                    range.min
                }
            }
        };
        limited * side.sign()
    }

    /// Resolve a released drag ending at `offset` with horizontal `velocity`.
    pub fn resolve(&self, offset: f64, velocity: f64) -> Intent {
        if velocity.abs() > self.quick_swipe_velocity {
            let toward = if velocity > 0.0 { Side::Left } else { Side::Right };
            match Side::of_offset(offset).or(self.origin.side()) {
                Some(shown) if shown != toward => return Intent::Close,
                _ if self.reach(toward) != Reach::Closed => return Intent::Open(toward),
                _ => {}
            }
        }

        let Some(side) = Side::of_offset(offset).or(self.origin.side()) else {
            return Intent::NoChange;
        };
        let half = self.layout.range(side).min * 0.5;
        let shown = offset * side.sign();
        let travel = (offset - self.anchor) * side.sign();
        if travel > 0.0 && shown >= half {
            Intent::Open(side)
        } else if travel < 0.0 && shown < half {
            Intent::Close
        } else {
            Intent::NoChange
        }
    }

    /// The state an intent settles into from this drag's origin.
    ///
    /// Opening the side that is already in presentation mode keeps presentation mode.
    pub fn target(&self, intent: Intent) -> RevealState {
        match intent {
            Intent::Open(side) if self.origin == RevealState::presentation(side) => self.origin,
            Intent::Open(side) => RevealState::focused(side),
            Intent::Close => RevealState::FrontFocused,
            Intent::NoChange => self.origin,
        }
    }
}

/// Outcome of a finished drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Live offset at release.
    pub offset: f64,
    /// Resolved intent.
    pub intent: Intent,
    /// State to settle into.
    pub target: RevealState,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct ActiveDrag {
    ctx: DragContext,
    start: Point,
    offset: f64,
}

/// Tracks a single drag from press to release.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureInterpreter {
    active: Option<ActiveDrag>,
}

impl GestureInterpreter {
    /// Create an idle interpreter.
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Live offset of the drag in progress.
    pub fn live_offset(&self) -> Option<f64> {
        self.active.map(|d| d.offset)
    }

    /// Start a drag at `position`. Replaces any drag in progress.
    pub fn begin(&mut self, ctx: DragContext, position: Point) {
        self.active = Some(ActiveDrag {
            ctx,
            start: position,
            offset: ctx.anchor,
        });
    }

    /// Move the drag to `position` and return the new live offset.
    ///
    /// Returns `None` when no drag is in progress.
    pub fn update(&mut self, position: Point) -> Option<f64> {
        let drag = self.active.as_mut()?;
        let raw = drag.ctx.anchor + (position.x - drag.start.x);
        drag.offset = drag.ctx.clamp(raw);
        log::trace!("drag raw offset {raw}, live offset {}", drag.offset);
        Some(drag.offset)
    }

    /// Release the drag with `velocity` and resolve it.
    pub fn end(&mut self, velocity: Vec2) -> Option<Resolution> {
        let drag = self.active.take()?;
        let intent = drag.ctx.resolve(drag.offset, velocity.x);
        Some(Resolution {
            offset: drag.offset,
            intent,
            target: drag.ctx.target(intent),
        })
    }

    /// Abandon the drag; it resolves to [`Intent::NoChange`].
    pub fn cancel(&mut self) -> Option<Resolution> {
        let drag = self.active.take()?;
        Some(Resolution {
            offset: drag.offset,
            intent: Intent::NoChange,
            target: drag.ctx.origin,
        })
    }
}

/// Diminishing return for overdraw: grows with `excess` but stays below `span`.
fn damp(excess: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return 0.0;
    }
    span * excess / (excess + span)
}
