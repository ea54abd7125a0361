// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal controller: the focus state machine, its transitions, and the host-facing surface.
//!
//! ## Overview
//!
//! [`RevealController`] owns the current [`RevealState`], the front content offset,
//! and the [`RevealOptions`]. It accepts programmatic commands and gesture input,
//! decides the target state, and drives an [`OffsetAnimation`] toward it. The state
//! is committed when the animation completes.
//!
//! ## Driving it
//!
//! - Feed pan input through [`RevealController::handle_gesture`] and taps on the
//!   displaced front content through [`RevealController::handle_reset_tap`].
//! - Call [`RevealController::tick`] once per frame with the elapsed time.
//! - Apply [`RevealController::front_frame`] to the front content and drain
//!   [`RevealController::take_events`] for notifications.
//!
//! ## Transitions
//!
//! At most one transition is in flight. Any new command or drag cancels it where it
//! stands and starts from that offset; the cancelled transition's completion is told
//! it did not finish. Guard failures return an error and leave everything, including
//! an in-flight transition, untouched.
//!
//! "Will be shown" notifications are queued before the first frame of the
//! transition that brings a panel (or the front content) into focus, and are not
//! repeated when a transition toward the same destination is restarted.
//!
//! ```
//! use core::time::Duration;
//! use understory_reveal::controller::RevealController;
//! use understory_reveal::options::RevealOptions;
//! use understory_reveal::types::{RevealEvent, RevealState, Side};
//!
//! let mut reveal = RevealController::new("inbox", Some("menu"), RevealOptions::default());
//! reveal.show_side_menu().unwrap();
//! assert_eq!(reveal.take_events(), vec![RevealEvent::SideMenuWillBeShown(Side::Left)]);
//!
//! while reveal.is_animating() {
//!     reveal.tick(Duration::from_millis(16));
//! }
//! assert_eq!(reveal.state(), RevealState::LeftFocused);
//! assert_eq!(reveal.offset(), 260.0);
//! assert!(!reveal.is_front_interaction_enabled());
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::{Point, Rect, Vec2};

use crate::animation::OffsetAnimation;
use crate::error::RevealError;
use crate::gesture::{DragContext, GestureEvent, GestureInterpreter, Resolution};
use crate::options::{OptionValue, RevealOptions};
use crate::types::{
    PanelKind, Recognizer, RecognizerKind, RevealEvent, RevealLayout, RevealState, Side,
};

/// Callback told whether a transition settled (`true`) or was interrupted (`false`).
pub type Completion = Box<dyn FnOnce(bool)>;

/// Side panels supplied at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidePanels<C> {
    /// Content revealed on the left.
    pub left: Option<C>,
    /// Content revealed on the right.
    pub right: Option<C>,
}

impl<C> SidePanels<C> {
    /// Only a left panel.
    pub fn left(content: C) -> Self {
        Self {
            left: Some(content),
            right: None,
        }
    }

    /// Only a right panel.
    pub fn right(content: C) -> Self {
        Self {
            left: None,
            right: Some(content),
        }
    }

    /// Both panels.
    pub fn both(left: C, right: C) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }

    /// Composition of these panels.
    pub fn kind(&self) -> PanelKind {
        PanelKind::from_presence(self.left.is_some(), self.right.is_some())
    }
}

struct Transition<C> {
    animation: OffsetAnimation,
    target: RevealState,
    pending_front: Option<C>,
    completion: Option<Completion>,
}

/// Reveal panel controller.
///
/// `C` is the host's handle to a piece of content (an id, an `Rc`, a widget key).
/// The controller stores handles but never manages the content they refer to.
///
/// Not thread-safe by construction: all input must arrive from the host's event loop.
pub struct RevealController<C> {
    front: C,
    panels: SidePanels<C>,
    kind: PanelKind,
    options: RevealOptions,
    layout: RevealLayout,
    state: RevealState,
    // Destination of the last announced transition; equals `state` when settled.
    heading: RevealState,
    offset: f64,
    front_interaction: bool,
    transition: Option<Transition<C>>,
    drag: GestureInterpreter,
    events: Vec<RevealEvent>,
}

impl<C: fmt::Debug> fmt::Debug for RevealController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealController")
            .field("front", &self.front)
            .field("panels", &self.panels)
            .field("state", &self.state)
            .field("offset", &self.offset)
            .field("animating", &self.transition.is_some())
            .finish_non_exhaustive()
    }
}

impl<C> RevealController<C> {
    /// Create a controller with front content, an optional left panel, and options.
    ///
    /// Uses [`RevealLayout::default`]; call [`set_layout`](Self::set_layout) once the
    /// host knows its geometry.
    pub fn new(front: C, left: Option<C>, options: RevealOptions) -> Self {
        Self::with_panels(
            front,
            SidePanels { left, right: None },
            RevealLayout::default(),
            options,
        )
    }

    /// Create a controller from an option mapping.
    ///
    /// Fails with [`RevealError::InvalidOptionKind`] when a value has the wrong kind.
    pub fn from_entries<'a, I>(front: C, left: Option<C>, entries: I) -> Result<Self, RevealError>
    where
        I: IntoIterator<Item = (&'a str, OptionValue<'a>)>,
    {
        Ok(Self::new(front, left, RevealOptions::from_entries(entries)?))
    }

    /// Create a controller with any combination of side panels and an explicit layout.
    pub fn with_panels(
        front: C,
        panels: SidePanels<C>,
        layout: RevealLayout,
        options: RevealOptions,
    ) -> Self {
        let kind = panels.kind();
        Self {
            front,
            panels,
            kind,
            options,
            layout,
            state: RevealState::FrontFocused,
            heading: RevealState::FrontFocused,
            offset: 0.0,
            front_interaction: true,
            transition: None,
            drag: GestureInterpreter::new(),
            events: Vec::new(),
        }
    }

    // --- Observables ---

    /// Current front content.
    pub fn front(&self) -> &C {
        &self.front
    }

    /// Left panel content, if supplied.
    pub fn left(&self) -> Option<&C> {
        self.panels.left.as_ref()
    }

    /// Right panel content, if supplied.
    pub fn right(&self) -> Option<&C> {
        self.panels.right.as_ref()
    }

    /// Content of the panel on `side`, if supplied.
    pub fn panel(&self, side: Side) -> Option<&C> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    /// Which side panels exist.
    pub fn panel_kind(&self) -> PanelKind {
        self.kind
    }

    /// Committed focus state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Whether a presentation state is committed.
    pub fn is_presentation_mode_active(&self) -> bool {
        self.state.is_presentation()
    }

    /// Current front content offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Frame of the front content in container coordinates.
    pub fn front_frame(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.layout.container) + Vec2::new(self.offset, 0.0)
    }

    /// Whether a transition animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Whether the front content should accept its own input.
    pub fn is_front_interaction_enabled(&self) -> bool {
        self.front_interaction
    }

    /// Handle for the pan recognizer over the front content.
    pub fn pan_recognizer(&self) -> Recognizer {
        Recognizer {
            kind: RecognizerKind::Pan,
            enabled: self.options.recognizes_panning_on_front_view(),
        }
    }

    /// Handle for the reset tap recognizer. Enabled only while a side panel has focus.
    pub fn reset_tap_recognizer(&self) -> Recognizer {
        Recognizer {
            kind: RecognizerKind::ResetTap,
            enabled: self.options.recognizes_reset_tap_on_front_view()
                && self.state != RevealState::FrontFocused,
        }
    }

    /// Current options.
    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Mutable access to the options. Writes apply from the next transition.
    pub fn options_mut(&mut self) -> &mut RevealOptions {
        &mut self.options
    }

    /// Replace all options. Applies from the next transition.
    pub fn set_options(&mut self, options: RevealOptions) {
        self.options = options;
    }

    /// Current layout.
    pub fn layout(&self) -> &RevealLayout {
        &self.layout
    }

    /// Replace the layout and re-anchor the front content without animating.
    ///
    /// An in-flight transition is retargeted to its destination's new resting offset.
    /// A drag in progress keeps the layout it started with.
    pub fn set_layout(&mut self, layout: RevealLayout) {
        self.layout = layout;
        if self.drag.is_dragging() {
            return;
        }
        match self.transition.as_mut() {
            Some(tr) => tr.animation.retarget(tr.target.resting_offset(&layout)),
            None => self.set_offset(self.state.resting_offset(&layout)),
        }
    }

    /// Drain queued notifications, oldest first.
    ///
    /// Consecutive offset updates are merged into one [`RevealEvent::OffsetChanged`]
    /// carrying the latest offset, so hosts that drain less often than once a frame
    /// only see where the front content ended up.
    pub fn take_events(&mut self) -> Vec<RevealEvent> {
        core::mem::take(&mut self.events)
    }

    // --- Commands ---

    /// Reveal the default side panel: left if supplied, otherwise right.
    pub fn show_side_menu(&mut self) -> Result<(), RevealError> {
        let side = self.default_side().ok_or(RevealError::NoSuchPanel(Side::Left))?;
        self.show_side(side, true)
    }

    /// Reveal the panel on `side`.
    pub fn show_side(&mut self, side: Side, animated: bool) -> Result<(), RevealError> {
        self.transition_to(RevealState::focused(side), animated, None, None)
    }

    /// Bring the front content back into focus with an animation.
    pub fn show_front_view_controller(&mut self) {
        self.show_front_view_controller_animated(true);
    }

    /// Bring the front content back into focus.
    ///
    /// A no-op when it is already focused and at rest.
    pub fn show_front_view_controller_animated(&mut self, animated: bool) {
        self.focus_front(animated, None, None);
    }

    /// Replace the front content, closing any open side panel first.
    pub fn show_controller(&mut self, front: C) {
        self.focus_front(true, Some(front), None);
    }

    /// Replace the front content, closing any open side panel first, and report
    /// through `completion` once the front content is settled in focus.
    ///
    /// `completion` receives `false` when a later request interrupts the close; the
    /// replacement is applied either way.
    pub fn show_view_controller(&mut self, front: C, completion: impl FnOnce(bool) + 'static) {
        self.focus_front(true, Some(front), Some(Box::new(completion)));
    }

    /// Expand the focused side panel to the full container width.
    ///
    /// Legal only while a side panel is focused (or being revealed) and the layout
    /// supports presentation for that side.
    pub fn enter_presentation_mode(&mut self, animated: bool) -> Result<(), RevealError> {
        let Some(side) = self.heading.side() else {
            let side = self.default_side().ok_or(RevealError::NoSuchPanel(Side::Left))?;
            return Err(RevealError::PresentationModeUnavailable(side));
        };
        self.transition_to(RevealState::presentation(side), animated, None, None)
    }

    /// Leave presentation mode, either back to the side-focused state or, when
    /// `entirely` is set, all the way to the front content.
    ///
    /// A no-op when presentation mode is neither active nor being entered.
    pub fn resign_presentation_mode(
        &mut self,
        entirely: bool,
        animated: bool,
    ) -> Result<(), RevealError> {
        if !self.heading.is_presentation() {
            return Ok(());
        }
        let target = match self.heading.side() {
            Some(side) if !entirely => RevealState::focused(side),
            _ => RevealState::FrontFocused,
        };
        self.transition_to(target, animated, None, None)
    }

    // --- Input ---

    /// Feed one pan recognizer event.
    ///
    /// Ignored while panning on the front content is disabled.
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Began { position } => {
                if !self.options.recognizes_panning_on_front_view() {
                    log::trace!("pan recognizer disabled; ignoring drag");
                    return;
                }
                self.interrupt();
                let ctx = DragContext::new(
                    self.drag_origin(),
                    self.offset,
                    self.kind,
                    self.layout,
                    &self.options,
                );
                self.drag.begin(ctx, position);
            }
            GestureEvent::Moved { position, velocity } => {
                if let Some(offset) = self.drag.update(position) {
                    log::trace!("drag moved with velocity {}", velocity.x);
                    self.set_offset(offset);
                }
            }
            GestureEvent::Ended { velocity } => {
                if let Some(res) = self.drag.end(velocity) {
                    self.settle(res);
                }
            }
            GestureEvent::Cancelled => {
                if let Some(res) = self.drag.cancel() {
                    self.settle(res);
                }
            }
        }
    }

    /// Feed a tap on the front content. Returns whether it reset focus to the front.
    pub fn handle_reset_tap(&mut self) -> bool {
        if !self.reset_tap_recognizer().enabled {
            return false;
        }
        self.show_front_view_controller();
        true
    }

    /// Advance the in-flight transition by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let step = match self.transition.as_mut() {
            Some(tr) => tr.animation.advance(dt),
            None => return,
        };
        self.set_offset(step.offset);
        if step.finished
            && let Some(tr) = self.transition.take()
        {
            self.commit(tr.target, tr.pending_front, tr.completion);
        }
    }

    // --- Internals ---

    fn default_side(&self) -> Option<Side> {
        [Side::Left, Side::Right]
            .into_iter()
            .find(|&side| self.kind.contains(side))
    }

    fn focus_front(&mut self, animated: bool, front: Option<C>, completion: Option<Completion>) {
        let result = self.transition_to(RevealState::FrontFocused, animated, front, completion);
        if let Err(e) = result {
            log::debug!("front focus rejected: {e}");
        }
        debug_assert!(result.is_ok(), "front focus has no guards: {result:?}");
    }

    /// State a new drag starts from.
    ///
    /// An interrupted switch between sides can leave the front content on the side
    /// opposite the committed one; the drag then continues from that offset as if
    /// the front were focused.
    fn drag_origin(&self) -> RevealState {
        match (self.state.side(), Side::of_offset(self.offset)) {
            (Some(committed), Some(shown)) if committed != shown => RevealState::FrontFocused,
            _ => self.state,
        }
    }

    fn settle(&mut self, res: Resolution) {
        log::debug!(
            "drag released at {} resolved to {:?} -> {:?}",
            res.offset,
            res.intent,
            res.target
        );
        if let Err(e) = self.transition_to(res.target, true, None, None) {
            log::debug!("drag resolution rejected: {e}");
        }
    }

    fn check(&self, target: RevealState) -> Result<(), RevealError> {
        let Some(side) = target.side() else {
            return Ok(());
        };
        if !self.kind.contains(side) {
            return Err(RevealError::NoSuchPanel(side));
        }
        if target.is_presentation() {
            let reachable = [self.state, self.heading]
                .into_iter()
                .any(|s| s == target || s == RevealState::focused(side));
            if !reachable || !self.layout.supports_presentation(side) {
                return Err(RevealError::PresentationModeUnavailable(side));
            }
        }
        Ok(())
    }

    fn transition_to(
        &mut self,
        target: RevealState,
        animated: bool,
        pending_front: Option<C>,
        completion: Option<Completion>,
    ) -> Result<(), RevealError> {
        self.check(target)?;

        if animated
            && pending_front.is_none()
            && completion.is_none()
            && let Some(tr) = &self.transition
            && tr.target == target
        {
            return Ok(());
        }

        self.interrupt();
        let _ = self.drag.cancel();

        let to = target.resting_offset(&self.layout);
        if target == self.state && self.offset == to {
            self.heading = target;
            self.finish(pending_front, completion);
            return Ok(());
        }

        self.announce(target);
        let duration = self.options.animation_duration();
        if !animated || duration.is_zero() {
            self.set_offset(to);
            self.commit(target, pending_front, completion);
            return Ok(());
        }

        log::debug!("transition {:?} -> {target:?} from offset {}", self.state, self.offset);
        self.transition = Some(Transition {
            animation: OffsetAnimation::new(
                self.offset,
                to,
                duration,
                self.options.animation_curve(),
                self.options.animation_type(),
            ),
            target,
            pending_front,
            completion,
        });
        Ok(())
    }

    fn announce(&mut self, target: RevealState) {
        if target.side() != self.heading.side() {
            self.events.push(match target.side() {
                Some(side) => RevealEvent::SideMenuWillBeShown(side),
                None => RevealEvent::FrontViewWillBeShown,
            });
        }
        self.heading = target;
    }

    fn interrupt(&mut self) {
        let Some(tr) = self.transition.take() else {
            return;
        };
        let at = tr.animation.cancel();
        log::debug!("interrupted transition toward {:?} at offset {at}", tr.target);
        self.set_offset(at);
        if let Some(front) = tr.pending_front {
            self.replace_front(front);
        }
        if let Some(done) = tr.completion {
            done(false);
        }
    }

    fn commit(
        &mut self,
        target: RevealState,
        pending_front: Option<C>,
        completion: Option<Completion>,
    ) {
        let from = self.state;
        self.state = target;
        self.heading = target;
        if from != target {
            log::debug!("reveal state {from:?} -> {target:?}");
            self.events.push(RevealEvent::StateChanged { from, to: target });
        }
        let interactive = target == RevealState::FrontFocused
            || !self.options.disables_front_view_interaction();
        if interactive != self.front_interaction {
            self.front_interaction = interactive;
            self.events
                .push(RevealEvent::FrontInteractionChanged(interactive));
        }
        self.finish(pending_front, completion);
    }

    fn finish(&mut self, pending_front: Option<C>, completion: Option<Completion>) {
        if let Some(front) = pending_front {
            self.replace_front(front);
        }
        if let Some(done) = completion {
            done(true);
        }
    }

    fn replace_front(&mut self, front: C) {
        self.front = front;
        self.events.push(RevealEvent::FrontReplaced);
    }

    fn set_offset(&mut self, offset: f64) {
        if offset == self.offset {
            return;
        }
        self.offset = offset;
        match self.events.last_mut() {
            Some(RevealEvent::OffsetChanged(last)) => *last = offset,
            _ => self.events.push(RevealEvent::OffsetChanged(offset)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::AnimationType;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    const FRAME: Duration = Duration::from_millis(16);

    type Reveal = RevealController<&'static str>;

    fn left_only() -> Reveal {
        RevealController::new("front", Some("left"), RevealOptions::default())
    }

    fn both() -> Reveal {
        RevealController::with_panels(
            "front",
            SidePanels::both("left", "right"),
            RevealLayout::default(),
            RevealOptions::default(),
        )
    }

    fn run(c: &mut Reveal) {
        for _ in 0..1000 {
            if !c.is_animating() {
                return;
            }
            c.tick(FRAME);
        }
        panic!("transition never settled");
    }

    fn drag(c: &mut Reveal, dx: f64, velocity: f64) {
        c.handle_gesture(GestureEvent::Began {
            position: Point::new(100.0, 200.0),
        });
        c.handle_gesture(GestureEvent::Moved {
            position: Point::new(100.0 + dx, 200.0),
            velocity: Vec2::new(velocity, 0.0),
        });
        c.handle_gesture(GestureEvent::Ended {
            velocity: Vec2::new(velocity, 0.0),
        });
    }

    fn notifications(c: &mut Reveal) -> Vec<RevealEvent> {
        c.take_events()
            .into_iter()
            .filter(|e| {
                matches!(
                    e,
                    RevealEvent::SideMenuWillBeShown(_) | RevealEvent::FrontViewWillBeShown
                )
            })
            .collect()
    }

    #[test]
    fn starts_front_focused_at_rest() {
        let c = left_only();
        assert_eq!(c.state(), RevealState::FrontFocused);
        assert_eq!(c.offset(), 0.0);
        assert_eq!(c.panel_kind(), PanelKind::Left);
        assert!(c.is_front_interaction_enabled());
        assert!(c.pan_recognizer().enabled);
        assert!(!c.reset_tap_recognizer().enabled);
        assert!(!c.is_presentation_mode_active());
    }

    #[test]
    fn show_side_menu_round_trip_returns_to_zero() {
        let mut c = left_only();
        c.show_side_menu().unwrap();
        assert_eq!(c.state(), RevealState::FrontFocused, "commit waits for the animation");
        run(&mut c);
        assert_eq!(c.state(), RevealState::LeftFocused);
        assert_eq!(c.offset(), 260.0);

        c.show_front_view_controller();
        run(&mut c);
        assert_eq!(c.state(), RevealState::FrontFocused);
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn notification_precedes_first_frame() {
        let mut c = left_only();
        c.show_side_menu().unwrap();
        assert_eq!(
            c.take_events(),
            vec![RevealEvent::SideMenuWillBeShown(Side::Left)]
        );
        c.tick(FRAME);
        let events = c.take_events();
        assert!(matches!(events[0], RevealEvent::OffsetChanged(_)), "{events:?}");
    }

    #[test]
    fn show_front_when_already_front_is_a_no_op() {
        let mut c = left_only();
        c.show_front_view_controller();
        c.show_front_view_controller();
        c.show_front_view_controller_animated(false);
        assert!(!c.is_animating());
        assert!(c.take_events().is_empty());
    }

    #[test]
    fn repeated_close_during_close_does_not_restart() {
        let mut c = left_only();
        c.show_side(Side::Left, false).unwrap();
        c.show_front_view_controller();
        c.tick(FRAME);
        let mid = c.offset();
        let _ = c.take_events();
        c.show_front_view_controller();
        assert_eq!(c.offset(), mid);
        assert!(c.take_events().is_empty());
        run(&mut c);
        assert_eq!(c.state(), RevealState::FrontFocused);
    }

    #[test]
    fn committed_side_focus_gates_front_interaction() {
        let mut c = left_only();
        c.show_side(Side::Left, false).unwrap();
        assert!(!c.is_front_interaction_enabled());
        assert!(c.reset_tap_recognizer().enabled);
        assert!(
            c.take_events()
                .contains(&RevealEvent::FrontInteractionChanged(false))
        );

        c.show_front_view_controller_animated(false);
        assert!(c.is_front_interaction_enabled());

        c.options_mut().set_disables_front_view_interaction(false);
        c.show_side(Side::Left, false).unwrap();
        assert!(c.is_front_interaction_enabled());
    }

    #[test]
    fn drag_past_half_width_opens_left() {
        let mut c = left_only();
        drag(&mut c, 140.0, 0.0);
        assert_eq!(c.offset(), 140.0);
        run(&mut c);
        assert_eq!(c.state(), RevealState::LeftFocused);
        assert_eq!(c.offset(), 260.0);
    }

    #[test]
    fn drag_short_of_half_width_snaps_back() {
        let mut c = left_only();
        drag(&mut c, 100.0, 0.0);
        assert!(c.is_animating());
        run(&mut c);
        assert_eq!(c.state(), RevealState::FrontFocused);
        assert_eq!(c.offset(), 0.0);
        assert!(notifications(&mut c).is_empty());
    }

    #[test]
    fn quick_swipe_opens_with_little_travel() {
        let mut c = left_only();
        drag(&mut c, 40.0, 900.0);
        run(&mut c);
        assert_eq!(c.state(), RevealState::LeftFocused);
    }

    #[test]
    fn overdraw_follows_option() {
        let mut c = left_only();
        c.handle_gesture(GestureEvent::Began {
            position: Point::ORIGIN,
        });
        c.handle_gesture(GestureEvent::Moved {
            position: Point::new(400.0, 0.0),
            velocity: Vec2::ZERO,
        });
        assert!(c.offset() > 260.0 && c.offset() < 300.0, "{}", c.offset());
        c.handle_gesture(GestureEvent::Cancelled);
        run(&mut c);

        c.options_mut().set_allows_overdraw(false);
        c.handle_gesture(GestureEvent::Began {
            position: Point::ORIGIN,
        });
        c.handle_gesture(GestureEvent::Moved {
            position: Point::new(400.0, 0.0),
            velocity: Vec2::ZERO,
        });
        assert_eq!(c.offset(), 260.0);
    }

    #[test]
    fn snap_interrupts_animated_close() {
        let mut c = left_only();
        c.show_side(Side::Left, false).unwrap();
        c.show_front_view_controller();
        c.tick(FRAME);
        assert!(c.is_animating());

        c.show_front_view_controller_animated(false);
        assert!(!c.is_animating());
        assert_eq!(c.state(), RevealState::FrontFocused);
        assert_eq!(c.offset(), 0.0);
        assert!(c.is_front_interaction_enabled());
    }

    #[test]
    fn snap_interrupts_animated_open_of_same_side() {
        let mut c = left_only();
        c.show_side_menu().unwrap();
        c.tick(FRAME);
        assert!(c.is_animating());

        c.show_side(Side::Left, false).unwrap();
        assert!(!c.is_animating());
        assert_eq!(c.state(), RevealState::LeftFocused);
        assert_eq!(c.offset(), 260.0);
    }

    #[test]
    fn drag_during_side_switch_continues_from_current_offset() {
        let mut c = both();
        c.show_side(Side::Left, false).unwrap();
        c.show_side(Side::Right, true).unwrap();
        c.tick(Duration::from_millis(140));
        let at = c.offset();
        assert!(at < 0.0 && at > -259.0, "{at}");
        assert_eq!(c.state(), RevealState::LeftFocused);

        c.handle_gesture(GestureEvent::Began {
            position: Point::new(100.0, 0.0),
        });
        assert_eq!(c.offset(), at);
        c.handle_gesture(GestureEvent::Moved {
            position: Point::new(99.0, 0.0),
            velocity: Vec2::new(-50.0, 0.0),
        });
        assert_eq!(c.offset(), at - 1.0);

        c.handle_gesture(GestureEvent::Ended {
            velocity: Vec2::new(-1000.0, 0.0),
        });
        run(&mut c);
        assert_eq!(c.state(), RevealState::RightFocused);
        assert_eq!(c.offset(), -260.0);
    }

    #[test]
    fn offset_updates_coalesce_between_drains() {
        let mut c = left_only();
        c.show_side_menu().unwrap();
        for _ in 0..4 {
            c.tick(FRAME);
        }
        let events = c.take_events();
        let offsets: Vec<f64> = events
            .iter()
            .filter_map(|e| match e {
                RevealEvent::OffsetChanged(x) => Some(*x),
                _ => None,
            })
            .collect();
        assert_eq!(offsets, vec![c.offset()], "{events:?}");
    }

    #[test]
    fn show_side_menu_interrupts_closing() {
        let mut c = left_only();
        c.show_side(Side::Left, false).unwrap();
        let _ = c.take_events();

        c.show_front_view_controller();
        c.tick(Duration::from_millis(80));
        let mid = c.offset();
        assert!(mid > 0.0 && mid < 260.0, "{mid}");

        c.show_side_menu().unwrap();
        assert_eq!(
            notifications(&mut c),
            vec![
                RevealEvent::FrontViewWillBeShown,
                RevealEvent::SideMenuWillBeShown(Side::Left)
            ]
        );
        run(&mut c);
        assert_eq!(c.state(), RevealState::LeftFocused);
        assert_eq!(c.offset(), 260.0);
    }

    #[test]
    fn drag_interrupts_animation_at_current_offset() {
        let mut c = left_only();
        c.show_side_menu().unwrap();
        c.tick(Duration::from_millis(90));
        let at = c.offset();
        c.handle_gesture(GestureEvent::Began {
            position: Point::new(50.0, 0.0),
        });
        assert!(!c.is_animating());
        assert!(c.is_dragging());
        assert_eq!(c.offset(), at);
        c.handle_gesture(GestureEvent::Moved {
            position: Point::new(60.0, 0.0),
            velocity: Vec2::ZERO,
        });
        assert_eq!(c.offset(), at + 10.0);
    }

    #[test]
    fn missing_panel_is_reported_and_state_is_kept() {
        let mut c = left_only();
        assert_eq!(
            c.show_side(Side::Right, true),
            Err(RevealError::NoSuchPanel(Side::Right))
        );
        assert_eq!(c.state(), RevealState::FrontFocused);
        assert!(!c.is_animating());

        let mut bare: Reveal = RevealController::new("front", None, RevealOptions::default());
        assert_eq!(bare.show_side_menu(), Err(RevealError::NoSuchPanel(Side::Left)));
    }

    #[test]
    fn failed_command_leaves_in_flight_transition_alone() {
        let mut c = left_only();
        c.show_side_menu().unwrap();
        c.tick(FRAME);
        assert!(c.show_side(Side::Right, true).is_err());
        assert!(c.is_animating());
        run(&mut c);
        assert_eq!(c.state(), RevealState::LeftFocused);
    }

    #[test]
    fn right_panel_is_the_default_when_alone() {
        let mut c: Reveal = RevealController::with_panels(
            "front",
            SidePanels::right("right"),
            RevealLayout::default(),
            RevealOptions::default(),
        );
        c.show_side_menu().unwrap();
        run(&mut c);
        assert_eq!(c.state(), RevealState::RightFocused);
        assert_eq!(c.offset(), -260.0);
        assert_eq!(c.front_frame(), Rect::new(-260.0, 0.0, 60.0, 480.0));
    }

    #[test]
    fn switching_sides_goes_through_one_transition() {
        let mut c = both();
        c.show_side(Side::Left, false).unwrap();
        c.show_side(Side::Right, true).unwrap();
        run(&mut c);
        assert_eq!(c.state(), RevealState::RightFocused);
    }

    #[test]
    fn drag_from_left_cannot_reveal_right() {
        let mut c = both();
        c.show_side(Side::Left, false).unwrap();
        drag(&mut c, -500.0, -2000.0);
        assert_eq!(c.offset(), 0.0);
        run(&mut c);
        assert_eq!(c.state(), RevealState::FrontFocused);

        drag(&mut c, -200.0, 0.0);
        run(&mut c);
        assert_eq!(c.state(), RevealState::RightFocused);
    }

    #[test]
    fn presentation_mode_round_trip() {
        let mut c = left_only();
        assert_eq!(
            c.enter_presentation_mode(true),
            Err(RevealError::PresentationModeUnavailable(Side::Left))
        );

        c.show_side(Side::Left, false).unwrap();
        c.enter_presentation_mode(true).unwrap();
        run(&mut c);
        assert_eq!(c.state(), RevealState::LeftFocusedPresentationMode);
        assert!(c.is_presentation_mode_active());
        assert_eq!(c.offset(), 320.0);

        c.resign_presentation_mode(false, true).unwrap();
        run(&mut c);
        assert_eq!(c.state(), RevealState::LeftFocused);

        c.enter_presentation_mode(false).unwrap();
        c.resign_presentation_mode(true, true).unwrap();
        run(&mut c);
        assert_eq!(c.state(), RevealState::FrontFocused);
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn presentation_mode_respects_layout_support() {
        let layout = RevealLayout {
            left_presentation: false,
            ..RevealLayout::default()
        };
        let mut c: Reveal = RevealController::with_panels(
            "front",
            SidePanels::left("left"),
            layout,
            RevealOptions::default(),
        );
        c.show_side(Side::Left, false).unwrap();
        assert_eq!(
            c.enter_presentation_mode(true),
            Err(RevealError::PresentationModeUnavailable(Side::Left))
        );
        assert_eq!(c.state(), RevealState::LeftFocused);
    }

    #[test]
    fn show_view_controller_closes_before_swapping() {
        let mut c = left_only();
        c.show_side(Side::Left, false).unwrap();
        let _ = c.take_events();
        let done = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&done);
        c.show_view_controller("settings", move |ok| sink.borrow_mut().push(ok));

        c.tick(FRAME);
        assert_eq!(*c.front(), "front", "swap waits for the close");
        run(&mut c);
        assert_eq!(*c.front(), "settings");
        assert_eq!(c.state(), RevealState::FrontFocused);
        assert_eq!(*done.borrow(), vec![true]);

        let events = c.take_events();
        let swap = events
            .iter()
            .position(|e| *e == RevealEvent::FrontReplaced)
            .unwrap();
        let commit = events
            .iter()
            .position(|e| matches!(e, RevealEvent::StateChanged { .. }))
            .unwrap();
        assert!(commit < swap, "{events:?}");
    }

    #[test]
    fn show_view_controller_while_front_swaps_immediately() {
        let mut c = left_only();
        let done = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&done);
        c.show_view_controller("profile", move |ok| sink.borrow_mut().push(ok));
        assert_eq!(*c.front(), "profile");
        assert_eq!(*done.borrow(), vec![true]);
        assert!(!c.is_animating());

        c.show_controller("inbox");
        assert_eq!(*c.front(), "inbox");
    }

    #[test]
    fn interrupted_completion_reports_unfinished() {
        let mut c = left_only();
        c.show_side(Side::Left, false).unwrap();
        let done = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&done);
        c.show_view_controller("settings", move |ok| sink.borrow_mut().push(ok));
        c.tick(FRAME);
        c.show_side_menu().unwrap();
        assert_eq!(*done.borrow(), vec![false]);
        assert_eq!(*c.front(), "settings");
        run(&mut c);
        assert_eq!(c.state(), RevealState::LeftFocused);
        assert_eq!(done.borrow().len(), 1, "completion must fire once");
    }

    #[test]
    fn reset_tap_closes_side_panel() {
        let mut c = left_only();
        assert!(!c.handle_reset_tap());
        c.show_side(Side::Left, false).unwrap();
        assert!(c.handle_reset_tap());
        run(&mut c);
        assert_eq!(c.state(), RevealState::FrontFocused);

        c.options_mut().set_recognizes_reset_tap_on_front_view(false);
        c.show_side(Side::Left, false).unwrap();
        assert!(!c.handle_reset_tap());
        assert_eq!(c.state(), RevealState::LeftFocused);
    }

    #[test]
    fn disabled_pan_recognizer_ignores_drags() {
        let mut c = left_only();
        c.options_mut().set_recognizes_panning_on_front_view(false);
        assert!(!c.pan_recognizer().enabled);
        drag(&mut c, 200.0, 0.0);
        assert_eq!(c.offset(), 0.0);
        assert!(!c.is_animating());
    }

    #[test]
    fn bouncy_settles_on_resting_offset() {
        let mut c = left_only();
        c.options_mut().set_animation_type(AnimationType::Bouncy);
        c.show_side_menu().unwrap();
        let mut peak: f64 = 0.0;
        while c.is_animating() {
            c.tick(FRAME);
            peak = peak.max(c.offset());
        }
        assert!(peak > 260.0, "expected an overshoot, peak {peak}");
        assert_eq!(c.offset(), 260.0);
        assert_eq!(c.state(), RevealState::LeftFocused);
    }

    #[test]
    fn option_writes_apply_to_the_next_transition_only() {
        let mut c = left_only();
        c.show_side_menu().unwrap();
        c.options_mut()
            .set_animation_duration(Duration::from_secs(10));
        run(&mut c);
        assert_eq!(c.state(), RevealState::LeftFocused);

        c.show_front_view_controller();
        for _ in 0..20 {
            c.tick(FRAME);
        }
        assert!(c.is_animating(), "new duration applies to the next transition");
    }

    #[test]
    fn zero_duration_commits_without_animating() {
        let mut c = RevealController::from_entries(
            "front",
            Some("left"),
            [("animationDuration", OptionValue::Number(0.0))],
        )
        .unwrap();
        c.show_side_menu().unwrap();
        assert!(!c.is_animating());
        assert_eq!(c.state(), RevealState::LeftFocused);
    }

    #[test]
    fn invalid_option_fails_construction() {
        let r: Result<Reveal, _> = RevealController::from_entries(
            "front",
            Some("left"),
            [("animationDuration", OptionValue::Bool(true))],
        );
        assert!(matches!(r, Err(RevealError::InvalidOptionKind { .. })));
    }

    #[test]
    fn layout_change_reanchors_resting_offset() {
        let mut c = left_only();
        c.show_side(Side::Left, false).unwrap();
        let mut layout = RevealLayout::default();
        layout.left = crate::types::WidthRange::new(200.0, 240.0);
        c.set_layout(layout);
        assert_eq!(c.offset(), 200.0);
        assert_eq!(c.front_frame().x0, 200.0);
    }

    #[test]
    fn every_settled_sequence_leaves_one_resting_state() {
        let mut c = both();
        let script: [fn(&mut Reveal); 6] = [
            |c| c.show_side(Side::Right, true).unwrap(),
            |c| drag(c, 60.0, 1200.0),
            |c| c.show_side_menu().unwrap(),
            |c| c.enter_presentation_mode(true).unwrap(),
            |c| drag(c, -300.0, 0.0),
            |c| c.show_front_view_controller(),
        ];
        for step in script {
            step(&mut c);
            c.tick(FRAME);
            step(&mut c);
            run(&mut c);
            assert_eq!(c.offset(), c.state().resting_offset(c.layout()));
        }
        assert_eq!(c.state(), RevealState::FrontFocused);
    }

    #[test]
    fn cancelled_drag_snaps_back() {
        let mut c = left_only();
        c.handle_gesture(GestureEvent::Began {
            position: Point::ORIGIN,
        });
        c.handle_gesture(GestureEvent::Moved {
            position: Point::new(200.0, 0.0),
            velocity: Vec2::ZERO,
        });
        c.handle_gesture(GestureEvent::Cancelled);
        run(&mut c);
        assert_eq!(c.state(), RevealState::FrontFocused);
        assert_eq!(c.offset(), 0.0);
    }
}
