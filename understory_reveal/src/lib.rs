// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reveal --heading-base-level=0

//! Understory Reveal: a headless, `no_std` controller for reveal panels.
//!
//! ## Overview
//!
//! A reveal panel hosts primary front content and one or two side panels. The user
//! slides the front content aside, by dragging or through a command, to reveal a
//! side panel, then slides it back.
//!
//! This crate is the interaction engine only. It decides which panel has focus, turns
//! drags into offsets, resolves released drags into committed states, and animates
//! the front content between resting offsets. It does not own views, perform layout,
//! or render. The host applies the offset (see
//! [`RevealController::front_frame`](crate::controller::RevealController::front_frame))
//! and reacts to [`RevealEvent`](crate::types::RevealEvent)s.
//!
//! ## Pieces
//!
//! - [`options`]: typed, validated configuration ([`RevealOptions`](crate::options::RevealOptions)),
//!   constructible from a key/value mapping.
//! - [`gesture`]: the [`GestureInterpreter`](crate::gesture::GestureInterpreter), which clamps live
//!   drags (with damped overdraw) and resolves releases by distance or velocity.
//! - [`animation`]: [`OffsetAnimation`](crate::animation::OffsetAnimation), a frame-driven
//!   interpolation with linear or eased timing and optional bounce.
//! - [`controller`]: the [`RevealController`](crate::controller::RevealController) state machine.
//! - [`types`]: sides, panel composition, focus states, layout, and events.
//!
//! ## States
//!
//! - `FrontFocused` → `LeftFocused`: open left, by drag, quick swipe, or command.
//! - `LeftFocused` → `FrontFocused`: close, by drag, quick swipe, reset tap, or command.
//! - `LeftFocused` → `LeftFocusedPresentationMode`: enter presentation mode.
//! - `LeftFocusedPresentationMode` → `FrontFocused` (or back to `LeftFocused`): resign it.
//!
//! The right panel mirrors the left. Every transition is committed only when its
//! animation completes, and any new request interrupts the one in flight.
//!
//! ## Workflow
//!
//! 1) Construct a [`RevealController`](crate::controller::RevealController) with handles to the
//!    host's front and side content.
//! 2) Forward pan recognizer input as [`GestureEvent`](crate::gesture::GestureEvent)s and taps on
//!    the displaced front content to `handle_reset_tap`.
//! 3) Call `tick` on every frame, then apply the front frame and drain events.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Vec2};
//! use understory_reveal::controller::RevealController;
//! use understory_reveal::gesture::GestureEvent;
//! use understory_reveal::options::RevealOptions;
//! use understory_reveal::types::RevealState;
//!
//! let mut reveal = RevealController::new(1_u32, Some(2_u32), RevealOptions::default());
//!
//! // Drag rightward past half the panel width and let go.
//! reveal.handle_gesture(GestureEvent::Began { position: Point::new(20.0, 200.0) });
//! reveal.handle_gesture(GestureEvent::Moved {
//!     position: Point::new(170.0, 205.0),
//!     velocity: Vec2::new(300.0, 0.0),
//! });
//! reveal.handle_gesture(GestureEvent::Ended { velocity: Vec2::new(300.0, 0.0) });
//!
//! while reveal.is_animating() {
//!     reveal.tick(Duration::from_millis(16));
//! }
//! assert_eq!(reveal.state(), RevealState::LeftFocused);
//! assert_eq!(reveal.front_frame().x0, 260.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod animation;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod options;
pub mod types;

pub use controller::RevealController;
pub use error::RevealError;
pub use options::RevealOptions;
