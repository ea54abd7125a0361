// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal basics.
//!
//! This minimal example opens the side menu with a command, settles it by ticking a
//! frame clock, then swaps the front content, which closes the menu first.
//!
//! Run:
//! - `cargo run -p understory_examples --example reveal_basics`

use std::time::Duration;

use understory_reveal::RevealController;
use understory_reveal::options::{AnimationCurve, OptionValue};

const FRAME: Duration = Duration::from_millis(16);

fn settle(reveal: &mut RevealController<&'static str>) {
    while reveal.is_animating() {
        reveal.tick(FRAME);
        println!(
            "  offset={:7.2}  frame={:?}",
            reveal.offset(),
            reveal.front_frame()
        );
    }
    for event in reveal.take_events() {
        println!("  event {event:?}");
    }
}

fn main() {
    let mut reveal = RevealController::from_entries(
        "inbox",
        Some("menu"),
        [
            ("animationCurve", OptionValue::Curve(AnimationCurve::EaseOut)),
            ("animationDuration", OptionValue::Number(0.12)),
        ],
    )
    .expect("options are well formed");

    println!("== show_side_menu ==");
    reveal.show_side_menu().expect("a left panel is configured");
    settle(&mut reveal);
    println!("state={:?}", reveal.state());

    println!("== show_view_controller(settings) ==");
    reveal.show_view_controller("settings", |finished| {
        println!("  completion finished={finished}");
    });
    settle(&mut reveal);
    println!("state={:?} front={}", reveal.state(), reveal.front());
}
