// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drags and quick swipes.
//!
//! This example replays three synthetic drags against a controller with both side
//! panels: a slow drag that falls short and snaps back, a short quick swipe that
//! opens the left panel anyway, and an overdrawing drag that is damped past the
//! panel width.
//!
//! Run:
//! - `cargo run -p understory_examples --example reveal_gestures`

use std::time::Duration;

use kurbo::{Point, Vec2};
use understory_reveal::RevealController;
use understory_reveal::controller::SidePanels;
use understory_reveal::gesture::GestureEvent;
use understory_reveal::options::RevealOptions;
use understory_reveal::types::{RevealEvent, RevealLayout};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Content {
    Feed,
    Menu,
    Filters,
}

fn replay(reveal: &mut RevealController<Content>, label: &str, dx: f64, release: f64) {
    println!("== {label} ==");
    let start = Point::new(40.0, 300.0);
    reveal.handle_gesture(GestureEvent::Began { position: start });
    for i in 1..=4 {
        let x = start.x + dx * f64::from(i) / 4.0;
        reveal.handle_gesture(GestureEvent::Moved {
            position: Point::new(x, start.y),
            velocity: Vec2::new(release, 0.0),
        });
        println!("  drag x={x:6.1}  live offset={:7.2}", reveal.offset());
    }
    reveal.handle_gesture(GestureEvent::Ended {
        velocity: Vec2::new(release, 0.0),
    });
    while reveal.is_animating() {
        reveal.tick(Duration::from_millis(16));
    }
    for event in reveal.take_events() {
        if !matches!(event, RevealEvent::OffsetChanged(_)) {
            println!("  event {event:?}");
        }
    }
    println!("  settled in {:?} at {}", reveal.state(), reveal.offset());
}

fn main() {
    let mut reveal = RevealController::with_panels(
        Content::Feed,
        SidePanels::both(Content::Menu, Content::Filters),
        RevealLayout::default(),
        RevealOptions::default(),
    );

    replay(&mut reveal, "slow, short drag", 100.0, 120.0);
    replay(&mut reveal, "quick swipe", 40.0, 900.0);
    replay(&mut reveal, "close from the left panel", -180.0, 0.0);
    replay(&mut reveal, "overdraw toward the right panel", -420.0, -200.0);
    println!(
        "front={:?} right panel={:?}",
        reveal.front(),
        reveal.right()
    );
}
