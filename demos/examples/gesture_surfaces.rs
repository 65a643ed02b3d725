// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Several surfaces sharing one configuration and forwarding gestures as their own events.
//!
//! Loads a configuration patch from JSON, binds a recognizer per surface, applies the
//! patch to a subset of them, and re-emits classified gestures through each surface's
//! event queue.
//!
//! Run:
//! - `cargo run -p understory_demos --example gesture_surfaces`

use std::cell::RefCell;
use std::convert::Infallible;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_gesture::config::ConfigPatch;
use understory_gesture::redispatch::GestureSink;
use understory_gesture::set::RecognizerSet;
use understory_gesture::types::{GestureEvent, GestureKinds, Timestamp};

/// A UI element with its own queue of emitted events.
#[derive(Debug)]
struct Element {
    name: &'static str,
    class: &'static str,
    queue: RefCell<Vec<GestureEvent>>,
}

impl Element {
    fn new(name: &'static str, class: &'static str) -> Self {
        Self {
            name,
            class,
            queue: RefCell::default(),
        }
    }
}

impl GestureSink<Infallible> for Element {
    fn emit(&self, event: &GestureEvent) -> Result<(), Infallible> {
        self.queue.borrow_mut().push(*event);
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let patch: ConfigPatch = serde_json::from_str(
        r#"{ "distance_threshold": 12.0, "tap_interval": { "secs": 0, "nanos": 200000000 } }"#,
    )
    .expect("valid configuration patch");

    let mut set: RecognizerSet<Element> = RecognizerSet::new();
    set.bind_all([
        Element::new("first", "item"),
        Element::new("second", "item"),
        Element::new("header", "chrome"),
    ]);
    set.configure(|e| e.class == "item", &patch);
    set.forward(|_| true, GestureKinds::CLASSIFIED);

    let t = Timestamp::from_millis;
    // The same 20 unit drag is a swipe on items (threshold 12) and a tap on the header (30).
    for (i, r) in set.iter_mut().enumerate() {
        let t0 = i as u64 * 1_000;
        r.on_start(Point::new(100.0, 100.0), t(t0)).expect("infallible");
        r.on_move(Point::new(100.0, 120.0), t(t0 + 40)).expect("infallible");
        r.on_end(Point::new(100.0, 120.0), t(t0 + 60)).expect("infallible");
    }
    while let Some(deadline) = set.next_deadline() {
        set.poll(deadline).expect("infallible");
    }

    for r in set.iter() {
        let el = r.surface();
        let kinds: Vec<String> = el.queue.borrow().iter().map(|e| e.kind.to_string()).collect();
        println!("{:<8} ({:<6}) -> {}", el.name, el.class, kinds.join(", "));
    }

    let destroyed = set.destroy(|e| e.class == "chrome");
    set.prune();
    println!("destroyed {destroyed}, {} recognizers left", set.len());
}
