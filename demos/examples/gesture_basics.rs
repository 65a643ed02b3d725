// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture basics.
//!
//! Drives a recognizer with a scripted contact stream: a tap, a double tap, a swipe and a
//! long press. A draggable box follows raw moves, while classified gestures are printed as
//! they are dispatched.
//!
//! Run:
//! - `cargo run -p understory_demos --example gesture_basics`
//! - `RUST_LOG=understory_gesture=trace cargo run -p understory_demos --example gesture_basics`

use std::cell::{Cell, RefCell};

use kurbo::{Point, Vec2};
use tracing_subscriber::EnvFilter;
use understory_gesture::recognizer::Recognizer;
use understory_gesture::registry::handler;
use understory_gesture::types::{GestureEvent, GestureKind, Timestamp, TouchSignal};

/// A box that can be dragged with raw touch moves.
#[derive(Debug, Default)]
struct DragBox {
    origin: Cell<Point>,
    last_touch: Cell<Option<Point>>,
    log: RefCell<Vec<String>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rec: Recognizer<DragBox> = Recognizer::new(DragBox::default());
    rec.on(
        GestureKind::TouchStart,
        handler(|b: &DragBox, ev: &GestureEvent| {
            b.last_touch.set(Some(ev.position));
            Ok(())
        }),
    )
    .on(
        GestureKind::TouchMove,
        handler(|b: &DragBox, ev: &GestureEvent| {
            if let Some(prev) = b.last_touch.get() {
                let delta: Vec2 = ev.position - prev;
                b.origin.set(b.origin.get() + delta);
            }
            b.last_touch.set(Some(ev.position));
            Ok(())
        }),
    )
    .on(
        GestureKind::TouchEnd,
        handler(|b: &DragBox, _: &GestureEvent| {
            b.last_touch.set(None);
            Ok(())
        }),
    );
    for kind in [
        GestureKind::Tap,
        GestureKind::DoubleTap,
        GestureKind::LongTap,
        GestureKind::Swipe,
        GestureKind::SwipeLeft,
        GestureKind::SwipeRight,
        GestureKind::SwipeUp,
        GestureKind::SwipeDown,
    ] {
        rec.on(
            kind,
            handler(|b: &DragBox, ev: &GestureEvent| {
                b.log.borrow_mut().push(format!(
                    "{:>6} ms  {:<10} at ({:.0}, {:.0}){}",
                    ev.time.since_epoch().as_millis(),
                    ev.kind,
                    ev.position.x,
                    ev.position.y,
                    ev.direction
                        .map(|d| format!("  direction={d:?}"))
                        .unwrap_or_default(),
                ));
                Ok(())
            }),
        );
    }

    let t = Timestamp::from_millis;
    let script = [
        // Tap.
        TouchSignal::start(Point::new(10.0, 10.0), t(0)),
        TouchSignal::end(Point::new(10.0, 10.0), t(50)),
        // Double tap.
        TouchSignal::start(Point::new(200.0, 200.0), t(1_000)),
        TouchSignal::end(Point::new(200.0, 200.0), t(1_040)),
        TouchSignal::start(Point::new(204.0, 198.0), t(1_150)),
        TouchSignal::end(Point::new(204.0, 198.0), t(1_180)),
        // Swipe right, which also drags the box.
        TouchSignal::start(Point::new(0.0, 0.0), t(2_000)),
        TouchSignal::moved(Point::new(25.0, 3.0), t(2_030)),
        TouchSignal::moved(Point::new(60.0, 5.0), t(2_060)),
        TouchSignal::end(Point::new(60.0, 5.0), t(2_090)),
        // Long press.
        TouchSignal::start(Point::new(50.0, 50.0), t(3_000)),
        TouchSignal::end(Point::new(51.0, 50.0), t(4_000)),
    ];

    for signal in script {
        rec.handle(signal).expect("handlers are infallible");
    }
    // Let the last pending timers fire.
    while let Some(deadline) = rec.next_deadline() {
        rec.poll(deadline).expect("handlers are infallible");
    }

    println!("== Gestures ==");
    for line in rec.surface().log.borrow().iter() {
        println!("  {line}");
    }
    println!("== Drag box origin ==");
    println!("  {:?}", rec.surface().origin.get());
}
