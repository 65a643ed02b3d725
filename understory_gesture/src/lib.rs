// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: a deterministic, `no_std` single-contact gesture recognizer.
//!
//! ## Overview
//!
//! This crate turns a stream of raw contact samples (start, move, end, each with a position
//! and a timestamp) into higher-level gestures: tap, double tap, long tap and swipe with its
//! four directions. Raw samples are passed through as well.
//! It does not acquire input itself.
//! Feed it samples from your platform, and it dispatches [`GestureEvent`](crate::types::GestureEvent)s
//! to handlers registered per [`GestureKind`](crate::types::GestureKind).
//!
//! ## Classification
//!
//! - Movement beyond [`distance_threshold`](crate::config::GestureConfig::distance_threshold)
//!   on either axis turns a contact into a swipe. The dominant axis picks the direction; equal
//!   movement on both axes counts as horizontal.
//! - A contact held for [`long_tap_interval`](crate::config::GestureConfig::long_tap_interval)
//!   without moving is a long tap.
//! - A short contact without movement is a tap. Its dispatch is delayed by
//!   [`tap_interval`](crate::config::GestureConfig::tap_interval) so that a second start within
//!   that window and near the first can upgrade it to a double tap.
//!
//! `pinch` and `rotate` are part of the vocabulary so handlers can be registered for them, but
//! the recognizer tracks one contact and never dispatches them.
//!
//! ## Time
//!
//! The recognizer never reads a clock and never spawns anything.
//! Timers are deadlines stored in the [`Session`](crate::session::Session); the host fires them
//! with [`Recognizer::poll`](crate::recognizer::Recognizer::poll) and learns when to wake up from
//! [`Recognizer::next_deadline`](crate::recognizer::Recognizer::next_deadline).
//! Every raw sample also advances the clock to its own timestamp first.
//!
//! ## Layering
//!
//! - [`recognizer`]: the state machine for one surface.
//! - [`registry`]: ordered handlers per gesture kind; dispatch is synchronous and fail-fast.
//! - [`set`]: an owned collection of recognizers addressed by predicates over their surfaces.
//! - [`redispatch`]: re-emits gestures through the surface's own event mechanism.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Point;
//! use understory_gesture::recognizer::Recognizer;
//! use understory_gesture::registry::handler;
//! use understory_gesture::types::{GestureEvent, GestureKind, Timestamp};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let mut rec: Recognizer<&str> = Recognizer::new("canvas");
//! for kind in [GestureKind::Tap, GestureKind::DoubleTap] {
//!     let log = log.clone();
//!     rec.on(kind, handler(move |_: &&str, ev: &GestureEvent| {
//!         log.borrow_mut().push(ev.kind);
//!         Ok(())
//!     }));
//! }
//!
//! let t = Timestamp::from_millis;
//! rec.on_start(Point::new(0.0, 0.0), t(0)).unwrap();
//! rec.on_end(Point::new(0.0, 0.0), t(50)).unwrap();
//! // A second tap close in time and space upgrades the first one.
//! rec.on_start(Point::new(5.0, 5.0), t(150)).unwrap();
//! rec.on_end(Point::new(5.0, 5.0), t(180)).unwrap();
//! rec.poll(t(1_000)).unwrap();
//!
//! assert_eq!(*log.borrow(), [GestureKind::DoubleTap]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod recognizer;
pub mod redispatch;
pub mod registry;
pub mod session;
pub mod set;
pub mod types;
