// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizer implementation.
//!
//! ## Overview
//!
//! Consumes raw start/move/end signals for one surface, arbitrates between competing
//! interpretations with two timers, and dispatches gestures through a
//! [`HandlerRegistry`](crate::registry::HandlerRegistry).
//!
//! ## Decisions per signal
//!
//! - Start: pass through, reset the session, cancel stale timers, arm the long tap timer,
//!   and decide whether this start is the second half of a double tap.
//! - Move: pass through, and if the contact travelled past the threshold, cancel both timers
//!   and drop double tap candidacy.
//! - End: cancel the long tap timer, pass through, then either swipe (moved), double tap
//!   (candidate) or arm the delayed solitary tap.
//!
//! ## Time
//!
//! The recognizer never reads a clock. Every signal carries its own [`Timestamp`] and
//! the host calls [`Recognizer::poll`] to let timers fire. Each signal first advances the
//! clock to its timestamp, so a timer that is due at or before a signal fires before that
//! signal is interpreted. Use [`Recognizer::next_deadline`] to know when to poll next.
//!
//! Solitary taps and long taps arrive from [`poll`](Recognizer::poll) (or from the next
//! signal); swipes and double taps arrive synchronously from
//! [`on_end`](Recognizer::on_end).

use core::convert::Infallible;

use kurbo::Point;

use crate::config::{ConfigPatch, GestureConfig};
use crate::error::Error;
use crate::registry::{Handler, HandlerRegistry};
use crate::session::Session;
use crate::types::{GestureEvent, GestureKind, SwipeDirection, Timestamp, TouchPhase, TouchSignal};

/// Single-contact gesture recognizer bound to one surface.
///
/// ## Usage
///
/// - Construct with [`Recognizer::new`] or [`Recognizer::with_config`].
/// - Register handlers with [`Recognizer::on`]; they receive the bound surface.
/// - Feed raw samples with [`Recognizer::on_start`], [`Recognizer::on_move`] and
///   [`Recognizer::on_end`] (or [`Recognizer::handle`]).
/// - Call [`Recognizer::poll`] when [`Recognizer::next_deadline`] passes.
/// - Call [`Recognizer::destroy`] when the surface goes away.
///
/// `E` is the error type handlers may return; it defaults to [`Infallible`].
pub struct Recognizer<S, E = Infallible> {
    surface: S,
    config: GestureConfig,
    session: Session,
    handlers: HandlerRegistry<S, E>,
    destroyed: bool,
}

impl<S: core::fmt::Debug, E> core::fmt::Debug for Recognizer<S, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Recognizer")
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("session", &self.session)
            .field("handlers", &self.handlers)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl<S, E> Recognizer<S, E> {
    /// Create a recognizer for `surface` with the default configuration.
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, GestureConfig::default())
    }

    /// Create a recognizer for `surface` with an explicit configuration.
    pub fn with_config(surface: S, config: GestureConfig) -> Self {
        Self {
            surface,
            config,
            session: Session::new(),
            handlers: HandlerRegistry::new(),
            destroyed: false,
        }
    }

    /// The bound surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Current configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Registered handlers.
    pub fn handlers(&self) -> &HandlerRegistry<S, E> {
        &self.handlers
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Register `handler` for `kind`. Chainable.
    pub fn on(&mut self, kind: GestureKind, handler: Handler<S, E>) -> &mut Self {
        self.handlers.on(kind, handler);
        self
    }

    /// Register `handler` by gesture name. Unknown names are ignored. Chainable.
    pub fn on_named(&mut self, name: &str, handler: Handler<S, E>) -> &mut Self {
        self.handlers.on_named(name, handler);
        self
    }

    /// Remove the first occurrence of `handler` for `kind`, or all handlers for `kind`
    /// when `handler` is `None`.
    pub fn off(&mut self, kind: GestureKind, handler: Option<&Handler<S, E>>) -> &mut Self {
        self.handlers.off(kind, handler);
        self
    }

    /// Like [`off`](Self::off), addressed by name.
    pub fn off_named(&mut self, name: &str, handler: Option<&Handler<S, E>>) -> &mut Self {
        self.handlers.off_named(name, handler);
        self
    }

    /// Merge `patch` into the configuration.
    ///
    /// Already scheduled timers keep their deadlines; new thresholds apply from the next
    /// comparison on.
    pub fn configure(&mut self, patch: &ConfigPatch) -> &mut Self {
        self.config.merge(patch);
        self
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.session.next_deadline()
    }

    /// Feed a tagged raw signal.
    pub fn handle(&mut self, signal: TouchSignal) -> Result<(), Error<E>> {
        match signal.phase {
            TouchPhase::Start => self.on_start(signal.position, signal.time),
            TouchPhase::Move => self.on_move(signal.position, signal.time),
            TouchPhase::End => self.on_end(signal.position, signal.time),
        }
    }

    /// A new contact touched down.
    ///
    /// Timers due at `time` fire first. If one of their handlers fails, the contact is still
    /// recorded and that first error is returned afterwards; the same holds for
    /// [`on_move`](Self::on_move) and [`on_end`](Self::on_end).
    pub fn on_start(&mut self, position: Point, time: Timestamp) -> Result<(), Error<E>> {
        self.advance(time, |this| this.start(position, time))
    }

    /// The contact moved.
    pub fn on_move(&mut self, position: Point, time: Timestamp) -> Result<(), Error<E>> {
        self.advance(time, |this| this.moved(position, time))
    }

    /// The contact lifted.
    pub fn on_end(&mut self, position: Point, time: Timestamp) -> Result<(), Error<E>> {
        self.advance(time, |this| this.end(position, time))
    }

    fn start(&mut self, position: Point, time: Timestamp) -> Result<(), Error<E>> {
        let raw = GestureEvent::new(GestureKind::TouchStart, position, time);
        self.dispatch(&raw)?;

        let s = &mut self.session;
        s.start = Some(position);
        s.current = None;
        s.this_start = Some(time);
        let delay = s
            .last_start
            .map_or(core::time::Duration::ZERO, |last| {
                time.saturating_duration_since(last)
            });

        s.cancel_timers();
        s.long_tap_timer.schedule(
            time + self.config.long_tap_interval,
            raw.with_kind(GestureKind::LongTap),
        );

        s.double_tap_candidate = !delay.is_zero()
            && delay <= self.config.tap_interval
            && s.near_previous_tap(position, self.config.distance_threshold);
        if s.double_tap_candidate {
            // Second half of a double tap: the first tap and this hold are both void.
            s.tap_timer.cancel();
            s.long_tap_timer.cancel();
            tracing::trace!(?delay, "double tap candidate");
        }

        s.previous_tap = Some(position);
        s.last_start = Some(time);
        Ok(())
    }

    fn moved(&mut self, position: Point, time: Timestamp) -> Result<(), Error<E>> {
        self.dispatch(&GestureEvent::new(GestureKind::TouchMove, position, time))?;

        let s = &mut self.session;
        s.current = Some(position);
        if s.moved(self.config.distance_threshold) {
            s.cancel_timers();
            s.double_tap_candidate = false;
        }
        Ok(())
    }

    fn end(&mut self, position: Point, time: Timestamp) -> Result<(), Error<E>> {
        self.session.long_tap_timer.cancel();
        let raw = GestureEvent::new(GestureKind::TouchEnd, position, time);
        self.dispatch(&raw)?;

        if self.session.moved(self.config.distance_threshold) {
            return self.swipe(raw);
        }

        if self.session.double_tap_candidate {
            self.session.double_tap_candidate = false;
            tracing::debug!("double tap");
            return self.dispatch(&raw.with_kind(GestureKind::DoubleTap));
        }

        let elapsed = time.saturating_duration_since(self.session.this_start.unwrap_or(time));
        if elapsed < self.config.tap_interval {
            self.session
                .tap_timer
                .schedule(time + self.config.tap_interval, raw.with_kind(GestureKind::Tap));
        }
        Ok(())
    }

    /// Fire every timer due at or before `now`, earliest first.
    ///
    /// A failing handler does not keep later due timers from firing; the first error is
    /// returned once all of them have run.
    /// A destroyed recognizer has no timers, so this is a no-op after
    /// [`destroy`](Self::destroy).
    pub fn poll(&mut self, now: Timestamp) -> Result<(), Error<E>> {
        let mut result = Ok(());
        loop {
            let s = &mut self.session;
            // Long tap wins exact ties.
            let long_first = match (s.long_tap_timer.deadline(), s.tap_timer.deadline()) {
                (Some(l), Some(t)) => l <= t,
                (l, _) => l.is_some(),
            };
            if long_first && let Some(ev) = s.long_tap_timer.take_due(now) {
                s.double_tap_candidate = false;
                tracing::debug!("long tap");
                result = result.and(self.dispatch(&ev));
                continue;
            }
            if let Some(ev) = s.tap_timer.take_due(now) {
                tracing::debug!("tap");
                result = result.and(self.dispatch(&ev));
                continue;
            }
            return result;
        }
    }

    /// Cancel both timers and reset the session. Idempotent.
    ///
    /// Afterwards no gesture is dispatched and raw signals are rejected with
    /// [`Error::Destroyed`].
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.session.reset();
        self.destroyed = true;
        tracing::trace!("recognizer destroyed");
    }

    /// Bring the clock to `now`, then interpret the signal with `signal`.
    fn advance(
        &mut self,
        now: Timestamp,
        signal: impl FnOnce(&mut Self) -> Result<(), Error<E>>,
    ) -> Result<(), Error<E>> {
        if self.destroyed {
            return Err(Error::Destroyed);
        }
        let fired = self.poll(now);
        let handled = signal(self);
        fired.and(handled)
    }

    fn swipe(&mut self, raw: GestureEvent) -> Result<(), Error<E>> {
        let (Some(start), Some(current)) = (self.session.start, self.session.current) else {
            return Ok(());
        };
        let d = start - current;
        // Ties go to the horizontal axis.
        let direction = if d.x.abs() >= d.y.abs() {
            if d.x > 0.0 {
                SwipeDirection::Left
            } else {
                SwipeDirection::Right
            }
        } else if d.y > 0.0 {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        };
        tracing::debug!(?direction, "swipe");
        let ev = GestureEvent {
            direction: Some(direction),
            ..raw
        };
        self.dispatch(&ev.with_kind(direction.kind()))?;
        self.dispatch(&ev.with_kind(GestureKind::Swipe))
    }

    fn dispatch(&self, event: &GestureEvent) -> Result<(), Error<E>> {
        if event.kind.is_raw() {
            tracing::trace!(kind = %event.kind, "pass through");
        }
        self.handlers
            .dispatch(&self.surface, event)
            .map_err(Error::Handler)
    }
}
