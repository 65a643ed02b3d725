// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-surface session state: the contact being interpreted and the one before it.
//!
//! A [`Session`] is owned by its [`Recognizer`](crate::recognizer::Recognizer). Its fields are
//! overwritten on every start rather than reallocated. The two pending timers live here as
//! [`TimerSlot`]s; a slot holds at most one deadline, and scheduling into an occupied slot
//! cancels the previous timer first.

use kurbo::Point;

use crate::types::{GestureEvent, Timestamp};

/// A pending delayed dispatch.
#[derive(Copy, Clone, Debug, PartialEq)]
struct PendingTimer {
    deadline: Timestamp,
    payload: GestureEvent,
}

/// An owned, cancellable timer handle.
///
/// Cancelling is synchronous: once [`cancel`](Self::cancel) returns, the timer can no longer fire.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TimerSlot {
    pending: Option<PendingTimer>,
}

impl TimerSlot {
    /// Arm the slot, replacing (and so cancelling) any pending timer.
    pub(crate) fn schedule(&mut self, deadline: Timestamp, payload: GestureEvent) {
        if let Some(prev) = self.pending.take() {
            tracing::trace!(kind = %prev.payload.kind, "timer replaced");
        }
        self.pending = Some(PendingTimer { deadline, payload });
    }

    /// Disarm the slot. Returns whether a timer was pending.
    pub(crate) fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(prev) => {
                tracing::trace!(kind = %prev.payload.kind, "timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Take the payload if the deadline is at or before `now`.
    pub(crate) fn take_due(&mut self, now: Timestamp) -> Option<GestureEvent> {
        match self.pending {
            Some(t) if t.deadline <= now => {
                self.pending = None;
                Some(t.payload)
            }
            _ => None,
        }
    }

    /// Deadline of the pending timer, if any.
    pub fn deadline(&self) -> Option<Timestamp> {
        self.pending.map(|t| t.deadline)
    }

    /// Whether a timer is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// In-progress interpretation of the current and previous contact.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub(crate) start: Option<Point>,
    pub(crate) current: Option<Point>,
    pub(crate) last_start: Option<Timestamp>,
    pub(crate) this_start: Option<Timestamp>,
    pub(crate) previous_tap: Option<Point>,
    pub(crate) double_tap_candidate: bool,
    pub(crate) tap_timer: TimerSlot,
    pub(crate) long_tap_timer: TimerSlot,
}

impl Session {
    /// An empty session with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the most recent start.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Position of the most recent move in this session; unset until the first move.
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    /// Time of the most recent start.
    pub fn start_time(&self) -> Option<Timestamp> {
        self.this_start
    }

    /// Position of the start before the current one.
    pub fn previous_tap(&self) -> Option<Point> {
        self.previous_tap
    }

    /// Whether the current contact would complete a double tap if it ends without moving.
    pub fn is_double_tap_candidate(&self) -> bool {
        self.double_tap_candidate
    }

    /// The delayed solitary tap.
    pub fn tap_timer(&self) -> &TimerSlot {
        &self.tap_timer
    }

    /// The long tap timer.
    pub fn long_tap_timer(&self) -> &TimerSlot {
        &self.long_tap_timer
    }

    /// Cancel both timers.
    pub(crate) fn cancel_timers(&mut self) {
        self.tap_timer.cancel();
        self.long_tap_timer.cancel();
    }

    /// Cancel both timers and return every field to its unset baseline.
    pub(crate) fn reset(&mut self) {
        self.cancel_timers();
        *self = Self::default();
    }

    /// Whether the contact has travelled more than `threshold` from its start on either axis.
    ///
    /// An unset start or an unset current position counts as no movement.
    pub fn moved(&self, threshold: f64) -> bool {
        let (Some(start), Some(current)) = (self.start, self.current) else {
            return false;
        };
        let d = start - current;
        d.x.abs() > threshold || d.y.abs() > threshold
    }

    /// Whether `position` is strictly within `threshold` of the previous start on both axes.
    pub(crate) fn near_previous_tap(&self, position: Point, threshold: f64) -> bool {
        self.previous_tap.is_some_and(|prev| {
            let d = position - prev;
            d.x.abs() < threshold && d.y.abs() < threshold
        })
    }

    /// Earliest pending deadline across both timers.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        match (self.long_tap_timer.deadline(), self.tap_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
