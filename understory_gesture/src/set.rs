// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An owned collection of recognizers, one per surface.
//!
//! ## Overview
//!
//! [`RecognizerSet`] fans registration, configuration and teardown out to every member whose
//! surface matches a selection predicate. It adds no classification logic of its own; each
//! member keeps its own session, timers and handlers.
//!
//! The set is an ordinary value owned by the caller, so its lifetime and teardown are
//! explicit.
//!
//! ```
//! use core::time::Duration;
//! use understory_gesture::config::ConfigPatch;
//! use understory_gesture::set::RecognizerSet;
//!
//! let mut set: RecognizerSet<&str> = RecognizerSet::new();
//! set.bind_all(["list-item", "list-item", "toolbar"]);
//! set.configure(|s| *s == "list-item", &ConfigPatch::new().tap_interval(Duration::from_millis(200)));
//! assert_eq!(set.select(|s| *s == "list-item").count(), 2);
//! assert_eq!(set.destroy(|s| *s == "toolbar"), 1);
//! assert_eq!(set.prune(), 1);
//! assert_eq!(set.len(), 2);
//! ```

use alloc::vec::Vec;
use core::convert::Infallible;

use crate::config::{ConfigPatch, GestureConfig};
use crate::error::Error;
use crate::recognizer::Recognizer;
use crate::redispatch::{GestureSink, forwarder};
use crate::registry::Handler;
use crate::types::{GestureKind, GestureKinds, Timestamp};

/// Recognizers for several surfaces, addressed by predicates over the surface.
pub struct RecognizerSet<S, E = Infallible> {
    members: Vec<Recognizer<S, E>>,
}

impl<S: core::fmt::Debug, E> core::fmt::Debug for RecognizerSet<S, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(&self.members).finish()
    }
}

impl<S, E> Default for RecognizerSet<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> RecognizerSet<S, E> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Bind a recognizer with the default configuration to `surface`. Returns its index.
    pub fn bind(&mut self, surface: S) -> usize {
        self.bind_with_config(surface, GestureConfig::default())
    }

    /// Bind a recognizer with `config` to `surface`. Returns its index.
    pub fn bind_with_config(&mut self, surface: S, config: GestureConfig) -> usize {
        self.members.push(Recognizer::with_config(surface, config));
        self.members.len() - 1
    }

    /// Bind one recognizer per surface. Returns how many were bound.
    pub fn bind_all(&mut self, surfaces: impl IntoIterator<Item = S>) -> usize {
        let before = self.members.len();
        self.members
            .extend(surfaces.into_iter().map(Recognizer::new));
        self.members.len() - before
    }

    /// Number of members, destroyed ones included until [`prune`](Self::prune).
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member at `index`.
    pub fn get(&self, index: usize) -> Option<&Recognizer<S, E>> {
        self.members.get(index)
    }

    /// Mutable member at `index`, for feeding raw signals.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Recognizer<S, E>> {
        self.members.get_mut(index)
    }

    /// All members in bind order.
    pub fn iter(&self) -> impl Iterator<Item = &Recognizer<S, E>> {
        self.members.iter()
    }

    /// All members in bind order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Recognizer<S, E>> {
        self.members.iter_mut()
    }

    /// Members whose surface satisfies `pred`.
    pub fn select(&self, pred: impl Fn(&S) -> bool) -> impl Iterator<Item = &Recognizer<S, E>> {
        self.members.iter().filter(move |r| pred(r.surface()))
    }

    /// Members whose surface satisfies `pred`, mutably.
    pub fn select_mut(
        &mut self,
        pred: impl Fn(&S) -> bool,
    ) -> impl Iterator<Item = &mut Recognizer<S, E>> {
        self.members.iter_mut().filter(move |r| pred(r.surface()))
    }

    /// Register `handler` for `kind` on every selected member.
    pub fn on(
        &mut self,
        pred: impl Fn(&S) -> bool,
        kind: GestureKind,
        handler: Handler<S, E>,
    ) -> &mut Self {
        for r in self.select_mut(pred) {
            r.on(kind, handler.clone());
        }
        self
    }

    /// Remove `handler` (or every handler, when `None`) for `kind` on every selected member.
    pub fn off(
        &mut self,
        pred: impl Fn(&S) -> bool,
        kind: GestureKind,
        handler: Option<&Handler<S, E>>,
    ) -> &mut Self {
        for r in self.select_mut(pred) {
            r.off(kind, handler);
        }
        self
    }

    /// Merge `patch` into the configuration of every selected member.
    pub fn configure(&mut self, pred: impl Fn(&S) -> bool, patch: &ConfigPatch) -> &mut Self {
        for r in self.select_mut(pred) {
            r.configure(patch);
        }
        self
    }

    /// Destroy every selected member that is still live. Returns how many were destroyed.
    pub fn destroy(&mut self, pred: impl Fn(&S) -> bool) -> usize {
        let mut n = 0;
        for r in self.select_mut(pred).filter(|r| !r.is_destroyed()) {
            r.destroy();
            n += 1;
        }
        n
    }

    /// Drop destroyed members. Returns how many were removed.
    ///
    /// Indices returned by [`bind`](Self::bind) are not stable across a prune.
    pub fn prune(&mut self) -> usize {
        let before = self.members.len();
        self.members.retain(|r| !r.is_destroyed());
        before - self.members.len()
    }

    /// Fire due timers on every member, in bind order.
    ///
    /// Every member is polled even when an earlier one fails; the first handler error is
    /// returned.
    pub fn poll(&mut self, now: Timestamp) -> Result<(), Error<E>> {
        self.members
            .iter_mut()
            .fold(Ok(()), |result, r| result.and(r.poll(now)))
    }

    /// Earliest pending deadline across all members.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.members.iter().filter_map(Recognizer::next_deadline).min()
    }

    /// Re-emit `kinds` onto every selected member's surface through one shared handler.
    ///
    /// See [`redispatch`](crate::redispatch).
    pub fn forward(&mut self, pred: impl Fn(&S) -> bool, kinds: GestureKinds) -> Handler<S, E>
    where
        S: GestureSink<E> + 'static,
        E: 'static,
    {
        let handler = forwarder();
        for r in self.select_mut(pred) {
            for kind in kinds.kinds() {
                r.on(kind, handler.clone());
            }
        }
        handler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::handler;
    use crate::types::GestureEvent;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use core::time::Duration;
    use kurbo::Point;

    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    struct Surface {
        id: u32,
        group: &'static str,
    }

    fn surfaces() -> [Surface; 3] {
        [
            Surface { id: 1, group: "a" },
            Surface { id: 2, group: "b" },
            Surface { id: 3, group: "a" },
        ]
    }

    fn in_group(g: &'static str) -> impl Fn(&Surface) -> bool {
        move |s: &Surface| s.group == g
    }

    #[test]
    fn on_fans_out_to_selected_members() {
        let taps: Rc<RefCell<Vec<u32>>> = Rc::default();
        let mut set: RecognizerSet<Surface> = RecognizerSet::new();
        assert_eq!(set.bind_all(surfaces()), 3);
        let t = taps.clone();
        set.on(
            in_group("a"),
            GestureKind::Tap,
            handler(move |s: &Surface, _: &GestureEvent| {
                t.borrow_mut().push(s.id);
                Ok(())
            }),
        );
        for r in set.iter_mut() {
            r.on_start(Point::ZERO, Timestamp::ZERO).unwrap();
            r.on_end(Point::ZERO, Timestamp::from_millis(10)).unwrap();
        }
        assert_eq!(set.next_deadline(), Some(Timestamp::from_millis(310)));
        set.poll(Timestamp::from_millis(310)).unwrap();
        assert_eq!(*taps.borrow(), vec![1, 3]);
        assert_eq!(set.next_deadline(), None);
    }

    #[test]
    fn off_and_configure_respect_selection() {
        let mut set: RecognizerSet<Surface> = RecognizerSet::new();
        set.bind_all(surfaces());
        let h = handler(|_: &Surface, _: &GestureEvent| Ok(()));
        set.on(|_| true, GestureKind::Swipe, h.clone());
        set.off(in_group("b"), GestureKind::Swipe, Some(&h));
        set.configure(
            in_group("b"),
            &ConfigPatch::new().long_tap_interval(Duration::from_millis(500)),
        );
        for r in set.iter() {
            let b = r.surface().group == "b";
            assert_eq!(r.handlers().handlers(GestureKind::Swipe).is_empty(), b);
            let expected = if b { 500 } else { 800 };
            assert_eq!(r.config().long_tap_interval, Duration::from_millis(expected));
        }
    }

    #[test]
    fn destroy_counts_live_members_and_prune_removes_them() {
        let mut set: RecognizerSet<Surface> = RecognizerSet::new();
        set.bind_all(surfaces());
        set.get_mut(0)
            .unwrap()
            .on_start(Point::ZERO, Timestamp::ZERO)
            .unwrap();
        assert_eq!(set.destroy(in_group("a")), 2);
        assert_eq!(set.destroy(in_group("a")), 0);
        assert_eq!(set.next_deadline(), None);
        assert_eq!(set.prune(), 2);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().surface().id, 2);
    }

    #[test]
    fn poll_reaches_every_member_and_keeps_first_error() {
        let mut set: RecognizerSet<u32, u32> = RecognizerSet::new();
        set.bind_all([1, 2]);
        set.on(
            |_| true,
            GestureKind::LongTap,
            handler(|s: &u32, _: &GestureEvent| Err(*s)),
        );
        for r in set.iter_mut() {
            r.on_start(Point::ZERO, Timestamp::ZERO).unwrap();
        }
        assert_eq!(set.poll(Timestamp::from_millis(800)), Err(Error::Handler(1)));
        // The second member fired too.
        assert_eq!(set.get(1).unwrap().next_deadline(), None);
        assert_eq!(set.next_deadline(), None);
    }

    #[test]
    fn bind_with_config_returns_index() {
        let mut set: RecognizerSet<u32> = RecognizerSet::default();
        assert!(set.is_empty());
        let config = GestureConfig {
            distance_threshold: 2.0,
            ..GestureConfig::default()
        };
        assert_eq!(set.bind(10), 0);
        assert_eq!(set.bind_with_config(11, config), 1);
        assert_eq!(set.get(1).unwrap().config().distance_threshold, 2.0);
    }

    #[test]
    fn forward_reaches_selected_surfaces_only() {
        #[derive(Debug)]
        struct Sink {
            id: u32,
            seen: RefCell<Vec<GestureKind>>,
        }
        impl GestureSink<Infallible> for Sink {
            fn emit(&self, event: &GestureEvent) -> Result<(), Infallible> {
                self.seen.borrow_mut().push(event.kind);
                Ok(())
            }
        }

        let mut set: RecognizerSet<Sink> = RecognizerSet::new();
        set.bind_all((1..=2).map(|id| Sink {
            id,
            seen: RefCell::default(),
        }));
        set.forward(|s| s.id == 2, GestureKinds::LONG_TAP);
        for r in set.iter_mut() {
            r.on_start(Point::ZERO, Timestamp::ZERO).unwrap();
        }
        set.poll(Timestamp::from_millis(800)).unwrap();
        let seen: Vec<usize> = set.iter().map(|r| r.surface().seen.borrow().len()).collect();
        assert_eq!(seen, vec![0, 1]);
    }
}
