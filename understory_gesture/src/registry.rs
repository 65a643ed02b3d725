// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler registry: ordered handler lists keyed by [`GestureKind`].
//!
//! ## Semantics
//!
//! - One list per kind; insertion order is dispatch order.
//! - Registering the same handler twice invokes it twice.
//! - Handlers are compared by identity ([`Rc::ptr_eq`]) when removing.
//! - Dispatch is synchronous and fail-fast: the first handler error aborts the remaining
//!   handlers for that dispatch and is returned to the caller.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::registry::{HandlerRegistry, handler};
//! use understory_gesture::types::{GestureEvent, GestureKind, Timestamp};
//!
//! let mut registry: HandlerRegistry<&str, ()> = HandlerRegistry::new();
//! let h = handler(|surface: &&str, ev: &GestureEvent| {
//!     assert_eq!(*surface, "button");
//!     assert_eq!(ev.kind, GestureKind::Tap);
//!     Ok(())
//! });
//! registry.on(GestureKind::Tap, h.clone()).on(GestureKind::Tap, h.clone());
//! assert_eq!(registry.handlers(GestureKind::Tap).len(), 2);
//!
//! let ev = GestureEvent::new(GestureKind::Tap, Point::ZERO, Timestamp::ZERO);
//! registry.dispatch(&"button", &ev).unwrap();
//!
//! registry.off(GestureKind::Tap, Some(&h));
//! assert_eq!(registry.handlers(GestureKind::Tap).len(), 1);
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::types::{GestureEvent, GestureKind, GestureKinds};

/// A shared gesture handler.
///
/// The first argument is the surface the recognizer is bound to.
pub type Handler<S, E> = Rc<dyn Fn(&S, &GestureEvent) -> Result<(), E>>;

/// Wrap a closure as a [`Handler`].
///
/// Keep the returned value to remove the handler later.
pub fn handler<S, E>(f: impl Fn(&S, &GestureEvent) -> Result<(), E> + 'static) -> Handler<S, E> {
    Rc::new(f)
}

/// Fixed map from every [`GestureKind`] to its ordered handler list.
pub struct HandlerRegistry<S, E> {
    slots: [Vec<Handler<S, E>>; GestureKind::COUNT],
}

impl<S, E> core::fmt::Debug for HandlerRegistry<S, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for kind in GestureKind::ALL {
            let n = self.slots[kind.index()].len();
            if n > 0 {
                map.entry(&kind.name(), &n);
            }
        }
        map.finish()
    }
}

impl<S, E> Default for HandlerRegistry<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> HandlerRegistry<S, E> {
    /// Create a registry with no handlers.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| Vec::new()),
        }
    }

    /// Append `handler` to the list for `kind`.
    pub fn on(&mut self, kind: GestureKind, handler: Handler<S, E>) -> &mut Self {
        self.slots[kind.index()].push(handler);
        self
    }

    /// Append `handler` to the list named `name`.
    ///
    /// Names outside the gesture vocabulary are ignored.
    pub fn on_named(&mut self, name: &str, handler: Handler<S, E>) -> &mut Self {
        match GestureKind::from_name(name) {
            Some(kind) => self.on(kind, handler),
            None => {
                tracing::trace!(name, "ignoring registration for unknown gesture");
                self
            }
        }
    }

    /// Remove the first occurrence of `handler` for `kind`, or every handler for `kind` when
    /// `handler` is `None`.
    ///
    /// Removing a handler that is not registered is a no-op.
    pub fn off(&mut self, kind: GestureKind, handler: Option<&Handler<S, E>>) -> &mut Self {
        let list = &mut self.slots[kind.index()];
        match handler {
            None => list.clear(),
            Some(h) => {
                if let Some(i) = list.iter().position(|x| Rc::ptr_eq(x, h)) {
                    list.remove(i);
                }
            }
        }
        self
    }

    /// Like [`off`](Self::off), addressed by name. Unknown names are ignored.
    pub fn off_named(&mut self, name: &str, handler: Option<&Handler<S, E>>) -> &mut Self {
        match GestureKind::from_name(name) {
            Some(kind) => self.off(kind, handler),
            None => self,
        }
    }

    /// Handlers registered for `kind`, in dispatch order.
    pub fn handlers(&self, kind: GestureKind) -> &[Handler<S, E>] {
        &self.slots[kind.index()]
    }

    /// Kinds that have at least one handler.
    pub fn registered_kinds(&self) -> GestureKinds {
        GestureKind::ALL
            .into_iter()
            .filter(|k| !self.slots[k.index()].is_empty())
            .fold(GestureKinds::empty(), |acc, k| acc | k.flag())
    }

    /// Remove every handler for every kind.
    pub fn clear(&mut self) {
        for list in &mut self.slots {
            list.clear();
        }
    }

    /// Invoke the handlers for `event.kind` in order with `surface` as the receiver.
    ///
    /// Stops at and returns the first handler error.
    pub fn dispatch(&self, surface: &S, event: &GestureEvent) -> Result<(), E> {
        for h in &self.slots[event.kind.index()] {
            h(surface, event)?;
        }
        Ok(())
    }
}
