// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Re-dispatch recognized gestures onto the surface itself.
//!
//! Toolkits usually have their own event subscription mechanism. Implement [`GestureSink`]
//! for the surface type and call [`forward`] to have every selected gesture re-emitted
//! through it, so consumers can subscribe the toolkit's way instead of through the
//! recognizer's registry.
//!
//! Forwarding is an ordinary handler: it runs in registration order alongside other
//! handlers, preserves dispatch order and payload, and can be removed with
//! [`Recognizer::off`](crate::recognizer::Recognizer::off) using the handler [`forward`] returns.
//!
//! ```
//! use core::cell::RefCell;
//! use kurbo::Point;
//! use understory_gesture::recognizer::Recognizer;
//! use understory_gesture::redispatch::{GestureSink, forward};
//! use understory_gesture::types::{GestureEvent, GestureKind, GestureKinds, Timestamp};
//!
//! #[derive(Default)]
//! struct Element {
//!     events: RefCell<Vec<GestureKind>>,
//! }
//!
//! impl GestureSink<core::convert::Infallible> for Element {
//!     fn emit(&self, event: &GestureEvent) -> Result<(), core::convert::Infallible> {
//!         self.events.borrow_mut().push(event.kind);
//!         Ok(())
//!     }
//! }
//!
//! let mut rec: Recognizer<Element> = Recognizer::new(Element::default());
//! forward(&mut rec, GestureKinds::CLASSIFIED);
//! rec.on_start(Point::new(0.0, 0.0), Timestamp::from_millis(0)).unwrap();
//! rec.on_move(Point::new(0.0, 90.0), Timestamp::from_millis(40)).unwrap();
//! rec.on_end(Point::new(0.0, 90.0), Timestamp::from_millis(60)).unwrap();
//! assert_eq!(
//!     *rec.surface().events.borrow(),
//!     [GestureKind::SwipeDown, GestureKind::Swipe]
//! );
//! ```

use alloc::rc::Rc;

use crate::recognizer::Recognizer;
use crate::registry::Handler;
use crate::types::{GestureEvent, GestureKinds};

/// A surface that can re-emit gestures as its own events.
pub trait GestureSink<E> {
    /// Emit `event` on this surface.
    fn emit(&self, event: &GestureEvent) -> Result<(), E>;
}

/// A handler that forwards every event it receives to the surface's [`GestureSink::emit`].
pub fn forwarder<S, E>() -> Handler<S, E>
where
    S: GestureSink<E> + 'static,
    E: 'static,
{
    Rc::new(|surface: &S, event: &GestureEvent| surface.emit(event))
}

/// Register one shared forwarding handler on `recognizer` for every kind in `kinds`.
///
/// Returns the handler so it can later be removed per kind.
pub fn forward<S, E>(recognizer: &mut Recognizer<S, E>, kinds: GestureKinds) -> Handler<S, E>
where
    S: GestureSink<E> + 'static,
    E: 'static,
{
    let handler = forwarder();
    for kind in kinds.kinds() {
        recognizer.on(kind, handler.clone());
    }
    handler
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::handler;
    use crate::types::{GestureKind, Timestamp};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Point;

    #[derive(Debug, Default)]
    struct Element {
        emitted: RefCell<Vec<GestureKind>>,
        reject: Option<GestureKind>,
    }

    impl GestureSink<&'static str> for Element {
        fn emit(&self, event: &GestureEvent) -> Result<(), &'static str> {
            if self.reject == Some(event.kind) {
                return Err("rejected");
            }
            self.emitted.borrow_mut().push(event.kind);
            Ok(())
        }
    }

    #[test]
    fn forwards_only_selected_kinds() {
        let mut rec: Recognizer<Element, &'static str> = Recognizer::new(Element::default());
        forward(&mut rec, GestureKinds::TAP | GestureKinds::TOUCH_END);
        rec.on_start(Point::ZERO, Timestamp::ZERO).unwrap();
        rec.on_end(Point::ZERO, Timestamp::from_millis(30)).unwrap();
        rec.poll(Timestamp::from_millis(330)).unwrap();
        assert_eq!(
            *rec.surface().emitted.borrow(),
            vec![GestureKind::TouchEnd, GestureKind::Tap]
        );
    }

    #[test]
    fn forwarding_respects_registration_order() {
        let mut rec: Recognizer<Element, &'static str> = Recognizer::new(Element::default());
        rec.on(
            GestureKind::DoubleTap,
            handler(|el: &Element, _: &GestureEvent| {
                el.emitted.borrow_mut().push(GestureKind::Tap);
                Ok(())
            }),
        );
        forward(&mut rec, GestureKinds::DOUBLE_TAP);
        rec.on_start(Point::ZERO, Timestamp::ZERO).unwrap();
        rec.on_end(Point::ZERO, Timestamp::from_millis(10)).unwrap();
        rec.on_start(Point::ZERO, Timestamp::from_millis(100)).unwrap();
        rec.on_end(Point::ZERO, Timestamp::from_millis(110)).unwrap();
        assert_eq!(
            *rec.surface().emitted.borrow(),
            vec![GestureKind::Tap, GestureKind::DoubleTap]
        );
    }

    #[test]
    fn forwarder_can_be_removed() {
        let mut rec: Recognizer<Element, &'static str> = Recognizer::new(Element::default());
        let h = forward(&mut rec, GestureKinds::CLASSIFIED);
        assert_eq!(rec.handlers().registered_kinds(), GestureKinds::CLASSIFIED);
        for kind in GestureKinds::CLASSIFIED.kinds() {
            rec.off(kind, Some(&h));
        }
        assert!(rec.handlers().registered_kinds().is_empty());
    }

    #[test]
    fn sink_errors_propagate() {
        let el = Element {
            reject: Some(GestureKind::LongTap),
            ..Element::default()
        };
        let mut rec: Recognizer<Element, &'static str> = Recognizer::new(el);
        forward(&mut rec, GestureKinds::CLASSIFIED);
        rec.on_start(Point::ZERO, Timestamp::ZERO).unwrap();
        let err = rec.poll(Timestamp::from_millis(800)).unwrap_err();
        assert_eq!(err.into_handler_error(), Some("rejected"));
    }
}
