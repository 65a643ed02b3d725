// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by the recognizer.

/// Failure while feeding a signal to a [`Recognizer`](crate::recognizer::Recognizer)
/// or dispatching a gesture.
///
/// `E` is the error type returned by handlers.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error<E> {
    /// The recognizer was destroyed and no longer accepts signals.
    #[error("gesture recognizer has been destroyed")]
    Destroyed,
    /// A handler failed; handlers registered after it were not invoked.
    #[error("gesture handler failed")]
    Handler(#[source] E),
}

impl<E> Error<E> {
    /// The handler error, if this is one.
    pub fn into_handler_error(self) -> Option<E> {
        match self {
            Self::Handler(e) => Some(e),
            Self::Destroyed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn handler_error_keeps_source() {
        let err: Error<Boom> = Error::Handler(Boom);
        assert_eq!(err.to_string(), "gesture handler failed");
        let source = core::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("boom"));
        assert_eq!(err.into_handler_error(), Some(Boom));
    }

    #[test]
    fn destroyed_has_no_handler_error() {
        let err: Error<Boom> = Error::Destroyed;
        assert_eq!(err.into_handler_error(), None);
    }
}
