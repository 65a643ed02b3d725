// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the recognizer: gesture kinds, timestamps, raw signals, and dispatch payloads.
//!
//! ## Overview
//!
//! These types describe what flows into the [`Recognizer`](crate::recognizer::Recognizer)
//! (raw [`TouchSignal`]s) and what flows out of it ([`GestureEvent`]s keyed by [`GestureKind`]).

use core::fmt;
use core::ops::Add;
use core::str::FromStr;
use core::time::Duration;

use kurbo::Point;

/// The closed set of gesture kinds handlers may be registered against.
///
/// Raw kinds ([`TouchStart`](Self::TouchStart), [`TouchMove`](Self::TouchMove),
/// [`TouchEnd`](Self::TouchEnd)) are passed through as they arrive. The remaining
/// kinds are classified by the recognizer.
///
/// [`Pinch`](Self::Pinch) and [`Rotate`](Self::Rotate) are accepted as registration
/// targets but are never dispatched: the recognizer tracks a single contact only.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GestureKind {
    /// Raw contact start.
    TouchStart,
    /// Raw contact move.
    TouchMove,
    /// Raw contact end.
    TouchEnd,
    /// A short contact without movement, not followed by a second one.
    Tap,
    /// A contact held without movement for the long tap interval.
    LongTap,
    /// Two taps close together in time and space.
    DoubleTap,
    /// Any swipe; dispatched after the directional swipe.
    Swipe,
    /// Swipe with a dominant leftward movement.
    SwipeLeft,
    /// Swipe with a dominant rightward movement.
    SwipeRight,
    /// Swipe with a dominant upward movement.
    SwipeUp,
    /// Swipe with a dominant downward movement.
    SwipeDown,
    /// Two-contact pinch. Never dispatched.
    Pinch,
    /// Two-contact rotation. Never dispatched.
    Rotate,
}

impl GestureKind {
    /// Number of gesture kinds.
    pub const COUNT: usize = 13;

    /// Every gesture kind, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::TouchStart,
        Self::TouchMove,
        Self::TouchEnd,
        Self::Tap,
        Self::LongTap,
        Self::DoubleTap,
        Self::Swipe,
        Self::SwipeLeft,
        Self::SwipeRight,
        Self::SwipeUp,
        Self::SwipeDown,
        Self::Pinch,
        Self::Rotate,
    ];

    /// Dense index of this kind, in `0..COUNT`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical lowercase name, e.g. `"swipeleft"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::Tap => "tap",
            Self::LongTap => "longtap",
            Self::DoubleTap => "doubletap",
            Self::Swipe => "swipe",
            Self::SwipeLeft => "swipeleft",
            Self::SwipeRight => "swiperight",
            Self::SwipeUp => "swipeup",
            Self::SwipeDown => "swipedown",
            Self::Pinch => "pinch",
            Self::Rotate => "rotate",
        }
    }

    /// Look up a kind by its canonical name.
    ///
    /// Returns `None` for names outside the vocabulary.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Whether this kind is a raw pass-through signal.
    pub const fn is_raw(self) -> bool {
        matches!(self, Self::TouchStart | Self::TouchMove | Self::TouchEnd)
    }

    /// The single-bit set containing this kind.
    pub const fn flag(self) -> GestureKinds {
        GestureKinds::from_bits_truncate(1 << self.index())
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing a name outside the gesture vocabulary.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown gesture kind")]
pub struct UnknownGestureKind;

impl FromStr for GestureKind {
    type Err = UnknownGestureKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(UnknownGestureKind)
    }
}

bitflags::bitflags! {
    /// A set of [`GestureKind`]s.
    ///
    /// Bit `i` corresponds to the kind with [`GestureKind::index`] `i`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GestureKinds: u16 {
        /// [`GestureKind::TouchStart`].
        const TOUCH_START = 1 << 0;
        /// [`GestureKind::TouchMove`].
        const TOUCH_MOVE  = 1 << 1;
        /// [`GestureKind::TouchEnd`].
        const TOUCH_END   = 1 << 2;
        /// [`GestureKind::Tap`].
        const TAP         = 1 << 3;
        /// [`GestureKind::LongTap`].
        const LONG_TAP    = 1 << 4;
        /// [`GestureKind::DoubleTap`].
        const DOUBLE_TAP  = 1 << 5;
        /// [`GestureKind::Swipe`].
        const SWIPE       = 1 << 6;
        /// [`GestureKind::SwipeLeft`].
        const SWIPE_LEFT  = 1 << 7;
        /// [`GestureKind::SwipeRight`].
        const SWIPE_RIGHT = 1 << 8;
        /// [`GestureKind::SwipeUp`].
        const SWIPE_UP    = 1 << 9;
        /// [`GestureKind::SwipeDown`].
        const SWIPE_DOWN  = 1 << 10;
        /// [`GestureKind::Pinch`].
        const PINCH       = 1 << 11;
        /// [`GestureKind::Rotate`].
        const ROTATE      = 1 << 12;

        /// Raw pass-through signals.
        const RAW = Self::TOUCH_START.bits() | Self::TOUCH_MOVE.bits() | Self::TOUCH_END.bits();
        /// All swipe kinds, directional and generic.
        const SWIPES = Self::SWIPE.bits()
            | Self::SWIPE_LEFT.bits()
            | Self::SWIPE_RIGHT.bits()
            | Self::SWIPE_UP.bits()
            | Self::SWIPE_DOWN.bits();
        /// Everything that is not a raw signal.
        const CLASSIFIED = Self::TAP.bits()
            | Self::LONG_TAP.bits()
            | Self::DOUBLE_TAP.bits()
            | Self::SWIPES.bits()
            | Self::PINCH.bits()
            | Self::ROTATE.bits();
    }
}

impl GestureKinds {
    /// Whether `kind` is a member of this set.
    #[inline]
    pub const fn has(self, kind: GestureKind) -> bool {
        self.contains(kind.flag())
    }

    /// Iterate the member kinds in declaration order.
    pub fn kinds(self) -> impl Iterator<Item = GestureKind> {
        GestureKind::ALL.into_iter().filter(move |k| self.has(*k))
    }
}

impl From<GestureKind> for GestureKinds {
    fn from(kind: GestureKind) -> Self {
        kind.flag()
    }
}

/// Direction of a recognized swipe.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipeDirection {
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
}

impl SwipeDirection {
    /// The directional gesture kind dispatched for this direction.
    pub const fn kind(self) -> GestureKind {
        match self {
            Self::Left => GestureKind::SwipeLeft,
            Self::Right => GestureKind::SwipeRight,
            Self::Up => GestureKind::SwipeUp,
            Self::Down => GestureKind::SwipeDown,
        }
    }
}

/// A point in time on the host clock, measured from an arbitrary epoch.
///
/// The recognizer only ever compares timestamps with each other, so any
/// monotonic clock works as long as every signal and every
/// [`poll`](crate::recognizer::Recognizer::poll) uses the same one.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(Duration);

impl Timestamp {
    /// The clock epoch.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Timestamp `since_epoch` after the clock epoch.
    pub const fn new(since_epoch: Duration) -> Self {
        Self(since_epoch)
    }

    /// Timestamp `ms` milliseconds after the clock epoch.
    pub const fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    /// Time elapsed since the clock epoch.
    pub const fn since_epoch(self) -> Duration {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, or zero if `earlier` is later.
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs))
    }
}

/// Phase of a raw contact signal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TouchPhase {
    /// The contact touched down.
    Start,
    /// The contact moved.
    Move,
    /// The contact lifted.
    End,
}

impl TouchPhase {
    /// The pass-through gesture kind for this phase.
    pub const fn kind(self) -> GestureKind {
        match self {
            Self::Start => GestureKind::TouchStart,
            Self::Move => GestureKind::TouchMove,
            Self::End => GestureKind::TouchEnd,
        }
    }
}

/// A raw contact sample delivered by the input source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSignal {
    /// Start, move or end.
    pub phase: TouchPhase,
    /// Contact position in surface coordinates.
    pub position: Point,
    /// When the sample was taken.
    pub time: Timestamp,
}

impl TouchSignal {
    /// A start sample.
    pub const fn start(position: Point, time: Timestamp) -> Self {
        Self {
            phase: TouchPhase::Start,
            position,
            time,
        }
    }

    /// A move sample.
    pub const fn moved(position: Point, time: Timestamp) -> Self {
        Self {
            phase: TouchPhase::Move,
            position,
            time,
        }
    }

    /// An end sample.
    pub const fn end(position: Point, time: Timestamp) -> Self {
        Self {
            phase: TouchPhase::End,
            position,
            time,
        }
    }
}

/// Payload handed to every handler.
///
/// Raw and immediate kinds carry the signal that triggered them. Delayed kinds
/// carry the signal captured when their timer was scheduled: the start for
/// [`LongTap`](GestureKind::LongTap), the end for [`Tap`](GestureKind::Tap).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureEvent {
    /// Which gesture this is.
    pub kind: GestureKind,
    /// Position of the triggering signal.
    pub position: Point,
    /// Time of the triggering signal.
    pub time: Timestamp,
    /// Set for swipe kinds only.
    pub direction: Option<SwipeDirection>,
}

impl GestureEvent {
    /// A payload without a swipe direction.
    pub const fn new(kind: GestureKind, position: Point, time: Timestamp) -> Self {
        Self {
            kind,
            position,
            time,
            direction: None,
        }
    }

    /// The same payload relabelled as `kind`.
    pub const fn with_kind(self, kind: GestureKind) -> Self {
        Self { kind, ..self }
    }
}
