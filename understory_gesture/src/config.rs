// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizer thresholds and timing windows.
//!
//! A [`GestureConfig`] is owned by each [`Recognizer`](crate::recognizer::Recognizer).
//! Update it in place with a [`ConfigPatch`]: fields left as `None` keep their current value.
//!
//! ```
//! use core::time::Duration;
//! use understory_gesture::config::{ConfigPatch, GestureConfig};
//!
//! let mut config = GestureConfig::default();
//! config.merge(&ConfigPatch::new().tap_interval(Duration::from_millis(250)));
//! assert_eq!(config.tap_interval, Duration::from_millis(250));
//! assert_eq!(config.distance_threshold, 30.0);
//! ```

use core::time::Duration;

/// Thresholds used to classify a contact.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Movement beyond this, on either axis, disqualifies tap and long tap and makes a swipe.
    ///
    /// Also bounds the distance between two starts of a double tap.
    pub distance_threshold: f64,
    /// How long a contact must be held to fire a long tap.
    pub long_tap_interval: Duration,
    /// Maximum gap between two starts of a double tap, and the delay before a
    /// solitary tap is dispatched.
    pub tap_interval: Duration,
}

impl GestureConfig {
    /// Default distance threshold, in position units.
    pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 30.0;
    /// Default long tap interval.
    pub const DEFAULT_LONG_TAP_INTERVAL: Duration = Duration::from_millis(800);
    /// Default tap interval.
    pub const DEFAULT_TAP_INTERVAL: Duration = Duration::from_millis(300);

    /// Apply every field set in `patch`, keeping the rest.
    pub fn merge(&mut self, patch: &ConfigPatch) {
        if let Some(v) = patch.distance_threshold {
            self.distance_threshold = v;
        }
        if let Some(v) = patch.long_tap_interval {
            self.long_tap_interval = v;
        }
        if let Some(v) = patch.tap_interval {
            self.tap_interval = v;
        }
    }

    /// Return a copy with `patch` applied.
    #[must_use]
    pub fn merged(mut self, patch: &ConfigPatch) -> Self {
        self.merge(patch);
        self
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            distance_threshold: Self::DEFAULT_DISTANCE_THRESHOLD,
            long_tap_interval: Self::DEFAULT_LONG_TAP_INTERVAL,
            tap_interval: Self::DEFAULT_TAP_INTERVAL,
        }
    }
}

/// A partial [`GestureConfig`] used for shallow merges.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConfigPatch {
    /// Replacement for [`GestureConfig::distance_threshold`].
    pub distance_threshold: Option<f64>,
    /// Replacement for [`GestureConfig::long_tap_interval`].
    pub long_tap_interval: Option<Duration>,
    /// Replacement for [`GestureConfig::tap_interval`].
    pub tap_interval: Option<Duration>,
}

impl ConfigPatch {
    /// An empty patch; merging it changes nothing.
    pub const fn new() -> Self {
        Self {
            distance_threshold: None,
            long_tap_interval: None,
            tap_interval: None,
        }
    }

    /// Set the distance threshold.
    #[must_use]
    pub const fn distance_threshold(mut self, v: f64) -> Self {
        self.distance_threshold = Some(v);
        self
    }

    /// Set the long tap interval.
    #[must_use]
    pub const fn long_tap_interval(mut self, v: Duration) -> Self {
        self.long_tap_interval = Some(v);
        self
    }

    /// Set the tap interval.
    #[must_use]
    pub const fn tap_interval(mut self, v: Duration) -> Self {
        self.tap_interval = Some(v);
        self
    }

    /// Whether merging this patch would be a no-op.
    pub const fn is_empty(&self) -> bool {
        self.distance_threshold.is_none()
            && self.long_tap_interval.is_none()
            && self.tap_interval.is_none()
    }
}

impl From<GestureConfig> for ConfigPatch {
    fn from(config: GestureConfig) -> Self {
        Self {
            distance_threshold: Some(config.distance_threshold),
            long_tap_interval: Some(config.long_tap_interval),
            tap_interval: Some(config.tap_interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = GestureConfig::default();
        assert_eq!(c.distance_threshold, 30.0);
        assert_eq!(c.long_tap_interval, Duration::from_millis(800));
        assert_eq!(c.tap_interval, Duration::from_millis(300));
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let before = GestureConfig {
            distance_threshold: 12.5,
            ..GestureConfig::default()
        };
        let patch = ConfigPatch::new();
        assert!(patch.is_empty());
        assert_eq!(before.merged(&patch), before);
    }

    #[test]
    fn merge_is_shallow() {
        let mut c = GestureConfig::default();
        c.merge(&ConfigPatch::new().distance_threshold(10.0));
        c.merge(&ConfigPatch::new().long_tap_interval(Duration::from_millis(500)));
        assert_eq!(c.distance_threshold, 10.0);
        assert_eq!(c.long_tap_interval, Duration::from_millis(500));
        assert_eq!(c.tap_interval, GestureConfig::DEFAULT_TAP_INTERVAL);
    }

    #[test]
    fn full_patch_replaces_everything() {
        let target = GestureConfig {
            distance_threshold: 4.0,
            long_tap_interval: Duration::from_millis(1000),
            tap_interval: Duration::from_millis(200),
        };
        assert_eq!(GestureConfig::default().merged(&target.into()), target);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn patch_deserializes_with_missing_fields() {
        let patch: ConfigPatch =
            serde_json::from_str(r#"{ "distance_threshold": 8.0 }"#).unwrap();
        assert_eq!(patch, ConfigPatch::new().distance_threshold(8.0));

        let config: GestureConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GestureConfig::default());
    }
}
