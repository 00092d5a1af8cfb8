//! Unit types for physical quantities.
//!
//! Keeps step rates and wait times apart at the type level so a rate is never
//! passed where a delay is expected.

use serde::Deserialize;

/// Step pulse rate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct StepsPerSecond(pub f32);

impl StepsPerSecond {
    /// Create a new StepsPerSecond value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Interval between step pulses in nanoseconds.
    ///
    /// Non-positive rates map to `u32::MAX`.
    #[inline]
    pub fn interval_ns(self) -> u32 {
        if self.0 > 0.0 {
            let ns = 1_000_000_000.0 / self.0;
            if ns >= u32::MAX as f32 {
                u32::MAX
            } else {
                ns as u32
            }
        } else {
            u32::MAX
        }
    }
}

/// Wait time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Milliseconds(pub u32);

impl Milliseconds {
    /// Create a new Milliseconds value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}
