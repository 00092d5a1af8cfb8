//! In-memory rotor for tests and bench demos.
//!
//! [`SimRotor`] counts steps instead of pulsing coils and derives the
//! reference sensor from its own position, so homing can be exercised
//! deterministically. [`SimClock`] accumulates requested delays without
//! sleeping.

use core::cell::Cell;

use embedded_hal::delay::DelayNs;

use crate::config::units::StepsPerSecond;
use crate::motor::{MotionDriver, ReferenceSensor};

/// Simulated rotor with an optional reference mark.
#[derive(Debug)]
pub struct SimRotor {
    position: Cell<i64>,
    steps_per_revolution: u32,
    reference: Option<u32>,
    glitch: Cell<Option<i64>>,
    rate: Cell<StepsPerSecond>,
    enabled: Cell<bool>,
    step_calls: Cell<u32>,
}

impl SimRotor {
    /// Rotor with no reference mark, starting at step 0.
    pub fn new(steps_per_revolution: u32) -> Self {
        Self {
            position: Cell::new(0),
            steps_per_revolution: steps_per_revolution.max(1),
            reference: None,
            glitch: Cell::new(None),
            rate: Cell::new(StepsPerSecond(0.0)),
            enabled: Cell::new(false),
            step_calls: Cell::new(0),
        }
    }

    /// Put the reference mark `offset` steps into every revolution.
    pub fn with_reference_at(mut self, offset: u32) -> Self {
        self.reference = Some(offset % self.steps_per_revolution);
        self
    }

    /// Make the sensor read triggered once when the rotor is at `position`.
    pub fn with_glitch_at(self, position: i64) -> Self {
        self.glitch.set(Some(position));
        self
    }

    /// Driver handle.
    pub fn driver(&self) -> SimDriver<'_> {
        SimDriver(self)
    }

    /// Sensor handle.
    pub fn sensor(&self) -> SimSensor<'_> {
        SimSensor(self)
    }

    /// Absolute position in steps.
    pub fn position(&self) -> i64 {
        self.position.get()
    }

    /// Steps per revolution.
    pub fn steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution
    }

    /// Last rate set by the controller.
    pub fn rate(&self) -> StepsPerSecond {
        self.rate.get()
    }

    /// Whether the coils are energized.
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Number of `step` calls, zero-count calls included.
    pub fn step_calls(&self) -> u32 {
        self.step_calls.get()
    }

    fn at_reference(&self) -> bool {
        let position = self.position.get();
        if self.glitch.get() == Some(position) {
            self.glitch.set(None);
            return true;
        }
        match self.reference {
            Some(offset) => {
                position.rem_euclid(i64::from(self.steps_per_revolution)) == i64::from(offset)
            }
            None => false,
        }
    }
}

/// [`MotionDriver`] view of a [`SimRotor`].
#[derive(Debug, Clone, Copy)]
pub struct SimDriver<'a>(&'a SimRotor);

impl MotionDriver for SimDriver<'_> {
    fn step(&mut self, count: i64) {
        let rotor = self.0;
        rotor.position.set(rotor.position.get() + count);
        rotor.step_calls.set(rotor.step_calls.get() + 1);
    }

    fn set_rate(&mut self, rate: StepsPerSecond) {
        self.0.rate.set(rate);
    }

    fn enable(&mut self) {
        self.0.enabled.set(true);
    }

    fn disable(&mut self) {
        self.0.enabled.set(false);
    }
}

/// [`ReferenceSensor`] view of a [`SimRotor`].
#[derive(Debug, Clone, Copy)]
pub struct SimSensor<'a>(&'a SimRotor);

impl ReferenceSensor for SimSensor<'_> {
    fn is_triggered(&mut self) -> bool {
        self.0.at_reference()
    }
}

/// Delay provider that only keeps count.
#[derive(Debug, Default)]
pub struct SimClock {
    elapsed_ns: Cell<u64>,
}

impl SimClock {
    /// Clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requested delay in nanoseconds.
    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns.get()
    }

    /// Total requested delay in whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns.get() / 1_000_000
    }
}

impl DelayNs for &SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns.set(self.elapsed_ns.get() + u64::from(ns));
    }
}
