//! Hardware seams: the motor driver and the reference sensor.

use crate::config::units::StepsPerSecond;

/// Something that turns the rotor.
///
/// Calls block until the steps have been issued. There is no
/// failure signal: a stalled motor is indistinguishable from a completed
/// move, and only homing restores absolute position.
pub trait MotionDriver {
    /// Advance by `count` steps; the sign selects the direction.
    fn step(&mut self, count: i64);

    /// Pulse rate for subsequent [`MotionDriver::step`] calls.
    fn set_rate(&mut self, rate: StepsPerSecond);

    /// Energize the coils before motion.
    fn enable(&mut self) {}

    /// De-energize the coils when idle.
    fn disable(&mut self) {}
}

impl<T: MotionDriver + ?Sized> MotionDriver for &mut T {
    fn step(&mut self, count: i64) {
        (**self).step(count)
    }

    fn set_rate(&mut self, rate: StepsPerSecond) {
        (**self).set_rate(rate)
    }

    fn enable(&mut self) {
        (**self).enable()
    }

    fn disable(&mut self) {
        (**self).disable()
    }
}

/// Binary reference sensor aligned with one face of the rotor.
pub trait ReferenceSensor {
    /// Sample the sensor.
    fn is_triggered(&mut self) -> bool;
}

impl<T: ReferenceSensor + ?Sized> ReferenceSensor for &mut T {
    fn is_triggered(&mut self) -> bool {
        (**self).is_triggered()
    }
}
