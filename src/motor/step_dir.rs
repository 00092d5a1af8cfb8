//! STEP/DIR driver adapter.
//!
//! Generic over embedded-hal 1.0 pin types. Suits A4988/DRV8825/TMC-style
//! driver boards.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::config::units::StepsPerSecond;
use crate::motion::Direction;

use super::adapter::MotionDriver;

/// STEP pulse width in nanoseconds.
const PULSE_WIDTH_NS: u32 = 2_000;

/// Stand-in for a hard-wired EN input; every write succeeds and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnablePin;

impl ErrorType for NoEnablePin {
    type Error = Infallible;
}

impl OutputPin for NoEnablePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Stepper driver controlled through a STEP and a DIR pin, plus an
/// optional EN pin.
///
/// Pin errors cannot be reported through [`MotionDriver`]. The first one
/// aborts the current call and latches [`StepDirDriver::has_fault`].
pub struct StepDirDriver<STEP, DIR, DELAY, EN = NoEnablePin>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
    EN: OutputPin,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// DIR pin (high = CW, low = CCW, or inverted).
    dir_pin: DIR,

    /// EN pin powering the coils.
    enable_pin: EN,

    /// EN is asserted low (A4988, DRV8825).
    enable_active_low: bool,

    /// Delay provider for step timing.
    delay: DELAY,

    /// Time between step pulses.
    interval_ns: u32,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Set once a pin operation failed.
    fault: bool,
}

impl<STEP, DIR, DELAY> StepDirDriver<STEP, DIR, DELAY, NoEnablePin>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// Create a driver pulsing at `rate`, with EN hard-wired.
    pub fn new(step_pin: STEP, dir_pin: DIR, delay: DELAY, rate: StepsPerSecond) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin: NoEnablePin,
            enable_active_low: true,
            delay,
            interval_ns: rate.interval_ns(),
            current_direction: None,
            invert_direction: false,
            fault: false,
        }
    }

    /// Drive the board's EN input from `pin`, so the coils can be released
    /// between moves.
    pub fn with_enable_pin<E: OutputPin>(
        self,
        pin: E,
        active_low: bool,
    ) -> StepDirDriver<STEP, DIR, DELAY, E> {
        StepDirDriver {
            step_pin: self.step_pin,
            dir_pin: self.dir_pin,
            enable_pin: pin,
            enable_active_low: active_low,
            delay: self.delay,
            interval_ns: self.interval_ns,
            current_direction: self.current_direction,
            invert_direction: self.invert_direction,
            fault: self.fault,
        }
    }
}

impl<STEP, DIR, DELAY, EN> StepDirDriver<STEP, DIR, DELAY, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
    EN: OutputPin,
{
    /// Invert the DIR pin logic.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Whether a pin operation has failed since the last [`StepDirDriver::clear_fault`].
    #[inline]
    pub fn has_fault(&self) -> bool {
        self.fault
    }

    /// Clear the latched fault.
    pub fn clear_fault(&mut self) {
        self.fault = false;
    }

    /// Current step interval in nanoseconds.
    #[inline]
    pub fn interval_ns(&self) -> u32 {
        self.interval_ns
    }

    /// Give the pins and delay back.
    pub fn release(self) -> (STEP, DIR, DELAY, EN) {
        (self.step_pin, self.dir_pin, self.delay, self.enable_pin)
    }

    fn set_direction(&mut self, direction: Direction) -> core::result::Result<(), ()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Clockwise => !self.invert_direction,
            Direction::CounterClockwise => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| ())?;
        } else {
            self.dir_pin.set_low().map_err(|_| ())?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    fn set_enabled(&mut self, on: bool) {
        let result = if on != self.enable_active_low {
            self.enable_pin.set_high()
        } else {
            self.enable_pin.set_low()
        };
        if result.is_err() {
            self.fault = true;
        }
    }

    fn pulse(&mut self) -> core::result::Result<(), ()> {
        self.step_pin.set_high().map_err(|_| ())?;
        self.delay.delay_ns(PULSE_WIDTH_NS);
        self.step_pin.set_low().map_err(|_| ())?;
        self.delay
            .delay_ns(self.interval_ns.saturating_sub(PULSE_WIDTH_NS));
        Ok(())
    }
}

impl<STEP, DIR, DELAY, EN> MotionDriver for StepDirDriver<STEP, DIR, DELAY, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
    EN: OutputPin,
{
    fn step(&mut self, count: i64) {
        if count == 0 {
            return;
        }

        if self.set_direction(Direction::from_steps(count)).is_err() {
            self.fault = true;
            return;
        }

        for _ in 0..count.unsigned_abs() {
            if self.pulse().is_err() {
                self.fault = true;
                return;
            }
        }
    }

    fn set_rate(&mut self, rate: StepsPerSecond) {
        self.interval_ns = rate.interval_ns();
    }

    fn enable(&mut self) {
        self.set_enabled(true);
    }

    fn disable(&mut self) {
        self.set_enabled(false);
    }
}
