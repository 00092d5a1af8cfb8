//! Reference sensor on a GPIO input.

use embedded_hal::digital::InputPin;

use super::adapter::ReferenceSensor;

/// Hall or optical sensor read from an input pin.
///
/// A read error counts as "not triggered", so a flaky pin can only make
/// homing take longer, never accept a false reference.
pub struct PinSensor<PIN: InputPin> {
    pin: PIN,
    active_low: bool,
}

impl<PIN: InputPin> PinSensor<PIN> {
    /// Sensor that pulls the line low when triggered (A3144 and most open-collector parts).
    pub fn active_low(pin: PIN) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    /// Sensor that drives the line high when triggered.
    pub fn active_high(pin: PIN) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }

    /// Give the pin back.
    pub fn release(self) -> PIN {
        self.pin
    }
}

impl<PIN: InputPin> ReferenceSensor for PinSensor<PIN> {
    fn is_triggered(&mut self) -> bool {
        let level = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };
        level.unwrap_or(false)
    }
}
