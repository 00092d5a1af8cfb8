//! Builder pattern for SplitFlap.

use embedded_hal::delay::DelayNs;

use crate::alphabet::Alphabet;
use crate::config::{validate_config, validate_motion, FlapConfig};
use crate::error::{ConfigError, Error, Result};
use crate::homing::HomingController;
use crate::motion::PositionTracker;
use crate::motor::{MotionDriver, ReferenceSensor};

use super::flap::{Parts, SplitFlap};

/// Builder for creating SplitFlap instances.
pub struct SplitFlapBuilder<D, S, DL>
where
    D: MotionDriver,
    S: ReferenceSensor,
    DL: DelayNs,
{
    driver: Option<D>,
    sensor: Option<S>,
    delay: Option<DL>,
    config: FlapConfig,
    alphabet: Option<Alphabet>,
}

impl<D, S, DL> Default for SplitFlapBuilder<D, S, DL>
where
    D: MotionDriver,
    S: ReferenceSensor,
    DL: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D, S, DL> SplitFlapBuilder<D, S, DL>
where
    D: MotionDriver,
    S: ReferenceSensor,
    DL: DelayNs,
{
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            driver: None,
            sensor: None,
            delay: None,
            config: FlapConfig::default(),
            alphabet: None,
        }
    }

    /// Set the motor driver.
    pub fn driver(mut self, driver: D) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Set the reference sensor.
    pub fn sensor(mut self, sensor: S) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DL) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Configure from a FlapConfig.
    pub fn config(mut self, config: FlapConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an already built alphabet instead of the configured one.
    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Build the SplitFlap.
    ///
    /// # Errors
    ///
    /// Returns an error if a hardware part is missing or the configuration
    /// does not validate.
    pub fn build(self) -> Result<SplitFlap<D, S, DL>> {
        let driver = self
            .driver
            .ok_or(Error::Config(ConfigError::MissingComponent("driver")))?;
        let sensor = self
            .sensor
            .ok_or(Error::Config(ConfigError::MissingComponent("sensor")))?;
        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingComponent("delay")))?;

        let config = self.config;
        let alphabet = match self.alphabet {
            Some(alphabet) => {
                validate_motion(&config)?;
                if config.reference_index >= alphabet.len() {
                    return Err(Error::Config(ConfigError::InvalidReferenceIndex {
                        index: config.reference_index,
                        size: alphabet.len(),
                    }));
                }
                alphabet
            }
            None => {
                validate_config(&config)?;
                config.alphabet.build()?
            }
        };

        let tracker = PositionTracker::new(
            config.steps_per_revolution,
            alphabet.len(),
            config.direction,
        )
        .with_inverted_direction(config.invert_direction);
        let homing = HomingController::from_config(&config, tracker.advance_sign());

        Ok(SplitFlap::from_parts(Parts {
            alphabet,
            tracker,
            homing,
            driver,
            sensor,
            delay,
            move_rate: config.move_rate,
            settle: config.settle,
            homing_enabled: config.homing_enabled,
            release_when_idle: config.release_when_idle,
            on_exhausted: config.on_homing_exhausted,
        }))
    }
}
