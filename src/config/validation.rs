//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::FlapConfig;

/// Validate a display configuration.
///
/// Checks:
/// - The motion settings pass [`validate_motion`]
/// - The alphabet builds
/// - The reference index addresses a face of that alphabet
pub fn validate_config(config: &FlapConfig) -> Result<()> {
    validate_motion(config)?;

    let alphabet = config.alphabet.build()?;
    if config.reference_index >= alphabet.len() {
        return Err(Error::Config(ConfigError::InvalidReferenceIndex {
            index: config.reference_index,
            size: alphabet.len(),
        }));
    }

    Ok(())
}

/// Validate the numeric motion settings, ignoring the alphabet.
///
/// Steps per revolution, both rates and the homing budget must be positive.
pub fn validate_motion(config: &FlapConfig) -> Result<()> {
    if config.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    for rate in [config.move_rate, config.homing_rate] {
        if rate.0.is_nan() || rate.0 <= 0.0 {
            return Err(Error::Config(ConfigError::InvalidRate(rate.0)));
        }
    }

    if config.homing_budget == 0 {
        return Err(Error::Config(ConfigError::ZeroHomingBudget));
    }

    Ok(())
}
