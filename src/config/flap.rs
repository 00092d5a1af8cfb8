//! Display configuration - root configuration structure.

use serde::Deserialize;

use crate::motion::DirectionPolicy;

use super::alphabet::AlphabetConfig;
use super::units::{Milliseconds, StepsPerSecond};

/// What to do when homing runs out of steps without seeing the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum ExhaustedPolicy {
    /// Warn and treat the current physical position as the reference.
    #[default]
    FailOpen,
    /// Stay unhomed and refuse motion until a homing run finds the reference.
    StayUnhomed,
}

/// Root configuration structure from TOML.
///
/// Every field has a default matching a 28BYJ-48 geared stepper driving a
/// 45-face German flap set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlapConfig {
    /// Motor steps for one full rotor revolution.
    pub steps_per_revolution: u32,

    /// Rotation sense used for every move.
    pub direction: DirectionPolicy,

    /// Invert the sign of every step count sent to the driver.
    pub invert_direction: bool,

    /// Face aligned with the reference sensor.
    pub reference_index: u16,

    /// Pulse rate for normal moves.
    #[serde(rename = "move_rate_steps_per_sec")]
    pub move_rate: StepsPerSecond,

    /// Pulse rate while seeking the reference.
    #[serde(rename = "homing_rate_steps_per_sec")]
    pub homing_rate: StepsPerSecond,

    /// Maximum steps issued while seeking before giving up.
    #[serde(rename = "homing_budget_steps")]
    pub homing_budget: u32,

    /// How long a trigger must persist to be accepted.
    #[serde(rename = "debounce_ms")]
    pub debounce: Milliseconds,

    /// Pause between moves of the sweep self-tests.
    #[serde(rename = "settle_ms")]
    pub settle: Milliseconds,

    /// Run homing on request; when false homing is skipped.
    pub homing_enabled: bool,

    /// Behavior when the homing budget is used up.
    pub on_homing_exhausted: ExhaustedPolicy,

    /// De-energize the coils between moves.
    pub release_when_idle: bool,

    /// Flap set.
    pub alphabet: AlphabetConfig,
}

impl Default for FlapConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: 2048,
            direction: DirectionPolicy::Forward,
            invert_direction: false,
            reference_index: 0,
            move_rate: StepsPerSecond(500.0),
            homing_rate: StepsPerSecond(150.0),
            homing_budget: 4096,
            debounce: Milliseconds(5),
            settle: Milliseconds(250),
            homing_enabled: true,
            on_homing_exhausted: ExhaustedPolicy::FailOpen,
            release_when_idle: true,
            alphabet: AlphabetConfig::default(),
        }
    }
}
