//! Reference seeking with a debounced single-trigger sensor.

use embedded_hal::delay::DelayNs;

use crate::alphabet::PositionIndex;
use crate::config::units::{Milliseconds, StepsPerSecond};
use crate::config::{ExhaustedPolicy, FlapConfig};
use crate::error::HomingError;
use crate::motion::RotorState;
use crate::motor::{MotionDriver, ReferenceSensor};

/// Phase of a homing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingPhase {
    /// Stepping and sampling the sensor.
    Seeking,
    /// A trigger survived the debounce re-check.
    Found,
    /// The safety budget ran out first.
    Exhausted,
}

/// How a homing request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingOutcome {
    /// Reference found after `steps` unit steps.
    Found {
        /// Steps issued while seeking.
        steps: u32,
    },
    /// Budget used up after `steps` unit steps.
    Exhausted {
        /// Steps issued while seeking.
        steps: u32,
        /// Whether the rotor was nonetheless declared homed.
        assumed_homed: bool,
    },
    /// Homing is disabled in the configuration.
    Skipped,
}

impl HomingOutcome {
    /// The warning to report for an exhausted run.
    pub fn error(&self) -> Option<HomingError> {
        match *self {
            HomingOutcome::Exhausted { steps, .. } => Some(HomingError::Exhausted { steps }),
            _ => None,
        }
    }
}

/// Drives the rotor one step at a time until the reference sensor fires.
#[derive(Debug, Clone, Copy)]
pub struct HomingController {
    reference_index: PositionIndex,
    homing_rate: StepsPerSecond,
    move_rate: StepsPerSecond,
    budget: u32,
    debounce: Milliseconds,
    step_sign: i64,
    on_exhausted: ExhaustedPolicy,
}

impl HomingController {
    /// Create a controller seeking towards `reference_index`.
    ///
    /// `step_sign` is the driver sign of one index-advancing unit step.
    pub fn new(reference_index: PositionIndex, budget: u32, step_sign: i64) -> Self {
        Self {
            reference_index,
            homing_rate: StepsPerSecond(150.0),
            move_rate: StepsPerSecond(500.0),
            budget,
            debounce: Milliseconds(5),
            step_sign: if step_sign < 0 { -1 } else { 1 },
            on_exhausted: ExhaustedPolicy::FailOpen,
        }
    }

    /// Create a controller from the display configuration.
    pub fn from_config(config: &FlapConfig, step_sign: i64) -> Self {
        Self::new(
            PositionIndex(config.reference_index),
            config.homing_budget,
            step_sign,
        )
        .rates(config.homing_rate, config.move_rate)
        .debounce(config.debounce)
        .on_exhausted(config.on_homing_exhausted)
    }

    /// Set the seeking rate and the rate restored afterwards.
    pub fn rates(mut self, homing: StepsPerSecond, moving: StepsPerSecond) -> Self {
        self.homing_rate = homing;
        self.move_rate = moving;
        self
    }

    /// Set how long a trigger must persist.
    pub fn debounce(mut self, debounce: Milliseconds) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the behavior for an exhausted budget.
    pub fn on_exhausted(mut self, policy: ExhaustedPolicy) -> Self {
        self.on_exhausted = policy;
        self
    }

    /// Face aligned with the sensor.
    #[inline]
    pub fn reference_index(&self) -> PositionIndex {
        self.reference_index
    }

    /// Maximum unit steps per run.
    #[inline]
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Seek the reference and reset `state` to it.
    ///
    /// Blocks until the trigger is confirmed or the budget is spent. The
    /// debounce re-check always happens, even on a zero budget.
    pub fn home<D, S, DL>(
        &self,
        state: &mut RotorState,
        driver: &mut D,
        sensor: &mut S,
        delay: &mut DL,
    ) -> HomingOutcome
    where
        D: MotionDriver,
        S: ReferenceSensor,
        DL: DelayNs,
    {
        driver.set_rate(self.homing_rate);

        let mut phase = HomingPhase::Seeking;
        let mut remaining = self.budget;
        let mut steps = 0u32;

        while phase == HomingPhase::Seeking {
            if sensor.is_triggered() {
                delay.delay_ms(self.debounce.0);
                if sensor.is_triggered() {
                    phase = HomingPhase::Found;
                    continue;
                }
            }

            if remaining == 0 {
                phase = HomingPhase::Exhausted;
                continue;
            }

            driver.step(self.step_sign);
            remaining -= 1;
            steps += 1;
        }

        let outcome = match phase {
            HomingPhase::Found => {
                info!("homing: reference after {} steps", steps);
                state.reset_to(self.reference_index, true);
                HomingOutcome::Found { steps }
            }
            _ => {
                let assumed_homed = self.on_exhausted == ExhaustedPolicy::FailOpen;
                warn!(
                    "homing: no trigger within {} steps, assumed homed: {}",
                    steps,
                    assumed_homed
                );
                if assumed_homed {
                    state.reset_to(self.reference_index, true);
                } else {
                    state.mark_unhomed();
                }
                HomingOutcome::Exhausted {
                    steps,
                    assumed_homed,
                }
            }
        };

        driver.set_rate(self.move_rate);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimClock, SimRotor};

    const SPR: u32 = 2048;

    fn controller(budget: u32) -> HomingController {
        HomingController::new(PositionIndex(0), budget, 1)
            .rates(StepsPerSecond(150.0), StepsPerSecond(500.0))
            .debounce(Milliseconds(5))
    }

    #[test]
    fn test_finds_reference_after_k_steps() {
        let rotor = SimRotor::new(SPR).with_reference_at(300);
        let clock = SimClock::new();
        let mut state = RotorState::unhomed(PositionIndex(17), 45);

        let outcome = controller(4096).home(
            &mut state,
            &mut rotor.driver(),
            &mut rotor.sensor(),
            &mut &clock,
        );

        assert_eq!(outcome, HomingOutcome::Found { steps: 300 });
        assert_eq!(state.index(), PositionIndex(0));
        assert_eq!(state.step_remainder(), 0.0);
        assert!(state.is_homed());
        assert_eq!(rotor.position(), 300);
        // Normal rate restored.
        assert_eq!(rotor.rate(), StepsPerSecond(500.0));
    }

    #[test]
    fn test_glitch_is_rejected() {
        let rotor = SimRotor::new(SPR)
            .with_reference_at(100)
            .with_glitch_at(40);
        let clock = SimClock::new();
        let mut state = RotorState::unhomed(PositionIndex(0), 45);

        let outcome = controller(4096).home(
            &mut state,
            &mut rotor.driver(),
            &mut rotor.sensor(),
            &mut &clock,
        );

        assert_eq!(outcome, HomingOutcome::Found { steps: 100 });
        // One debounce wait for the glitch, one for the real trigger.
        assert_eq!(clock.elapsed_ms(), 10);
    }

    #[test]
    fn test_budget_exhausted_fails_open() {
        let rotor = SimRotor::new(SPR);
        let clock = SimClock::new();
        let mut state = RotorState::unhomed(PositionIndex(9), 45);

        let outcome = controller(50).home(
            &mut state,
            &mut rotor.driver(),
            &mut rotor.sensor(),
            &mut &clock,
        );

        assert_eq!(
            outcome,
            HomingOutcome::Exhausted {
                steps: 50,
                assumed_homed: true
            }
        );
        assert_eq!(outcome.error(), Some(HomingError::Exhausted { steps: 50 }));
        assert_eq!(rotor.position(), 50);
        assert_eq!(state.index(), PositionIndex(0));
        assert!(state.is_homed());
    }

    #[test]
    fn test_budget_exhausted_stays_unhomed() {
        let rotor = SimRotor::new(SPR);
        let clock = SimClock::new();
        let mut state = RotorState::unhomed(PositionIndex(9), 45);

        let outcome = controller(50).on_exhausted(ExhaustedPolicy::StayUnhomed).home(
            &mut state,
            &mut rotor.driver(),
            &mut rotor.sensor(),
            &mut &clock,
        );

        assert_eq!(
            outcome,
            HomingOutcome::Exhausted {
                steps: 50,
                assumed_homed: false
            }
        );
        assert!(!state.is_homed());
    }

    #[test]
    fn test_debounce_with_zero_budget() {
        let rotor = SimRotor::new(SPR).with_reference_at(0);
        let clock = SimClock::new();
        let mut state = RotorState::unhomed(PositionIndex(3), 45);

        let outcome = controller(0).home(
            &mut state,
            &mut rotor.driver(),
            &mut rotor.sensor(),
            &mut &clock,
        );

        assert_eq!(outcome, HomingOutcome::Found { steps: 0 });
        assert_eq!(clock.elapsed_ms(), 5);
    }

    #[test]
    fn test_reverse_seeking() {
        let rotor = SimRotor::new(SPR).with_reference_at(SPR - 10);
        let clock = SimClock::new();
        let mut state = RotorState::unhomed(PositionIndex(3), 45);

        let outcome = HomingController::new(PositionIndex(0), 4096, -1).home(
            &mut state,
            &mut rotor.driver(),
            &mut rotor.sensor(),
            &mut &clock,
        );

        assert_eq!(outcome, HomingOutcome::Found { steps: 10 });
        assert_eq!(rotor.position(), -10);
    }
}
