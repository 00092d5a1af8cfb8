//! Rotor position tracking with fractional step carry.
//!
//! A rotor of `N` faces driven by a motor with `S` steps per revolution needs
//! `S / N` steps per face, which is rarely an integer. Each move rounds to
//! whole steps and carries the rounding error into the next move, so the
//! rotor never drifts by more than half a step however long it runs.
//!
//! The carried error is kept as an exact integer numerator over `N`.

use crate::alphabet::PositionIndex;
use crate::motor::MotionDriver;

use super::direction::DirectionPolicy;

/// Mutable rotor state: which face is showing and the step debt owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotorState {
    index: PositionIndex,
    /// Fractional step remainder, in units of `1 / positions` steps.
    remainder: i64,
    positions: u16,
    homed: bool,
}

impl RotorState {
    /// State of a rotor that has not been homed, assumed to show `index`.
    pub fn unhomed(index: PositionIndex, positions: u16) -> Self {
        let positions = positions.max(1);
        Self {
            index: PositionIndex(index.0 % positions),
            remainder: 0,
            positions,
            homed: false,
        }
    }

    /// Face currently showing.
    #[inline]
    pub fn index(&self) -> PositionIndex {
        self.index
    }

    /// Number of faces on the rotor.
    #[inline]
    pub fn positions(&self) -> u16 {
        self.positions
    }

    /// Fractional steps owed from previous moves, always within `[-0.5, 0.5]`.
    #[inline]
    pub fn step_remainder(&self) -> f32 {
        self.remainder as f32 / f32::from(self.positions)
    }

    /// Whether a homing run has established the index.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.homed
    }

    /// Place the rotor at a known face with no step debt.
    pub(crate) fn reset_to(&mut self, index: PositionIndex, homed: bool) {
        self.index = PositionIndex(index.0 % self.positions);
        self.remainder = 0;
        self.homed = homed;
    }

    /// Forget that the rotor was homed; the index is no longer trusted.
    pub(crate) fn mark_unhomed(&mut self) {
        self.homed = false;
    }
}

/// A computed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Move {
    /// Face the move ends on.
    pub target: PositionIndex,
    /// Index delta; non-negative for the unidirectional policies.
    pub delta: i32,
    /// Signed step count handed to the driver.
    pub steps: i64,
    remainder: i64,
}

impl Move {
    /// Whether the move issues no steps at all.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.delta == 0
    }
}

/// Converts index targets into motor step counts.
#[derive(Debug, Clone, Copy)]
pub struct PositionTracker {
    steps_per_revolution: u32,
    positions: u16,
    policy: DirectionPolicy,
    invert_direction: bool,
}

impl PositionTracker {
    /// Create a tracker for a rotor of `positions` faces.
    pub fn new(steps_per_revolution: u32, positions: u16, policy: DirectionPolicy) -> Self {
        Self {
            steps_per_revolution,
            positions: positions.max(1),
            policy,
            invert_direction: false,
        }
    }

    /// Flip the sign of every step count sent to the driver.
    pub fn with_inverted_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Direction policy in use.
    #[inline]
    pub fn policy(&self) -> DirectionPolicy {
        self.policy
    }

    /// Number of faces on the rotor.
    #[inline]
    pub fn positions(&self) -> u16 {
        self.positions
    }

    /// Motor steps per full rotor revolution.
    #[inline]
    pub fn steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution
    }

    /// Sign applied to steps that advance the index.
    #[inline]
    pub fn advance_sign(&self) -> i64 {
        let sign = self.policy.advance_direction().sign();
        if self.invert_direction {
            -sign
        } else {
            sign
        }
    }

    /// Compute the move to `target` without touching any state.
    pub fn plan(&self, state: &RotorState, target: PositionIndex) -> Move {
        let target = PositionIndex(target.0 % self.positions);
        let delta = self
            .policy
            .delta(state.index.0, target.0, self.positions);

        if delta == 0 {
            return Move {
                target,
                delta,
                steps: 0,
                remainder: state.remainder,
            };
        }

        let n = i64::from(self.positions);
        let wanted = i64::from(delta) * i64::from(self.steps_per_revolution) + state.remainder;
        let steps = div_round(wanted, n);

        Move {
            target,
            delta,
            steps: steps * self.advance_sign(),
            remainder: wanted - steps * n,
        }
    }

    /// Move the rotor to `target`.
    ///
    /// The driver is trusted to complete the steps; nothing is rolled back.
    pub fn move_to<D: MotionDriver>(
        &self,
        state: &mut RotorState,
        target: PositionIndex,
        driver: &mut D,
    ) -> Move {
        let planned = self.plan(state, target);
        if planned.is_noop() {
            return planned;
        }

        debug!(
            "move: {} -> {} (delta {}, {} steps)",
            state.index.0,
            planned.target.0,
            planned.delta,
            planned.steps
        );

        driver.step(planned.steps);
        state.index = PositionIndex::wrapping(
            i64::from(state.index.0) + i64::from(planned.delta),
            self.positions,
        );
        state.remainder = planned.remainder;
        planned
    }
}

/// Integer division rounding half away from zero.
fn div_round(num: i64, den: i64) -> i64 {
    if num >= 0 {
        (2 * num + den) / (2 * den)
    } else {
        -((-2 * num + den) / (2 * den))
    }
}
