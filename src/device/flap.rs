//! The split-flap unit: alphabet, rotor state and hardware in one place.

use embedded_hal::delay::DelayNs;

use crate::alphabet::{Alphabet, PositionIndex, Symbol};
use crate::config::units::{Milliseconds, StepsPerSecond};
use crate::config::ExhaustedPolicy;
use crate::error::{truncated, CommandError, Error, Result};
use crate::homing::{HomingController, HomingOutcome};
use crate::motion::{Move, PositionTracker, RotorState};
use crate::motor::{MotionDriver, ReferenceSensor};

use super::builder::SplitFlapBuilder;

/// One split-flap unit.
///
/// Owns the only [`RotorState`]; every move and homing run goes through
/// `&mut self`, so no other synchronization is needed.
///
/// Generic over:
/// - `D`: motor driver (must implement [`MotionDriver`])
/// - `S`: reference sensor (must implement [`ReferenceSensor`])
/// - `DL`: delay provider for debounce and settle waits (must implement `DelayNs`)
pub struct SplitFlap<D, S, DL>
where
    D: MotionDriver,
    S: ReferenceSensor,
    DL: DelayNs,
{
    alphabet: Alphabet,
    tracker: PositionTracker,
    homing: HomingController,
    state: RotorState,
    driver: D,
    sensor: S,
    delay: DL,
    move_rate: StepsPerSecond,
    settle: Milliseconds,
    homing_enabled: bool,
    release_when_idle: bool,
    motion_requires_home: bool,
}

/// Parts assembled by [`SplitFlapBuilder`].
pub(crate) struct Parts<D, S, DL> {
    pub alphabet: Alphabet,
    pub tracker: PositionTracker,
    pub homing: HomingController,
    pub driver: D,
    pub sensor: S,
    pub delay: DL,
    pub move_rate: StepsPerSecond,
    pub settle: Milliseconds,
    pub homing_enabled: bool,
    pub release_when_idle: bool,
    pub on_exhausted: ExhaustedPolicy,
}

impl<D, S, DL> SplitFlap<D, S, DL>
where
    D: MotionDriver,
    S: ReferenceSensor,
    DL: DelayNs,
{
    /// Create a builder.
    pub fn builder() -> SplitFlapBuilder<D, S, DL> {
        SplitFlapBuilder::new()
    }

    pub(crate) fn from_parts(parts: Parts<D, S, DL>) -> Self {
        let positions = parts.alphabet.len();
        let mut state = RotorState::unhomed(parts.homing.reference_index(), positions);
        if !parts.homing_enabled {
            // Without a sensor the reference face is the only position we can know.
            state.reset_to(parts.homing.reference_index(), true);
        }
        Self {
            state,
            alphabet: parts.alphabet,
            tracker: parts.tracker,
            homing: parts.homing,
            driver: parts.driver,
            sensor: parts.sensor,
            delay: parts.delay,
            move_rate: parts.move_rate,
            settle: parts.settle,
            homing_enabled: parts.homing_enabled,
            release_when_idle: parts.release_when_idle,
            motion_requires_home: parts.on_exhausted == ExhaustedPolicy::StayUnhomed,
        }
    }

    /// Bring the unit up: set the move rate and home if enabled.
    pub fn start(&mut self) -> HomingOutcome {
        self.driver.set_rate(self.move_rate);
        self.home()
    }

    /// The flap set.
    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Current rotor state.
    #[inline]
    pub fn state(&self) -> &RotorState {
        &self.state
    }

    /// Face currently showing.
    #[inline]
    pub fn index(&self) -> PositionIndex {
        self.state.index()
    }

    /// Symbol currently showing.
    #[inline]
    pub fn symbol(&self) -> &Symbol {
        self.alphabet.symbol_at(self.state.index())
    }

    /// Number of faces.
    #[inline]
    pub fn positions(&self) -> u16 {
        self.alphabet.len()
    }

    /// The step-count calculator in use.
    #[inline]
    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    /// Resolve a token against the alphabet.
    pub fn lookup(&self, token: &str) -> Result<PositionIndex> {
        self.alphabet
            .index_of(token)
            .ok_or_else(|| Error::Command(CommandError::SymbolNotFound(truncated(token))))
    }

    /// Move to a face given as a raw integer, rejecting anything outside `[0, N)`.
    pub fn move_to_index(&mut self, index: i64) -> Result<Move> {
        let size = self.positions();
        if index < 0 || index >= i64::from(size) {
            return Err(Error::Command(CommandError::IndexOutOfRange { index, size }));
        }
        self.move_to(PositionIndex(index as u16))
    }

    /// Move to the face showing `token`.
    pub fn show(&mut self, token: &str) -> Result<Move> {
        let index = self.lookup(token)?;
        self.move_to(index)
    }

    /// Move to `target`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `target` is not a face of this rotor, `NotHomed`
    /// if the unit refuses motion until homed.
    pub fn move_to(&mut self, target: PositionIndex) -> Result<Move> {
        let size = self.positions();
        if target.0 >= size {
            return Err(Error::Command(CommandError::IndexOutOfRange {
                index: i64::from(target.0),
                size,
            }));
        }
        if self.motion_requires_home && !self.state.is_homed() {
            return Err(Error::Command(CommandError::NotHomed));
        }

        let planned = self.tracker.plan(&self.state, target);
        if planned.is_noop() {
            return Ok(planned);
        }

        self.driver.enable();
        let done = self
            .tracker
            .move_to(&mut self.state, target, &mut self.driver);
        if self.release_when_idle {
            self.driver.disable();
        }
        Ok(done)
    }

    /// Re-synchronize on the reference sensor.
    ///
    /// Returns [`HomingOutcome::Skipped`] without touching the rotor when
    /// homing is disabled.
    pub fn home(&mut self) -> HomingOutcome {
        if !self.homing_enabled {
            return HomingOutcome::Skipped;
        }

        self.driver.enable();
        let outcome = self.homing.home(
            &mut self.state,
            &mut self.driver,
            &mut self.sensor,
            &mut self.delay,
        );
        if self.release_when_idle {
            self.driver.disable();
        }
        outcome
    }

    /// Wait the configured settle time.
    pub fn settle(&mut self) {
        self.delay.delay_ms(self.settle.0);
    }

    /// Give the hardware back.
    pub fn release(self) -> (D, S, DL) {
        (self.driver, self.sensor, self.delay)
    }
}
