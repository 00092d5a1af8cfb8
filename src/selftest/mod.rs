//! Self-test sequences.
//!
//! Sweeps and random sampling driven through [`SplitFlap::move_to`], the same
//! entry point the command interpreter uses.

use embedded_hal::delay::DelayNs;
use rand_core::RngCore;

use crate::alphabet::PositionIndex;
use crate::device::SplitFlap;
use crate::error::Result;
use crate::motion::Move;
use crate::motor::{MotionDriver, ReferenceSensor};

/// Moves issued by the random sampling test.
pub const RANDOM_MOVES: u16 = 10;

/// A scripted motion sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelfTest {
    /// Every index from `0` up to `N-1`.
    Forward,
    /// Every index from `N-1` down to `0`.
    Backward,
    /// `moves` uniformly random indices.
    Random {
        /// Number of moves.
        moves: u16,
    },
}

impl SelfTest {
    /// Random sampling with the default move count.
    pub const fn random() -> Self {
        SelfTest::Random {
            moves: RANDOM_MOVES,
        }
    }

    /// Number of moves the test issues on a rotor of `positions` faces.
    pub fn move_count(&self, positions: u16) -> u16 {
        match *self {
            SelfTest::Forward | SelfTest::Backward => positions,
            SelfTest::Random { moves } => moves,
        }
    }

    /// Run the test, waiting the settle delay after each move.
    ///
    /// `on_move` sees every completed move in order. Stops at the first
    /// refused move and returns how many moves completed otherwise.
    pub fn run<D, S, DL, R, F>(
        &self,
        flap: &mut SplitFlap<D, S, DL>,
        rng: &mut R,
        mut on_move: F,
    ) -> Result<u16>
    where
        D: MotionDriver,
        S: ReferenceSensor,
        DL: DelayNs,
        R: RngCore,
        F: FnMut(&SplitFlap<D, S, DL>, &Move),
    {
        let n = flap.positions();
        let total = self.move_count(n);

        for i in 0..total {
            let target = match *self {
                SelfTest::Forward => PositionIndex(i),
                SelfTest::Backward => PositionIndex(n - 1 - i),
                SelfTest::Random { .. } => random_index(rng, n),
            };
            let done = flap.move_to(target)?;
            on_move(flap, &done);
            flap.settle();
        }

        info!("self-test done: {} moves", total);
        Ok(total)
    }
}

/// Uniform index in `[0, n)` by widening multiply.
fn random_index<R: RngCore>(rng: &mut R, n: u16) -> PositionIndex {
    let scaled = (u64::from(rng.next_u32()) * u64::from(n)) >> 32;
    PositionIndex(scaled as u16)
}
