//! Motion module for splitflap-motion.
//!
//! Provides direction policies and the step-counting position tracker.

mod direction;
mod tracker;

pub use direction::{Direction, DirectionPolicy};
pub use tracker::{Move, PositionTracker, RotorState};
