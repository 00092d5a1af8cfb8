//! Device module for splitflap-motion.
//!
//! Composes the alphabet, position tracker and homing controller with the
//! hardware of one split-flap unit.

mod builder;
mod flap;

pub use builder::SplitFlapBuilder;
pub use flap::SplitFlap;
