//! Homing module for splitflap-motion.
//!
//! Recovers absolute rotor position from a single reference sensor.

mod controller;

pub use controller::{HomingController, HomingOutcome, HomingPhase};
