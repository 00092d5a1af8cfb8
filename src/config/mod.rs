//! Configuration module for splitflap-motion.
//!
//! Provides types for loading and validating display configuration from
//! TOML files (with `std` feature) or pre-parsed data.

mod alphabet;
mod flap;
#[cfg(feature = "std")]
mod loader;
pub mod units;
mod validation;

pub use alphabet::AlphabetConfig;
pub use flap::{ExhaustedPolicy, FlapConfig};
pub use validation::{validate_config, validate_motion};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Milliseconds, StepsPerSecond};
