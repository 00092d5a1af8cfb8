//! # splitflap-motion
//!
//! Split-flap display control with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Drift-free positioning**: fractional steps per face are carried between moves
//! - **Sensor homing**: debounced reference seeking with a safety step budget
//! - **Configurable alphabets**: German 45-face and Latin 37-face presets, custom tables
//! - **Serial command interpreter**: line protocol with bounded input buffering
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR, `InputPin` for the sensor, `DelayNs` for timing
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use splitflap_motion::{Interpreter, SplitFlap, StepDirDriver, PinSensor};
//!
//! let config = splitflap_motion::load_config("flap.toml")?;
//!
//! let mut flap = SplitFlap::builder()
//!     .driver(StepDirDriver::new(step_pin, dir_pin, delay.clone(), config.move_rate))
//!     .sensor(PinSensor::active_low(hall_pin))
//!     .delay(delay)
//!     .config(config)
//!     .build()?;
//! flap.start();
//!
//! let mut console = Interpreter::<_>::new(rng);
//! for byte in uart.bytes() {
//!     console.push_byte(byte, &mut flap, &mut uart_writer)?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to every module.
mod fmt;

// Core modules
pub mod alphabet;
pub mod command;
pub mod config;
pub mod device;
pub mod error;
pub mod homing;
pub mod motion;
pub mod motor;
pub mod selftest;
pub mod sim;

// Re-exports for ergonomic API
pub use alphabet::{Alphabet, AlphabetPreset, PositionIndex, Symbol};
pub use command::{Command, Interpreter, LineBuffer};
pub use config::{validate_config, validate_motion, ExhaustedPolicy, FlapConfig};
pub use device::{SplitFlap, SplitFlapBuilder};
pub use error::{Error, Result};
pub use homing::{HomingController, HomingOutcome};
pub use motion::{DirectionPolicy, Move, PositionTracker, RotorState};
pub use motor::{MotionDriver, NoEnablePin, PinSensor, ReferenceSensor, StepDirDriver};
pub use selftest::SelfTest;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Milliseconds, StepsPerSecond};
