//! Motor module for splitflap-motion.
//!
//! Defines the driver and sensor seams plus embedded-hal adapters for them.

mod adapter;
mod sensor;
mod step_dir;

pub use adapter::{MotionDriver, ReferenceSensor};
pub use sensor::PinSensor;
pub use step_dir::{NoEnablePin, StepDirDriver};
