//! Unit test harness for splitflap-motion.
//!
//! This module organizes unit tests for each component of the library.

mod config_loading;
mod config_validation;
mod tracker_properties;
