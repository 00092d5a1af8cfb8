//! Command module for splitflap-motion.
//!
//! Turns a byte stream of text lines into moves, homing runs and
//! self-tests, and reports each outcome as a line of text.

mod interpreter;
mod line;
mod parser;

pub use interpreter::{write_help, Interpreter, DEFAULT_LINE_CAPACITY};
pub use line::{CapacityExceeded, LineBuffer};
pub use parser::Command;
