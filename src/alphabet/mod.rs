//! Alphabet module for splitflap-motion.
//!
//! Maps between the symbols printed on the flaps and their rotor positions.

mod presets;
mod symbol;
mod table;

pub use presets::{AlphabetPreset, GERMAN_45, LATIN_37};
pub use symbol::{PositionIndex, Symbol, SYMBOL_CAPACITY};
pub use table::{Alphabet, MAX_ALIASES, MAX_SYMBOLS};
