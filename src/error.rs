//! Error types for splitflap-motion.
//!
//! Provides unified error handling across configuration, command handling and homing.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all splitflap-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Command rejected by the interpreter or the device
    Command(CommandError),
    /// Homing did not find the reference
    Homing(HomingError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Alphabet has no symbols
    EmptyAlphabet,
    /// Alphabet has more symbols than a rotor can carry
    AlphabetTooLarge(usize),
    /// Symbol, alias or digraph token is longer than the token capacity
    TokenTooLong(heapless::String<16>),
    /// The same symbol appears twice in the alphabet
    DuplicateSymbol(heapless::String<16>),
    /// Alias or digraph points at a symbol that is not in the alphabet
    UnknownAliasTarget {
        /// Alias token
        alias: heapless::String<16>,
        /// Symbol it was meant to resolve to
        target: heapless::String<16>,
    },
    /// Alias or digraph token is itself a symbol of the alphabet
    AliasShadowsSymbol(heapless::String<16>),
    /// Too many aliases or digraphs
    TooManyAliases,
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(u32),
    /// Step rate must be > 0
    InvalidRate(f32),
    /// Homing safety budget must be > 0
    ZeroHomingBudget,
    /// Reference index does not address a symbol
    InvalidReferenceIndex {
        /// Configured reference index
        index: u16,
        /// Alphabet size
        size: u16,
    },
    /// Builder is missing a required part
    MissingComponent(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Errors reported back over the command transport.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Index command outside `[0, N)`
    IndexOutOfRange {
        /// Requested index
        index: i64,
        /// Alphabet size
        size: u16,
    },
    /// Index command whose argument is not a decimal integer
    InvalidIndex(heapless::String<16>),
    /// Symbol token could not be resolved
    SymbolNotFound(heapless::String<16>),
    /// Unrecognized leading character
    UnknownCommand(char),
    /// Motion refused until homing succeeds
    NotHomed,
    /// Line holds a byte that is not valid UTF-8
    InvalidByte,
}

/// Homing errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HomingError {
    /// Safety budget reached without a debounced trigger
    Exhausted {
        /// Steps issued before giving up
        steps: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
            Error::Homing(e) => write!(f, "Homing error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::EmptyAlphabet => write!(f, "Alphabet has no symbols"),
            ConfigError::AlphabetTooLarge(n) => {
                write!(f, "Alphabet has {} symbols, maximum is {}", n, crate::alphabet::MAX_SYMBOLS)
            }
            ConfigError::TokenTooLong(token) => write!(f, "Token '{}' is too long", token),
            ConfigError::DuplicateSymbol(symbol) => write!(f, "Duplicate symbol: '{}'", symbol),
            ConfigError::UnknownAliasTarget { alias, target } => {
                write!(f, "Alias '{}' refers to unknown symbol '{}'", alias, target)
            }
            ConfigError::AliasShadowsSymbol(alias) => {
                write!(f, "Alias '{}' is already a symbol", alias)
            }
            ConfigError::TooManyAliases => write!(f, "Too many aliases or digraphs"),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidRate(v) => write!(f, "Invalid step rate: {}. Must be > 0", v),
            ConfigError::ZeroHomingBudget => write!(f, "Homing budget must be > 0"),
            ConfigError::InvalidReferenceIndex { index, size } => {
                write!(f, "Reference index {} outside alphabet of {} symbols", index, size)
            }
            ConfigError::MissingComponent(part) => write!(f, "{} is required", part),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::IndexOutOfRange { index, size } => {
                write!(f, "index {} out of range [0, {})", index, size)
            }
            CommandError::InvalidIndex(arg) => write!(f, "invalid index '{}'", arg),
            CommandError::SymbolNotFound(token) => write!(f, "symbol not found: '{}'", token),
            CommandError::UnknownCommand(c) => write!(f, "unknown command '{}'", c),
            CommandError::NotHomed => write!(f, "not homed, send 'h' first"),
            CommandError::InvalidByte => write!(f, "invalid byte in command"),
        }
    }
}

impl fmt::Display for HomingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomingError::Exhausted { steps } => {
                write!(f, "no reference trigger within {} steps", steps)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

impl From<HomingError> for Error {
    fn from(e: HomingError) -> Self {
        Error::Homing(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

#[cfg(feature = "std")]
impl std::error::Error for HomingError {}

/// Copy as much of `s` as fits into a bounded string, cutting on a char boundary.
pub(crate) fn truncated<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
