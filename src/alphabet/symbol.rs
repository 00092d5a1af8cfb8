//! Symbol and position index value types.

use core::fmt;

/// Maximum byte length of a symbol token.
pub const SYMBOL_CAPACITY: usize = 8;

/// A face of the display, addressed by its slot on the rotor.
///
/// Always normalized into `[0, N)` by whoever creates it from arbitrary
/// integers (see [`PositionIndex::wrapping`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionIndex(pub u16);

impl PositionIndex {
    /// Create a new index.
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Reduce an arbitrary signed offset into `[0, size)`.
    #[inline]
    pub fn wrapping(value: i64, size: u16) -> Self {
        Self(value.rem_euclid(i64::from(size.max(1))) as u16)
    }
}

impl fmt::Display for PositionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A printable token shown on one face.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(heapless::String<SYMBOL_CAPACITY>);

impl Symbol {
    /// Create a symbol from a token, `None` if it exceeds [`SYMBOL_CAPACITY`].
    pub fn new(token: &str) -> Option<Self> {
        heapless::String::try_from(token).ok().map(Self)
    }

    /// The token as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether this is the blank face.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.0.as_str() == " "
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
