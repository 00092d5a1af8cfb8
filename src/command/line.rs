//! Bounded line accumulator.

use heapless::Vec;

use crate::error::CommandError;

/// The line has reached its capacity; the byte was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityExceeded;

/// Collects bytes until CR or LF, holding at most `N` of them.
#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize> {
    bytes: Vec<u8, N>,
    truncated: bool,
}

impl<const N: usize> LineBuffer<N> {
    /// Empty buffer.
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            truncated: false,
        }
    }

    /// Append one byte.
    ///
    /// Returns `Ok(true)` when `byte` terminates the line. A byte that does
    /// not fit is dropped, the line is flagged truncated and
    /// [`CapacityExceeded`] is returned; the terminator is still recognized
    /// afterwards.
    pub fn push(&mut self, byte: u8) -> Result<bool, CapacityExceeded> {
        if byte == b'\r' || byte == b'\n' {
            return Ok(true);
        }
        if self.bytes.push(byte).is_err() {
            self.truncated = true;
            return Err(CapacityExceeded);
        }
        Ok(false)
    }

    /// Raw bytes collected so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The line as text.
    ///
    /// On a truncated line, a multi-byte character cut off at the end is
    /// dropped. Any other invalid UTF-8, including an incomplete sequence
    /// ending a line that fit, rejects the whole line with
    /// [`CommandError::InvalidByte`].
    pub fn as_str(&self) -> Result<&str, CommandError> {
        match core::str::from_utf8(&self.bytes) {
            Ok(s) => Ok(s),
            Err(e) if self.truncated && e.error_len().is_none() => {
                core::str::from_utf8(&self.bytes[..e.valid_up_to()])
                    .map_err(|_| CommandError::InvalidByte)
            }
            Err(_) => Err(CommandError::InvalidByte),
        }
    }

    /// Whether nothing has been collected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether bytes were dropped from the current line.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Maximum line length in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Start a new line.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.truncated = false;
    }
}
