//! Command line parsing.

use core::num::IntErrorKind;

use crate::error::{truncated, CommandError};
use crate::selftest::SelfTest;

/// A parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `i<n>`: move to index `n`
    Index(i64),
    /// `c<token>`: move to the face showing `token`
    Show(&'a str),
    /// `h`: run homing
    Home,
    /// `f`, `b`, `r`: run a self-test sequence
    SelfTest(SelfTest),
    /// `?`: print the command summary
    Help,
}

impl<'a> Command<'a> {
    /// Parse one line.
    ///
    /// Returns `Ok(None)` for blank lines. The leading letter is matched
    /// case-insensitively; whatever follows `h`, `b`, `f`, `r` or `?` is
    /// ignored.
    pub fn parse(line: &'a str) -> Result<Option<Self>, CommandError> {
        let mut chars = line.trim_start().chars();
        let Some(prefix) = chars.next() else {
            return Ok(None);
        };
        let rest = chars.as_str();

        let command = match prefix.to_ascii_lowercase() {
            'i' => {
                let arg = rest.trim();
                // Out-of-range numbers saturate so the device reports them
                // as a range error.
                let index = match arg.parse::<i64>() {
                    Ok(index) => index,
                    Err(e) => match e.kind() {
                        IntErrorKind::PosOverflow => i64::MAX,
                        IntErrorKind::NegOverflow => i64::MIN,
                        _ => return Err(CommandError::InvalidIndex(truncated(arg))),
                    },
                };
                Command::Index(index)
            }
            'c' => Command::Show(symbol_token(rest)),
            'h' => Command::Home,
            'b' => Command::SelfTest(SelfTest::Backward),
            'f' => Command::SelfTest(SelfTest::Forward),
            'r' => Command::SelfTest(SelfTest::random()),
            '?' => Command::Help,
            other => return Err(CommandError::UnknownCommand(other)),
        };
        Ok(Some(command))
    }
}

/// Token after `c`: surrounding whitespace is dropped, but a run of spaces
/// with nothing else still names the blank.
fn symbol_token(rest: &str) -> &str {
    let token = rest.trim();
    if token.is_empty() && rest.contains(' ') {
        " "
    } else {
        token
    }
}
