//! Line-oriented command interpreter.
//!
//! Bytes go in through [`Interpreter::push_byte`]; each completed line is
//! parsed, dispatched to the [`SplitFlap`] and answered with human-readable
//! lines on the outbound writer. Everything runs to completion before the
//! next byte is looked at.

use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;
use rand_core::RngCore;

use crate::device::SplitFlap;
use crate::error::Error;
use crate::homing::HomingOutcome;
use crate::motion::Move;
use crate::motor::{MotionDriver, ReferenceSensor};
use crate::selftest::SelfTest;

use super::line::LineBuffer;
use super::parser::Command;

/// Default input line capacity in bytes.
pub const DEFAULT_LINE_CAPACITY: usize = 32;

const HELP: &[&str] = &[
    "i<n>  move to index n",
    "c<s>  move to symbol s (empty or space for blank)",
    "h     home on the reference sensor",
    "f     sweep all indices forward",
    "b     sweep all indices backward",
    "r     move to random indices",
    "?     this summary",
];

/// Command interpreter with a `LINE`-byte input buffer.
pub struct Interpreter<R: RngCore, const LINE: usize = DEFAULT_LINE_CAPACITY> {
    line: LineBuffer<LINE>,
    rng: R,
}

impl<R: RngCore, const LINE: usize> Interpreter<R, LINE> {
    /// Create an interpreter drawing random targets from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            line: LineBuffer::new(),
            rng,
        }
    }

    /// Feed one inbound byte; a terminator dispatches the buffered line.
    pub fn push_byte<D, S, DL, W>(
        &mut self,
        byte: u8,
        flap: &mut SplitFlap<D, S, DL>,
        out: &mut W,
    ) -> fmt::Result
    where
        D: MotionDriver,
        S: ReferenceSensor,
        DL: DelayNs,
        W: Write,
    {
        match self.line.push(byte) {
            Ok(false) | Err(_) => Ok(()),
            Ok(true) => {
                let result = if self.line.is_empty() {
                    Ok(())
                } else {
                    if self.line.is_truncated() {
                        warn!("line truncated at {} bytes", LINE);
                    }
                    match self.line.as_str() {
                        Ok(line) => {
                            dispatch(&mut self.rng, line, self.line.is_truncated(), flap, out)
                        }
                        Err(e) => {
                            warn!("dropping line with invalid UTF-8");
                            writeln!(out, "error: {}", e)
                        }
                    }
                };
                self.line.clear();
                result
            }
        }
    }

    /// Feed a run of inbound bytes.
    pub fn push_bytes<D, S, DL, W>(
        &mut self,
        bytes: &[u8],
        flap: &mut SplitFlap<D, S, DL>,
        out: &mut W,
    ) -> fmt::Result
    where
        D: MotionDriver,
        S: ReferenceSensor,
        DL: DelayNs,
        W: Write,
    {
        for &byte in bytes {
            self.push_byte(byte, flap, out)?;
        }
        Ok(())
    }

    /// Execute one complete line, bypassing the input buffer.
    pub fn execute<D, S, DL, W>(
        &mut self,
        line: &str,
        flap: &mut SplitFlap<D, S, DL>,
        out: &mut W,
    ) -> fmt::Result
    where
        D: MotionDriver,
        S: ReferenceSensor,
        DL: DelayNs,
        W: Write,
    {
        dispatch(&mut self.rng, line, false, flap, out)
    }

    /// Bytes waiting for a terminator.
    pub fn pending(&self) -> &[u8] {
        self.line.as_bytes()
    }
}

/// Write the command summary.
pub fn write_help<W: Write>(out: &mut W) -> fmt::Result {
    for line in HELP {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn dispatch<D, S, DL, R, W>(
    rng: &mut R,
    line: &str,
    truncated: bool,
    flap: &mut SplitFlap<D, S, DL>,
    out: &mut W,
) -> fmt::Result
where
    D: MotionDriver,
    S: ReferenceSensor,
    DL: DelayNs,
    R: RngCore,
    W: Write,
{
    if line.trim().is_empty() {
        return Ok(());
    }

    writeln!(out, "> {}", line)?;
    if truncated {
        writeln!(out, "warning: line truncated")?;
    }

    let command = match Command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(()),
        Err(e) => return writeln!(out, "error: {}", e),
    };

    match command {
        Command::Index(index) => match flap.move_to_index(index) {
            Ok(done) => report_move(out, flap, &done),
            Err(e) => report_error(out, &e),
        },
        Command::Show(token) => match flap.show(token) {
            Ok(done) => report_move(out, flap, &done),
            Err(e) => report_error(out, &e),
        },
        Command::Home => {
            writeln!(out, "homing")?;
            let outcome = flap.home();
            report_homing(out, flap, outcome)
        }
        Command::SelfTest(test) => run_self_test(out, flap, rng, test),
        Command::Help => write_help(out),
    }
}

fn run_self_test<D, S, DL, R, W>(
    out: &mut W,
    flap: &mut SplitFlap<D, S, DL>,
    rng: &mut R,
    test: SelfTest,
) -> fmt::Result
where
    D: MotionDriver,
    S: ReferenceSensor,
    DL: DelayNs,
    R: RngCore,
    W: Write,
{
    let mut written = Ok(());
    let result = test.run(flap, rng, |flap, done| {
        if written.is_ok() {
            written = report_move(out, flap, done);
        }
    });
    written?;

    match result {
        Ok(_) => match test {
            SelfTest::Random { .. } => writeln!(out, "random test done"),
            _ => writeln!(out, "sweep done"),
        },
        Err(e) => report_error(out, &e),
    }
}

fn report_move<D, S, DL, W>(out: &mut W, flap: &SplitFlap<D, S, DL>, done: &Move) -> fmt::Result
where
    D: MotionDriver,
    S: ReferenceSensor,
    DL: DelayNs,
    W: Write,
{
    writeln!(
        out,
        "goto index {} ({})",
        done.target,
        flap.alphabet().symbol_at(done.target)
    )
}

fn report_homing<D, S, DL, W>(
    out: &mut W,
    flap: &SplitFlap<D, S, DL>,
    outcome: HomingOutcome,
) -> fmt::Result
where
    D: MotionDriver,
    S: ReferenceSensor,
    DL: DelayNs,
    W: Write,
{
    match outcome {
        HomingOutcome::Found { steps } => {
            writeln!(out, "homed at index {} after {} steps", flap.index(), steps)
        }
        HomingOutcome::Exhausted { assumed_homed, .. } => {
            if let Some(e) = outcome.error() {
                report_error(out, &Error::Homing(e))?;
            }
            if assumed_homed {
                writeln!(out, "warning: assuming index {}", flap.index())
            } else {
                writeln!(out, "error: not homed")
            }
        }
        HomingOutcome::Skipped => writeln!(out, "homing disabled"),
    }
}

fn report_error<W: Write>(out: &mut W, error: &Error) -> fmt::Result {
    match error {
        Error::Command(e) => writeln!(out, "error: {}", e),
        Error::Homing(e) => writeln!(out, "warning: {}", e),
        Error::Config(e) => writeln!(out, "error: {}", e),
    }
}
