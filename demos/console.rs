//! Serial-console style front end over a simulated rotor.
//!
//! Reads command lines from stdin and prints the replies, exactly as a
//! board would over its UART. Pass a TOML file to use its configuration.
//!
//! ```text
//! cargo run --example console -- flap.toml
//! ```

use std::fmt;
use std::io::{self, Read, Write as _};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_core::RngCore;
use splitflap_motion::sim::{SimClock, SimRotor};
use splitflap_motion::{load_config, FlapConfig, HomingOutcome, Interpreter, SplitFlap};

/// Adapts stdout to `core::fmt::Write`.
struct Stdout(io::Stdout);

impl fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// xorshift64 seeded from the clock.
struct ClockRng(u64);

impl ClockRng {
    fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x2545_F491_4F6C_DD1D);
        Self(seed | 1)
    }
}

impl RngCore for ClockRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(path)?,
        None => FlapConfig::default(),
    };

    // Put the reference mark a little way in so startup homing has to seek.
    let rotor = SimRotor::new(config.steps_per_revolution)
        .with_reference_at(config.steps_per_revolution / 7);
    let clock = SimClock::new();

    let mut flap = SplitFlap::builder()
        .driver(rotor.driver())
        .sensor(rotor.sensor())
        .delay(&clock)
        .config(config)
        .build()?;

    let mut out = Stdout(io::stdout());
    match flap.start() {
        HomingOutcome::Found { steps } => println!("homed after {} steps", steps),
        HomingOutcome::Exhausted { steps, .. } => {
            println!("homing gave up after {} steps", steps)
        }
        HomingOutcome::Skipped => println!("homing disabled"),
    }
    println!("{} faces, '?' for help", flap.positions());

    let mut console = Interpreter::<_>::new(ClockRng::new());
    for byte in io::stdin().lock().bytes() {
        console.push_byte(byte?, &mut flap, &mut out)?;
        out.0.flush()?;
    }

    println!(
        "rotor at step {}, {} ms of simulated delay",
        rotor.position(),
        clock.elapsed_ms()
    );
    Ok(())
}
