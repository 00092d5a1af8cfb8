//! Integration tests for splitflap-motion.
//!
//! These tests drive a simulated rotor through the public API, from
//! configuration through homing to the command interpreter.

mod unit;

use rand_core::RngCore;
use splitflap_motion::config::Milliseconds;
use splitflap_motion::sim::{SimClock, SimDriver, SimRotor, SimSensor};
use splitflap_motion::{
    parse_config, Alphabet, AlphabetPreset, DirectionPolicy, FlapConfig, HomingOutcome,
    Interpreter, PositionIndex, SplitFlap,
};

type SimFlap<'a> = SplitFlap<SimDriver<'a>, SimSensor<'a>, &'a SimClock>;

/// xorshift32, enough for sampling targets.
struct XorShift(u32);

impl RngCore for XorShift {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

fn flap<'a>(rotor: &'a SimRotor, clock: &'a SimClock, config: FlapConfig) -> SimFlap<'a> {
    SplitFlap::builder()
        .driver(rotor.driver())
        .sensor(rotor.sensor())
        .delay(clock)
        .config(config)
        .build()
        .expect("valid configuration")
}

// =============================================================================
// Alphabet resolution
// =============================================================================

#[test]
fn german45_resolution_examples() {
    let alphabet = Alphabet::from_preset(AlphabetPreset::German45).unwrap();
    assert_eq!(alphabet.len(), 45);

    let umlaut = alphabet.index_of("Ü").unwrap();
    assert_eq!(alphabet.index_of("ue"), Some(umlaut));
    assert_eq!(alphabet.index_of("UE"), Some(umlaut));
    assert_eq!(alphabet.index_of(""), Some(PositionIndex(0)));
    assert_eq!(alphabet.index_of("space"), Some(PositionIndex(0)));
    assert_eq!(alphabet.index_of("z"), alphabet.index_of("Z"));
    assert_eq!(alphabet.index_of("#"), None);
}

#[test]
fn every_face_round_trips() {
    for preset in [AlphabetPreset::German45, AlphabetPreset::Latin37] {
        let alphabet = Alphabet::from_preset(preset).unwrap();
        for (index, symbol) in alphabet.iter() {
            assert_eq!(alphabet.index_of(symbol.as_str()), Some(index));
        }
    }
}

// =============================================================================
// Homing
// =============================================================================

#[test]
fn homing_resets_to_reference_after_k_steps() {
    let rotor = SimRotor::new(2048).with_reference_at(777);
    let clock = SimClock::new();
    let config = FlapConfig {
        reference_index: 12,
        ..FlapConfig::default()
    };
    let mut flap = flap(&rotor, &clock, config);

    // Wander off first so there is drift to discard.
    assert_eq!(flap.home(), HomingOutcome::Found { steps: 777 });
    flap.move_to(PositionIndex(30)).unwrap();
    assert!(flap.state().step_remainder() != 0.0);

    let outcome = flap.home();
    assert!(matches!(outcome, HomingOutcome::Found { .. }));
    assert_eq!(flap.index(), PositionIndex(12));
    assert_eq!(flap.state().step_remainder(), 0.0);
    assert!(flap.state().is_homed());
    assert_eq!(rotor.position().rem_euclid(2048), 777);
}

#[test]
fn homing_disabled_is_skipped() {
    let rotor = SimRotor::new(2048).with_reference_at(5);
    let clock = SimClock::new();
    let config = FlapConfig {
        homing_enabled: false,
        ..FlapConfig::default()
    };
    let mut flap = flap(&rotor, &clock, config);

    assert_eq!(flap.start(), HomingOutcome::Skipped);
    assert_eq!(rotor.position(), 0);
    assert!(flap.state().is_homed());
}

#[test]
fn driver_released_when_idle() {
    let rotor = SimRotor::new(2048).with_reference_at(0);
    let clock = SimClock::new();
    let mut flap = flap(&rotor, &clock, FlapConfig::default());
    flap.start();
    assert!(!rotor.is_enabled());

    flap.move_to(PositionIndex(4)).unwrap();
    assert!(!rotor.is_enabled());
    assert_eq!(rotor.rate().value(), 500.0);
}

// =============================================================================
// Motion
// =============================================================================

#[test]
fn full_revolutions_land_on_whole_turns() {
    let rotor = SimRotor::new(2048).with_reference_at(0);
    let clock = SimClock::new();
    let mut flap = flap(&rotor, &clock, FlapConfig::default());
    flap.start();

    for _ in 0..3 {
        for i in 1..45u16 {
            flap.move_to(PositionIndex(i)).unwrap();
        }
        flap.move_to(PositionIndex(0)).unwrap();
    }
    assert_eq!(rotor.position(), 3 * 2048);
}

#[test]
fn shortest_path_from_config() {
    let rotor = SimRotor::new(4500).with_reference_at(0);
    let clock = SimClock::new();
    let config = parse_config(
        r#"
steps_per_revolution = 4500
direction = "shortest_path"
"#,
    )
    .unwrap();
    assert_eq!(config.direction, DirectionPolicy::ShortestPath);
    let mut flap = flap(&rotor, &clock, config);
    flap.start();

    flap.move_to(PositionIndex(43)).unwrap();
    assert_eq!(rotor.position(), -200);
}

// =============================================================================
// Command interpreter
// =============================================================================

#[test]
fn out_of_range_index_does_not_move() {
    let rotor = SimRotor::new(2048).with_reference_at(0);
    let clock = SimClock::new();
    let mut flap = flap(&rotor, &clock, FlapConfig::default());
    flap.start();
    flap.move_to(PositionIndex(7)).unwrap();
    let calls = rotor.step_calls();

    let mut console = Interpreter::<_>::new(XorShift(1));
    let mut out = String::new();
    console.push_bytes(b"i50\n", &mut flap, &mut out).unwrap();

    assert!(out.contains("error: index 50 out of range [0, 45)"));
    assert_eq!(flap.index(), PositionIndex(7));
    assert_eq!(rotor.step_calls(), calls);
}

#[test]
fn forward_sweep_visits_every_index_in_order() {
    let rotor = SimRotor::new(2048).with_reference_at(0);
    let clock = SimClock::new();
    let config = FlapConfig {
        settle: Milliseconds(20),
        ..FlapConfig::default()
    };
    let mut flap = flap(&rotor, &clock, config);
    flap.start();
    let before = clock.elapsed_ms();

    let mut console = Interpreter::<_>::new(XorShift(1));
    let mut out = String::new();
    console.push_bytes(b"F\r", &mut flap, &mut out).unwrap();

    let visited: Vec<u16> = out
        .lines()
        .filter_map(|l| l.strip_prefix("goto index "))
        .map(|l| l.split(' ').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(visited, (0..45).collect::<Vec<u16>>());
    assert_eq!(out.lines().last(), Some("sweep done"));
    assert_eq!(clock.elapsed_ms() - before, 45 * 20);
    // Index 0 was already showing; 44 faces at 45.51 steps each.
    assert_eq!(rotor.position(), 2002);
}

#[test]
fn random_test_issues_ten_moves() {
    let rotor = SimRotor::new(2048).with_reference_at(0);
    let clock = SimClock::new();
    let mut flap = flap(&rotor, &clock, FlapConfig::default());
    flap.start();

    let mut console = Interpreter::<_>::new(XorShift(0x1234_5678));
    let mut out = String::new();
    console.execute("r", &mut flap, &mut out).unwrap();

    let moves = out.lines().filter(|l| l.starts_with("goto index ")).count();
    assert_eq!(moves, 10);
    assert_eq!(out.lines().last(), Some("random test done"));
}

#[test]
fn service_loop_survives_errors() {
    let rotor = SimRotor::new(2048).with_reference_at(0);
    let clock = SimClock::new();
    let mut flap = flap(&rotor, &clock, FlapConfig::default());
    flap.start();

    let mut console = Interpreter::<_>::new(XorShift(1));
    let mut out = String::new();
    console
        .push_bytes(b"x\n\n\nc#\nixyz\ncA\n", &mut flap, &mut out)
        .unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        [
            "> x",
            "error: unknown command 'x'",
            "> c#",
            "error: symbol not found: '#'",
            "> ixyz",
            "error: invalid index 'xyz'",
            "> cA",
            "goto index 1 (A)",
        ]
    );
}
