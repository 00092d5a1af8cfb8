//! Unit tests for configuration validation.

use splitflap_motion::config::{parse_config, validate_config, AlphabetConfig, FlapConfig};
use splitflap_motion::error::{ConfigError, Error};
use splitflap_motion::sim::{SimClock, SimRotor};
use splitflap_motion::{Alphabet, SplitFlap, StepsPerSecond};

#[test]
fn test_zero_steps_rejected() {
    let config = FlapConfig {
        steps_per_revolution: 0,
        ..FlapConfig::default()
    };
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)))
    ));
}

#[test]
fn test_nan_rate_rejected() {
    let config = FlapConfig {
        move_rate: StepsPerSecond(f32::NAN),
        ..FlapConfig::default()
    };
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidRate(_)))
    ));
}

#[test]
fn test_zero_budget_rejected() {
    let result = parse_config("homing_budget_steps = 0\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ZeroHomingBudget))
    ));
}

#[test]
fn test_duplicate_symbol_rejected() {
    let result = parse_config(
        r#"
[alphabet]
symbols = [" ", "A", "A"]
"#,
    );
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::DuplicateSymbol(_)))
    ));
}

#[test]
fn test_alias_to_unknown_symbol_rejected() {
    let result = parse_config(
        r#"
[alphabet.aliases]
"ß" = "SS"
"#,
    );
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::UnknownAliasTarget { .. }))
    ));
}

#[test]
fn test_builder_validates() {
    let rotor = SimRotor::new(2048);
    let clock = SimClock::new();
    let config = FlapConfig {
        reference_index: 99,
        alphabet: AlphabetConfig::default(),
        ..FlapConfig::default()
    };

    let result = SplitFlap::builder()
        .driver(rotor.driver())
        .sensor(rotor.sensor())
        .delay(&clock)
        .config(config)
        .build();
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidReferenceIndex { index: 99, size: 45 }))
    ));
}

#[test]
fn test_builder_validates_custom_alphabet_config() {
    let rotor = SimRotor::new(2048);
    let clock = SimClock::new();
    let config = FlapConfig {
        steps_per_revolution: 0,
        move_rate: StepsPerSecond(0.0),
        homing_budget: 0,
        ..FlapConfig::default()
    };

    let result = SplitFlap::builder()
        .driver(rotor.driver())
        .sensor(rotor.sensor())
        .delay(&clock)
        .config(config)
        .alphabet(Alphabet::new(&[" ", "A", "B"]).unwrap())
        .build();
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)))
    ));
    assert_eq!(rotor.position(), 0);
}
