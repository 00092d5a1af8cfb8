//! Unit tests for loading configuration files.

use std::fs;
use std::path::PathBuf;

use splitflap_motion::config::{load_config, ExhaustedPolicy};
use splitflap_motion::error::{ConfigError, Error};
use splitflap_motion::{AlphabetPreset, DirectionPolicy};

fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("splitflap-{}-{}.toml", name, std::process::id()));
    fs::write(&path, content).expect("write temp config");
    path
}

/// A complete file for the 37-face counter-clockwise rotor.
#[test]
fn test_load_latin_rotor() {
    let path = write_temp(
        "latin",
        r#"
steps_per_revolution = 2048
direction = "reverse"
invert_direction = true
reference_index = 36
move_rate_steps_per_sec = 600.0
homing_rate_steps_per_sec = 120.0
homing_budget_steps = 3000
debounce_ms = 10
settle_ms = 500
homing_enabled = true
on_homing_exhausted = "fail_open"
release_when_idle = false

[alphabet]
preset = "latin37"
"#,
    );

    let config = load_config(&path).expect("valid config");
    fs::remove_file(&path).ok();

    assert_eq!(config.direction, DirectionPolicy::Reverse);
    assert!(config.invert_direction);
    assert_eq!(config.reference_index, 36);
    assert_eq!(config.move_rate.value(), 600.0);
    assert_eq!(config.homing_rate.value(), 120.0);
    assert_eq!(config.homing_budget, 3000);
    assert_eq!(config.debounce.value(), 10);
    assert_eq!(config.settle.value(), 500);
    assert_eq!(config.on_homing_exhausted, ExhaustedPolicy::FailOpen);
    assert!(!config.release_when_idle);
    assert_eq!(config.alphabet.preset, AlphabetPreset::Latin37);

    let alphabet = config.alphabet.build().unwrap();
    assert_eq!(alphabet.symbol_at(splitflap_motion::PositionIndex(36)).as_str(), " ");
}

/// Digraphs from the file are matched case-insensitively.
#[test]
fn test_load_custom_digraphs() {
    let path = write_temp(
        "digraphs",
        r#"
[alphabet]
symbols = [" ", "A", "Å", "B"]

[alphabet.digraphs]
"AA" = "Å"
"#,
    );

    let config = load_config(&path).expect("valid config");
    fs::remove_file(&path).ok();

    let alphabet = config.alphabet.build().unwrap();
    assert_eq!(alphabet.index_of("aa").map(|i| i.value()), Some(2));
    assert_eq!(alphabet.index_of("Å").map(|i| i.value()), Some(2));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_config("/nonexistent/splitflap.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}

#[test]
fn test_unknown_direction_is_parse_error() {
    let path = write_temp("bad-direction", "direction = \"sideways\"\n");
    let result = load_config(&path);
    fs::remove_file(&path).ok();

    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}
