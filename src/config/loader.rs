//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::FlapConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use splitflap_motion::load_config;
///
/// let config = load_config("flap.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FlapConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = crate::error::truncated(e.to_string().as_str());
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<FlapConfig> {
    let config: FlapConfig = toml::from_str(content).map_err(|e| {
        let msg = crate::error::truncated(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}
