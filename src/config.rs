//! Runtime configuration.
//!
//! Configuration comes from a plain `KEY, VALUE` file, one entry per line.
//! Lines starting with `#` and blank lines are skipped, and anything after the
//! second comma is ignored. Command-line flags override file values (see
//! `main.rs`).
//!
//! # Config File Format
//!
//! ```text
//! # config/config.csv
//! WIDTH, 80
//! HEIGHT, 25
//! EXTENDED_MODE, false
//! STEP_TIME, 100
//! SEED, 42
//! ```
//!
//! Keys for window settings (colors, fonts, text files) are
//! accepted and ignored.

use crate::interpreter::engine::EngineConfig;
use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default location of the config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config.csv";

const KNOWN_KEYS: [&str; 5] = ["WIDTH", "HEIGHT", "EXTENDED_MODE", "STEP_TIME", "SEED"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration file incorrectly formatted at line {line_number}: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Width of a blank grid
    pub width: usize,
    /// Height of a blank grid
    pub height: usize,
    pub extended_mode: bool,
    /// Interval between automatic steps
    pub step_time: Duration,
    /// Seed for `?`; random when absent
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 80,
            height: 25,
            extended_mode: false,
            step_time: Duration::from_millis(100),
            seed: None,
        }
    }
}

impl Config {
    /// Load from `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text)?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Load from `path`, or fall back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse config text; missing keys keep their defaults
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let entries = parse_entries(text)?;
        let mut config = Config::default();

        for key in entries.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                debug!(%key, "ignoring configuration key");
            }
        }

        if let Some(value) = entries.get("WIDTH") {
            config.width = parse_dimension("WIDTH", value)?;
        }
        if let Some(value) = entries.get("HEIGHT") {
            config.height = parse_dimension("HEIGHT", value)?;
        }
        if let Some(value) = entries.get("EXTENDED_MODE") {
            config.extended_mode = parse_bool("EXTENDED_MODE", value)?;
        }
        if let Some(value) = entries.get("STEP_TIME") {
            let millis: u64 = value.parse().map_err(|e| invalid("STEP_TIME", value, e))?;
            config.step_time = Duration::from_millis(millis);
        }
        if let Some(value) = entries.get("SEED") {
            config.seed = Some(value.parse().map_err(|e| invalid("SEED", value, e))?);
        }

        Ok(config)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            extended_mode: self.extended_mode,
            seed: self.seed,
        }
    }
}

/// Split config text into a key → value map
fn parse_entries(text: &str) -> Result<FxHashMap<String, String>, ConfigError> {
    let mut entries = FxHashMap::default();
    for (index, line) in text.lines().enumerate() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let mut columns = line.splitn(3, ',').map(str::trim);
        match (columns.next(), columns.next()) {
            (Some(key), Some(value)) if !key.is_empty() => {
                entries.insert(key.to_string(), value.to_string());
            }
            _ => {
                return Err(ConfigError::MalformedLine {
                    line_number: index + 1,
                    line: line.to_string(),
                })
            }
        }
    }
    Ok(entries)
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_dimension(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.parse::<usize>() {
        Ok(0) => Err(invalid(key, value, "must be at least 1")),
        Ok(n) => Ok(n),
        Err(e) => Err(invalid(key, value, e)),
    }
}

/// Only the exact strings `true` and `false` are accepted
fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_known_keys() {
        let config = Config::parse(
            "# comment\n\nWIDTH, 40\nHEIGHT,10\nEXTENDED_MODE, true\nSTEP_TIME, 250, ms\nSEED, 9\n",
        )
        .unwrap();
        assert_eq!(
            config,
            Config {
                width: 40,
                height: 10,
                extended_mode: true,
                step_time: Duration::from_millis(250),
                seed: Some(9),
            }
        );
    }

    #[test]
    fn huge_dimensions_fail_when_building_grid() {
        use crate::memory::grid::{Grid, GridError};

        let config = Config::parse("WIDTH, 4294967296\nHEIGHT, 4294967296\n").unwrap();
        assert!(matches!(
            Grid::blank(config.width, config.height),
            Err(GridError::TooLarge { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = Config::parse("FOREGROUND_COLOR, 255_255_255\nFONT_PATH, x.ttf").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn line_without_value_is_malformed() {
        let err = Config::parse("WIDTH, 10\nHEIGHT").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MalformedLine { line_number: 2, .. }
        ));
    }

    #[test]
    fn booleans_are_strict() {
        assert!(Config::parse("EXTENDED_MODE, True").is_err());
        assert!(Config::parse("EXTENDED_MODE, 1").is_err());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = Config::parse("WIDTH, 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "WIDTH", .. }));
        assert!(Config::parse("HEIGHT, -3").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.csv")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "WIDTH, 12").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 25);
    }
}
