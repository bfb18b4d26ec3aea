//! Codec configuration.
//!
//! Supports TOML config files, environment variable overrides, and defaults.

use crate::codec::{progressive::DEFAULT_PROGRESSIVE_MIN_FIELDS, LEGACY_SALT};
use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "BUILDID_";

/// Configuration of the build codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Registry snapshot file (default: "./names.json")
    pub registry_path: PathBuf,
    /// Salt of the legacy backend (default: "spicy")
    pub legacy_salt: String,
    /// Progressive decode accepts legacy/v7 results longer than this (default: 8)
    pub progressive_min_fields: usize,
    /// Weapon name replaced during the 4 → 5 migration (default: "Repeater")
    pub retired_weapon: String,
    /// Replacement weapon name (default: "Ostian Repeaters")
    pub successor_weapon: String,
    /// Fail on schema versions outside the known range (default: true)
    pub reject_unknown_versions: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from("./names.json"),
            legacy_salt: LEGACY_SALT.to_string(),
            progressive_min_fields: DEFAULT_PROGRESSIVE_MIN_FIELDS,
            retired_weapon: "Repeater".to_string(),
            successor_weapon: "Ostian Repeaters".to_string(),
            reject_unknown_versions: true,
        }
    }
}

impl CodecConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CodecError::ConfigError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| CodecError::ConfigError(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a TOML file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| CodecError::ConfigError(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), toml)
            .map_err(|e| CodecError::ConfigError(format!("Failed to write config file: {}", e)))?;
        Ok(())
    }

    /// Applies environment variable overrides.
    /// Environment variables are prefixed with `BUILDID_`.
    /// Example: `BUILDID_REGISTRY_PATH=/path` overrides `registry_path`.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by prefixed variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(val) = var("REGISTRY_PATH") {
            self.registry_path = PathBuf::from(val);
        }
        if let Some(val) = var("LEGACY_SALT") {
            self.legacy_salt = val;
        }
        if let Some(val) = var("PROGRESSIVE_MIN_FIELDS") {
            self.progressive_min_fields = val.parse().map_err(|_| {
                CodecError::ConfigError(format!("Invalid progressive_min_fields: {}", val))
            })?;
        }
        if let Some(val) = var("RETIRED_WEAPON") {
            self.retired_weapon = val;
        }
        if let Some(val) = var("SUCCESSOR_WEAPON") {
            self.successor_weapon = val;
        }
        if let Some(val) = var("REJECT_UNKNOWN_VERSIONS") {
            self.reject_unknown_versions = val.parse().map_err(|_| {
                CodecError::ConfigError(format!("Invalid reject_unknown_versions: {}", val))
            })?;
        }
        self.validate()
    }

    /// Checks value constraints.
    pub fn validate(&self) -> Result<()> {
        if self.legacy_salt.is_empty() {
            return Err(CodecError::ConfigError(
                "legacy_salt must not be empty".to_string(),
            ));
        }
        if self.retired_weapon == self.successor_weapon {
            return Err(CodecError::ConfigError(format!(
                "successor_weapon must differ from retired_weapon ({})",
                self.retired_weapon
            )));
        }
        Ok(())
    }
}
