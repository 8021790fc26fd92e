//! # Decoder Configuration
//!
//! Tunable bounds for a decode pass, so preview sizes and the parameter cap
//! are not hardcoded at every call site. Defaults match the producer's own
//! limits; deployments can override them from the environment or a TOML file.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::warn;
use types::MAX_PARAM_BYTES;

/// Default Launch-Function parameter preview length
pub const DEFAULT_PARAM_PREVIEW_BYTES: usize = 64;

/// Default opaque preview length for unknown message types
pub const DEFAULT_UNKNOWN_PREVIEW_BYTES: usize = 256;

/// Decode pass configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Upper bound on Launch-Function parameter bytes considered available
    pub max_param_bytes: usize,

    /// Parameter bytes carried in a Launch-Function record
    pub param_preview_bytes: usize,

    /// Payload bytes carried for an unknown message type
    pub unknown_preview_bytes: usize,

    /// Times a transient-empty source read is retried before the bytes
    /// obtained so far are taken as "all that is available"
    pub would_block_retries: u32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_param_bytes: MAX_PARAM_BYTES,
            param_preview_bytes: DEFAULT_PARAM_PREVIEW_BYTES,
            unknown_preview_bytes: DEFAULT_UNKNOWN_PREVIEW_BYTES,
            would_block_retries: 0,
        }
    }
}

impl DecoderConfig {
    /// Load configuration from environment variables with fallback to defaults
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        env_override("APIDUMP_MAX_PARAM_BYTES", &mut config.max_param_bytes);
        env_override(
            "APIDUMP_PARAM_PREVIEW_BYTES",
            &mut config.param_preview_bytes,
        );
        env_override(
            "APIDUMP_UNKNOWN_PREVIEW_BYTES",
            &mut config.unknown_preview_bytes,
        );
        env_override(
            "APIDUMP_WOULD_BLOCK_RETRIES",
            &mut config.would_block_retries,
        );

        config
    }

    /// Load and validate a TOML config file
    ///
    /// Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML config text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_param_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_param_bytes must be non-zero".to_string(),
            ));
        }
        if self.param_preview_bytes > self.max_param_bytes {
            return Err(ConfigError::Invalid(format!(
                "param_preview_bytes ({}) exceeds max_param_bytes ({})",
                self.param_preview_bytes, self.max_param_bytes
            )));
        }
        Ok(())
    }
}

fn env_override<T: FromStr>(name: &str, target: &mut T) {
    if let Ok(val) = std::env::var(name) {
        match val.parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!("Ignoring {}={:?}: not a valid value", name, val),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_producer_limits() {
        let config = DecoderConfig::default();
        assert_eq!(config.max_param_bytes, 4096);
        assert_eq!(config.param_preview_bytes, 64);
        assert_eq!(config.unknown_preview_bytes, 256);
        assert_eq!(config.would_block_retries, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DecoderConfig::from_toml_str("unknown_preview_bytes = 32\n").unwrap();
        assert_eq!(config.unknown_preview_bytes, 32);
        assert_eq!(config.max_param_bytes, 4096);
    }

    #[test]
    fn test_invalid_toml_values_rejected() {
        let err = DecoderConfig::from_toml_str("max_param_bytes = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = DecoderConfig::from_toml_str(
            "max_param_bytes = 16\nparam_preview_bytes = 64\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = DecoderConfig::from_toml_str("max_param_bytes = \"lots\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_param_bytes = 1024").unwrap();
        writeln!(file, "would_block_retries = 3").unwrap();

        let config = DecoderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_param_bytes, 1024);
        assert_eq!(config.would_block_retries, 3);
    }

    #[test]
    fn test_from_missing_file() {
        let err = DecoderConfig::from_file("/nonexistent/apidump.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("APIDUMP_UNKNOWN_PREVIEW_BYTES", "12");
        std::env::set_var("APIDUMP_WOULD_BLOCK_RETRIES", "not-a-number");
        let config = DecoderConfig::from_env();
        std::env::remove_var("APIDUMP_UNKNOWN_PREVIEW_BYTES");
        std::env::remove_var("APIDUMP_WOULD_BLOCK_RETRIES");

        assert_eq!(config.unknown_preview_bytes, 12);
        assert_eq!(config.would_block_retries, 0);
    }
}
