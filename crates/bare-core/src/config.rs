//! # Codec Configuration
//!
//! Decoder and validator policies. Defaults are the strict reading of the
//! format: non-minimal varints are rejected and maps may only be keyed by
//! strings, integers, enums, and bools. Override via environment variables,
//! a YAML document, or explicit construction.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default upper bound on any length prefix read from the wire (64 MiB).
pub const DEFAULT_MAX_LENGTH: u64 = 64 * 1024 * 1024;

/// How the decoder treats varints that are not in minimal form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarintPolicy {
    /// Reject non-minimal encodings with `NonCanonicalVarint`.
    #[default]
    Strict,
    /// Accept non-minimal encodings and log a warning.
    Lenient,
}

impl FromStr for VarintPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(other.to_string()),
        }
    }
}

/// Which descriptors may key a map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapKeyPolicy {
    /// Strings, bools, and integer kinds (including enums) only.
    #[default]
    Strict,
    /// Additionally admit `data` keys, compared bytewise.
    Permissive,
}

impl FromStr for MapKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(other.to_string()),
        }
    }
}

/// Policies shared by the validator, encoder, and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Canonical-form enforcement for decoded varints.
    pub varint_policy: VarintPolicy,
    /// Legal map key descriptors.
    pub map_key_policy: MapKeyPolicy,
    /// Largest string/data byte count or array/map element count the
    /// decoder accepts from a length prefix.
    pub max_length: u64,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            varint_policy: VarintPolicy::Strict,
            map_key_policy: MapKeyPolicy::Strict,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl CodecConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `BARE_VARINT_POLICY` — `strict` (default) or `lenient`
    /// - `BARE_MAP_KEY_POLICY` — `strict` (default) or `permissive`
    /// - `BARE_MAX_LENGTH` — positive integer (default: 67108864)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = env_var("BARE_VARINT_POLICY") {
            config.varint_policy = raw
                .parse()
                .map_err(|value| ConfigError::InvalidPolicy("BARE_VARINT_POLICY".into(), value))?;
        }
        if let Some(raw) = env_var("BARE_MAP_KEY_POLICY") {
            config.map_key_policy = raw
                .parse()
                .map_err(|value| ConfigError::InvalidPolicy("BARE_MAP_KEY_POLICY".into(), value))?;
        }
        if let Some(raw) = env_var("BARE_MAX_LENGTH") {
            config.max_length = parse_max_length("BARE_MAX_LENGTH", &raw)?;
        }
        Ok(config)
    }

    /// Parse configuration from a YAML document. Omitted keys take defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        if config.max_length == 0 {
            return Err(ConfigError::InvalidNumber(
                "max_length".into(),
                "0".into(),
            ));
        }
        Ok(config)
    }

    /// Return a copy with the given varint policy.
    pub fn with_varint_policy(mut self, policy: VarintPolicy) -> Self {
        self.varint_policy = policy;
        self
    }

    /// Return a copy with the given map key policy.
    pub fn with_map_key_policy(mut self, policy: MapKeyPolicy) -> Self {
        self.map_key_policy = policy;
        self
    }

    /// Return a copy with the given length limit.
    pub fn with_max_length(mut self, max_length: u64) -> Self {
        self.max_length = max_length;
        self
    }
}

fn env_var(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.trim().is_empty())
}

fn parse_max_length(var: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidNumber(var.to_string(), raw.to_string())),
        Ok(n) => Ok(n),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A policy name was not recognized. Holds the setting and the raw value.
    #[error("invalid policy for {0}: '{1}'")]
    InvalidPolicy(String, String),
    /// A length limit was not a positive integer.
    #[error("invalid positive integer for {0}: '{1}'")]
    InvalidNumber(String, String),
    /// The YAML document could not be parsed.
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
