//! # bare-cli — BARE Codec Command-Line Interface
//!
//! Operator tooling over `bare-core`: inspect varints and decode hex
//! payloads against a schema persisted as JSON.
//!
//! ## Subcommands
//!
//! - `varint` — Encode an integer to varint hex, or decode varint hex
//! - `describe` — Print a schema file in BARE notation
//! - `decode` — Decode a hex payload against a schema file and print JSON
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `bare-core`; no codec logic lives here.

use std::path::Path;

use anyhow::{bail, Context, Result};

use bare_core::{CodecConfig, MapKeyPolicy, TypeDescriptor, VarintPolicy};

pub mod decode;
pub mod describe;
pub mod varint;

/// Resolve the effective codec configuration.
///
/// A YAML file, when given, replaces the environment as the base. The
/// command-line switches then override individual policies.
pub fn resolve_config(
    config_file: Option<&Path>,
    lenient_varints: bool,
    permissive_map_keys: bool,
) -> Result<CodecConfig> {
    let mut config = match config_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            CodecConfig::from_yaml_str(&content)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => CodecConfig::from_env().context("invalid codec configuration in environment")?,
    };
    if lenient_varints {
        config = config.with_varint_policy(VarintPolicy::Lenient);
    }
    if permissive_map_keys {
        config = config.with_map_key_policy(MapKeyPolicy::Permissive);
    }
    tracing::debug!(?config, "resolved codec configuration");
    Ok(config)
}

/// Load a JSON-persisted descriptor tree.
pub fn load_schema(path: &Path) -> Result<TypeDescriptor> {
    if !path.exists() {
        bail!("schema file not found: {}", path.display());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse schema: {}", path.display()))
}

/// Parse a hex string. Whitespace and a leading `0x` are ignored.
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(&cleaned);

    if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        bail!("invalid hex character '{c}'");
    }
    if digits.len() % 2 != 0 {
        bail!("hex input has an odd number of digits: {}", digits.len());
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            let pair = &digits[i..i + 2];
            u8::from_str_radix(pair, 16).with_context(|| format!("invalid hex byte '{pair}'"))
        })
        .collect()
}

/// Format bytes as space-separated lowercase hex pairs.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
