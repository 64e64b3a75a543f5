//! # Decode Subcommand
//!
//! Decode a hex payload against a JSON-persisted schema and print the value
//! as pretty JSON. The payload must contain exactly one value.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use bare_core::{CodecConfig, Decoder, TypeDescriptor};

use crate::{load_schema, parse_hex};

/// Arguments for the `bare decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the schema JSON file.
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Hex-encoded payload.
    pub hex: String,
}

/// Execute the decode subcommand.
pub fn run_decode(args: &DecodeArgs, config: &CodecConfig) -> Result<u8> {
    let desc = load_schema(&args.schema)?;
    let json = decode_to_json(&desc, &args.hex, config)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(0)
}

fn decode_to_json(desc: &TypeDescriptor, hex: &str, config: &CodecConfig) -> Result<serde_json::Value> {
    let bytes = parse_hex(hex)?;
    let value = Decoder::new(*config)
        .from_slice(desc, &bytes)
        .with_context(|| format!("failed to decode {} bytes as {desc}", bytes.len()))?;
    Ok(value.to_json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bare_core::SchemaBuilder;
    use serde_json::json;

    fn person() -> TypeDescriptor {
        SchemaBuilder::default()
            .structure("Person")
            .field("id", TypeDescriptor::u32())
            .field("name", TypeDescriptor::string())
            .build()
            .unwrap()
            .into()
    }

    #[test]
    fn decodes_person_vector() {
        let json = decode_to_json(&person(), "01 00 00 00 02 41 6c", &CodecConfig::default()).unwrap();
        assert_eq!(json, json!({"id": 1, "name": "Al"}));
    }

    #[test]
    fn truncated_payload_fails() {
        assert!(decode_to_json(&person(), "01 00 00", &CodecConfig::default()).is_err());
    }

    #[test]
    fn run_with_persisted_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("person.json");
        std::fs::write(&path, serde_json::to_string(&person()).unwrap()).unwrap();

        let args = DecodeArgs {
            schema: path,
            hex: "0100000002416c".to_string(),
        };
        assert_eq!(run_decode(&args, &CodecConfig::default()).unwrap(), 0);
    }
}
