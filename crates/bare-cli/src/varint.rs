//! # Varint Subcommand
//!
//! Encode an integer to its varint bytes, or decode varint bytes back to
//! an integer. `--signed` switches both directions to zigzag.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use bare_core::varint::{decode_svarint, decode_uvarint, encode_svarint, encode_uvarint};
use bare_core::CodecConfig;

use crate::{format_hex, parse_hex};

/// Arguments for the `bare varint` subcommand.
#[derive(Args, Debug)]
pub struct VarintArgs {
    #[command(subcommand)]
    pub command: VarintCommand,
}

/// Varint subcommands.
#[derive(Subcommand, Debug)]
pub enum VarintCommand {
    /// Print the varint encoding of an integer as hex.
    Encode {
        /// The integer to encode.
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Zigzag-encode a signed integer.
        #[arg(long)]
        signed: bool,
    },

    /// Decode a hex-encoded varint.
    Decode {
        /// Hex bytes, e.g. "ac02" or "ac 02".
        hex: String,
        /// Interpret the varint as zigzag-encoded.
        #[arg(long)]
        signed: bool,
    },
}

/// Execute the varint subcommand.
pub fn run_varint(args: &VarintArgs, config: &CodecConfig) -> Result<u8> {
    match &args.command {
        VarintCommand::Encode { value, signed } => {
            println!("{}", encode_hex(value, *signed)?);
            Ok(0)
        }
        VarintCommand::Decode { hex, signed } => {
            let (value, consumed, total) = decode_hex(hex, *signed, config)?;
            println!("{value}");
            if consumed < total {
                tracing::warn!(consumed, total, "ignored trailing bytes after varint");
            }
            Ok(0)
        }
    }
}

fn encode_hex(value: &str, signed: bool) -> Result<String> {
    let bytes = if signed {
        let n: i64 = value
            .trim()
            .parse()
            .with_context(|| format!("not a signed 64-bit integer: {value}"))?;
        encode_svarint(n)
    } else {
        let n: u64 = value
            .trim()
            .parse()
            .with_context(|| format!("not an unsigned 64-bit integer: {value}"))?;
        encode_uvarint(n)
    };
    Ok(format_hex(&bytes))
}

/// Returns the decoded value as text, the bytes consumed, and the input length.
fn decode_hex(hex: &str, signed: bool, config: &CodecConfig) -> Result<(String, usize, usize)> {
    let bytes = parse_hex(hex)?;
    if bytes.is_empty() {
        bail!("no bytes to decode");
    }
    let (text, consumed) = if signed {
        let (v, n) = decode_svarint(&bytes, config.varint_policy)?;
        (v.to_string(), n)
    } else {
        let (v, n) = decode_uvarint(&bytes, config.varint_policy)?;
        (v.to_string(), n)
    };
    Ok((text, consumed, bytes.len()))
}
