//! # bare CLI entry point
//!
//! Parses command-line arguments, resolves the codec configuration, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bare_cli::decode::{run_decode, DecodeArgs};
use bare_cli::describe::{run_describe, DescribeArgs};
use bare_cli::resolve_config;
use bare_cli::varint::{run_varint, VarintArgs};

/// BARE codec toolchain.
///
/// Inspects varints and decodes BARE payloads against schemas persisted
/// as JSON descriptor trees.
#[derive(Parser, Debug)]
#[command(name = "bare", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML codec configuration. Defaults to BARE_* environment variables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Accept non-minimal varint encodings.
    #[arg(long, global = true)]
    lenient_varints: bool,

    /// Allow `data` map keys.
    #[arg(long, global = true)]
    permissive_map_keys: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode or decode a single varint.
    Varint(VarintArgs),

    /// Print a schema file in BARE notation.
    Describe(DescribeArgs),

    /// Decode a hex payload against a schema file and print it as JSON.
    Decode(DecodeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = resolve_config(
        cli.config.as_deref(),
        cli.lenient_varints,
        cli.permissive_map_keys,
    )
    .and_then(|config| match &cli.command {
        Commands::Varint(args) => run_varint(args, &config),
        Commands::Describe(args) => run_describe(args),
        Commands::Decode(args) => run_decode(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
