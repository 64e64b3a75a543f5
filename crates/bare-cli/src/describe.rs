//! # Describe Subcommand
//!
//! Print a JSON-persisted schema in BARE notation. The top-level type is
//! printed first, followed by every named type it references, each once.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use bare_core::TypeDescriptor;

use crate::load_schema;

/// Arguments for the `bare describe` subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Path to the schema JSON file.
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,
}

/// Execute the describe subcommand.
pub fn run_describe(args: &DescribeArgs) -> Result<u8> {
    let desc = load_schema(&args.schema)?;
    for line in describe(&desc) {
        println!("{line}");
    }
    Ok(0)
}

/// Render `desc` and every named type reachable from it.
pub fn describe(desc: &TypeDescriptor) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = BTreeSet::new();
    if !is_named(desc) {
        out.push(desc.to_string());
    }
    collect(desc, &mut seen, &mut out);
    out
}

fn is_named(desc: &TypeDescriptor) -> bool {
    matches!(
        desc,
        TypeDescriptor::Struct(_) | TypeDescriptor::Union(_) | TypeDescriptor::Enum(_)
    )
}

fn collect(desc: &TypeDescriptor, seen: &mut BTreeSet<String>, out: &mut Vec<String>) {
    match desc {
        TypeDescriptor::Struct(s) => {
            if seen.insert(s.name().to_string()) {
                out.push(s.declaration());
                for field in s.fields() {
                    collect(&field.ty, seen, out);
                }
            }
        }
        TypeDescriptor::Union(u) => {
            if seen.insert(u.name().to_string()) {
                out.push(u.declaration());
                for member in u.members() {
                    collect(member, seen, out);
                }
            }
        }
        TypeDescriptor::Enum(e) => {
            if seen.insert(e.name().to_string()) {
                out.push(e.declaration());
            }
        }
        TypeDescriptor::Optional { inner } => collect(inner, seen, out),
        TypeDescriptor::Array { element, .. } => collect(element, seen, out),
        TypeDescriptor::Map(m) => {
            collect(&m.key, seen, out);
            collect(&m.value, seen, out);
        }
        TypeDescriptor::Void
        | TypeDescriptor::Bool
        | TypeDescriptor::FixedInt { .. }
        | TypeDescriptor::VarInt { .. }
        | TypeDescriptor::Float { .. }
        | TypeDescriptor::String
        | TypeDescriptor::Data { .. } => {}
    }
}
