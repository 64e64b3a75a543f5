#![deny(missing_docs)]

//! # bare-core — Schema-Driven BARE Codec
//!
//! This crate implements the BARE binary message format: primitive scalars,
//! varints, and recursively composed structs, arrays, maps, optionals, and
//! tagged unions, each written with no framing beyond what the format
//! mandates. Given a schema tree and a value tree, it deterministically
//! produces or consumes an exact byte sequence.
//!
//! ## Design Principles
//!
//! 1. **Closed descriptor enum.** [`TypeDescriptor`] has one variant per wire
//!    kind, each carrying only its own parameters. Validation, encoding, and
//!    decoding are exhaustive `match`es; adding a kind forces every consumer
//!    to handle it.
//!
//! 2. **Explicit, ordered declaration.** Named types are declared through
//!    [`SchemaBuilder`] registration calls. Declaration order is wire order.
//!    Built schemas are immutable and shared behind `Arc`.
//!
//! 3. **Validation is a visible call.** Struct, union, and map values
//!    validate on construction and on every mutation
//!    ([`StructValue::set_field`], [`MapValue::insert`]). Nothing is
//!    intercepted implicitly and no invalid instance is ever observable.
//!
//! 4. **First match wins.** A union value's wire tag is the index of the
//!    first declared member that accepts it, computed identically by the
//!    [`Validator`] and the [`Encoder`].
//!
//! 5. **Strict by default.** Non-minimal varints, unknown union tags, stray
//!    bool and presence bytes, duplicate map keys, and illegal map key types
//!    are all rejected unless [`CodecConfig`] relaxes the relevant policy.
//!
//! ## Crate Policy
//!
//! - The engine never touches files or sockets; it reads from a
//!   [`ByteSource`] and writes to a [`ByteSink`].
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod codec;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod io;
pub mod primitive;
pub mod schema;
pub mod validate;
pub mod value;
pub mod varint;

// Re-export primary types for ergonomic imports.
pub use codec::{decode, encode, from_slice, to_vec, Decoder, Encoder, MAX_ZERO_SIZED_ELEMENTS};
pub use config::{CodecConfig, ConfigError, MapKeyPolicy, VarintPolicy, DEFAULT_MAX_LENGTH};
pub use descriptor::{
    EnumSchema, EnumVariant, FieldDescriptor, FloatWidth, IntRepr, IntWidth, MapSchema,
    StructSchema, TypeDescriptor, UnionSchema,
};
pub use error::{BareError, DecodeError, EncodeError, SchemaError, ValidationError};
pub use io::{ByteSink, ByteSource, IoSink, IoSource};
pub use schema::{zero_value, EnumBuilder, SchemaBuilder, StructBuilder, UnionBuilder};
pub use validate::{validate, Validator};
pub use value::{MapKey, MapValue, StructValue, UnionValue, Value};
