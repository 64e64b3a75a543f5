//! Leaf wire forms: bool, fixed-width integers, floats, strings, and data.
//!
//! Every function here writes or reads exactly one primitive and knows
//! nothing about descriptors or values. The codec composes them.

use std::io;

use crate::config::VarintPolicy;
use crate::descriptor::IntWidth;
use crate::error::DecodeError;
use crate::io::{read_vec, ByteSink, ByteSource};
use crate::varint::{read_uvarint, write_uvarint};

/// Write a bool as `0x00` or `0x01`.
pub fn write_bool<S: ByteSink + ?Sized>(sink: &mut S, value: bool) -> io::Result<()> {
    sink.write_bytes(&[u8::from(value)])
}

/// Read a bool. Any byte other than `0x00` or `0x01` is rejected.
pub fn read_bool<S: ByteSource + ?Sized>(source: &mut S) -> Result<bool, DecodeError> {
    let mut byte = [0u8; 1];
    source.read_exact_into(&mut byte)?;
    match byte[0] {
        0x00 => Ok(false),
        0x01 => Ok(true),
        other => Err(DecodeError::InvalidBool(other)),
    }
}

/// Write the low `width` bytes of `bits`, little-endian.
///
/// Signed callers pass the two's complement bit pattern (`value as u64`).
pub fn write_fixed_int<S: ByteSink + ?Sized>(
    sink: &mut S,
    bits: u64,
    width: IntWidth,
) -> io::Result<()> {
    sink.write_bytes(&bits.to_le_bytes()[..width.bytes()])
}

/// Read an unsigned little-endian integer of `width` bytes.
pub fn read_fixed_uint<S: ByteSource + ?Sized>(
    source: &mut S,
    width: IntWidth,
) -> Result<u64, DecodeError> {
    let mut buf = [0u8; 8];
    source.read_exact_into(&mut buf[..width.bytes()])?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a two's complement little-endian integer of `width` bytes.
pub fn read_fixed_int<S: ByteSource + ?Sized>(
    source: &mut S,
    width: IntWidth,
) -> Result<i64, DecodeError> {
    let raw = read_fixed_uint(source, width)?;
    let unused = 64 - width.bits();
    // Sign-extend from the top bit of the declared width.
    Ok(((raw << unused) as i64) >> unused)
}

/// Write an IEEE-754 single, little-endian.
pub fn write_f32<S: ByteSink + ?Sized>(sink: &mut S, value: f32) -> io::Result<()> {
    sink.write_bytes(&value.to_le_bytes())
}

/// Read an IEEE-754 single. NaN payloads are preserved bit for bit.
pub fn read_f32<S: ByteSource + ?Sized>(source: &mut S) -> Result<f32, DecodeError> {
    let mut buf = [0u8; 4];
    source.read_exact_into(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

/// Write an IEEE-754 double, little-endian.
pub fn write_f64<S: ByteSink + ?Sized>(sink: &mut S, value: f64) -> io::Result<()> {
    sink.write_bytes(&value.to_le_bytes())
}

/// Read an IEEE-754 double. NaN payloads are preserved bit for bit.
pub fn read_f64<S: ByteSource + ?Sized>(source: &mut S) -> Result<f64, DecodeError> {
    let mut buf = [0u8; 8];
    source.read_exact_into(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

/// Read a length or count prefix and check it against `max_length`.
pub fn read_length<S: ByteSource + ?Sized>(
    source: &mut S,
    policy: VarintPolicy,
    max_length: u64,
) -> Result<usize, DecodeError> {
    let length = read_uvarint(source, policy)?;
    if length > max_length {
        return Err(DecodeError::LengthLimitExceeded {
            length,
            limit: max_length,
        });
    }
    usize::try_from(length).map_err(|_| DecodeError::LengthLimitExceeded {
        length,
        limit: usize::MAX as u64,
    })
}

/// Write a string: byte-length prefix, then UTF-8 bytes. No terminator.
pub fn write_string<S: ByteSink + ?Sized>(sink: &mut S, value: &str) -> io::Result<()> {
    write_data(sink, value.as_bytes())
}

/// Read a length-prefixed UTF-8 string.
pub fn read_string<S: ByteSource + ?Sized>(
    source: &mut S,
    policy: VarintPolicy,
    max_length: u64,
) -> Result<String, DecodeError> {
    let bytes = read_data(source, policy, max_length)?;
    Ok(String::from_utf8(bytes)?)
}

/// Write variable-length data: byte-length prefix, then the bytes.
pub fn write_data<S: ByteSink + ?Sized>(sink: &mut S, value: &[u8]) -> io::Result<()> {
    write_uvarint(sink, value.len() as u64)?;
    sink.write_bytes(value)
}

/// Read length-prefixed data.
pub fn read_data<S: ByteSource + ?Sized>(
    source: &mut S,
    policy: VarintPolicy,
    max_length: u64,
) -> Result<Vec<u8>, DecodeError> {
    let len = read_length(source, policy, max_length)?;
    read_vec(source, len)
}

/// Write fixed-length data. The length lives in the schema, not on the wire.
pub fn write_data_fixed<S: ByteSink + ?Sized>(sink: &mut S, value: &[u8]) -> io::Result<()> {
    sink.write_bytes(value)
}

/// Read exactly `len` bytes of fixed-length data.
pub fn read_data_fixed<S: ByteSource + ?Sized>(
    source: &mut S,
    len: usize,
) -> Result<Vec<u8>, DecodeError> {
    read_vec(source, len)
}
