//! # Variable-Length Integers (LEB128 + ZigZag)
//!
//! Unsigned values are split into 7-bit groups, least significant first.
//! Every byte except the last has the continuation bit (`0x80`) set.
//! Signed values are zigzag-mapped onto the unsigned domain first so that
//! small negative numbers stay short: `0, -1, 1, -2, 2 ...` become
//! `0, 1, 2, 3, 4 ...`.
//!
//! Decoding accepts at most [`MAX_VARINT_BYTES`] bytes and at most 64
//! significant bits. Under [`VarintPolicy::Strict`] an encoding that ends in
//! a redundant `0x00` group is rejected as non-canonical.

use crate::config::VarintPolicy;
use crate::error::DecodeError;
use crate::io::{ByteSink, ByteSource};

/// Maximum bytes for a 64-bit varint (ceil(64/7) = 10).
pub const MAX_VARINT_BYTES: usize = 10;

/// Encode `value` into `buf`, returning the number of bytes used.
pub fn encode_uvarint_into(mut value: u64, buf: &mut [u8; MAX_VARINT_BYTES]) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = (value as u8 & 0x7F) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

/// Encode `value` as an unsigned varint.
pub fn encode_uvarint(value: u64) -> Vec<u8> {
    let mut buf = [0u8; MAX_VARINT_BYTES];
    let len = encode_uvarint_into(value, &mut buf);
    buf[..len].to_vec()
}

/// Encode `value` as a zigzag signed varint.
pub fn encode_svarint(value: i64) -> Vec<u8> {
    encode_uvarint(zigzag_encode(value))
}

/// Map a signed integer onto the unsigned domain.
#[inline]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[inline]
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Number of bytes in the canonical encoding of `value`.
#[inline]
pub const fn uvarint_len(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    let bits = 64 - value.leading_zeros() as usize;
    (bits + 6) / 7
}

/// Decode an unsigned varint from the front of `buf`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_uvarint(buf: &[u8], policy: VarintPolicy) -> Result<(u64, usize), DecodeError> {
    let mut input = buf;
    let value = read_uvarint(&mut input, policy)?;
    Ok((value, buf.len() - input.len()))
}

/// Decode a zigzag signed varint from the front of `buf`.
pub fn decode_svarint(buf: &[u8], policy: VarintPolicy) -> Result<(i64, usize), DecodeError> {
    let (raw, len) = decode_uvarint(buf, policy)?;
    Ok((zigzag_decode(raw), len))
}

/// Write `value` as an unsigned varint.
pub fn write_uvarint<S: ByteSink + ?Sized>(sink: &mut S, value: u64) -> std::io::Result<()> {
    let mut buf = [0u8; MAX_VARINT_BYTES];
    let len = encode_uvarint_into(value, &mut buf);
    sink.write_bytes(&buf[..len])
}

/// Write `value` as a zigzag signed varint.
pub fn write_svarint<S: ByteSink + ?Sized>(sink: &mut S, value: i64) -> std::io::Result<()> {
    write_uvarint(sink, zigzag_encode(value))
}

/// Read an unsigned varint, one byte at a time.
pub fn read_uvarint<S: ByteSource + ?Sized>(
    source: &mut S,
    policy: VarintPolicy,
) -> Result<u64, DecodeError> {
    let mut result: u64 = 0;
    let mut byte = [0u8; 1];

    for i in 0..MAX_VARINT_BYTES {
        source.read_exact_into(&mut byte)?;
        let b = byte[0];
        let group = u64::from(b & 0x7F);
        let shift = 7 * i as u32;

        // The tenth byte may only contribute the 64th bit.
        if i == MAX_VARINT_BYTES - 1 && (b & 0x80 != 0 || group > 1) {
            return Err(DecodeError::VarintOverflow);
        }

        result |= group << shift;

        if b & 0x80 == 0 {
            if i > 0 && b == 0 {
                match policy {
                    VarintPolicy::Strict => return Err(DecodeError::NonCanonicalVarint),
                    VarintPolicy::Lenient => {
                        tracing::warn!(bytes = i + 1, value = result, "accepted non-canonical varint");
                    }
                }
            }
            return Ok(result);
        }
    }

    Err(DecodeError::VarintOverflow)
}

/// Read a zigzag signed varint.
pub fn read_svarint<S: ByteSource + ?Sized>(
    source: &mut S,
    policy: VarintPolicy,
) -> Result<i64, DecodeError> {
    read_uvarint(source, policy).map(zigzag_decode)
}
