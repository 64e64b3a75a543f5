//! # Byte Sinks and Sources
//!
//! The engine never touches files or sockets. It writes through a
//! [`ByteSink`] and reads through a forward-only [`ByteSource`] that either
//! fills the requested buffer completely or fails with
//! [`DecodeError::Truncated`]. There is no seek: anything the decoder needs
//! to look at twice it must buffer itself.
//!
//! `Vec<u8>` and `&[u8]` implement the traits directly. Any
//! `std::io::Write`/`std::io::Read` can be adapted with [`IoSink`] and
//! [`IoSource`].

use std::io::{self, Read, Write};

use crate::error::DecodeError;

/// Destination for encoded bytes.
pub trait ByteSink {
    /// Append `bytes` to the sink.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// Forward-only origin of encoded bytes.
pub trait ByteSource {
    /// Fill `buf` completely, or fail with `Truncated` if the source ends first.
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError>;
}

impl ByteSink for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_bytes(bytes)
    }
}

impl ByteSource for &[u8] {
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        if self.len() < buf.len() {
            return Err(DecodeError::Truncated {
                offset: 0,
                needed: buf.len(),
            });
        }
        let (head, tail) = self.split_at(buf.len());
        buf.copy_from_slice(head);
        *self = tail;
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        (**self).read_exact_into(buf)
    }
}

/// Adapts any `std::io::Write` into a [`ByteSink`].
#[derive(Debug)]
pub struct IoSink<W>(pub W);

impl<W: Write> IoSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self(writer)
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> ByteSink for IoSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.0.write_all(bytes)
    }
}

/// Adapts any `std::io::Read` into a [`ByteSource`].
#[derive(Debug)]
pub struct IoSource<R>(pub R);

impl<R: Read> IoSource<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self(reader)
    }

    /// Recover the wrapped reader.
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        self.0.read_exact(buf).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                DecodeError::Truncated {
                    offset: 0,
                    needed: buf.len(),
                }
            } else {
                DecodeError::Io(e)
            }
        })
    }
}

/// Tracks how many bytes have been consumed from an inner source so that
/// truncation errors report an absolute offset.
pub(crate) struct CountingSource<'a, S: ?Sized> {
    inner: &'a mut S,
    consumed: u64,
}

impl<'a, S: ByteSource + ?Sized> CountingSource<'a, S> {
    pub(crate) fn new(inner: &'a mut S) -> Self {
        Self { inner, consumed: 0 }
    }

    pub(crate) fn consumed(&self) -> u64 {
        self.consumed
    }
}

impl<S: ByteSource + ?Sized> ByteSource for CountingSource<'_, S> {
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        match self.inner.read_exact_into(buf) {
            Ok(()) => {
                self.consumed += buf.len() as u64;
                Ok(())
            }
            Err(DecodeError::Truncated { needed, .. }) => Err(DecodeError::Truncated {
                offset: self.consumed,
                needed,
            }),
            Err(e) => Err(e),
        }
    }
}

/// Read exactly `len` bytes without trusting `len` for an up-front allocation.
///
/// Hostile length prefixes must not be able to reserve memory the source
/// cannot back, so the buffer grows one bounded chunk at a time.
pub(crate) fn read_vec<S: ByteSource + ?Sized>(
    source: &mut S,
    len: usize,
) -> Result<Vec<u8>, DecodeError> {
    const CHUNK: usize = 64 * 1024;

    let mut out = Vec::with_capacity(len.min(CHUNK));
    while out.len() < len {
        let start = out.len();
        let step = (len - start).min(CHUNK);
        out.resize(start + step, 0);
        source.read_exact_into(&mut out[start..])?;
    }
    Ok(out)
}
