use bytes::{Buf, Bytes};

use crate::error::{NdefError, Result};

/// Bounds-checked sequential reader over a fixed byte buffer.
///
/// Every variable-length NDEF field is preceded by its length, so the cursor
/// only ever moves forward.
#[derive(Debug, Clone)]
pub struct ByteCursor {
    buf: Bytes,
}

impl ByteCursor {
    /// Create a cursor positioned at the start of `buf`.
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self { buf: buf.into() }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// True once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }

    /// Read one byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    /// Read a 4-byte big-endian unsigned integer.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.buf.get_u32())
    }

    /// Read exactly `n` bytes. The returned slice shares the cursor's buffer.
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.ensure(n)?;
        Ok(self.buf.split_to(n))
    }

    /// The unread tail of the buffer.
    pub fn as_slice(&self) -> &[u8] {
        self.buf.chunk()
    }

    fn ensure(&self, requested: usize) -> Result<()> {
        let remaining = self.remaining();
        if requested > remaining {
            return Err(NdefError::OutOfBounds {
                requested,
                remaining,
            });
        }
        Ok(())
    }
}

impl From<&'static [u8]> for ByteCursor {
    fn from(buf: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(buf))
    }
}

impl From<Vec<u8>> for ByteCursor {
    fn from(buf: Vec<u8>) -> Self {
        Self::new(buf)
    }
}
