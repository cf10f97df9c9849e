//! Reusable stream buffer.
//!
//! Accumulates an input byte stream into a growable in-memory buffer
//! suitable for handing to an [`ImageDecoder`](crate::ImageDecoder).
//!
//! # Reuse semantics
//!
//! The buffer is an owned scratch resource on the instance and is reused
//! across calls: the first [`fill`](StreamBuffer::fill) sizes it to the
//! stream, subsequent fills read into the existing allocation and only
//! grow it (doubling, with a 64 KiB minimum step) when a stream turns out
//! to be larger. A caller decoding many same-sized images through one
//! loader therefore allocates once.
//!
//! Because of this scratch state the type is deliberately not shareable
//! between concurrent callers; give each caller its own instance.
//!
//! # Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use tenmat_loader::StreamBuffer;
//!
//! let mut sb = StreamBuffer::new();
//! let bytes = sb.fill(Cursor::new(vec![7u8; 1000]))?;
//! assert_eq!(bytes.len(), 1000);
//! # Ok::<(), tenmat_core::Error>(())
//! ```

use std::io::Read;

use tenmat_core::{Error, Result};
use tracing::trace;

/// Minimum capacity growth step when a fill outgrows the buffer.
pub const MIN_BUFFER_STEP: usize = 64 * 1024;

/// Hard cap on buffer capacity (decode-input limit).
pub const MAX_BUFFER_BYTES: usize = i32::MAX as usize;

/// Reads until `buf` is full or the stream ends; returns bytes read.
fn read_full<R: Read>(reader: &mut R, mut buf: &mut [u8]) -> Result<usize> {
    let mut total = 0;
    while !buf.is_empty() {
        let n = reader.read(buf)?;
        if n == 0 {
            break;
        }
        total += n;
        buf = &mut buf[n..];
    }
    Ok(total)
}

/// Growable byte buffer reused across stream reads.
///
/// Not safe for concurrent use; each concurrent caller needs its own
/// instance (see module docs).
#[derive(Debug)]
pub struct StreamBuffer {
    /// Current allocation; length is the allocated capacity.
    buf: Vec<u8>,
    /// Length of the valid prefix after the last fill.
    valid: usize,
    /// Capacity cap (defaults to [`MAX_BUFFER_BYTES`]).
    max_bytes: usize,
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamBuffer {
    /// Creates an empty buffer; the first fill sizes it to its stream.
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            valid: 0,
            max_bytes: MAX_BUFFER_BYTES,
        }
    }

    /// Creates a buffer with `initial` bytes preallocated.
    pub fn with_capacity(initial: usize) -> Self {
        Self {
            buf: vec![0; initial],
            valid: 0,
            max_bytes: MAX_BUFFER_BYTES,
        }
    }

    /// Overrides the capacity cap. Used to exercise overflow handling.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Current allocated capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Length of the valid prefix after the last fill.
    #[inline]
    pub fn valid_len(&self) -> usize {
        self.valid
    }

    /// Reads `reader` to end-of-stream and returns the bytes read.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if the stream produced zero bytes
    /// - [`Error::BufferOverflow`] if the stream needs more than the
    ///   capacity cap
    /// - [`Error::Io`] on read failure
    pub fn fill<R: Read>(&mut self, mut reader: R) -> Result<&[u8]> {
        if self.buf.is_empty() {
            let mut data = Vec::new();
            reader.read_to_end(&mut data)?;
            if data.is_empty() {
                return Err(Error::EmptyInput);
            }
            if data.len() > self.max_bytes {
                return Err(Error::buffer_overflow(data.len(), self.max_bytes));
            }
            self.valid = data.len();
            self.buf = data;
            return Ok(&self.buf[..self.valid]);
        }

        let mut total = read_full(&mut reader, &mut self.buf)?;
        if total == 0 {
            return Err(Error::EmptyInput);
        }
        if total < self.buf.len() {
            // Got everything; the allocation is kept for the next call.
            self.valid = total;
            return Ok(&self.buf[..total]);
        }

        // Buffer is full and the stream may have more: grow and keep reading.
        loop {
            let old_len = self.buf.len();
            if old_len >= self.max_bytes {
                return Err(Error::buffer_overflow(old_len + 1, self.max_bytes));
            }
            let increase = old_len.max(MIN_BUFFER_STEP);
            let new_len = old_len.saturating_add(increase).min(self.max_bytes);
            trace!(old_len, new_len, "Growing stream buffer");
            self.buf.resize(new_len, 0);

            let n = read_full(&mut reader, &mut self.buf[old_len..])?;
            total += n;
            if n < new_len - old_len {
                break;
            }
        }
        self.valid = total;
        Ok(&self.buf[..total])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_first_fill_reads_everything() {
        let data: Vec<u8> = (0..=255).cycle().take(1000).collect();
        let mut sb = StreamBuffer::new();
        let out = sb.fill(Cursor::new(data.clone())).unwrap();
        assert_eq!(out, &data[..]);
        assert_eq!(sb.capacity(), 1000);
    }

    #[test]
    fn test_empty_stream_fails() {
        let mut sb = StreamBuffer::new();
        assert!(matches!(
            sb.fill(Cursor::new(Vec::new())),
            Err(Error::EmptyInput)
        ));
        // Also on a reused buffer.
        let mut sb = StreamBuffer::with_capacity(128);
        assert!(matches!(
            sb.fill(Cursor::new(Vec::new())),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_reuse_without_growth() {
        let mut sb = StreamBuffer::new();
        sb.fill(Cursor::new(vec![1u8; 500])).unwrap();
        let cap = sb.capacity();
        let out = sb.fill(Cursor::new(vec![2u8; 300])).unwrap();
        assert_eq!(out, &vec![2u8; 300][..]);
        assert_eq!(sb.capacity(), cap);
    }

    #[test]
    fn test_growth_preserves_content_and_bounds_steps() {
        // 200 KiB through a buffer starting well under 64 KiB.
        let initial = 16 * 1024;
        let data: Vec<u8> = (0..200 * 1024).map(|i| (i % 251) as u8).collect();
        let mut sb = StreamBuffer::with_capacity(initial);
        let out = sb.fill(Cursor::new(data.clone())).unwrap();
        assert!(out.len() >= data.len());
        assert_eq!(&out[..data.len()], &data[..]);
        // Doubling from 16 KiB (with a 64 KiB minimum step) reaches
        // 200 KiB in at most ceil(log2(200/16)) = 4 steps.
        assert!(sb.capacity() <= initial * 2usize.pow(4) + MIN_BUFFER_STEP);
    }

    #[test]
    fn test_exact_fit_then_eof() {
        // Stream length equals capacity exactly: one growth probe reads 0
        // further bytes and the full content survives.
        let data = vec![9u8; 4096];
        let mut sb = StreamBuffer::with_capacity(4096);
        let out = sb.fill(Cursor::new(data.clone())).unwrap();
        assert_eq!(&out[..4096], &data[..]);
        assert_eq!(sb.valid_len(), 4096);
    }

    #[test]
    fn test_overflow_past_cap() {
        let mut sb = StreamBuffer::with_capacity(64).with_max_bytes(256);
        let err = sb.fill(Cursor::new(vec![0u8; 1024])).unwrap_err();
        assert!(matches!(err, Error::BufferOverflow { max: 256, .. }));
    }

    #[test]
    fn test_overflow_on_first_fill() {
        let mut sb = StreamBuffer::new().with_max_bytes(100);
        let err = sb.fill(Cursor::new(vec![0u8; 200])).unwrap_err();
        assert!(matches!(err, Error::BufferOverflow { required: 200, max: 100 }));
    }

    #[test]
    fn test_fill_from_file() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(&[42u8; 2048]).unwrap();
        use std::io::Seek;
        file.rewind().unwrap();

        let mut sb = StreamBuffer::new();
        let out = sb.fill(&mut file).unwrap();
        assert_eq!(out, &[42u8; 2048][..]);
    }
}
