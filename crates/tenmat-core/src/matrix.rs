//! Image matrix buffer type.
//!
//! This module provides [`ImageMatrix`], the decoder-side pixel container:
//! a row-major buffer with channels interleaved per pixel.
//!
//! # Memory Layout
//!
//! Samples are stored row-major, top-to-bottom, channels innermost:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! The sample for `(row, col, channel)` lives at flat index
//! `(row * cols + col) * channels + channel`.
//!
//! # Storage
//!
//! The buffer is a closed tagged variant over the element kind
//! ([`MatrixBuf`]), so callers dispatch on the kind once per operation and
//! run a typed, branch-free inner loop. Per-sample access as f64 is
//! available through [`ImageMatrix::sample`] for generic paths.
//!
//! # Usage
//!
//! ```rust
//! use tenmat_core::{ImageMatrix, PixelKind};
//!
//! let mut img = ImageMatrix::new(4, 4, 3, PixelKind::U8);
//! img.set_sample(0, 0, 1, 200.0);
//! assert_eq!(img.sample(0, 0, 1), 200.0);
//! assert_eq!(img.elem_count(), 48);
//! ```
//!
//! # Used By
//!
//! - `tenmat-ops` - Channel conversion, crop, resize
//! - `tenmat-loader` - Tensor packing/unpacking

use crate::dtype::PixelKind;
use crate::error::{Error, Result};

/// Tagged sample storage for an [`ImageMatrix`].
///
/// One variant per [`PixelKind`]; the matrix's kind is derived from the
/// active variant so the two can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixBuf {
    /// 8-bit unsigned samples.
    U8(Vec<u8>),
    /// 16-bit unsigned samples.
    U16(Vec<u16>),
    /// 32-bit signed samples.
    I32(Vec<i32>),
    /// Single-precision samples.
    F32(Vec<f32>),
    /// Double-precision samples.
    F64(Vec<f64>),
}

impl MatrixBuf {
    /// Number of samples in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    /// Returns `true` if the buffer holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element kind stored by this buffer.
    #[inline]
    pub const fn kind(&self) -> PixelKind {
        match self {
            Self::U8(_) => PixelKind::U8,
            Self::U16(_) => PixelKind::U16,
            Self::I32(_) => PixelKind::I32,
            Self::F32(_) => PixelKind::F32,
            Self::F64(_) => PixelKind::F64,
        }
    }

    /// Allocates a zero-filled buffer of `len` samples of `kind`.
    pub fn zeros(kind: PixelKind, len: usize) -> Self {
        match kind {
            PixelKind::U8 => Self::U8(vec![0; len]),
            PixelKind::U16 => Self::U16(vec![0; len]),
            PixelKind::I32 => Self::I32(vec![0; len]),
            PixelKind::F32 => Self::F32(vec![0.0; len]),
            PixelKind::F64 => Self::F64(vec![0.0; len]),
        }
    }

    /// Reads the sample at flat index `idx` as f64.
    #[inline]
    pub fn get(&self, idx: usize) -> f64 {
        match self {
            Self::U8(v) => f64::from(v[idx]),
            Self::U16(v) => f64::from(v[idx]),
            Self::I32(v) => f64::from(v[idx]),
            Self::F32(v) => f64::from(v[idx]),
            Self::F64(v) => v[idx],
        }
    }

    /// Writes `value` at flat index `idx`, casting to the stored kind.
    ///
    /// Integer kinds round to nearest and saturate at the kind's range.
    #[inline]
    pub fn set(&mut self, idx: usize, value: f64) {
        match self {
            Self::U8(v) => v[idx] = value.round() as u8,
            Self::U16(v) => v[idx] = value.round() as u16,
            Self::I32(v) => v[idx] = value.round() as i32,
            Self::F32(v) => v[idx] = value as f32,
            Self::F64(v) => v[idx] = value,
        }
    }
}

/// Row-major interleaved-channel pixel buffer.
///
/// The shape is `rows x cols x channels` with channels varying fastest.
/// Geometry stages (channel conversion, crop, resize) consume a matrix by
/// value and either return it unchanged (no-op cases) or return a freshly
/// allocated one, so the superseded buffer is dropped as soon as the next
/// stage owns its output.
///
/// # Example
///
/// ```rust
/// use tenmat_core::{ImageMatrix, MatrixBuf};
///
/// let data: Vec<u8> = (0..12).collect();
/// let img = ImageMatrix::from_buf(2, 2, 3, MatrixBuf::U8(data)).unwrap();
/// assert_eq!(img.sample(1, 1, 2), 11.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMatrix {
    /// Row count (image height).
    rows: u32,
    /// Column count (image width).
    cols: u32,
    /// Channels per pixel.
    channels: u32,
    /// Sample storage.
    buf: MatrixBuf,
}

impl ImageMatrix {
    /// Creates a zero-filled matrix of the given shape and kind.
    pub fn new(rows: u32, cols: u32, channels: u32, kind: PixelKind) -> Self {
        let len = rows as usize * cols as usize * channels as usize;
        Self {
            rows,
            cols,
            channels,
            buf: MatrixBuf::zeros(kind, len),
        }
    }

    /// Creates a matrix from an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the buffer length does not equal
    /// `rows * cols * channels`.
    pub fn from_buf(rows: u32, cols: u32, channels: u32, buf: MatrixBuf) -> Result<Self> {
        let expected = rows as usize * cols as usize * channels as usize;
        if buf.len() != expected {
            return Err(Error::shape_mismatch(expected, buf.len()));
        }
        Ok(Self {
            rows,
            cols,
            channels,
            buf,
        })
    }

    /// Returns the row count (image height).
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Returns the column count (image width).
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Returns the channels per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Returns the sample element kind.
    #[inline]
    pub const fn kind(&self) -> PixelKind {
        self.buf.kind()
    }

    /// Total number of samples (`rows * cols * channels`).
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.rows as usize * self.cols as usize * self.channels as usize
    }

    /// Returns `true` if the matrix has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Returns a reference to the sample storage.
    #[inline]
    pub fn buf(&self) -> &MatrixBuf {
        &self.buf
    }

    /// Returns a mutable reference to the sample storage.
    #[inline]
    pub fn buf_mut(&mut self) -> &mut MatrixBuf {
        &mut self.buf
    }

    /// Consumes the matrix and returns its sample storage.
    #[inline]
    pub fn into_buf(self) -> MatrixBuf {
        self.buf
    }

    /// Flat sample index for `(row, col, channel)`.
    #[inline]
    pub fn index(&self, row: u32, col: u32, channel: u32) -> usize {
        (row as usize * self.cols as usize + col as usize) * self.channels as usize
            + channel as usize
    }

    /// Reads the sample at `(row, col, channel)` as f64.
    #[inline]
    pub fn sample(&self, row: u32, col: u32, channel: u32) -> f64 {
        let idx = self.index(row, col, channel);
        self.buf.get(idx)
    }

    /// Writes the sample at `(row, col, channel)`, casting to the stored kind.
    #[inline]
    pub fn set_sample(&mut self, row: u32, col: u32, channel: u32, value: f64) {
        let idx = self.index(row, col, channel);
        self.buf.set(idx, value);
    }

    /// Typed view of U8 samples, if that is the stored kind.
    #[inline]
    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.buf {
            MatrixBuf::U8(v) => Some(v),
            _ => None,
        }
    }

    /// Typed view of U16 samples, if that is the stored kind.
    #[inline]
    pub fn as_u16(&self) -> Option<&[u16]> {
        match &self.buf {
            MatrixBuf::U16(v) => Some(v),
            _ => None,
        }
    }

    /// Typed view of I32 samples, if that is the stored kind.
    #[inline]
    pub fn as_i32(&self) -> Option<&[i32]> {
        match &self.buf {
            MatrixBuf::I32(v) => Some(v),
            _ => None,
        }
    }

    /// Typed view of F32 samples, if that is the stored kind.
    #[inline]
    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.buf {
            MatrixBuf::F32(v) => Some(v),
            _ => None,
        }
    }

    /// Typed view of F64 samples, if that is the stored kind.
    #[inline]
    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.buf {
            MatrixBuf::F64(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroed() {
        let img = ImageMatrix::new(3, 5, 2, PixelKind::U16);
        assert_eq!(img.rows(), 3);
        assert_eq!(img.cols(), 5);
        assert_eq!(img.channels(), 2);
        assert_eq!(img.kind(), PixelKind::U16);
        assert_eq!(img.elem_count(), 30);
        assert_eq!(img.sample(2, 4, 1), 0.0);
    }

    #[test]
    fn test_from_buf_validates_length() {
        let err = ImageMatrix::from_buf(2, 2, 3, MatrixBuf::U8(vec![0; 5])).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 12,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_interleaved_indexing() {
        let data: Vec<u8> = (0..24).collect();
        let img = ImageMatrix::from_buf(2, 4, 3, MatrixBuf::U8(data)).unwrap();
        // (row * cols + col) * channels + channel
        assert_eq!(img.sample(0, 0, 0), 0.0);
        assert_eq!(img.sample(0, 1, 0), 3.0);
        assert_eq!(img.sample(1, 0, 0), 12.0);
        assert_eq!(img.sample(1, 3, 2), 23.0);
    }

    #[test]
    fn test_set_sample_casts() {
        let mut img = ImageMatrix::new(1, 1, 1, PixelKind::U8);
        img.set_sample(0, 0, 0, 300.0); // saturates
        assert_eq!(img.sample(0, 0, 0), 255.0);
        let mut img = ImageMatrix::new(1, 1, 1, PixelKind::I32);
        img.set_sample(0, 0, 0, -7.9); // rounds to nearest
        assert_eq!(img.sample(0, 0, 0), -8.0);
    }

    #[test]
    fn test_typed_views() {
        let img = ImageMatrix::new(2, 2, 1, PixelKind::F32);
        assert!(img.as_f32().is_some());
        assert!(img.as_u8().is_none());
    }
}
