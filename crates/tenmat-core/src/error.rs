//! Error types for marshaling operations.
//!
//! This module provides a unified error handling system for the whole
//! image-matrix/tensor marshaling pipeline.
//!
//! # Overview
//!
//! The [`Error`] enum covers all failure modes that can occur during:
//! - Stream buffering (empty input, capacity overflow)
//! - Channel-count conversion (unsupported pairs)
//! - Tensor packing/unpacking (size and rank preconditions)
//!
//! # Usage
//!
//! ```rust
//! use tenmat_core::{Error, Result};
//!
//! fn check_capacity(required: usize, max: usize) -> Result<()> {
//!     if required > max {
//!         return Err(Error::buffer_overflow(required, max));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
///
/// Convenience alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during image/tensor marshaling.
///
/// This enum uses [`thiserror`] for automatic [`std::error::Error`] and
/// [`std::fmt::Display`] implementations.
///
/// # Categories
///
/// - **Input errors**: [`EmptyInput`](Error::EmptyInput), [`BufferOverflow`](Error::BufferOverflow)
/// - **Conversion errors**: [`UnsupportedChannelConversion`](Error::UnsupportedChannelConversion)
/// - **Marshaling errors**: [`SizeMismatch`](Error::SizeMismatch), [`UnsupportedRank`](Error::UnsupportedRank)
/// - **Shape errors**: [`ShapeMismatch`](Error::ShapeMismatch)
/// - **I/O errors**: [`Io`](Error::Io)
#[derive(Debug, Error)]
pub enum Error {
    /// Input stream produced zero bytes.
    #[error("could not read image data: input stream was empty")]
    EmptyInput,

    /// Required buffer capacity exceeds the maximum representable size.
    #[error("stream buffer would need {required} bytes, maximum is {max}")]
    BufferOverflow {
        /// Capacity that would be needed.
        required: usize,
        /// Hard capacity limit.
        max: usize,
    },

    /// No conversion code exists for the requested channel pair.
    ///
    /// Only the six pairs between 1, 3 and 4 channels are defined.
    #[error("cannot convert from {from} to {to} channels")]
    UnsupportedChannelConversion {
        /// Source channel count.
        from: u32,
        /// Requested channel count.
        to: u32,
    },

    /// Destination tensor element count does not match the image.
    ///
    /// Packing requires `tensor.elem_count() == rows * cols * channels`;
    /// the destination is never resized silently.
    #[error(
        "tensor of {actual} elements cannot store image {{channels: {channels}, rows: {rows}, columns: {cols}}}"
    )]
    SizeMismatch {
        /// Image channel count.
        channels: u32,
        /// Image row count.
        rows: u32,
        /// Image column count.
        cols: u32,
        /// Destination element count.
        actual: usize,
    },

    /// Tensor rank outside the supported set for this operation.
    #[error("expected a {expected} tensor, but a rank-{rank} tensor was given")]
    UnsupportedRank {
        /// Offending rank.
        rank: usize,
        /// Human-readable description of the supported ranks.
        expected: &'static str,
    },

    /// Buffer length inconsistent with the declared shape.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch {
        /// Element count implied by the shape.
        expected: usize,
        /// Element count actually provided.
        actual: usize,
    },

    /// Invalid target dimensions for a geometric operation.
    #[error("invalid dimensions: {rows}x{cols} ({reason})")]
    InvalidDimensions {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        cols: u32,
        /// Reason why the dimensions are invalid.
        reason: String,
    },

    /// I/O error while reading an input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::BufferOverflow`] error.
    #[inline]
    pub fn buffer_overflow(required: usize, max: usize) -> Self {
        Self::BufferOverflow { required, max }
    }

    /// Creates an [`Error::UnsupportedChannelConversion`] error.
    #[inline]
    pub fn unsupported_conversion(from: u32, to: u32) -> Self {
        Self::UnsupportedChannelConversion { from, to }
    }

    /// Creates an [`Error::SizeMismatch`] error.
    #[inline]
    pub fn size_mismatch(channels: u32, rows: u32, cols: u32, actual: usize) -> Self {
        Self::SizeMismatch {
            channels,
            rows,
            cols,
            actual,
        }
    }

    /// Creates an [`Error::UnsupportedRank`] error.
    #[inline]
    pub fn unsupported_rank(rank: usize, expected: &'static str) -> Self {
        Self::UnsupportedRank { rank, expected }
    }

    /// Creates an [`Error::ShapeMismatch`] error.
    #[inline]
    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(rows: u32, cols: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            rows,
            cols,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is an input-stream error.
    #[inline]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::BufferOverflow { .. } | Self::Io(_)
        )
    }

    /// Returns `true` if this is a marshaling precondition error.
    #[inline]
    pub fn is_precondition_error(&self) -> bool {
        matches!(
            self,
            Self::SizeMismatch { .. } | Self::UnsupportedRank { .. }
        )
    }
}
