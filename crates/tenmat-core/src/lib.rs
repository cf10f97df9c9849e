//! # tenmat-core
//!
//! Core types for image-matrix/tensor marshaling.
//!
//! This crate provides the foundational types used throughout the tenmat
//! workspace:
//!
//! - [`PixelKind`], [`DType`] - Element kinds for matrices and tensors
//! - [`ImageMatrix`] - Row-major, interleaved-channel pixel buffer
//! - [`Tensor`] - Channel-major, strided numeric buffer
//! - [`Error`], [`Result`] - Unified error handling
//!
//! ## Layout Conventions
//!
//! The two containers differ only in where the channel axis sits:
//!
//! ```text
//! ImageMatrix (interleaved):  buffer[(row * cols + col) * channels + ch]
//! Tensor rank 3 (channel-major): [channels, rows, cols]
//! Tensor rank 4:                 [batch, channels, rows, cols]
//! ```
//!
//! Transposing between the two is the job of `tenmat-loader`.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies:
//!
//! ```text
//! tenmat-core (this crate)
//!    ^
//!    |
//!    +-- tenmat-ops (channel conversion, crop, resize)
//!    +-- tenmat-loader (stream buffering, pack/unpack, pipeline)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod dtype;
pub mod error;
pub mod matrix;
pub mod tensor;

// Re-exports for convenience
pub use dtype::{default_unpack_kind, DType, PixelKind};
pub use error::{Error, Result};
pub use matrix::{ImageMatrix, MatrixBuf};
pub use tensor::{Location, ScalarStore, Tensor, TensorBuf};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use tenmat_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::dtype::{DType, PixelKind};
    pub use crate::error::{Error, Result};
    pub use crate::matrix::{ImageMatrix, MatrixBuf};
    pub use crate::tensor::{Location, ScalarStore, Tensor, TensorBuf};
}
