//! # tenmat-ops
//!
//! Geometric preprocessing for image-to-tensor pipelines.
//!
//! Three stages run (in this order) before an image matrix is packed into
//! a tensor:
//!
//! 1. [`convert_channels`] - normalize channel count via the fixed
//!    conversion-code table
//! 2. [`center_crop`] - symmetric trim toward a square aspect ratio
//! 3. [`resize_if_needed`] - scale to the configured target dimensions
//!
//! Pixel-level transforms (color remapping, resampling) go through the
//! [`GeometryKernel`] trait; [`BilinearKernel`] is the built-in pure-Rust
//! implementation.
//!
//! # Quick Start
//!
//! ```rust
//! use tenmat_core::{ImageMatrix, PixelKind};
//! use tenmat_ops::{center_crop, convert_channels, resize_if_needed, BilinearKernel};
//!
//! let kernel = BilinearKernel;
//! let img = ImageMatrix::new(40, 60, 1, PixelKind::U8);
//! let img = convert_channels(img, 3, &kernel)?;
//! let img = center_crop(img);
//! let img = resize_if_needed(img, 28, 28, &kernel)?;
//! assert_eq!((img.rows(), img.cols(), img.channels()), (28, 28, 3));
//! # Ok::<(), tenmat_core::Error>(())
//! ```
//!
//! # Dependencies
//!
//! - [`tenmat-core`](tenmat_core) - Matrix and error types
//! - [`tracing`] - Structured diagnostics

#![warn(missing_docs)]

pub mod convert;
pub mod crop;
pub mod kernel;
pub mod resize;

pub use convert::{convert_channels, convert_samples};
pub use crop::center_crop;
pub use kernel::{BilinearKernel, ConvertCode, GeometryKernel};
pub use resize::{resample_bilinear, resize_if_needed, MAX_DIM};
