//! # tenmat-loader
//!
//! Marshaling between decoded images and backend tensors.
//!
//! The forward direction buffers a byte stream, hands it to an external
//! decoder, runs the geometric preprocessing pipeline, and transposes the
//! resulting interleaved pixels into a channel-major tensor:
//!
//! ```text
//! bytes/stream -> StreamBuffer -> ImageDecoder -> ImageMatrix
//!              -> channels -> crop -> resize -> TensorPacker -> Tensor
//! ```
//!
//! The reverse direction ([`unpack_matrix`]) copies a tensor back into a
//! freshly allocated image matrix with no geometry applied.
//!
//! # Architecture
//!
//! The crate uses a trait-based design at its external seams:
//!
//! - [`ImageDecoder`] - byte-stream decoding (JPEG/PNG/... bindings)
//! - [`GeometryKernel`](tenmat_ops::GeometryKernel) - resampling and
//!   color transforms (built-in bilinear kernel by default)
//!
//! # Quick Start
//!
//! ```rust
//! use tenmat_core::{ImageMatrix, PixelKind};
//! use tenmat_loader::{ImageLoader, LoaderConfig};
//!
//! let loader = ImageLoader::new(
//!     LoaderConfig::new(28, 28).with_channels(1),
//! );
//! let tensor = loader.load_matrix(ImageMatrix::new(56, 56, 3, PixelKind::U8))?;
//! assert_eq!(tensor.dims(), &[1, 28, 28]);
//!
//! // And back again
//! let img = loader.to_matrix(&tensor, None)?;
//! assert_eq!((img.rows(), img.cols(), img.channels()), (28, 28, 1));
//! # Ok::<(), tenmat_core::Error>(())
//! ```
//!
//! # Concurrency
//!
//! Everything here is synchronous, blocking CPU/memory work. A loader
//! instance carries mutable scratch state (its stream buffer) and must
//! not be shared between concurrent callers; instances are independent
//! and share nothing.
//!
//! # Dependencies
//!
//! - [`tenmat-core`](tenmat_core) - Matrix, tensor, and error types
//! - [`tenmat-ops`](tenmat_ops) - Geometry stages
//! - [`tracing`] - Structured diagnostics

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod decode;
mod loader;
mod pack;
mod stream;
mod unpack;

pub use decode::ImageDecoder;
pub use loader::{ImageLoader, LoaderConfig};
pub use pack::TensorPacker;
pub use stream::{StreamBuffer, MAX_BUFFER_BYTES, MIN_BUFFER_STEP};
pub use unpack::unpack_matrix;
