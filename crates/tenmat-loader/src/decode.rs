//! Image decoder seam.
//!
//! Decoding compressed bytes (JPEG, PNG, ...) into an
//! [`ImageMatrix`](tenmat_core::ImageMatrix) is an external concern; this
//! module only defines the trait the pipeline calls. Bindings to an
//! actual codec library implement it; tests use fixture decoders over raw
//! sample bytes.

use tenmat_core::{ImageMatrix, Result};

/// Turns a fully-buffered byte stream into a decoded image matrix.
pub trait ImageDecoder {
    /// Decodes `bytes` into a matrix.
    ///
    /// # Errors
    ///
    /// Implementations report undecodable input through
    /// [`Error`](tenmat_core::Error), typically
    /// [`Error::ShapeMismatch`](tenmat_core::Error::ShapeMismatch) or a
    /// wrapped I/O error.
    fn decode(&self, bytes: &[u8]) -> Result<ImageMatrix>;
}
