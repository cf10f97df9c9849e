//! Element kinds for image matrices and tensors.
//!
//! This module provides the canonical definitions for the element types
//! used across the tenmat crates.
//!
//! # Types
//!
//! - [`PixelKind`] - Storage type of an [`ImageMatrix`](crate::ImageMatrix) sample
//! - [`DType`] - Storage type of a [`Tensor`](crate::Tensor) element
//!
//! # Usage
//!
//! ```rust
//! use tenmat_core::dtype::{DType, PixelKind};
//!
//! // Decoders usually hand us 8-bit interleaved pixels
//! let decoded = PixelKind::U8;
//! assert_eq!(decoded.bytes_per_channel(), 1);
//!
//! // ML backends usually want single-precision floats
//! let backend = DType::F32;
//! assert!(backend.is_float());
//! ```

/// Storage type of a single image sample.
///
/// Image matrices are row-major with channels interleaved per pixel; every
/// sample in a matrix shares one `PixelKind`.
///
/// # Variants
///
/// Integer formats:
/// - `U8` - 8-bit unsigned [0, 255] (what most decoders produce)
/// - `U16` - 16-bit unsigned [0, 65535]
/// - `I32` - 32-bit signed
///
/// Floating-point formats:
/// - `F32` - 32-bit single-precision IEEE 754
/// - `F64` - 64-bit double-precision IEEE 754 (unpacker output for f64 tensors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelKind {
    /// 8-bit unsigned integer.
    #[default]
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit signed integer.
    I32,
    /// 32-bit single-precision float.
    F32,
    /// 64-bit double-precision float.
    F64,
}

impl PixelKind {
    /// Number of bytes per channel sample.
    #[inline]
    pub const fn bytes_per_channel(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::I32 => 4,
            Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// Number of bits per channel sample.
    #[inline]
    pub const fn bits(&self) -> u32 {
        (self.bytes_per_channel() * 8) as u32
    }

    /// Whether this is a floating-point format.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Whether this is an integer format.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        !self.is_float()
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl std::fmt::Display for PixelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Storage type of a tensor element.
///
/// Tensors are channel-major and strided. Float kinds have direct typed
/// buffers with fast marshaling paths; everything else is `Generic` and is
/// reached only through the opaque scalar interface
/// ([`ScalarStore`](crate::tensor::ScalarStore)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DType {
    /// 32-bit single-precision float (typical backend input).
    #[default]
    F32,
    /// 64-bit double-precision float.
    F64,
    /// Any other numeric kind, accessed per-element as f64.
    Generic,
}

impl DType {
    /// Whether this is a directly-addressable floating-point buffer.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Default [`PixelKind`] for unpacking a tensor of the given [`DType`].
///
/// F64 tensors unpack to double-precision matrices, everything else to
/// single-precision.
#[inline]
pub const fn default_unpack_kind(dtype: DType) -> PixelKind {
    match dtype {
        DType::F64 => PixelKind::F64,
        _ => PixelKind::F32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_kind_sizes() {
        assert_eq!(PixelKind::U8.bytes_per_channel(), 1);
        assert_eq!(PixelKind::U16.bytes_per_channel(), 2);
        assert_eq!(PixelKind::I32.bytes_per_channel(), 4);
        assert_eq!(PixelKind::F32.bytes_per_channel(), 4);
        assert_eq!(PixelKind::F64.bytes_per_channel(), 8);
        assert_eq!(PixelKind::U16.bits(), 16);
    }

    #[test]
    fn test_is_float() {
        assert!(!PixelKind::U8.is_float());
        assert!(!PixelKind::I32.is_float());
        assert!(PixelKind::F32.is_float());
        assert!(PixelKind::U16.is_integer());
        assert!(DType::F64.is_float());
        assert!(!DType::Generic.is_float());
    }

    #[test]
    fn test_default_unpack_kind() {
        assert_eq!(default_unpack_kind(DType::F32), PixelKind::F32);
        assert_eq!(default_unpack_kind(DType::F64), PixelKind::F64);
        assert_eq!(default_unpack_kind(DType::Generic), PixelKind::F32);
    }

    #[test]
    fn test_display() {
        assert_eq!(PixelKind::U8.to_string(), "u8");
        assert_eq!(DType::Generic.to_string(), "generic");
    }
}
