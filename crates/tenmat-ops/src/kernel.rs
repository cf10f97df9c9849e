//! Geometry kernel seam and the channel-conversion code table.
//!
//! The pipeline delegates its two pixel-level transforms - color-space
//! channel remapping and resampling - to a [`GeometryKernel`]. The built-in
//! [`BilinearKernel`] covers both with pure-Rust implementations; callers
//! integrating an external imaging library (OpenCV bindings, SIMD kernels)
//! implement the trait themselves.
//!
//! # Conversion codes
//!
//! Channel remapping is driven by a closed table over the (source, target)
//! channel pair, mirroring the fixed `cvtColor` code lookup of classic
//! image loaders. Exactly six pairs are defined:
//!
//! | source | target | code |
//! |--------|--------|------|
//! | 1 | 3 | [`ConvertCode::Gray2Rgb`] |
//! | 1 | 4 | [`ConvertCode::Gray2Rgba`] |
//! | 3 | 1 | [`ConvertCode::Rgb2Gray`] |
//! | 3 | 4 | [`ConvertCode::Rgb2Rgba`] |
//! | 4 | 1 | [`ConvertCode::Rgba2Gray`] |
//! | 4 | 3 | [`ConvertCode::Rgba2Rgb`] |
//!
//! Any other pair has no code and the conversion fails.

use tenmat_core::{ImageMatrix, Result};

use crate::convert::convert_samples;
use crate::resize::resample_bilinear;

/// Color-transform code for a supported channel-pair conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvertCode {
    /// 1 -> 3: replicate gray into R, G, B.
    Gray2Rgb,
    /// 1 -> 4: replicate gray, opaque alpha.
    Gray2Rgba,
    /// 3 -> 1: luma-weighted collapse.
    Rgb2Gray,
    /// 3 -> 4: append opaque alpha.
    Rgb2Rgba,
    /// 4 -> 1: luma-weighted collapse, alpha dropped.
    Rgba2Gray,
    /// 4 -> 3: drop alpha.
    Rgba2Rgb,
}

impl ConvertCode {
    /// Looks up the conversion code for a (source, target) channel pair.
    ///
    /// Returns `None` for any pair outside the fixed table.
    pub fn for_channels(src: u32, target: u32) -> Option<Self> {
        match (src, target) {
            (1, 3) => Some(Self::Gray2Rgb),
            (1, 4) => Some(Self::Gray2Rgba),
            (3, 1) => Some(Self::Rgb2Gray),
            (3, 4) => Some(Self::Rgb2Rgba),
            (4, 1) => Some(Self::Rgba2Gray),
            (4, 3) => Some(Self::Rgba2Rgb),
            _ => None,
        }
    }

    /// Source channel count this code expects.
    #[inline]
    pub const fn src_channels(&self) -> u32 {
        match self {
            Self::Gray2Rgb | Self::Gray2Rgba => 1,
            Self::Rgb2Gray | Self::Rgb2Rgba => 3,
            Self::Rgba2Gray | Self::Rgba2Rgb => 4,
        }
    }

    /// Channel count this code produces.
    #[inline]
    pub const fn dst_channels(&self) -> u32 {
        match self {
            Self::Rgb2Gray | Self::Rgba2Gray => 1,
            Self::Gray2Rgb | Self::Rgba2Rgb => 3,
            Self::Gray2Rgba | Self::Rgb2Rgba => 4,
        }
    }
}

/// External pixel-transform primitives used by the pipeline.
///
/// Both methods allocate and return a new matrix; the input is never
/// mutated. Implementations must produce exactly the dimensions/channel
/// counts requested.
pub trait GeometryKernel {
    /// Applies the color transform for `code`, producing a matrix with
    /// `code.dst_channels()` channels and unchanged spatial dims.
    fn convert_color(&self, src: &ImageMatrix, code: ConvertCode) -> Result<ImageMatrix>;

    /// Resamples `src` to exactly `rows x cols`, preserving channel count
    /// and element kind.
    fn resize(&self, src: &ImageMatrix, rows: u32, cols: u32) -> Result<ImageMatrix>;
}

/// Built-in pure-Rust kernel: Rec.709 luma channel remapping and
/// separable two-pass bilinear resampling.
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearKernel;

impl GeometryKernel for BilinearKernel {
    fn convert_color(&self, src: &ImageMatrix, code: ConvertCode) -> Result<ImageMatrix> {
        convert_samples(src, code)
    }

    fn resize(&self, src: &ImageMatrix, rows: u32, cols: u32) -> Result<ImageMatrix> {
        resample_bilinear(src, rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_exactly_six_pairs() {
        let mut defined = 0;
        for src in 0..6 {
            for dst in 0..6 {
                if let Some(code) = ConvertCode::for_channels(src, dst) {
                    assert_eq!(code.src_channels(), src);
                    assert_eq!(code.dst_channels(), dst);
                    defined += 1;
                }
            }
        }
        assert_eq!(defined, 6);
    }

    #[test]
    fn test_undefined_pairs() {
        assert!(ConvertCode::for_channels(2, 5).is_none());
        assert!(ConvertCode::for_channels(1, 1).is_none());
        assert!(ConvertCode::for_channels(3, 2).is_none());
        assert!(ConvertCode::for_channels(0, 3).is_none());
    }
}
