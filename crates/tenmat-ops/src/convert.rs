//! Channel-count normalization.
//!
//! [`convert_channels`] is the pipeline-facing operation: it decides
//! whether any conversion is needed, looks up the [`ConvertCode`] for the
//! channel pair, and delegates the pixel transform to the kernel.
//! [`convert_samples`] is the built-in transform used by
//! [`BilinearKernel`](crate::BilinearKernel).

use tenmat_core::{Error, ImageMatrix, Result};
use tracing::debug;

use crate::kernel::{ConvertCode, GeometryKernel};

/// Rec.709 luma weights used when collapsing color to gray.
///
/// `Y = 0.2126*R + 0.7152*G + 0.0722*B`
const LUMA: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Opaque alpha value for the given element kind.
fn opaque_alpha(img: &ImageMatrix) -> f64 {
    use tenmat_core::PixelKind::*;
    match img.kind() {
        U8 => f64::from(u8::MAX),
        U16 => f64::from(u16::MAX),
        I32 => f64::from(i32::MAX),
        F32 | F64 => 1.0,
    }
}

/// Remaps `img` to `target` channels, or returns it untouched.
///
/// No-op if `target <= 0` (unconstrained) or the matrix already has
/// `target` channels. Otherwise the (source, target) pair is resolved
/// through the fixed conversion table and the kernel's color transform
/// produces a new matrix.
///
/// # Errors
///
/// Returns [`Error::UnsupportedChannelConversion`] when the pair has no
/// table entry.
pub fn convert_channels<K: GeometryKernel>(
    img: ImageMatrix,
    target: i32,
    kernel: &K,
) -> Result<ImageMatrix> {
    if target <= 0 || i64::from(img.channels()) == i64::from(target) {
        return Ok(img);
    }
    let target = target as u32;
    let code = ConvertCode::for_channels(img.channels(), target)
        .ok_or_else(|| Error::unsupported_conversion(img.channels(), target))?;
    debug!(from = img.channels(), to = target, ?code, "Converting channels");
    kernel.convert_color(&img, code)
}

/// Built-in pixel transform for a [`ConvertCode`].
///
/// Gray expansion replicates the single channel; collapses use Rec.709
/// luma weights; alpha is appended opaque and dropped silently. The
/// output keeps the source element kind and spatial dims.
pub fn convert_samples(src: &ImageMatrix, code: ConvertCode) -> Result<ImageMatrix> {
    if src.channels() != code.src_channels() {
        return Err(Error::unsupported_conversion(
            src.channels(),
            code.dst_channels(),
        ));
    }
    let (rows, cols) = (src.rows(), src.cols());
    let mut dst = ImageMatrix::new(rows, cols, code.dst_channels(), src.kind());
    let alpha = opaque_alpha(src);

    for r in 0..rows {
        for c in 0..cols {
            match code {
                ConvertCode::Gray2Rgb => {
                    let g = src.sample(r, c, 0);
                    for k in 0..3 {
                        dst.set_sample(r, c, k, g);
                    }
                }
                ConvertCode::Gray2Rgba => {
                    let g = src.sample(r, c, 0);
                    for k in 0..3 {
                        dst.set_sample(r, c, k, g);
                    }
                    dst.set_sample(r, c, 3, alpha);
                }
                ConvertCode::Rgb2Gray | ConvertCode::Rgba2Gray => {
                    let y: f64 = (0..3)
                        .map(|k| src.sample(r, c, k) * LUMA[k as usize])
                        .sum();
                    dst.set_sample(r, c, 0, y);
                }
                ConvertCode::Rgb2Rgba => {
                    for k in 0..3 {
                        dst.set_sample(r, c, k, src.sample(r, c, k));
                    }
                    dst.set_sample(r, c, 3, alpha);
                }
                ConvertCode::Rgba2Rgb => {
                    for k in 0..3 {
                        dst.set_sample(r, c, k, src.sample(r, c, k));
                    }
                }
            }
        }
    }
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::BilinearKernel;
    use approx::assert_relative_eq;
    use tenmat_core::{MatrixBuf, PixelKind};

    fn gray_2x2() -> ImageMatrix {
        ImageMatrix::from_buf(2, 2, 1, MatrixBuf::U8(vec![10, 20, 30, 40])).unwrap()
    }

    #[test]
    fn test_noop_when_unconstrained() {
        let img = gray_2x2();
        let out = convert_channels(img.clone(), -1, &BilinearKernel).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_noop_when_already_target() {
        let img = gray_2x2();
        let out = convert_channels(img.clone(), 1, &BilinearKernel).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_all_table_pairs_produce_target_channels() {
        for (src_ch, dst_ch) in [(1, 3), (1, 4), (3, 1), (3, 4), (4, 1), (4, 3)] {
            let img = ImageMatrix::new(2, 3, src_ch, PixelKind::U8);
            let out = convert_channels(img, dst_ch as i32, &BilinearKernel).unwrap();
            assert_eq!(out.channels(), dst_ch);
            assert_eq!(out.rows(), 2);
            assert_eq!(out.cols(), 3);
        }
    }

    #[test]
    fn test_pair_outside_table_fails() {
        let img = ImageMatrix::new(2, 2, 2, PixelKind::U8);
        let err = convert_channels(img, 5, &BilinearKernel).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedChannelConversion { from: 2, to: 5 }
        ));
    }

    #[test]
    fn test_gray_expansion_replicates() {
        let out = convert_channels(gray_2x2(), 4, &BilinearKernel).unwrap();
        assert_eq!(out.sample(0, 1, 0), 20.0);
        assert_eq!(out.sample(0, 1, 1), 20.0);
        assert_eq!(out.sample(0, 1, 2), 20.0);
        assert_eq!(out.sample(0, 1, 3), 255.0);
    }

    #[test]
    fn test_rgb_to_gray_luma() {
        let img =
            ImageMatrix::from_buf(1, 1, 3, MatrixBuf::F32(vec![0.5, 0.3, 0.2])).unwrap();
        let out = convert_channels(img, 1, &BilinearKernel).unwrap();
        let expected = 0.5 * 0.2126 + 0.3 * 0.7152 + 0.2 * 0.0722;
        assert_relative_eq!(out.sample(0, 0, 0), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_rgba_to_rgb_drops_alpha() {
        let img =
            ImageMatrix::from_buf(1, 1, 4, MatrixBuf::U8(vec![1, 2, 3, 200])).unwrap();
        let out = convert_channels(img, 3, &BilinearKernel).unwrap();
        assert_eq!(out.channels(), 3);
        assert_eq!(out.sample(0, 0, 2), 3.0);
    }
}
