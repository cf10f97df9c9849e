//! Image resampling.
//!
//! Provides the pipeline's scaling stage and the built-in separable
//! bilinear resampler used by [`BilinearKernel`](crate::BilinearKernel).
//!
//! # Example
//!
//! ```rust
//! use tenmat_core::{ImageMatrix, PixelKind};
//! use tenmat_ops::{resize_if_needed, BilinearKernel};
//!
//! let img = ImageMatrix::new(64, 64, 3, PixelKind::U8);
//! let out = resize_if_needed(img, 32, 32, &BilinearKernel).unwrap();
//! assert_eq!((out.rows(), out.cols()), (32, 32));
//! ```

use tenmat_core::{Error, ImageMatrix, Result};
use tracing::debug;

use crate::kernel::GeometryKernel;

/// Maximum representable target dimension; larger requests are clamped.
pub const MAX_DIM: u32 = i32::MAX as u32;

/// Scales `img` to `dst_rows x dst_cols`, or returns it untouched.
///
/// No-op (same allocation returned) if either target dimension is zero or
/// the matrix already has the target dimensions. Targets are clamped to
/// [`MAX_DIM`] before the kernel is invoked.
pub fn resize_if_needed<K: GeometryKernel>(
    img: ImageMatrix,
    dst_rows: u32,
    dst_cols: u32,
    kernel: &K,
) -> Result<ImageMatrix> {
    if dst_rows == 0 || dst_cols == 0 {
        return Ok(img);
    }
    let dst_rows = dst_rows.min(MAX_DIM);
    let dst_cols = dst_cols.min(MAX_DIM);
    if img.rows() == dst_rows && img.cols() == dst_cols {
        return Ok(img);
    }
    debug!(
        from_rows = img.rows(),
        from_cols = img.cols(),
        dst_rows,
        dst_cols,
        "Resizing"
    );
    kernel.resize(&img, dst_rows, dst_cols)
}

/// Triangle (bilinear) filter weight.
#[inline]
fn bilinear_weight(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Separable two-pass bilinear resample to exactly `dst_rows x dst_cols`.
///
/// Works in f64 and casts back to the source element kind at the end, so
/// one implementation covers every [`PixelKind`](tenmat_core::PixelKind).
///
/// # Errors
///
/// Returns [`Error::InvalidDimensions`] if either target dimension is zero
/// or the source has zero area.
pub fn resample_bilinear(src: &ImageMatrix, dst_rows: u32, dst_cols: u32) -> Result<ImageMatrix> {
    if dst_rows == 0 || dst_cols == 0 {
        return Err(Error::invalid_dimensions(
            dst_rows,
            dst_cols,
            "target size must be > 0",
        ));
    }
    if src.is_empty() {
        return Err(Error::invalid_dimensions(
            src.rows(),
            src.cols(),
            "source has zero area",
        ));
    }

    let channels = src.channels() as usize;
    let (src_h, src_w) = (src.rows() as usize, src.cols() as usize);
    let (dst_h, dst_w) = (dst_rows as usize, dst_cols as usize);

    // Source plane in f64, interleaved.
    let mut plane = vec![0.0f64; src_h * src_w * channels];
    for (i, v) in plane.iter_mut().enumerate() {
        *v = src.buf().get(i);
    }

    // Horizontal then vertical pass.
    let temp = resample_axis(&plane, src_w, src_h, channels, dst_w, true);
    let out = resample_axis(&temp, dst_w, src_h, channels, dst_h, false);

    let mut dst = ImageMatrix::new(dst_rows, dst_cols, src.channels(), src.kind());
    for (i, v) in out.iter().enumerate() {
        dst.buf_mut().set(i, *v);
    }
    Ok(dst)
}

/// One resampling pass along either the horizontal or vertical axis.
fn resample_axis(
    src: &[f64],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_len: usize,
    horizontal: bool,
) -> Vec<f64> {
    let src_len = if horizontal { src_w } else { src_h };
    let (out_w, out_h) = if horizontal {
        (dst_len, src_h)
    } else {
        (src_w, dst_len)
    };
    let mut dst = vec![0.0f64; out_w * out_h * channels];
    let scale = src_len as f64 / dst_len as f64;
    let support = scale.max(1.0);

    for d in 0..dst_len {
        // Map destination coordinate to source coordinate.
        let center = (d as f64 + 0.5) * scale - 0.5;
        let lo = ((center - support).floor().max(0.0)) as usize;
        let hi = ((center + support).ceil() as usize).min(src_len - 1);

        let fixed_len = if horizontal { src_h } else { src_w };
        for f in 0..fixed_len {
            let mut sum = vec![0.0f64; channels];
            let mut weight_sum = 0.0f64;

            for s in lo..=hi {
                let w = bilinear_weight((s as f64 - center) / scale.max(1.0));
                if w == 0.0 {
                    continue;
                }
                weight_sum += w;
                let src_idx = if horizontal {
                    (f * src_w + s) * channels
                } else {
                    (s * src_w + f) * channels
                };
                for c in 0..channels {
                    sum[c] += src[src_idx + c] * w;
                }
            }

            let dst_idx = if horizontal {
                (f * out_w + d) * channels
            } else {
                (d * out_w + f) * channels
            };
            if weight_sum > 0.0 {
                for c in 0..channels {
                    dst[dst_idx + c] = sum[c] / weight_sum;
                }
            }
        }
    }

    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::BilinearKernel;
    use approx::assert_relative_eq;
    use tenmat_core::{MatrixBuf, PixelKind};

    #[test]
    fn test_noop_when_dims_match() {
        let img = ImageMatrix::from_buf(
            2,
            2,
            1,
            MatrixBuf::U8(vec![1, 2, 3, 4]),
        )
        .unwrap();
        let before = img.clone();
        let out = resize_if_needed(img, 2, 2, &BilinearKernel).unwrap();
        assert_eq!(out, before);
    }

    #[test]
    fn test_noop_when_target_zero() {
        let img = ImageMatrix::new(4, 4, 3, PixelKind::U8);
        let out = resize_if_needed(img.clone(), 0, 8, &BilinearKernel).unwrap();
        assert_eq!(out, img);
        let out = resize_if_needed(img.clone(), 8, 0, &BilinearKernel).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_resize_produces_exact_dims() {
        let img = ImageMatrix::new(17, 11, 3, PixelKind::U8);
        let out = resize_if_needed(img, 6, 9, &BilinearKernel).unwrap();
        assert_eq!(out.rows(), 6);
        assert_eq!(out.cols(), 9);
        assert_eq!(out.channels(), 3);
        assert_eq!(out.kind(), PixelKind::U8);
    }

    #[test]
    fn test_constant_image_stays_constant() {
        let img = ImageMatrix::from_buf(
            4,
            4,
            1,
            MatrixBuf::F32(vec![0.5; 16]),
        )
        .unwrap();
        let out = resample_bilinear(&img, 8, 8).unwrap();
        for r in 0..8 {
            for c in 0..8 {
                assert_relative_eq!(out.sample(r, c, 0), 0.5, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_upscale_interpolates_between_samples() {
        // Column gradient 0, 100 doubled in width: interior samples lie between.
        let img = ImageMatrix::from_buf(
            1,
            2,
            1,
            MatrixBuf::F32(vec![0.0, 100.0]),
        )
        .unwrap();
        let out = resample_bilinear(&img, 1, 4).unwrap();
        let vals: Vec<f64> = (0..4).map(|c| out.sample(0, c, 0)).collect();
        assert!(vals.windows(2).all(|w| w[0] <= w[1]));
        assert!(vals[0] < 50.0 && vals[3] > 50.0);
    }

    #[test]
    fn test_zero_target_is_kernel_error() {
        let img = ImageMatrix::new(4, 4, 1, PixelKind::U8);
        assert!(matches!(
            resample_bilinear(&img, 0, 4),
            Err(Error::InvalidDimensions { .. })
        ));
    }
}
