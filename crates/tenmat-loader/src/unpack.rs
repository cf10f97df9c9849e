//! Tensor-to-image unpacking.
//!
//! The inverse of [`pack`](crate::TensorPacker::pack): copies a
//! channel-major strided [`Tensor`] into a freshly allocated row-major
//! interleaved [`ImageMatrix`]: `dst[row, col, channel] =
//! src[channel, row, col]`.
//!
//! No geometry pipeline runs in this direction; the matrix dimensions
//! come straight from the tensor's spatial and channel axes.

use tenmat_core::{
    default_unpack_kind, Error, ImageMatrix, MatrixBuf, PixelKind, Result, Tensor, TensorBuf,
};
use tracing::trace;

/// Strided-to-interleaved transposing copy with a cast per sample.
fn copy_channel_major<S: Copy, D: Copy>(
    src: &[S],
    dst: &mut [D],
    rows: usize,
    cols: usize,
    channels: usize,
    strides: (usize, usize, usize),
    conv: impl Fn(S) -> D,
) {
    let (s0, s1, s2) = strides;
    for k in 0..channels {
        for i in 0..rows {
            for j in 0..cols {
                dst[(i * cols + j) * channels + k] = conv(src[k * s0 + i * s1 + j * s2]);
            }
        }
    }
}

/// Unpacks `src` into a new image matrix.
///
/// Accepts rank 3 (`[channels, rows, cols]`) or rank 4 with a leading
/// batch dimension of 1. The output element kind is `kind` if given,
/// otherwise f64 tensors unpack to F64 matrices and everything else to
/// F32. f32-to-F32 and f64-to-F64 copies run through a typed strided
/// path; every other pairing goes per-element through f64 scalars.
///
/// # Errors
///
/// Returns [`Error::UnsupportedRank`] for any other rank, or rank 4 with
/// a batch dimension other than 1.
pub fn unpack_matrix(src: &Tensor, kind: Option<PixelKind>) -> Result<ImageMatrix> {
    let axis0 = match src.rank() {
        3 => 0,
        4 if src.dim(0) == 1 => 1,
        rank => {
            return Err(Error::unsupported_rank(
                rank,
                "rank 3 (or rank 4 with batch size 1)",
            ));
        }
    };

    let channels = src.dim(axis0);
    let rows = src.dim(axis0 + 1);
    let cols = src.dim(axis0 + 2);
    let strides = (
        src.stride(axis0),
        src.stride(axis0 + 1),
        src.stride(axis0 + 2),
    );
    let kind = kind.unwrap_or_else(|| default_unpack_kind(src.dtype()));

    let mut dst = ImageMatrix::new(rows as u32, cols as u32, channels as u32, kind);
    let done = match (src.buf(), dst.buf_mut()) {
        (TensorBuf::F32(s), MatrixBuf::F32(d)) => {
            copy_channel_major(s, d, rows, cols, channels, strides, |v| v);
            true
        }
        (TensorBuf::F64(s), MatrixBuf::F64(d)) => {
            copy_channel_major(s, d, rows, cols, channels, strides, |v| v);
            true
        }
        _ => false,
    };

    if !done {
        trace!(dtype = %src.dtype(), kind = %kind, "Unpacking through generic scalar path");
        let (s0, s1, s2) = strides;
        for k in 0..channels {
            for i in 0..rows {
                for j in 0..cols {
                    let off = k * s0 + i * s1 + j * s2;
                    let v = match src.buf() {
                        TensorBuf::F32(b) => f64::from(b[off]),
                        TensorBuf::F64(b) => b[off],
                        TensorBuf::Generic(b) => b.get(off),
                    };
                    dst.set_sample(i as u32, j as u32, k as u32, v);
                }
            }
        }
    }

    Ok(dst)
}
