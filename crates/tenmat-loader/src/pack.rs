//! Image-to-tensor packing.
//!
//! Copies pixel data from a row-major interleaved [`ImageMatrix`] into a
//! channel-major strided [`Tensor`]: `dst[channel, row, col] =
//! src[row, col, channel]`.
//!
//! # Dispatch
//!
//! The element-kind pair is inspected once per call. For an f32/f64
//! destination and a {u8, u16, i32, f32} source the copy runs through a
//! typed strided index with a branch-free inner loop; every other pair
//! falls back to per-element f64 scalar get/set. This mirrors the
//! once-per-call dispatch of the matrix buffer's tagged storage.
//!
//! # Rank-4 batch index
//!
//! Historically this marshaling path wrote the rank-4 fallback at batch
//! index 1, which a dense `[1, c, r, w]` tensor does not have. The packer
//! defaults to batch index 0 and offers
//! [`legacy_batch_index`](TensorPacker::legacy_batch_index) for callers
//! that need output-compatible indexing against a destination whose
//! batch-axis stride makes slot 1 addressable.

use tenmat_core::{Error, ImageMatrix, Location, MatrixBuf, Result, Tensor, TensorBuf};
use tracing::trace;

/// Strided destination coordinates for the fast path.
struct Strided {
    base: usize,
    s0: usize,
    s1: usize,
    s2: usize,
}

/// Interleaved-to-strided transposing copy with a cast per sample.
fn copy_interleaved<S: Copy, D: Copy>(
    src: &[S],
    dst: &mut [D],
    rows: usize,
    cols: usize,
    channels: usize,
    at: &Strided,
    conv: impl Fn(S) -> D,
) {
    for k in 0..channels {
        for i in 0..rows {
            for j in 0..cols {
                dst[at.base + k * at.s0 + i * at.s1 + j * at.s2] =
                    conv(src[(i * cols + j) * channels + k]);
            }
        }
    }
}

/// Copies an image matrix into a caller-supplied tensor.
///
/// See the module docs for the copy semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TensorPacker {
    legacy_batch: bool,
}

impl TensorPacker {
    /// Creates a packer with the corrected batch index (0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the historical rank-4 batch index (1) instead of 0.
    ///
    /// Only meaningful when the destination's batch axis makes slot 1
    /// addressable (for example a broadcast stride of 0); otherwise
    /// packing a rank-4 tensor fails with
    /// [`Error::UnsupportedRank`].
    pub fn legacy_batch_index(mut self, enabled: bool) -> Self {
        self.legacy_batch = enabled;
        self
    }

    /// The batch-axis index written by rank-4 packing.
    #[inline]
    pub fn batch_index(&self) -> usize {
        if self.legacy_batch { 1 } else { 0 }
    }

    /// Packs `src` into `dst`, transposing interleaved to channel-major.
    ///
    /// # Errors
    ///
    /// - [`Error::SizeMismatch`] if `dst.elem_count() != rows * cols *
    ///   channels`
    /// - [`Error::UnsupportedRank`] for ranks outside {2, 3, 4}, or a
    ///   rank-4 destination without an addressable batch slot at the
    ///   configured index
    ///
    /// On error the destination contents are untouched. On success the
    /// destination is tagged [`Location::Host`].
    pub fn pack(&self, src: &ImageMatrix, dst: &mut Tensor) -> Result<()> {
        let rows = src.rows();
        let cols = src.cols();
        let channels = src.channels();
        let elems = src.elem_count();

        if dst.elem_count() != elems {
            return Err(Error::size_mismatch(channels, rows, cols, dst.elem_count()));
        }

        // Strided coordinates for ranks that support the fast path.
        let strided = match dst.rank() {
            3 => Some(Strided {
                base: 0,
                s0: dst.stride(0),
                s1: dst.stride(1),
                s2: dst.stride(2),
            }),
            4 => {
                let b = self.batch_index();
                if b >= dst.dim(0) && dst.stride(0) != 0 {
                    return Err(Error::unsupported_rank(
                        4,
                        "rank 4 with an addressable batch slot",
                    ));
                }
                Some(Strided {
                    base: b * dst.stride(0),
                    s0: dst.stride(1),
                    s1: dst.stride(2),
                    s2: dst.stride(3),
                })
            }
            2 => None,
            rank => return Err(Error::unsupported_rank(rank, "rank 2, 3 or 4")),
        };

        let (r, c, ch) = (rows as usize, cols as usize, channels as usize);
        let done = match (&strided, dst.buf_mut(), src.buf()) {
            (Some(at), TensorBuf::F32(d), MatrixBuf::U8(s)) => {
                copy_interleaved(s, d, r, c, ch, at, f32::from);
                true
            }
            (Some(at), TensorBuf::F32(d), MatrixBuf::U16(s)) => {
                copy_interleaved(s, d, r, c, ch, at, f32::from);
                true
            }
            (Some(at), TensorBuf::F32(d), MatrixBuf::I32(s)) => {
                copy_interleaved(s, d, r, c, ch, at, |v| v as f32);
                true
            }
            (Some(at), TensorBuf::F32(d), MatrixBuf::F32(s)) => {
                copy_interleaved(s, d, r, c, ch, at, |v| v);
                true
            }
            (Some(at), TensorBuf::F64(d), MatrixBuf::U8(s)) => {
                copy_interleaved(s, d, r, c, ch, at, f64::from);
                true
            }
            (Some(at), TensorBuf::F64(d), MatrixBuf::U16(s)) => {
                copy_interleaved(s, d, r, c, ch, at, f64::from);
                true
            }
            (Some(at), TensorBuf::F64(d), MatrixBuf::I32(s)) => {
                copy_interleaved(s, d, r, c, ch, at, f64::from);
                true
            }
            (Some(at), TensorBuf::F64(d), MatrixBuf::F32(s)) => {
                copy_interleaved(s, d, r, c, ch, at, f64::from);
                true
            }
            _ => false,
        };

        if !done {
            trace!(rank = dst.rank(), "Packing through generic scalar path");
            let b = self.batch_index();
            for k in 0..channels {
                for i in 0..rows {
                    for j in 0..cols {
                        match dst.rank() {
                            2 => {
                                // Single-channel assumption: the channel
                                // axis has nowhere to go in a rank-2 dst.
                                dst.set(
                                    &[i as usize, j as usize],
                                    src.sample(i, j, k),
                                );
                            }
                            3 => dst.set(
                                &[k as usize, i as usize, j as usize],
                                src.sample(i, j, k),
                            ),
                            _ => dst.set(
                                &[b, k as usize, i as usize, j as usize],
                                src.sample(i, j, k),
                            ),
                        }
                    }
                }
            }
        } else {
            trace!(
                dtype = %dst.dtype(),
                kind = %src.kind(),
                "Packed through typed strided path"
            );
        }

        // This path always produces host-computed data.
        dst.tag_location(Location::Host);
        Ok(())
    }
}
