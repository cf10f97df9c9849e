//! Dense strided tensor type.
//!
//! This module provides [`Tensor`], the backend-side container filled by
//! the packer and read by the unpacker.
//!
//! # Layout
//!
//! Tensors in this pipeline are channel-major:
//!
//! - rank 3: `[channels, rows, cols]`
//! - rank 4: `[batch, channels, rows, cols]` (batch expected to be 1)
//!
//! Strides are element counts per axis, not bytes. Freshly allocated
//! tensors are dense row-major over their dims, but strided destinations
//! supplied by a backend are honored as-is.
//!
//! # Element access
//!
//! F32/F64 tensors expose their typed buffers for fast marshaling paths.
//! Every other numeric kind is a `Generic` buffer behind the
//! [`ScalarStore`] trait and is accessed one f64 scalar at a time.
//!
//! # Residency
//!
//! A [`Location`] tag models backend device placement. The packer always
//! produces host-computed data, so it tags the destination
//! [`Location::Host`] after the copy.
//!
//! # Usage
//!
//! ```rust
//! use tenmat_core::{DType, Tensor};
//!
//! let mut t = Tensor::zeros(&[3, 28, 28], DType::F32).unwrap();
//! t.set(&[2, 0, 5], 1.0);
//! assert_eq!(t.get(&[2, 0, 5]), 1.0);
//! assert_eq!(t.elem_count(), 3 * 28 * 28);
//! ```

use crate::dtype::DType;
use crate::error::{Error, Result};

/// Opaque per-element access to a numeric buffer of any kind.
///
/// The marshaling fallback path reads and writes every element as f64
/// through this interface; the store applies whatever rounding or
/// saturation its native kind requires.
pub trait ScalarStore {
    /// Number of elements in the store.
    fn len(&self) -> usize;

    /// Returns `true` if the store holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the element at flat index `idx` as f64.
    fn get(&self, idx: usize) -> f64;

    /// Writes `value` at flat index `idx`, casting to the native kind.
    fn set(&mut self, idx: usize, value: f64);
}

/// Tagged element storage for a [`Tensor`].
pub enum TensorBuf {
    /// Single-precision buffer (fast-path capable).
    F32(Vec<f32>),
    /// Double-precision buffer (fast-path capable).
    F64(Vec<f64>),
    /// Any other numeric kind behind the opaque scalar interface.
    Generic(Box<dyn ScalarStore>),
}

impl TensorBuf {
    /// Number of elements in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
            Self::Generic(s) => s.len(),
        }
    }

    /// Returns `true` if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element kind stored by this buffer.
    #[inline]
    pub fn dtype(&self) -> DType {
        match self {
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
            Self::Generic(_) => DType::Generic,
        }
    }
}

impl std::fmt::Debug for TensorBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::F32(v) => f.debug_tuple("F32").field(&v.len()).finish(),
            Self::F64(v) => f.debug_tuple("F64").field(&v.len()).finish(),
            Self::Generic(s) => f.debug_tuple("Generic").field(&s.len()).finish(),
        }
    }
}

/// Residency tag for a tensor's backing buffer.
///
/// This model keeps all buffers in host memory; the tag records where the
/// owning runtime believes the authoritative copy lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    /// Host (CPU) memory.
    #[default]
    Host,
    /// Backend device memory.
    Device,
}

/// Dense strided numeric tensor, channel-major for this pipeline.
///
/// # Example
///
/// ```rust
/// use tenmat_core::{DType, Tensor};
///
/// let t = Tensor::zeros(&[1, 3, 8, 8], DType::F64).unwrap();
/// assert_eq!(t.rank(), 4);
/// assert_eq!(t.stride(1), 64);
/// ```
#[derive(Debug)]
pub struct Tensor {
    /// Extent per axis.
    dims: Vec<usize>,
    /// Element-count stride per axis.
    strides: Vec<usize>,
    /// Element storage.
    buf: TensorBuf,
    /// Residency tag.
    location: Location,
}

/// Dense row-major strides for the given dims.
fn row_major_strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; dims.len()];
    for i in (0..dims.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}

impl Tensor {
    /// Allocates a dense zero-filled tensor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRank`] for ranks outside 2..=4, and
    /// [`Error::ShapeMismatch`] for a `Generic` dtype, which has no
    /// allocatable buffer of its own (use [`Tensor::from_store`]).
    pub fn zeros(dims: &[usize], dtype: DType) -> Result<Self> {
        if !(2..=4).contains(&dims.len()) {
            return Err(Error::unsupported_rank(dims.len(), "rank 2, 3 or 4"));
        }
        let len = dims.iter().product();
        let buf = match dtype {
            DType::F32 => TensorBuf::F32(vec![0.0; len]),
            DType::F64 => TensorBuf::F64(vec![0.0; len]),
            DType::Generic => return Err(Error::shape_mismatch(len, 0)),
        };
        Ok(Self {
            strides: row_major_strides(dims),
            dims: dims.to_vec(),
            buf,
            location: Location::Host,
        })
    }

    /// Wraps an existing buffer with dense row-major strides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRank`] for ranks outside 2..=4 and
    /// [`Error::ShapeMismatch`] if the buffer length does not match the dims.
    pub fn from_buf(dims: &[usize], buf: TensorBuf) -> Result<Self> {
        if !(2..=4).contains(&dims.len()) {
            return Err(Error::unsupported_rank(dims.len(), "rank 2, 3 or 4"));
        }
        let expected: usize = dims.iter().product();
        if buf.len() != expected {
            return Err(Error::shape_mismatch(expected, buf.len()));
        }
        Ok(Self {
            strides: row_major_strides(dims),
            dims: dims.to_vec(),
            buf,
            location: Location::Host,
        })
    }

    /// Wraps an opaque scalar store as a `Generic` tensor.
    ///
    /// # Errors
    ///
    /// Same validation as [`Tensor::from_buf`].
    pub fn from_store(dims: &[usize], store: Box<dyn ScalarStore>) -> Result<Self> {
        Self::from_buf(dims, TensorBuf::Generic(store))
    }

    /// Overrides the element-count strides (backend-supplied layouts).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the stride count differs from
    /// the rank.
    pub fn with_strides(mut self, strides: &[usize]) -> Result<Self> {
        if strides.len() != self.dims.len() {
            return Err(Error::shape_mismatch(self.dims.len(), strides.len()));
        }
        self.strides = strides.to_vec();
        Ok(self)
    }

    /// Returns the rank (number of axes).
    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the extent of axis `axis`.
    #[inline]
    pub fn dim(&self, axis: usize) -> usize {
        self.dims[axis]
    }

    /// Returns all extents.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the element-count stride of axis `axis`.
    #[inline]
    pub fn stride(&self, axis: usize) -> usize {
        self.strides[axis]
    }

    /// Returns all strides.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Returns the element kind.
    #[inline]
    pub fn dtype(&self) -> DType {
        self.buf.dtype()
    }

    /// Total number of addressable elements (product of dims).
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns the residency tag.
    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Updates the residency tag.
    #[inline]
    pub fn tag_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Returns a reference to the element storage.
    #[inline]
    pub fn buf(&self) -> &TensorBuf {
        &self.buf
    }

    /// Returns a mutable reference to the element storage.
    #[inline]
    pub fn buf_mut(&mut self) -> &mut TensorBuf {
        &mut self.buf
    }

    /// Flat buffer offset for a multi-index.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the index rank differs from the tensor rank.
    #[inline]
    pub fn offset(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.dims.len());
        index
            .iter()
            .zip(&self.strides)
            .map(|(i, s)| i * s)
            .sum()
    }

    /// Reads the element at `index` as f64.
    #[inline]
    pub fn get(&self, index: &[usize]) -> f64 {
        let off = self.offset(index);
        match &self.buf {
            TensorBuf::F32(v) => f64::from(v[off]),
            TensorBuf::F64(v) => v[off],
            TensorBuf::Generic(s) => s.get(off),
        }
    }

    /// Writes `value` at `index`, casting to the element kind.
    #[inline]
    pub fn set(&mut self, index: &[usize], value: f64) {
        let off = self.offset(index);
        match &mut self.buf {
            TensorBuf::F32(v) => v[off] = value as f32,
            TensorBuf::F64(v) => v[off] = value,
            TensorBuf::Generic(s) => s.set(off, value),
        }
    }

    /// Typed view of an F32 buffer.
    #[inline]
    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.buf {
            TensorBuf::F32(v) => Some(v),
            _ => None,
        }
    }

    /// Typed mutable view of an F32 buffer.
    #[inline]
    pub fn as_f32_mut(&mut self) -> Option<&mut [f32]> {
        match &mut self.buf {
            TensorBuf::F32(v) => Some(v),
            _ => None,
        }
    }

    /// Typed view of an F64 buffer.
    #[inline]
    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.buf {
            TensorBuf::F64(v) => Some(v),
            _ => None,
        }
    }

    /// Typed mutable view of an F64 buffer.
    #[inline]
    pub fn as_f64_mut(&mut self) -> Option<&mut [f64]> {
        match &mut self.buf {
            TensorBuf::F64(v) => Some(v),
            _ => None,
        }
    }
}
