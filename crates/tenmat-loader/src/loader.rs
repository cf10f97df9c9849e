//! High-level loading pipeline.
//!
//! [`ImageLoader`] orchestrates the fixed forward pipeline
//!
//! ```text
//! bytes -> StreamBuffer -> ImageDecoder -> ImageMatrix
//!       -> convert_channels -> center_crop -> resize -> pack -> Tensor
//! ```
//!
//! and exposes the reverse direction (tensor to matrix, no geometry)
//! through [`ImageLoader::to_matrix`].
//!
//! Stages consume their input by value and return either the same matrix
//! (no-op) or a new one, so each superseded buffer drops as soon as the
//! next stage owns its output; peak usage stays around two image buffers.
//!
//! # Thread safety
//!
//! A loader owns a reusable [`StreamBuffer`] as scratch state, so one
//! instance must not be shared between concurrent callers. Give each
//! caller its own loader.
//!
//! # Example
//!
//! ```rust
//! use tenmat_core::{ImageMatrix, PixelKind};
//! use tenmat_loader::{ImageLoader, LoaderConfig};
//!
//! let cfg = LoaderConfig::new(28, 28).with_channels(1).with_center_crop(true);
//! let loader = ImageLoader::new(cfg);
//!
//! let img = ImageMatrix::new(64, 48, 3, PixelKind::U8);
//! let tensor = loader.load_matrix(img)?;
//! assert_eq!(tensor.dims(), &[1, 28, 28]);
//! # Ok::<(), tenmat_core::Error>(())
//! ```

use std::io::Read;

use tenmat_core::{DType, ImageMatrix, PixelKind, Result, Tensor};
use tenmat_ops::{center_crop, convert_channels, resize_if_needed, BilinearKernel, GeometryKernel};
use tracing::debug;

use crate::decode::ImageDecoder;
use crate::pack::TensorPacker;
use crate::stream::StreamBuffer;
use crate::unpack::unpack_matrix;

/// Immutable loading configuration.
///
/// - `height` / `width`: resize targets; 0 disables scaling for that call
/// - `channels`: forced channel count; -1 leaves the decoded count alone
/// - `center_crop`: square-ratio trim before scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    height: u32,
    width: u32,
    channels: i32,
    center_crop: bool,
}

impl LoaderConfig {
    /// Creates a config with resize targets and no channel constraint.
    pub fn new(height: u32, width: u32) -> Self {
        Self {
            height,
            width,
            channels: -1,
            center_crop: false,
        }
    }

    /// Sets the forced channel count (-1 = unconstrained).
    pub fn with_channels(mut self, channels: i32) -> Self {
        self.channels = channels;
        self
    }

    /// Enables or disables the center crop before scaling.
    pub fn with_center_crop(mut self, enabled: bool) -> Self {
        self.center_crop = enabled;
        self
    }

    /// Target height (0 = no scaling).
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Target width (0 = no scaling).
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Forced channel count (-1 = unconstrained).
    #[inline]
    pub fn channels(&self) -> i32 {
        self.channels
    }

    /// Whether center crop is enabled.
    #[inline]
    pub fn center_crop(&self) -> bool {
        self.center_crop
    }
}

impl Default for LoaderConfig {
    /// No scaling, no channel constraint, no crop.
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Forward/reverse marshaling pipeline with a reusable stream buffer.
#[derive(Debug, Default)]
pub struct ImageLoader<K: GeometryKernel = BilinearKernel> {
    config: LoaderConfig,
    kernel: K,
    packer: TensorPacker,
    stream: StreamBuffer,
}

impl ImageLoader<BilinearKernel> {
    /// Creates a loader with the built-in bilinear kernel.
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_kernel(config, BilinearKernel)
    }
}

impl<K: GeometryKernel> ImageLoader<K> {
    /// Creates a loader with a caller-supplied geometry kernel.
    pub fn with_kernel(config: LoaderConfig, kernel: K) -> Self {
        Self {
            config,
            kernel,
            packer: TensorPacker::new(),
            stream: StreamBuffer::new(),
        }
    }

    /// Replaces the packer (for example to select the legacy rank-4
    /// batch index).
    pub fn with_packer(mut self, packer: TensorPacker) -> Self {
        self.packer = packer;
        self
    }

    /// Returns the loader configuration.
    #[inline]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Runs the geometry stages in their fixed order.
    fn preprocess(&self, img: ImageMatrix) -> Result<ImageMatrix> {
        let img = convert_channels(img, self.config.channels, &self.kernel)?;
        let img = if self.config.center_crop {
            center_crop(img)
        } else {
            img
        };
        resize_if_needed(img, self.config.height, self.config.width, &self.kernel)
    }

    /// Reads a stream to its end, decodes it, and runs the full pipeline.
    ///
    /// Takes `&mut self` because the stream buffer is reused scratch
    /// state across calls.
    pub fn load_stream<R: Read>(
        &mut self,
        reader: R,
        decoder: &dyn ImageDecoder,
    ) -> Result<Tensor> {
        let bytes = self.stream.fill(reader)?;
        let img = decoder.decode(bytes)?;
        debug!(
            rows = img.rows(),
            cols = img.cols(),
            channels = img.channels(),
            "Decoded image"
        );
        self.load_matrix_inner(img)
    }

    /// Runs the pipeline on an already-decoded matrix, allocating a
    /// rank-3 `[channels, rows, cols]` f32 tensor.
    pub fn load_matrix(&self, img: ImageMatrix) -> Result<Tensor> {
        self.load_matrix_inner(img)
    }

    fn load_matrix_inner(&self, img: ImageMatrix) -> Result<Tensor> {
        let img = self.preprocess(img)?;
        let dims = [
            img.channels() as usize,
            img.rows() as usize,
            img.cols() as usize,
        ];
        let mut dst = Tensor::zeros(&dims, DType::F32)?;
        self.packer.pack(&img, &mut dst)?;
        Ok(dst)
    }

    /// Runs the pipeline into a caller-supplied destination tensor of any
    /// supported rank and dtype.
    pub fn load_matrix_into(&self, img: ImageMatrix, dst: &mut Tensor) -> Result<()> {
        let img = self.preprocess(img)?;
        self.packer.pack(&img, dst)
    }

    /// Like [`load_matrix`](Self::load_matrix) but returns a rank-4
    /// `[1, channels, rows, cols]` tensor for backends that expect a
    /// batch axis.
    pub fn load_matrix_batched(&self, img: ImageMatrix) -> Result<Tensor> {
        let img = self.preprocess(img)?;
        let dims = [
            1,
            img.channels() as usize,
            img.rows() as usize,
            img.cols() as usize,
        ];
        let mut dst = Tensor::zeros(&dims, DType::F32)?;
        self.packer.pack(&img, &mut dst)?;
        Ok(dst)
    }

    /// Unpacks a tensor into an image matrix (reverse direction, no
    /// geometry applied).
    pub fn to_matrix(&self, tensor: &Tensor, kind: Option<PixelKind>) -> Result<ImageMatrix> {
        unpack_matrix(tensor, kind)
    }
}
