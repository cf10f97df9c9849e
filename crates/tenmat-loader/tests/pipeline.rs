//! End-to-end pipeline tests with fixture decoders and kernels.

use std::io::Cursor;

use approx::assert_abs_diff_eq;
use tenmat_core::{DType, ImageMatrix, MatrixBuf, PixelKind, Result, Tensor};
use tenmat_loader::{ImageDecoder, ImageLoader, LoaderConfig, TensorPacker};
use tenmat_ops::{ConvertCode, GeometryKernel};

/// Decoder fixture: interprets the byte stream as raw u8 samples of a
/// fixed shape.
struct RawDecoder {
    rows: u32,
    cols: u32,
    channels: u32,
}

impl ImageDecoder for RawDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<ImageMatrix> {
        ImageMatrix::from_buf(
            self.rows,
            self.cols,
            self.channels,
            MatrixBuf::U8(bytes.to_vec()),
        )
    }
}

/// Kernel fixture: channel conversion as usual, resize as identity.
struct IdentityResize(tenmat_ops::BilinearKernel);

impl GeometryKernel for IdentityResize {
    fn convert_color(&self, src: &ImageMatrix, code: ConvertCode) -> Result<ImageMatrix> {
        self.0.convert_color(src, code)
    }

    fn resize(&self, src: &ImageMatrix, _rows: u32, _cols: u32) -> Result<ImageMatrix> {
        Ok(src.clone())
    }
}

/// 12x12 3-channel gradient: sample (r, c, k) = ((r*12 + c)*3 + k) mod 256.
fn gradient_bytes() -> Vec<u8> {
    (0u32..12 * 12 * 3).map(|i| (i % 256) as u8).collect()
}

#[test]
fn gradient_image_packs_channel_major() {
    // No resize (targets match), no crop, channels already 3: the tensor
    // value at [k, r, c] is exactly the interleaved source sample.
    let cfg = LoaderConfig::new(12, 12).with_channels(3);
    let mut loader = ImageLoader::new(cfg);
    let decoder = RawDecoder {
        rows: 12,
        cols: 12,
        channels: 3,
    };

    let t = loader
        .load_stream(Cursor::new(gradient_bytes()), &decoder)
        .unwrap();
    assert_eq!(t.dims(), &[3, 12, 12]);

    for r in 0..12usize {
        for c in 0..12usize {
            for k in 0..3usize {
                let expected = (((r * 12 + c) * 3 + k) % 256) as f64;
                assert_eq!(t.get(&[k, r, c]), expected, "at [{k}, {r}, {c}]");
            }
        }
    }
}

#[test]
fn identity_resize_keeps_gradient_values() {
    // With the resize kernel stubbed to identity, requesting 6x6 still
    // yields the 12x12 gradient untouched.
    let cfg = LoaderConfig::new(6, 6).with_channels(3);
    let loader = ImageLoader::with_kernel(cfg, IdentityResize(tenmat_ops::BilinearKernel));
    let img = ImageMatrix::from_buf(12, 12, 3, MatrixBuf::U8(gradient_bytes())).unwrap();

    let t = loader.load_matrix(img).unwrap();
    assert_eq!(t.dims(), &[3, 12, 12]);
    assert_eq!(t.get(&[2, 11, 11]), (((11 * 12 + 11) * 3 + 2) % 256) as f64);
}

#[test]
fn real_resize_produces_requested_shape() {
    let cfg = LoaderConfig::new(6, 6).with_channels(3);
    let loader = ImageLoader::new(cfg);
    let img = ImageMatrix::from_buf(12, 12, 3, MatrixBuf::U8(gradient_bytes())).unwrap();

    let t = loader.load_matrix(img).unwrap();
    assert_eq!(t.dims(), &[3, 6, 6]);
}

#[test]
fn round_trip_f32_is_exact() {
    let mut t = Tensor::zeros(&[3, 6, 6], DType::F32).unwrap();
    for k in 0..3usize {
        for i in 0..6usize {
            for j in 0..6usize {
                t.set(&[k, i, j], ((k * 36 + i * 6 + j) as f64) * 0.25);
            }
        }
    }

    let loader = ImageLoader::new(LoaderConfig::default());
    let img = loader.to_matrix(&t, None).unwrap();
    assert_eq!(img.kind(), PixelKind::F32);

    let mut back = Tensor::zeros(&[3, 6, 6], DType::F32).unwrap();
    TensorPacker::new().pack(&img, &mut back).unwrap();
    assert_eq!(t.as_f32().unwrap(), back.as_f32().unwrap());
}

#[test]
fn round_trip_f64_is_exact() {
    let mut t = Tensor::zeros(&[2, 4, 4], DType::F64).unwrap();
    for k in 0..2usize {
        for i in 0..4usize {
            for j in 0..4usize {
                t.set(&[k, i, j], (k * 16 + i * 4 + j) as f64 / 7.0);
            }
        }
    }

    let img = tenmat_loader::unpack_matrix(&t, None).unwrap();
    assert_eq!(img.kind(), PixelKind::F64);

    let mut back = Tensor::zeros(&[2, 4, 4], DType::F64).unwrap();
    TensorPacker::new().pack(&img, &mut back).unwrap();
    assert_eq!(t.as_f64().unwrap(), back.as_f64().unwrap());
}

#[test]
fn loader_reuse_across_streams() {
    // One loader, several same-shaped reads: buffer reuse must not leak
    // content between calls.
    let cfg = LoaderConfig::new(4, 4).with_channels(1);
    let mut loader = ImageLoader::new(cfg);
    let decoder = RawDecoder {
        rows: 4,
        cols: 4,
        channels: 1,
    };

    for fill in [0u8, 128, 255] {
        let t = loader
            .load_stream(Cursor::new(vec![fill; 16]), &decoder)
            .unwrap();
        assert_eq!(t.dims(), &[1, 4, 4]);
        assert!(t.as_f32().unwrap().iter().all(|&v| v == f32::from(fill)));
    }
}

#[test]
fn grayscale_conversion_feeds_packing() {
    // 3-channel constant gray input collapsed to 1 channel: luma of an
    // (x, x, x) pixel is x for any weight set summing to 1.
    let data = vec![200u8; 8 * 8 * 3];
    let img = ImageMatrix::from_buf(8, 8, 3, MatrixBuf::U8(data)).unwrap();
    let cfg = LoaderConfig::new(8, 8).with_channels(1);
    let loader = ImageLoader::new(cfg);

    let t = loader.load_matrix(img).unwrap();
    assert_eq!(t.dims(), &[1, 8, 8]);
    for &v in t.as_f32().unwrap() {
        assert_abs_diff_eq!(v, 200.0, epsilon = 0.51);
    }
}
