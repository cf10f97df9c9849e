//! Center crop toward a square aspect ratio.
//!
//! A symmetric trim of the longer spatial dimension applied before
//! scaling. With an odd width/height difference the trim rounds down, so
//! the result approaches square without guaranteeing it.

use tenmat_core::{ImageMatrix, MatrixBuf};
use tracing::debug;

/// Copies the `w x h` region at `(x, y)` out of an interleaved buffer.
fn crop_region<T: Copy>(
    src: &[T],
    src_cols: usize,
    channels: usize,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
) -> Vec<T> {
    let mut dst = Vec::with_capacity(w * h * channels);
    for r in y..y + h {
        let start = (r * src_cols + x) * channels;
        dst.extend_from_slice(&src[start..start + w * channels]);
    }
    dst
}

/// Crops `img` to a centered near-square region.
///
/// Computes `diff = |width - height| / 2` (integer division) and trims
/// `diff` off the leading side of the longer dimension:
///
/// - width > height: `x = diff`, width becomes `width - diff`
/// - height > width: `y = diff`, height becomes `height - diff`
/// - equal: identity - the same matrix is returned, not a copy
pub fn center_crop(img: ImageMatrix) -> ImageMatrix {
    let height = img.rows();
    let width = img.cols();
    let diff = width.abs_diff(height) / 2;

    let (x, y, w, h) = if width > height {
        (diff, 0, width - diff, height)
    } else if height > width {
        (0, diff, width, height - diff)
    } else {
        return img;
    };

    debug!(x, y, w, h, "Center cropping");
    let cols = img.cols() as usize;
    let ch = img.channels() as usize;
    let (x, y, wu, hu) = (x as usize, y as usize, w as usize, h as usize);
    let buf = match img.buf() {
        MatrixBuf::U8(v) => MatrixBuf::U8(crop_region(v, cols, ch, x, y, wu, hu)),
        MatrixBuf::U16(v) => MatrixBuf::U16(crop_region(v, cols, ch, x, y, wu, hu)),
        MatrixBuf::I32(v) => MatrixBuf::I32(crop_region(v, cols, ch, x, y, wu, hu)),
        MatrixBuf::F32(v) => MatrixBuf::F32(crop_region(v, cols, ch, x, y, wu, hu)),
        MatrixBuf::F64(v) => MatrixBuf::F64(crop_region(v, cols, ch, x, y, wu, hu)),
    };
    // Length is h * w * channels by construction.
    ImageMatrix::from_buf(h, w, img.channels(), buf)
        .expect("cropped region has consistent shape")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenmat_core::PixelKind;

    #[test]
    fn test_wide_image() {
        // 10 wide x 6 high: diff = 2, crop x=2, width 8, height unchanged.
        let img = ImageMatrix::new(6, 10, 3, PixelKind::U8);
        let out = center_crop(img);
        assert_eq!(out.cols(), 8);
        assert_eq!(out.rows(), 6);
    }

    #[test]
    fn test_tall_image() {
        // 6 wide x 10 high: diff = 2, crop y=2, height 8, width unchanged.
        let img = ImageMatrix::new(10, 6, 3, PixelKind::U8);
        let out = center_crop(img);
        assert_eq!(out.cols(), 6);
        assert_eq!(out.rows(), 8);
    }

    #[test]
    fn test_square_is_identity() {
        let img = ImageMatrix::new(8, 8, 1, PixelKind::F32);
        let before = img.clone();
        let out = center_crop(img);
        assert_eq!(out, before);
    }

    #[test]
    fn test_crop_offsets_content() {
        // 1x4 single-channel row [0 1 2 3]: width 4, height 1, diff = 1,
        // crop starts at x=1 and keeps width 3.
        let img = ImageMatrix::from_buf(
            1,
            4,
            1,
            MatrixBuf::U8(vec![0, 1, 2, 3]),
        )
        .unwrap();
        let out = center_crop(img);
        assert_eq!(out.rows(), 1);
        assert_eq!(out.cols(), 3);
        assert_eq!(out.sample(0, 0, 0), 1.0);
        assert_eq!(out.sample(0, 2, 0), 3.0);
    }

    #[test]
    fn test_odd_difference_rounds_down() {
        // 9 wide x 6 high: diff = 1 (3 / 2), width becomes 8 - still not square.
        let img = ImageMatrix::new(6, 9, 1, PixelKind::U8);
        let out = center_crop(img);
        assert_eq!(out.cols(), 8);
        assert_eq!(out.rows(), 6);
    }
}
