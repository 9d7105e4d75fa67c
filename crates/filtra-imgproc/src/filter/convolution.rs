use filtra_image::{GrayImage, ImageSize};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use super::kernels::{Kernel, KERNEL_SIZE};
use crate::error::FilterError;

/// Convolve a grayscale image with a 3x3 kernel in valid mode.
///
/// The kernel is applied as given (no 180 degree flip): every output pixel
/// is the elementwise product sum of the kernel against the 3x3 source
/// neighborhood whose top-left corner is the output position. Only fully
/// covered positions are computed, so the output is `(H-2) x (W-2)` for a
/// `H x W` source. The raw sum is clamped to `[0, 255]` and rounded to the
/// nearest `u8`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W), H and W at least 3.
/// * `kernel` - The 3x3 kernel to apply.
///
/// # Errors
///
/// If the source image is smaller than 3x3 in either dimension, an error is
/// returned.
///
/// # Examples
///
/// ```
/// use filtra_image::{GrayImage, ImageSize};
/// use filtra_imgproc::filter::{convolve, kernels::FilterKind};
///
/// let image = GrayImage::from_size_val(
///     ImageSize {
///         width: 5,
///         height: 4,
///     },
///     128u8,
/// ).unwrap();
///
/// let out = convolve(&image, &FilterKind::Identity.kernel()).unwrap();
/// assert_eq!(out.size().width, 3);
/// assert_eq!(out.size().height, 2);
/// ```
pub fn convolve(src: &GrayImage<u8>, kernel: &Kernel) -> Result<GrayImage<u8>, FilterError> {
    if src.rows() < KERNEL_SIZE || src.cols() < KERNEL_SIZE {
        return Err(FilterError::ImageTooSmall(src.cols(), src.rows()));
    }

    let dst_size = ImageSize {
        width: src.cols() - (KERNEL_SIZE - 1),
        height: src.rows() - (KERNEL_SIZE - 1),
    };
    let mut dst = GrayImage::from_size_val(dst_size, 0u8)?;

    let src_data = src.as_slice();
    let src_cols = src.cols();
    let weights = *kernel.weights();

    // parallelize over output rows; the per-pixel accumulation order is
    // fixed, so the result is bit-identical to the sequential double loop
    dst.as_slice_mut()
        .par_chunks_mut(dst_size.width)
        .enumerate()
        .for_each(|(r, dst_row)| {
            dst_row.iter_mut().enumerate().for_each(|(c, dst_pix)| {
                let mut sum = 0.0f32;
                for (dy, kernel_row) in weights.iter().enumerate() {
                    for (dx, &weight) in kernel_row.iter().enumerate() {
                        let val = src_data[(r + dy) * src_cols + (c + dx)];
                        sum += f32::from(val) * weight;
                    }
                }
                *dst_pix = sum.clamp(0.0, 255.0).round() as u8;
            });
        });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::kernels::FilterKind;

    fn image_3x3_ramp() -> Result<GrayImage<u8>, FilterError> {
        let image = GrayImage::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            (1..=9).collect(),
        )?;
        Ok(image)
    }

    #[test]
    fn output_size_is_valid_region() -> Result<(), FilterError> {
        let image = GrayImage::from_size_val(
            ImageSize {
                width: 7,
                height: 5,
            },
            0u8,
        )?;

        for kind in FilterKind::ALL {
            let out = convolve(&image, &kind.kernel())?;
            assert_eq!(out.width(), image.width() - 2);
            assert_eq!(out.height(), image.height() - 2);
        }

        Ok(())
    }

    #[test]
    fn identity_passes_interior_through() -> Result<(), FilterError> {
        let image = GrayImage::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            (0..16).map(|x| x * 3).collect(),
        )?;

        let out = convolve(&image, &FilterKind::Identity.kernel())?;
        for i in 0..out.rows() {
            for j in 0..out.cols() {
                assert_eq!(out.get(i, j), image.get(i + 1, j + 1));
            }
        }

        Ok(())
    }

    #[test]
    fn single_output_values() -> Result<(), FilterError> {
        // 3x3 ramp 1..9 gives a hand-computable 1x1 output per kernel
        let image = image_3x3_ramp()?;

        let cases = [
            (FilterKind::Identity, 5u8),
            (FilterKind::Sharpen, 5),
            (FilterKind::EdgeDetect, 0),
            (FilterKind::Blur, 5),
            (FilterKind::Emboss, 29),
        ];

        for (kind, expected) in cases {
            let out = convolve(&image, &kind.kernel())?;
            assert_eq!(out.size().width, 1, "{kind}");
            assert_eq!(out.size().height, 1, "{kind}");
            assert_eq!(out.as_slice(), &[expected], "{kind}");
        }

        Ok(())
    }

    #[test]
    fn blur_on_all_white_saturates() -> Result<(), FilterError> {
        let image = GrayImage::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            255u8,
        )?;

        let out = convolve(&image, &FilterKind::Blur.kernel())?;
        assert_eq!(out.as_slice(), &[255]);

        Ok(())
    }

    #[test]
    fn blur_on_uniform_field_is_noop() -> Result<(), FilterError> {
        // 150 is sensitive to the quantization policy: the accumulated blur
        // sum lands just below the true value, so truncation would yield 149
        for val in [0u8, 3, 100, 150, 254, 255] {
            let image = GrayImage::from_size_val(
                ImageSize {
                    width: 13,
                    height: 9,
                },
                val,
            )?;

            let out = convolve(&image, &FilterKind::Blur.kernel())?;
            assert!(out.as_slice().iter().all(|&v| v == val), "val {val}");
        }

        Ok(())
    }

    #[test]
    fn uniform_field_responses() -> Result<(), FilterError> {
        let image = GrayImage::from_size_val(
            ImageSize {
                width: 6,
                height: 5,
            },
            90u8,
        )?;

        // sharpen and emboss weights sum to 1, edge_detect weights sum to 0
        let sharpen = convolve(&image, &FilterKind::Sharpen.kernel())?;
        assert!(sharpen.as_slice().iter().all(|&v| v == 90));

        let emboss = convolve(&image, &FilterKind::Emboss.kernel())?;
        assert!(emboss.as_slice().iter().all(|&v| v == 90));

        let edges = convolve(&image, &FilterKind::EdgeDetect.kernel())?;
        assert!(edges.as_slice().iter().all(|&v| v == 0));

        Ok(())
    }

    #[test]
    fn output_is_clamped() -> Result<(), FilterError> {
        // bright center on black: sharpen overshoots 255
        let mut data = vec![0u8; 9];
        data[4] = 200;
        let image = GrayImage::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            data,
        )?;
        let out = convolve(&image, &FilterKind::Sharpen.kernel())?;
        assert_eq!(out.as_slice(), &[255]);

        // black center on bright: the raw sum is negative
        let mut data = vec![200u8; 9];
        data[4] = 0;
        let image = GrayImage::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            data,
        )?;
        let out = convolve(&image, &FilterKind::Sharpen.kernel())?;
        assert_eq!(out.as_slice(), &[0]);

        Ok(())
    }

    #[test]
    fn undersized_input_fails() -> Result<(), FilterError> {
        let cases = [(2usize, 2usize), (2, 3), (3, 2), (1, 10), (10, 1)];

        for (width, height) in cases {
            let image = GrayImage::from_size_val(ImageSize { width, height }, 0u8)?;
            for kind in FilterKind::ALL {
                let res = convolve(&image, &kind.kernel());
                assert_eq!(res.unwrap_err(), FilterError::ImageTooSmall(width, height));
            }
        }

        Ok(())
    }

    #[test]
    fn convolve_is_deterministic() -> Result<(), FilterError> {
        use rand::Rng;

        let mut rng = rand::rng();
        let data: Vec<u8> = (0..16 * 13).map(|_| rng.random()).collect();
        let image = GrayImage::new(
            ImageSize {
                width: 16,
                height: 13,
            },
            data,
        )?;

        for kind in FilterKind::ALL {
            let first = convolve(&image, &kind.kernel())?;
            let second = convolve(&image, &kind.kernel())?;
            assert_eq!(first, second, "{kind}");
        }

        Ok(())
    }
}
