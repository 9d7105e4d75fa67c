use std::{fs, fs::File, path::Path};

use filtra_image::{GrayImage, ImageSize};
use png::{BitDepth, ColorType, Decoder, Encoder, OutputInfo};

use crate::error::IoError;

// Fixed-point luma weights, the integer form of 0.299 / 0.587 / 0.114.
const RW: u16 = 77;
const GW: u16 = 150;
const BW: u16 = 29;

fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((u16::from(r) * RW + u16::from(g) * GW + u16::from(b) * BW) >> 8) as u8
}

/// Read a PNG image with a single channel (mono8).
///
/// The file must be an 8-bit grayscale PNG; use [`read_image_png_gray8`] to
/// read color images with an on-the-fly grayscale conversion.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
pub fn read_image_png_mono8(file_path: impl AsRef<Path>) -> Result<GrayImage<u8>, IoError> {
    let (buf, info) = read_png_impl(file_path)?;

    if info.bit_depth != BitDepth::Eight {
        return Err(IoError::PngDecodeError(format!(
            "Unsupported bit depth: {:?}",
            info.bit_depth
        )));
    }

    if info.color_type != ColorType::Grayscale {
        return Err(IoError::PngDecodeError(format!(
            "Expected a grayscale png, got color type {:?}",
            info.color_type
        )));
    }

    let size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };
    Ok(GrayImage::new(size, buf)?)
}

/// Read a PNG image of any supported 8-bit layout as grayscale.
///
/// Grayscale data is passed through; RGB and RGBA data is converted with
/// the integer luma formula `(77*R + 150*G + 29*B) >> 8`; the alpha
/// channel, when present, is dropped.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
pub fn read_image_png_gray8(file_path: impl AsRef<Path>) -> Result<GrayImage<u8>, IoError> {
    let (buf, info) = read_png_impl(file_path)?;

    if info.bit_depth != BitDepth::Eight {
        return Err(IoError::PngDecodeError(format!(
            "Unsupported bit depth: {:?}",
            info.bit_depth
        )));
    }

    let gray = match info.color_type {
        ColorType::Grayscale => buf,
        ColorType::GrayscaleAlpha => buf.chunks_exact(2).map(|px| px[0]).collect(),
        ColorType::Rgb => buf
            .chunks_exact(3)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect(),
        ColorType::Rgba => buf
            .chunks_exact(4)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect(),
        ColorType::Indexed => {
            return Err(IoError::PngDecodeError(
                "Indexed png images are not supported".to_string(),
            ))
        }
    };

    let size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };
    Ok(GrayImage::new(size, gray)?)
}

/// Write a PNG image with a single channel (mono8).
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
/// * `image` - The grayscale image to write.
pub fn write_image_png_mono8(
    file_path: impl AsRef<Path>,
    image: &GrayImage<u8>,
) -> Result<(), IoError> {
    write_png_impl(
        file_path,
        image.as_slice(),
        image.size(),
        BitDepth::Eight,
        ColorType::Grayscale,
    )
}

// Utility function to read png files
fn read_png_impl(file_path: impl AsRef<Path>) -> Result<(Vec<u8>, OutputInfo), IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    if let Some(extension) = file_path.extension() {
        if extension != "png" {
            return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
        }
    } else {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let file = fs::File::open(file_path)?;
    let mut reader = Decoder::new(file)
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    Ok((buf, info))
}

// Utility function to write png files
fn write_png_impl(
    file_path: impl AsRef<Path>,
    image_data: &[u8],
    image_size: ImageSize,
    depth: BitDepth,
    color_type: ColorType,
) -> Result<(), IoError> {
    let file = File::create(file_path)?;

    let mut encoder = Encoder::new(file, image_size.width as u32, image_size.height as u32);
    encoder.set_color(color_type);
    encoder.set_depth(depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_png_mono8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.png");

        let image = GrayImage::new(
            ImageSize {
                width: 4,
                height: 3,
            },
            (0..12).map(|x| x * 20).collect(),
        )?;

        write_image_png_mono8(&file_path, &image)?;
        let read_back = read_image_png_mono8(&file_path)?;
        assert_eq!(read_back, image);

        Ok(())
    }

    #[test]
    fn read_png_gray8_from_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("colors.png");

        // 2x1 rgb: pure red, pure white
        let rgb = [255u8, 0, 0, 255, 255, 255];
        write_png_impl(
            &file_path,
            &rgb,
            ImageSize {
                width: 2,
                height: 1,
            },
            BitDepth::Eight,
            ColorType::Rgb,
        )?;

        let gray = read_image_png_gray8(&file_path)?;
        assert_eq!(gray.size().width, 2);
        assert_eq!(gray.size().height, 1);
        assert_eq!(gray.as_slice(), &[luma(255, 0, 0), luma(255, 255, 255)]);

        // the strict mono8 reader rejects color data
        assert!(matches!(
            read_image_png_mono8(&file_path),
            Err(IoError::PngDecodeError(_))
        ));

        Ok(())
    }

    #[test]
    fn read_png_missing_file() {
        let res = read_image_png_mono8("does_not_exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_png_invalid_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.jpg");
        fs::write(&file_path, [0u8; 4])?;

        let res = read_image_png_mono8(&file_path);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));

        Ok(())
    }

    #[test]
    fn luma_weights() {
        assert_eq!(luma(0, 0, 0), 0);
        // the fixed point weights sum to 256, so white maps to 255
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(255, 0, 0), (255u16 * 77 >> 8) as u8);
    }
}
