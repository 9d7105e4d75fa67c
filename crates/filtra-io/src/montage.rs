use std::path::Path;

use filtra_image::{GrayImage, ImageSize};

use crate::error::IoError;
use crate::png::write_image_png_mono8;

/// Background value of the montage canvas.
const CANVAS_VALUE: u8 = 255;

/// Compose grayscale panels side by side on a white canvas.
///
/// The panels are placed left to right in the given order, top aligned,
/// separated by `gap` pixels of background. The canvas height is the
/// tallest panel's height.
///
/// # Arguments
///
/// * `panels` - The panels to compose, left to right.
/// * `gap` - The number of background pixels between adjacent panels.
///
/// # Errors
///
/// If `panels` is empty, an error is returned.
pub fn montage_horizontal(
    panels: &[&GrayImage<u8>],
    gap: usize,
) -> Result<GrayImage<u8>, IoError> {
    if panels.is_empty() {
        return Err(IoError::EmptyMontage);
    }

    let height = panels.iter().map(|p| p.height()).max().unwrap_or(0);
    let width = panels.iter().map(|p| p.width()).sum::<usize>() + gap * (panels.len() - 1);

    let mut canvas = GrayImage::from_size_val(ImageSize { width, height }, CANVAS_VALUE)?;
    let canvas_data = canvas.as_slice_mut();

    let mut x_offset = 0;
    for panel in panels {
        let panel_cols = panel.width();
        for (row, row_data) in panel.as_slice().chunks_exact(panel_cols).enumerate() {
            let start = row * width + x_offset;
            canvas_data[start..start + panel_cols].copy_from_slice(row_data);
        }
        x_offset += panel_cols + gap;
    }

    Ok(canvas)
}

/// Compose grayscale panels side by side and write the result as a PNG.
///
/// # Arguments
///
/// * `file_path` - The path to the output PNG file.
/// * `panels` - The panels to compose, left to right.
/// * `gap` - The number of background pixels between adjacent panels.
pub fn write_montage_png(
    file_path: impl AsRef<Path>,
    panels: &[&GrayImage<u8>],
    gap: usize,
) -> Result<(), IoError> {
    let canvas = montage_horizontal(panels, gap)?;
    log::debug!(
        "writing montage of {} panels as {}",
        panels.len(),
        canvas.size()
    );
    write_image_png_mono8(file_path, &canvas)
}
