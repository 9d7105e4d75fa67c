use filtra_image::GrayImage;

use super::convolution::convolve;
use super::kernels::FilterKind;
use crate::error::FilterError;

/// Ordered collection of filter outputs, one per applied kernel.
///
/// Iteration reproduces the order in which the filters were applied, which
/// for [`apply_all`] is the canonical catalog order.
#[derive(Clone, Debug)]
pub struct FilterOutputs {
    entries: Vec<(FilterKind, GrayImage<u8>)>,
}

impl FilterOutputs {
    /// Get the number of outputs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether there are no outputs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the output produced by the given filter, if present.
    pub fn get(&self, kind: FilterKind) -> Option<&GrayImage<u8>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, img)| img)
    }

    /// Iterate over the outputs in application order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKind, &GrayImage<u8>)> {
        self.entries.iter().map(|(k, img)| (*k, img))
    }
}

/// Apply a sequence of filters to the same source image.
///
/// The filters are applied in the given order and the whole batch fails on
/// the first error; no partial results are returned since a failure is a
/// property of the shared source image, not of a single kernel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W), H and W at least 3.
/// * `kinds` - The filters to apply, in output order.
///
/// # Errors
///
/// If the source image is smaller than 3x3 in either dimension, an error is
/// returned.
pub fn apply_filters(
    src: &GrayImage<u8>,
    kinds: &[FilterKind],
) -> Result<FilterOutputs, FilterError> {
    let mut entries = Vec::with_capacity(kinds.len());

    for &kind in kinds {
        let out = convolve(src, &kind.kernel())?;
        entries.push((kind, out));
    }

    Ok(FilterOutputs { entries })
}

/// Apply the whole built-in catalog to the source image, in canonical order.
///
/// # Examples
///
/// ```
/// use filtra_image::{GrayImage, ImageSize};
/// use filtra_imgproc::filter::apply_all;
///
/// let image = GrayImage::from_size_val(
///     ImageSize {
///         width: 8,
///         height: 6,
///     },
///     32u8,
/// ).unwrap();
///
/// let outputs = apply_all(&image).unwrap();
/// assert_eq!(outputs.len(), 5);
/// ```
pub fn apply_all(src: &GrayImage<u8>) -> Result<FilterOutputs, FilterError> {
    apply_filters(src, &FilterKind::ALL)
}
