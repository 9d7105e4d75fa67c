use filtra_image::ImageError;

/// An error type for the filtering operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    /// Error when the image is too small to fit the 3x3 kernel support.
    #[error("Image {0}x{1} is smaller than the 3x3 kernel support")]
    ImageTooSmall(usize, usize),

    /// Error when a kernel does not have exactly 3x3 weights.
    #[error("Kernel must have exactly 9 weights, got {0}")]
    MalformedKernel(usize),

    /// Error when creating an output image.
    #[error(transparent)]
    Image(#[from] ImageError),
}
