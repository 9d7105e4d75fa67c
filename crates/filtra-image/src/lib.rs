#![deny(missing_docs)]
//! Grayscale image types for the filtra crates.

/// single-channel image representation.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{GrayImage, ImageSize};
