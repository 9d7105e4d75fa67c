//! Small fixed-kernel grayscale image filtering library.
//!
//! Re-exports the filtra crates under a single namespace.

#[doc(inline)]
pub use filtra_image as image;

#[doc(inline)]
pub use filtra_imgproc as imgproc;

#[doc(inline)]
pub use filtra_io as io;
