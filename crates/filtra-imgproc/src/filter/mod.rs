//! Filter operations
//!
//! This module provides the fixed 3x3 kernel catalog, the valid-mode
//! convolution engine and the batch runner applying the whole catalog.

/// Filter kernels
pub mod kernels;

/// Convolution engine
mod convolution;
pub use convolution::*;

/// Batch application of the kernel catalog
mod batch;
pub use batch::*;
