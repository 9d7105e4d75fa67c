use crate::error::FilterError;

/// Side length of every filter kernel.
pub const KERNEL_SIZE: usize = 3;

/// A 3x3 filter kernel with real-valued weights.
///
/// The weights are stored row-major and are immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kernel {
    weights: [[f32; KERNEL_SIZE]; KERNEL_SIZE],
}

impl Kernel {
    /// Create a new kernel from a 3x3 weight table.
    pub const fn new(weights: [[f32; KERNEL_SIZE]; KERNEL_SIZE]) -> Self {
        Self { weights }
    }

    /// Create a new kernel from a row-major slice of weights.
    ///
    /// # Errors
    ///
    /// If the slice does not contain exactly 9 weights, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtra_imgproc::filter::kernels::Kernel;
    ///
    /// let kernel = Kernel::from_slice(&[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
    /// assert_eq!(kernel.weights()[1][1], 1.0);
    /// ```
    pub fn from_slice(weights: &[f32]) -> Result<Self, FilterError> {
        if weights.len() != KERNEL_SIZE * KERNEL_SIZE {
            return Err(FilterError::MalformedKernel(weights.len()));
        }

        let mut table = [[0.0; KERNEL_SIZE]; KERNEL_SIZE];
        for (i, row) in table.iter_mut().enumerate() {
            row.copy_from_slice(&weights[i * KERNEL_SIZE..(i + 1) * KERNEL_SIZE]);
        }

        Ok(Self::new(table))
    }

    /// Get the 3x3 weight table of the kernel.
    pub fn weights(&self) -> &[[f32; KERNEL_SIZE]; KERNEL_SIZE] {
        &self.weights
    }
}

/// The built-in filters, in canonical display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Neutral kernel, passes the interior through unchanged.
    Identity,
    /// Edge enhancement kernel.
    Sharpen,
    /// Edge detection kernel.
    EdgeDetect,
    /// 3x3 box blur kernel.
    Blur,
    /// Relief effect kernel.
    Emboss,
}

impl FilterKind {
    /// All built-in filters in canonical order.
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Identity,
        FilterKind::Sharpen,
        FilterKind::EdgeDetect,
        FilterKind::Blur,
        FilterKind::Emboss,
    ];

    /// Get the display name of the filter.
    pub const fn name(&self) -> &'static str {
        match self {
            FilterKind::Identity => "identity",
            FilterKind::Sharpen => "sharpen",
            FilterKind::EdgeDetect => "edge_detect",
            FilterKind::Blur => "blur",
            FilterKind::Emboss => "emboss",
        }
    }

    /// Get the 3x3 kernel of the filter.
    pub const fn kernel(&self) -> Kernel {
        match self {
            FilterKind::Identity => Kernel::new([
                [0.0, 0.0, 0.0], //
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0],
            ]),
            FilterKind::Sharpen => Kernel::new([
                [0.0, -1.0, 0.0], //
                [-1.0, 5.0, -1.0],
                [0.0, -1.0, 0.0],
            ]),
            FilterKind::EdgeDetect => Kernel::new([
                [-1.0, -1.0, -1.0], //
                [-1.0, 8.0, -1.0],
                [-1.0, -1.0, -1.0],
            ]),
            FilterKind::Blur => Kernel::new([
                [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0], //
                [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0],
                [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0],
            ]),
            FilterKind::Emboss => Kernel::new([
                [-2.0, -1.0, 0.0], //
                [-1.0, 1.0, 1.0],
                [0.0, 1.0, 2.0],
            ]),
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
