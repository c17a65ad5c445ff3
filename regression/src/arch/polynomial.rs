use ndarray::{Array2, ArrayView2};
use serde::Deserialize;

use super::Transform;
use crate::{PredictErr, Result};

fn default_include_bias() -> bool {
    true
}

/// Polynomial expansion of a single input column into `[1, x, x^2, ..., x^degree]`.
///
/// The leading constant column is only emitted when `include_bias` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PolynomialFeatures {
    degree: u32,
    #[serde(default = "default_include_bias")]
    include_bias: bool,
}

impl PolynomialFeatures {
    /// Creates a new `PolynomialFeatures`.
    ///
    /// # Arguments
    /// * `degree` - The highest power to emit.
    /// * `include_bias` - Whether to emit the `x^0` column.
    ///
    /// # Returns
    /// A new `PolynomialFeatures` instance.
    pub fn new(degree: u32, include_bias: bool) -> Self {
        Self {
            degree,
            include_bias,
        }
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    fn first_power(&self) -> usize {
        if self.include_bias { 0 } else { 1 }
    }
}

impl Transform for PolynomialFeatures {
    fn output_width(&self) -> usize {
        self.degree as usize + 1 - self.first_power()
    }

    fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != 1 {
            return Err(PredictErr::ShapeMismatch {
                what: "transformer input",
                got: x.dim(),
                expected: (x.nrows(), 1),
            });
        }

        let start = self.first_power();
        let out = Array2::from_shape_fn((x.nrows(), self.output_width()), |(i, j)| {
            x[[i, 0]].powi((start + j) as i32)
        });

        Ok(out)
    }
}
