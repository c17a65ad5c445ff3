use ndarray::{Array1, ArrayView2};

use super::Predictor;
use crate::{PredictErr, Result};

/// An ordinary least squares model: `y = x · coef + intercept`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    coef: Array1<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Creates a new `LinearRegression`.
    ///
    /// # Arguments
    /// * `coef` - One weight per input column.
    /// * `intercept` - The bias term.
    ///
    /// # Returns
    /// A new `LinearRegression` instance.
    pub fn new<I>(coef: I, intercept: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            coef: coef.into_iter().collect(),
            intercept,
        }
    }

    /// Returns the amount of input columns this model expects.
    pub fn width(&self) -> usize {
        self.coef.len()
    }
}

impl Predictor for LinearRegression {
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.width() {
            return Err(PredictErr::prediction(format!(
                "model expects {} features per row, got {}",
                self.width(),
                x.ncols()
            )));
        }

        Ok(x.dot(&self.coef) + self.intercept)
    }
}
