mod linear;
mod polynomial;

use ndarray::{Array1, Array2, ArrayView2};

use crate::Result;

pub use linear::LinearRegression;
pub use polynomial::PolynomialFeatures;

/// Expands raw feature rows into the columns a model was trained on.
///
/// Implementations are loaded once and shared read-only between concurrent requests.
pub trait Transform: Send + Sync {
    /// Returns the amount of columns every transformed row has.
    fn output_width(&self) -> usize;

    /// Transforms each row of `x`.
    ///
    /// # Arguments
    /// * `x` - The input rows.
    ///
    /// # Returns
    /// A matrix with the same amount of rows as `x` and `output_width` columns.
    fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>>;
}

/// Maps feature rows to one predicted value per row.
pub trait Predictor: Send + Sync {
    /// Predicts a value for each row of `x`.
    ///
    /// # Arguments
    /// * `x` - The (possibly transformed) input rows.
    ///
    /// # Returns
    /// One prediction per row.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>>;
}
