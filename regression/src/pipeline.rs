use std::sync::Arc;

use log::debug;
use ndarray::Array2;
use serde_json::Value;

use crate::{
    PredictErr, Result,
    arch::{Predictor, Transform},
    feature::{self, Feature, ValidationPolicy},
};

/// A successful prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// The input feature, echoed back untouched.
    pub years_experience: f64,
    pub predicted_salary: f64,
}

/// Runs a single feature through the optional transform and the model.
///
/// # Arguments
/// * `feature` - The validated input.
/// * `transform` - The feature expansion, `None` for plain regression.
/// * `model` - The trained predictor.
///
/// # Returns
/// The prediction or the step that failed.
pub fn predict(
    feature: Feature,
    transform: Option<&dyn Transform>,
    model: &dyn Predictor,
) -> Result<Prediction> {
    let x = Array2::from_elem((1, 1), feature.value());

    let x = match transform {
        Some(transform) => expand(transform, x)?,
        None => x,
    };

    let y = model.predict(x.view())?;

    let predicted_salary = *y
        .first()
        .ok_or_else(|| PredictErr::prediction("model returned no output"))?;

    if !predicted_salary.is_finite() {
        return Err(PredictErr::prediction(format!(
            "model returned a non finite value ({predicted_salary})"
        )));
    }

    Ok(Prediction {
        years_experience: feature.value(),
        predicted_salary,
    })
}

fn expand(transform: &dyn Transform, x: Array2<f64>) -> Result<Array2<f64>> {
    let expected = (x.nrows(), transform.output_width());
    let out = transform.transform(x.view())?;

    if out.dim() != expected {
        return Err(PredictErr::ShapeMismatch {
            what: "expanded features",
            got: out.dim(),
            expected,
        });
    }

    if out.iter().any(|v| !v.is_finite()) {
        return Err(PredictErr::transform("expansion produced a non finite value"));
    }

    Ok(out)
}

/// The read-only capabilities loaded at startup, bundled so they can be shared between requests.
#[derive(Clone)]
pub struct Pipeline {
    transform: Option<Arc<dyn Transform>>,
    model: Arc<dyn Predictor>,
}

impl Pipeline {
    /// Creates a new plain regression `Pipeline`.
    ///
    /// # Arguments
    /// * `model` - The trained predictor.
    ///
    /// # Returns
    /// A new `Pipeline` instance without feature expansion.
    pub fn new(model: Arc<dyn Predictor>) -> Self {
        Self {
            transform: None,
            model,
        }
    }

    /// Sets the feature expansion applied before the model.
    pub fn with_transform(mut self, transform: Arc<dyn Transform>) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Whether this pipeline expands features before predicting.
    pub fn is_polynomial(&self) -> bool {
        self.transform.is_some()
    }

    /// Predicts the salary for an already validated feature.
    pub fn predict(&self, feature: Feature) -> Result<Prediction> {
        predict(feature, self.transform.as_deref(), self.model.as_ref())
    }

    /// Normalizes a raw payload and predicts on it.
    ///
    /// # Arguments
    /// * `payload` - The decoded request body.
    /// * `policy` - The validation policy of the calling surface.
    ///
    /// # Returns
    /// The prediction or the reason the request failed.
    pub fn handle(&self, payload: &Value, policy: ValidationPolicy) -> Result<Prediction> {
        let result = feature::normalize_with(payload, policy).and_then(|f| self.predict(f));

        if let Err(e) = &result {
            debug!(kind = e.kind().as_str(); "request rejected: {e}");
        }

        result
    }
}
