use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::post,
};
use log::debug;
use regression::{Pipeline, PredictErr, Prediction, ValidationPolicy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiErr;

/// State shared by every handler. Read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    policy: ValidationPolicy,
}

impl AppState {
    pub fn new(pipeline: Pipeline, policy: ValidationPolicy) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            policy,
        }
    }
}

/// Body of a successful `POST /predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "YearsExperience")]
    pub years_experience: f64,
    #[serde(rename = "PredictedSalary")]
    pub predicted_salary: f64,
}

impl From<Prediction> for PredictResponse {
    fn from(p: Prediction) -> Self {
        Self {
            years_experience: p.years_experience,
            predicted_salary: p.predicted_salary,
        }
    }
}

/// Builds the HTTP router.
///
/// # Arguments
/// * `state` - The loaded pipeline and the validation policy for network callers.
///
/// # Returns
/// A router ready to be served.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .with_state(state)
}

/// `POST /predict`
///
/// The body is decoded by hand so that a missing or non-JSON body is reported through the same
/// `{"error": ...}` shape as every other rejection.
async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiErr> {
    let payload: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| PredictErr::MalformedRequest {
            reason: format!("body is not valid JSON ({e})"),
        })?
    };

    let prediction = state.pipeline.handle(&payload, state.policy)?;
    debug!(
        "predicted {} for {}",
        prediction.predicted_salary, prediction.years_experience
    );

    Ok(Json(prediction.into()))
}
