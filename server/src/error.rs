use std::{error::Error, fmt, io};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::warn;
use regression::{ArtifactErr, PredictErr};
use serde_json::json;

/// Failures that keep the server from starting.
#[derive(Debug)]
pub enum ServerErr {
    InvalidEnv { var: &'static str, value: String },
    Artifact(ArtifactErr),
    Io(io::Error),
}

impl fmt::Display for ServerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerErr::InvalidEnv { var, value } => {
                write!(f, "invalid value for {var}: '{value}'")
            }
            ServerErr::Artifact(e) => write!(f, "failed to load artifacts: {e}"),
            ServerErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for ServerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServerErr::Artifact(e) => Some(e),
            ServerErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArtifactErr> for ServerErr {
    fn from(value: ArtifactErr) -> Self {
        Self::Artifact(value)
    }
}

impl From<io::Error> for ServerErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A request-scoped failure, rendered as `{"error": <message>}` with a client error status.
#[derive(Debug)]
pub struct ApiErr(pub PredictErr);

impl From<PredictErr> for ApiErr {
    fn from(value: PredictErr) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let Self(err) = self;
        warn!(kind = err.kind().as_str(); "rejected prediction request: {err}");

        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response()
    }
}
