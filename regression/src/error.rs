use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type used by the whole prediction pipeline.
pub type Result<T> = std::result::Result<T, PredictErr>;

/// The category of a request-scoped failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedRequest,
    MissingField,
    InvalidValue,
    TransformError,
    PredictionError,
}

impl ErrorKind {
    /// Returns the stable name of this kind, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedRequest => "malformed_request",
            ErrorKind::MissingField => "missing_field",
            ErrorKind::InvalidValue => "invalid_value",
            ErrorKind::TransformError => "transform_error",
            ErrorKind::PredictionError => "prediction_error",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure while turning a request into a prediction.
///
/// Every variant is recoverable and meant to be reported back to the caller, the `Display`
/// output is the client facing message.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictErr {
    MalformedRequest {
        reason: String,
    },
    MissingField {
        key: &'static str,
    },
    InvalidValue {
        key: &'static str,
        reason: String,
    },
    Transform {
        reason: String,
    },
    ShapeMismatch {
        what: &'static str,
        got: (usize, usize),
        expected: (usize, usize),
    },
    Prediction {
        reason: String,
    },
}

impl PredictErr {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictErr::MalformedRequest { .. } => ErrorKind::MalformedRequest,
            PredictErr::MissingField { .. } => ErrorKind::MissingField,
            PredictErr::InvalidValue { .. } => ErrorKind::InvalidValue,
            PredictErr::Transform { .. } | PredictErr::ShapeMismatch { .. } => {
                ErrorKind::TransformError
            }
            PredictErr::Prediction { .. } => ErrorKind::PredictionError,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRequest {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }

    /// Builds a transform failure, public so out of crate transforms can report errors.
    pub fn transform(reason: impl Into<String>) -> Self {
        Self::Transform {
            reason: reason.into(),
        }
    }

    /// Builds a prediction failure, public so out of crate predictors can report errors.
    pub fn prediction(reason: impl Into<String>) -> Self {
        Self::Prediction {
            reason: reason.into(),
        }
    }
}

impl Display for PredictErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictErr::MalformedRequest { reason } => {
                write!(f, "Invalid input format: {reason}")
            }
            PredictErr::MissingField { key } => write!(f, "Missing required key: '{key}'"),
            PredictErr::InvalidValue { key, reason } => {
                write!(f, "Invalid numeric value for '{key}': {reason}")
            }
            PredictErr::Transform { reason } => write!(f, "Feature transform failed: {reason}"),
            PredictErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "Feature transform failed: {what} has shape {got:?}, expected {expected:?}"
            ),
            PredictErr::Prediction { reason } => write!(f, "Prediction error: {reason}"),
        }
    }
}

impl Error for PredictErr {}

/// A failure while loading the trained artifacts at startup.
///
/// Unlike [`PredictErr`] this is fatal, the process must not start serving without its model.
#[derive(Debug)]
pub enum ArtifactErr {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid {
        path: PathBuf,
        reason: String,
    },
    Incompatible {
        transform_width: usize,
        model_width: usize,
    },
}

impl Display for ArtifactErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactErr::Io { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            ArtifactErr::Parse { path, source } => {
                write!(f, "invalid JSON in '{}': {source}", path.display())
            }
            ArtifactErr::Invalid { path, reason } => {
                write!(f, "invalid artifact '{}': {reason}", path.display())
            }
            ArtifactErr::Incompatible {
                transform_width,
                model_width,
            } => write!(
                f,
                "transformer produces {transform_width} features but the model expects {model_width}"
            ),
        }
    }
}

impl Error for ArtifactErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ArtifactErr::Io { source, .. } => Some(source),
            ArtifactErr::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
