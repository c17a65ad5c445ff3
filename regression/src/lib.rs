pub mod arch;
pub mod artifacts;
pub mod error;
pub mod feature;
pub mod pipeline;

pub use artifacts::{ArtifactPaths, load_pipeline};
pub use error::{ArtifactErr, ErrorKind, PredictErr, Result};
pub use feature::{ENVELOPE_KEY, FEATURE_KEY, Feature, ValidationPolicy, normalize, normalize_with};
pub use pipeline::{Pipeline, Prediction, predict};
