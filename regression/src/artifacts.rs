//! Loading of the trained model and transformer files.
//!
//! Both artifacts are plain JSON:
//!
//! ```json
//! {"coef": [9345.94], "intercept": 26816.19}
//! {"degree": 4, "include_bias": true}
//! ```
//!
//! Loading happens once, before serving, and any failure is fatal for the caller.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    ArtifactErr, Pipeline,
    arch::{LinearRegression, PolynomialFeatures, Transform},
};

/// Powers are raised with `f64::powi`, which takes an `i32`.
const MAX_DEGREE: u32 = i32::MAX as u32;

#[derive(Debug, Deserialize)]
struct LinearArtifact {
    coef: Vec<f64>,
    intercept: f64,
}

/// Where to find the artifacts of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    /// Only set for polynomial regression.
    pub transform: Option<PathBuf>,
}

/// Loads a linear model file.
///
/// # Arguments
/// * `path` - The JSON file holding `coef` and `intercept`.
///
/// # Returns
/// The model or the reason it can't be used.
pub fn load_model(path: &Path) -> Result<LinearRegression, ArtifactErr> {
    let LinearArtifact { coef, intercept } = read_json(path)?;

    let invalid = |reason: &str| ArtifactErr::Invalid {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if coef.is_empty() {
        return Err(invalid("coef must not be empty"));
    }
    if coef.iter().any(|c| !c.is_finite()) {
        return Err(invalid("coef must only contain finite numbers"));
    }
    if !intercept.is_finite() {
        return Err(invalid("intercept must be a finite number"));
    }

    Ok(LinearRegression::new(coef, intercept))
}

/// Loads a polynomial transformer file.
///
/// # Arguments
/// * `path` - The JSON file holding `degree` and optionally `include_bias`.
///
/// # Returns
/// The transformer or the reason it can't be used.
pub fn load_transform(path: &Path) -> Result<PolynomialFeatures, ArtifactErr> {
    let poly: PolynomialFeatures = read_json(path)?;

    if poly.degree() == 0 || poly.degree() > MAX_DEGREE {
        return Err(ArtifactErr::Invalid {
            path: path.to_path_buf(),
            reason: format!("degree must be between 1 and {MAX_DEGREE}"),
        });
    }

    Ok(poly)
}

/// Loads every artifact and assembles the pipeline.
///
/// # Arguments
/// * `paths` - The artifact locations.
///
/// # Returns
/// A ready to share pipeline, or the first artifact that failed to load.
pub fn load_pipeline(paths: &ArtifactPaths) -> Result<Pipeline, ArtifactErr> {
    let model = load_model(&paths.model)?;
    info!("loaded model from {}", paths.model.display());

    let Some(transform_path) = &paths.transform else {
        return Ok(Pipeline::new(Arc::new(model)));
    };

    let transform = load_transform(transform_path)?;
    info!("loaded transformer from {}", transform_path.display());

    if transform.output_width() != model.width() {
        return Err(ArtifactErr::Incompatible {
            transform_width: transform.output_width(),
            model_width: model.width(),
        });
    }

    Ok(Pipeline::new(Arc::new(model)).with_transform(Arc::new(transform)))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactErr> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactErr::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ArtifactErr::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::{ValidationPolicy, arch::Predictor};

    fn write(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_a_linear_model() {
        let file = write(r#"{"coef": [9000.0], "intercept": 50000.0}"#);
        let model = load_model(file.path()).unwrap();

        let y = model.predict(ndarray::array![[5.0]].view()).unwrap();
        assert_eq!(y[0], 95000.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_model(Path::new("/definitely/not/here/model.json")).unwrap_err();
        assert!(matches!(err, ArtifactErr::Io { .. }));
        assert!(err.to_string().contains("model.json"));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let file = write("not json");
        assert!(matches!(load_model(file.path()), Err(ArtifactErr::Parse { .. })));

        let file = write(r#"{"coef": [1.0]}"#);
        assert!(matches!(load_model(file.path()), Err(ArtifactErr::Parse { .. })));
    }

    #[test]
    fn empty_coef_is_invalid() {
        let file = write(r#"{"coef": [], "intercept": 1.0}"#);
        assert!(matches!(load_model(file.path()), Err(ArtifactErr::Invalid { .. })));
    }

    #[test]
    fn degree_zero_is_invalid() {
        let file = write(r#"{"degree": 0}"#);
        assert!(matches!(load_transform(file.path()), Err(ArtifactErr::Invalid { .. })));
    }

    #[test]
    fn huge_degree_is_invalid() {
        let file = write(r#"{"degree": 4294967295}"#);
        assert!(matches!(load_transform(file.path()), Err(ArtifactErr::Invalid { .. })));
    }

    #[test]
    fn huge_degree_fails_the_pipeline_without_panicking() {
        let model = write(r#"{"coef": [1.0, 2.0], "intercept": 0.0}"#);
        let poly = write(r#"{"degree": 4294967295, "include_bias": false}"#);
        let paths = ArtifactPaths {
            model: model.path().to_path_buf(),
            transform: Some(poly.path().to_path_buf()),
        };

        assert!(matches!(load_pipeline(&paths), Err(ArtifactErr::Invalid { .. })));
    }

    #[test]
    fn plain_pipeline() {
        let model = write(r#"{"coef": [9000.0], "intercept": 50000.0}"#);
        let paths = ArtifactPaths {
            model: model.path().to_path_buf(),
            transform: None,
        };

        let pipeline = load_pipeline(&paths).unwrap();
        assert!(!pipeline.is_polynomial());

        let out = pipeline
            .handle(&json!({ "YearsExperience": 5 }), ValidationPolicy::network())
            .unwrap();
        assert_eq!(out.predicted_salary, 95000.0);
    }

    #[test]
    fn polynomial_pipeline() {
        let model = write(r#"{"coef": [10.0, 2.0, 1.0], "intercept": 0.0}"#);
        let poly = write(r#"{"degree": 2, "include_bias": true}"#);
        let paths = ArtifactPaths {
            model: model.path().to_path_buf(),
            transform: Some(poly.path().to_path_buf()),
        };

        let pipeline = load_pipeline(&paths).unwrap();
        assert!(pipeline.is_polynomial());

        let out = pipeline
            .handle(&json!({ "YearsExperience": 2 }), ValidationPolicy::network())
            .unwrap();
        assert_eq!(out.predicted_salary, 18.0);
    }

    #[test]
    fn incompatible_widths_fail_loading() {
        let model = write(r#"{"coef": [1.0, 2.0], "intercept": 0.0}"#);
        let poly = write(r#"{"degree": 4}"#);
        let paths = ArtifactPaths {
            model: model.path().to_path_buf(),
            transform: Some(poly.path().to_path_buf()),
        };

        match load_pipeline(&paths) {
            Err(ArtifactErr::Incompatible {
                transform_width,
                model_width,
            }) => {
                assert_eq!(transform_width, 5);
                assert_eq!(model_width, 2);
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
