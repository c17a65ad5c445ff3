use std::{env, path::PathBuf};

use regression::ArtifactPaths;

const DEFAULT_MODEL_PATH: &str = "model.json";

/// Reads the artifact locations from `MODEL_PATH` and `TRANSFORM_PATH`.
pub fn artifact_paths() -> ArtifactPaths {
    artifact_paths_from(|key| env::var(key).ok())
}

fn artifact_paths_from<F>(lookup: F) -> ArtifactPaths
where
    F: Fn(&str) -> Option<String>,
{
    let model = lookup("MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
    let transform = lookup("TRANSFORM_PATH").filter(|p| !p.trim().is_empty());

    ArtifactPaths {
        model: PathBuf::from(model),
        transform: transform.map(PathBuf::from),
    }
}
