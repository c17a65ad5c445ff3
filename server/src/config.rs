use std::{env, path::PathBuf};

use regression::{ArtifactPaths, ValidationPolicy};

use crate::error::ServerErr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MODEL_PATH: &str = "model.json";

/// Immutable settings the server is started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub artifacts: ArtifactPaths,
    pub policy: ValidationPolicy,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Returns
    /// The configuration or the first variable holding an unusable value.
    pub fn from_env() -> Result<Self, ServerErr> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a variable, if set.
    ///
    /// # Returns
    /// The configuration or the first variable holding an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ServerErr::InvalidEnv { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let model = lookup("MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
        let transform = lookup("TRANSFORM_PATH").filter(|p| !p.trim().is_empty());

        let reject_negative_feature = match lookup("REJECT_NEGATIVE") {
            Some(raw) => parse_flag(&raw).ok_or(ServerErr::InvalidEnv {
                var: "REJECT_NEGATIVE",
                value: raw,
            })?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            artifacts: ArtifactPaths {
                model: PathBuf::from(model),
                transform: transform.map(PathBuf::from),
            },
            policy: ValidationPolicy {
                reject_negative_feature,
            },
        })
    }

    /// Returns the `host:port` pair to bind to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
