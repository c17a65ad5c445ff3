pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::{ApiErr, ServerErr};
pub use routes::{AppState, PredictResponse, router};
