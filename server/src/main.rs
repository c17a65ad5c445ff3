use anyhow::Context;
use log::info;
use tokio::{net::TcpListener, signal};

use server::{AppState, ServerConfig, ServerErr, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ServerConfig::from_env().context("reading configuration")?;

    // The model must be in memory before the first request is accepted.
    let pipeline = regression::load_pipeline(&config.artifacts)
        .map_err(ServerErr::from)
        .context("loading artifacts")?;

    let mode = if pipeline.is_polynomial() {
        "polynomial"
    } else {
        "linear"
    };
    info!(
        "serving {mode} regression, reject_negative_feature={}",
        config.policy.reject_negative_feature
    );

    let app = router(AppState::new(pipeline, config.policy));

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(ServerErr::from)
        .with_context(|| format!("binding {addr}"))?;
    info!("listening at {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("received shutdown signal");
        })
        .await?;

    info!("wrapping up, shutting down...");
    Ok(())
}
