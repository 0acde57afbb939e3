pub mod api;
pub mod config;
pub mod model;
pub mod seed;
pub mod store;

pub use api::handlers;
pub use api::routes;

pub use model::*;

pub use seed::{
    purge_seed_data, seed_all, seed_chat, seed_only, LogProgress, ProgressRecorder,
    ProgressSink, SeedError, SeedEvent, SeedPlan, SeedReport, SeedStep, StepStatus,
};

pub use store::{Backend, BackendExt, MemoryBackend, PostgresBackend};

/// Serve the seeding HTTP API on the configured address until shutdown.
pub async fn run_server<B: Backend + 'static>(
    backend: B,
    config: &crate::config::AppConfig,
) -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    let app = crate::api::routes::create_app(backend, config.seed.clone());

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Seed API listening on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
