use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{self, AppContext, AppState};
use crate::config::SeedConfig;
use crate::store::Backend;

pub fn create_router<B: Backend + 'static>() -> Router<AppState<B>> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/seed/plan", get(handlers::get_seed_plan::<B>))
        .route(
            "/seed",
            post(handlers::run_seed::<B>).delete(handlers::purge::<B>),
        )
        .route("/seed/chat", post(handlers::run_chat_seed::<B>))
}

/// Router with its state attached, ready to serve.
pub fn create_app<B: Backend + 'static>(backend: B, seed: SeedConfig) -> Router {
    create_router().with_state(Arc::new(AppContext::new(backend, seed)))
}
