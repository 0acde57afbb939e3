use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::SeedConfig;
use crate::seed::{
    purge_seed_data, seed_all, seed_chat, seed_only, PlanError, ProgressRecorder, SeedError,
    SeedEvent, SeedPlan, SeedReport, SeedStep,
};
use crate::store::Backend;

/// Shared by every handler: the store, seed volumes and a lock allowing
/// one seed or purge run at a time.
pub struct AppContext<B> {
    pub backend: B,
    pub seed: SeedConfig,
    run_lock: Mutex<()>,
}

impl<B: Backend> AppContext<B> {
    pub fn new(backend: B, seed: SeedConfig) -> Self {
        Self {
            backend,
            seed,
            run_lock: Mutex::new(()),
        }
    }
}

pub type AppState<B> = Arc<AppContext<B>>;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<SeedEvent>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            events: Vec::new(),
        }
    }

    pub fn with_events(mut self, events: Vec<SeedEvent>) -> Self {
        self.events = events;
        self
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn busy() -> ApiError {
    (
        StatusCode::CONFLICT,
        Json(ErrorResponse::new("A seed run is already in progress")),
    )
}

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn run_failed(err: &SeedError, recorder: &ProgressRecorder) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(&err.to_string()).with_events(recorder.events())),
    )
}

/// Comma separated step names, e.g. `?only=kanban,crm`.
#[derive(Debug, Default, Deserialize)]
pub struct PlanQuery {
    pub only: Option<String>,
    #[serde(default)]
    pub chat: bool,
}

fn parse_steps(list: &str) -> Result<Vec<SeedStep>, ApiError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            <SeedStep as clap::ValueEnum>::from_str(name, true)
                .map_err(|_| bad_request(&format!("Unknown seed step '{}'", name)))
        })
        .collect()
}

fn plan_error(err: PlanError) -> ApiError {
    bad_request(&err.to_string())
}

pub async fn get_seed_plan<B: Backend + 'static>(
    State(_state): State<AppState<B>>,
    Query(query): Query<PlanQuery>,
) -> Result<Json<SeedPlan>, ApiError> {
    let plan = match (&query.only, query.chat) {
        (Some(only), _) => SeedPlan::for_targets(&parse_steps(only)?),
        (None, true) => SeedPlan::chat(),
        (None, false) => SeedPlan::full(),
    };
    plan.map(Json).map_err(plan_error)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedRequest {
    /// Seed only these steps; their parents are loaded from the store.
    pub only: Vec<SeedStep>,
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SeedRunResponse {
    pub report: SeedReport,
    pub events: Vec<SeedEvent>,
}

pub async fn run_seed<B: Backend + 'static>(
    State(state): State<AppState<B>>,
    RequestJson(request): RequestJson<SeedRequest>,
) -> Result<Json<SeedRunResponse>, ApiError> {
    let _guard = state.run_lock.try_lock().map_err(|_| busy())?;

    let mut config = state.seed.clone();
    if request.rng_seed.is_some() {
        config.rng_seed = request.rng_seed;
    }
    let recorder = ProgressRecorder::logging();
    let result = if request.only.is_empty() {
        seed_all(&state.backend, &config, &recorder).await
    } else {
        seed_only(&state.backend, &config, &recorder, &request.only).await
    };

    match result {
        Ok(report) => Ok(Json(SeedRunResponse {
            report,
            events: recorder.events(),
        })),
        Err(SeedError::Plan(err)) => Err(plan_error(err)),
        Err(err) => Err(run_failed(&err, &recorder)),
    }
}

pub async fn run_chat_seed<B: Backend + 'static>(
    State(state): State<AppState<B>>,
) -> Result<Json<SeedRunResponse>, ApiError> {
    let _guard = state.run_lock.try_lock().map_err(|_| busy())?;

    let recorder = ProgressRecorder::logging();
    match seed_chat(&state.backend, &state.seed, &recorder).await {
        Ok(report) => Ok(Json(SeedRunResponse {
            report,
            events: recorder.events(),
        })),
        Err(err) => Err(run_failed(&err, &recorder)),
    }
}

#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub deleted: u64,
    pub events: Vec<SeedEvent>,
}

pub async fn purge<B: Backend + 'static>(
    State(state): State<AppState<B>>,
) -> Result<Json<PurgeResponse>, ApiError> {
    let _guard = state.run_lock.try_lock().map_err(|_| busy())?;

    let recorder = ProgressRecorder::logging();
    match purge_seed_data(&state.backend, &recorder).await {
        Ok(report) => Ok(Json(PurgeResponse {
            deleted: report.total(),
            events: recorder.events(),
        })),
        Err(err) => Err(run_failed(&err, &recorder)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps_accepts_kebab_case_lists() {
        let steps = parse_steps("chat-groups, crm").unwrap();
        assert_eq!(steps, vec![SeedStep::ChatGroups, SeedStep::Crm]);
    }

    #[test]
    fn test_parse_steps_rejects_unknown_names() {
        let (status, Json(body)) = parse_steps("regions,payroll").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Unknown seed step 'payroll'");
    }

    #[tokio::test]
    async fn test_second_run_is_rejected_while_locked() {
        let state: AppState<crate::store::MemoryBackend> = Arc::new(AppContext::new(
            crate::store::MemoryBackend::new(),
            SeedConfig::default(),
        ));
        let _held = state.run_lock.try_lock().unwrap();

        let (status, _) = run_chat_seed(State(state.clone())).await.unwrap_err();
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
