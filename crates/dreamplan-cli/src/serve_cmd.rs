use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use dreamplan_core::anthropic::AnthropicClient;
use dreamplan_core::relay::{self, AnalyzeRequest, AnalyzeResponse, RelayError};
use dreamplan_db::models::{Analysis, Plan};
use dreamplan_db::queries::{analyses as analysis_db, plans as plan_db};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{err:#}"),
        }
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        let status = match &err {
            RelayError::MissingApiKey => StatusCode::BAD_REQUEST,
            // Forward the upstream status code as-is.
            RelayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::UnparseableReply | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// State and response types
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub anthropic: AnthropicClient,
}

#[derive(Debug, Serialize)]
pub struct PlanDetailResponse {
    #[serde(flatten)]
    pub plan: Plan,
    pub analysis: Option<Analysis>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/api/plans", get(list_plans))
        .route("/api/plans/{id}", get(get_plan_detail))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(pool: PgPool, bind: &str, port: u16) -> Result<()> {
    let state = AppState {
        pool,
        anthropic: AnthropicClient::new(),
    };
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("dreamplan serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("dreamplan serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// The enrichment relay: one inbound request, one outbound model call.
///
/// Stateless -- persistence is the submitting client's job.
async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let analysis = relay::analyze(
        &state.anthropic,
        &request.plan_data,
        request.anthropic_api_key.as_deref(),
    )
    .await?;

    Ok(Json(AnalyzeResponse { analysis }))
}

async fn list_plans(State(state): State<AppState>) -> Result<Json<Vec<Plan>>, AppError> {
    let plans = plan_db::list_plans(&state.pool)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(plans))
}

async fn get_plan_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlanDetailResponse>, AppError> {
    let plan = plan_db::get_plan(&state.pool, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("plan {id} not found")))?;

    let analysis = analysis_db::get_analysis_for_plan(&state.pool, id)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(PlanDetailResponse { plan, analysis }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
