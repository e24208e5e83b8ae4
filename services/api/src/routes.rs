use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use credit_cards::applications::{
    application_router, ApplicationRepository, CreditCardApplicationService,
    FrequentFlyerNumberValidator,
};
use credit_cards::error::AppError;
use credit_cards::jobs::{run_batch, BatchSummary, BATCH_JOB_STARTED};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct BatchJobRequest {
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchJobResponse {
    pub(crate) status: &'static str,
    pub(crate) summary: BatchSummary,
}

pub(crate) fn with_application_routes<R, V>(
    service: Arc<CreditCardApplicationService<R, V>>,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
    V: FrequentFlyerNumberValidator + ?Sized + 'static,
{
    let jobs = axum::Router::new()
        .route(
            "/api/v1/jobs/batch",
            axum::routing::post(batch_job_endpoint::<R, V>),
        )
        .with_state(service.clone());

    application_router(service)
        .merge(jobs)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn batch_job_endpoint<R, V>(
    State(service): State<Arc<CreditCardApplicationService<R, V>>>,
    Json(payload): Json<BatchJobRequest>,
) -> Result<(StatusCode, Json<BatchJobResponse>), AppError>
where
    R: ApplicationRepository + 'static,
    V: FrequentFlyerNumberValidator + ?Sized + 'static,
{
    let reader = Cursor::new(payload.csv.into_bytes());
    let summary = run_batch(reader, &service)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(BatchJobResponse {
            status: BATCH_JOB_STARTED,
            summary,
        }),
    ))
}
