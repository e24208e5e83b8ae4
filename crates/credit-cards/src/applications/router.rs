use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::ApplicationId;
use super::frequent_flyer::FrequentFlyerNumberValidator;
use super::intake::{details_from_json, FieldViolation};
use super::repository::{ApplicationRepository, ApplicationStatusView, RepositoryError};
use super::service::{ApplicationServiceError, CreditCardApplicationService};

const DEFAULT_REFERRAL_LIMIT: usize = 25;

/// Router builder exposing HTTP endpoints for intake and lookup.
pub fn application_router<R, V>(service: Arc<CreditCardApplicationService<R, V>>) -> Router
where
    R: ApplicationRepository + 'static,
    V: FrequentFlyerNumberValidator + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<R, V>))
        .route(
            "/api/v1/applications/:application_id",
            get(status_handler::<R, V>),
        )
        .route("/api/v1/referrals", get(referrals_handler::<R, V>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReferralQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn submit_handler<R, V>(
    State(service): State<Arc<CreditCardApplicationService<R, V>>>,
    payload: Result<axum::Json<Value>, JsonRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
    V: FrequentFlyerNumberValidator + ?Sized + 'static,
{
    let body = match payload {
        Ok(axum::Json(body)) => body,
        Err(rejection) => {
            let violation = FieldViolation {
                field: "body",
                message: "Application details must be a JSON object",
            };
            return form_errors(rejection.status(), &[violation], &Value::Null);
        }
    };

    let details = match details_from_json(&body) {
        Ok(details) => details,
        Err(violations) => {
            return form_errors(StatusCode::UNPROCESSABLE_ENTITY, &violations, &body);
        }
    };

    match service.submit(details) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(ApplicationServiceError::Rejected(rejection)) => {
            form_errors(StatusCode::UNPROCESSABLE_ENTITY, &rejection.violations, &body)
        }
        Err(ApplicationServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "application already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(&other),
    }
}

pub(crate) async fn status_handler<R, V>(
    State(service): State<Arc<CreditCardApplicationService<R, V>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    V: FrequentFlyerNumberValidator + ?Sized + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "application_id": id.0,
                "error": "application not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(&other),
    }
}

pub(crate) async fn referrals_handler<R, V>(
    State(service): State<Arc<CreditCardApplicationService<R, V>>>,
    Query(query): Query<ReferralQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    V: FrequentFlyerNumberValidator + ?Sized + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_REFERRAL_LIMIT);
    match service.referred(limit) {
        Ok(records) => {
            let views: Vec<ApplicationStatusView> =
                records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(other) => internal_error(&other),
    }
}

/// Same shape for every form problem: the violations plus whatever the client sent.
fn form_errors(status: StatusCode, violations: &[FieldViolation], details: &Value) -> Response {
    let payload = json!({
        "errors": violations,
        "details": details,
    });
    (status, axum::Json(payload)).into_response()
}

fn internal_error(error: &ApplicationServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
