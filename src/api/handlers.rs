//! HTTP request handlers for the PayTrack API.
//!
//! Every endpoint except registration acts on behalf of the employee named
//! in the `X-Employee-Id` header; that employee's role is read from the
//! record store, never from the request.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::error::EngineError;
use crate::finalizer::FinalizedShift;
use crate::models::{EarningsSummary, Employee, HistoryRow, PayrollOverview, Session};

use super::request::{
    FinalizeRequest, PunchRequest, RateUpdateRequest, RegisterRequest, SessionsQuery,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Header naming the employee a request acts for.
pub const ACTOR_HEADER: &str = "x-employee-id";

type ApiResult<T> = Result<(StatusCode, Json<T>), ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", post(register_handler))
        .route("/sessions", get(sessions_handler))
        .route("/sessions/punch-in", post(punch_in_handler))
        .route("/sessions/punch-out", post(punch_out_handler))
        .route("/shifts/finalize", post(finalize_handler))
        .route("/history", get(history_handler))
        .route("/earnings", get(earnings_handler))
        .route("/admin/payroll", get(payroll_overview_handler))
        .route("/admin/employees/:id/rates", put(update_rates_handler))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: &Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Unwraps a query string, turning extractor rejections into 400 responses.
fn parse_query<T>(
    query: Result<Query<T>, QueryRejection>,
    correlation_id: &Uuid,
) -> Result<T, ApiErrorResponse> {
    query.map(|Query(query)| query).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(
            correlation_id = %correlation_id,
            error = %body_text,
            "Query string rejected"
        );
        ApiErrorResponse::bad_request(ApiError::new("INVALID_QUERY", body_text))
    })
}

/// Resolves the acting employee from the request headers.
fn resolve_actor(
    state: &AppState,
    headers: &HeaderMap,
    correlation_id: &Uuid,
) -> Result<RequestContext, ApiErrorResponse> {
    let actor_id = headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            warn!(correlation_id = %correlation_id, "Request without actor header");
            ApiErrorResponse::unauthorized("MISSING_ACTOR", "X-Employee-Id header is required")
        })?;

    state
        .keeper()
        .context_for(actor_id)
        .map_err(|err| match err {
            EngineError::EmployeeNotFound { employee_id } => {
                warn!(
                    correlation_id = %correlation_id,
                    actor_id = %employee_id,
                    "Unknown actor"
                );
                ApiErrorResponse::unauthorized(
                    "UNKNOWN_ACTOR",
                    format!("Unknown employee: {}", employee_id),
                )
            }
            other => other.into(),
        })
}

/// Logs a failed engine call and converts it for the response.
fn reject(correlation_id: &Uuid, err: EngineError) -> ApiErrorResponse {
    if err.is_business_rule() {
        info!(correlation_id = %correlation_id, error = %err, "Request rejected");
    } else {
        warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    }
    err.into()
}

/// Handler for POST /employees.
async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing registration request");

    let request = parse_body(payload, &correlation_id)?;
    let employee = state
        .keeper()
        .register_employee(&request.id, &request.name, &request.secret)
        .map_err(|err| reject(&correlation_id, err))?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for POST /sessions/punch-in.
async fn punch_in_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PunchRequest>, JsonRejection>,
) -> ApiResult<Session> {
    let correlation_id = Uuid::new_v4();
    let ctx = resolve_actor(&state, &headers, &correlation_id)?;
    let (date, time_of_day) = parse_body(payload, &correlation_id)?.resolve();
    info!(
        correlation_id = %correlation_id,
        actor_id = %ctx.actor_id,
        date = %date,
        "Processing punch-in"
    );

    let session = state
        .keeper()
        .punch_in(&ctx, date, time_of_day)
        .map_err(|err| reject(&correlation_id, err))?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// Handler for POST /sessions/punch-out.
async fn punch_out_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PunchRequest>, JsonRejection>,
) -> ApiResult<Session> {
    let correlation_id = Uuid::new_v4();
    let ctx = resolve_actor(&state, &headers, &correlation_id)?;
    let (date, time_of_day) = parse_body(payload, &correlation_id)?.resolve();
    info!(
        correlation_id = %correlation_id,
        actor_id = %ctx.actor_id,
        date = %date,
        "Processing punch-out"
    );

    let session = state
        .keeper()
        .punch_out(&ctx, date, time_of_day)
        .map_err(|err| reject(&correlation_id, err))?;

    Ok((StatusCode::OK, Json(session)))
}

/// Handler for GET /sessions.
async fn sessions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<SessionsQuery>, QueryRejection>,
) -> ApiResult<Vec<Session>> {
    let correlation_id = Uuid::new_v4();
    let ctx = resolve_actor(&state, &headers, &correlation_id)?;
    let date = parse_query(query, &correlation_id)?.resolve();

    let sessions = state
        .keeper()
        .day_sessions(&ctx, date)
        .map_err(|err| reject(&correlation_id, err))?;

    Ok((StatusCode::OK, Json(sessions)))
}

/// Handler for POST /shifts/finalize.
///
/// Finalizes the actor's day at the rates currently on their record.
async fn finalize_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<FinalizeRequest>, JsonRejection>,
) -> ApiResult<FinalizedShift> {
    let correlation_id = Uuid::new_v4();
    let ctx = resolve_actor(&state, &headers, &correlation_id)?;
    let date = parse_body(payload, &correlation_id)?.resolve();
    info!(
        correlation_id = %correlation_id,
        actor_id = %ctx.actor_id,
        date = %date,
        "Processing shift finalization"
    );

    let start_time = Instant::now();
    let shift = state
        .keeper()
        .end_shift(&ctx, date)
        .map_err(|err| reject(&correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %shift.record.employee_id,
        session_count = shift.session_count,
        total_pay = %shift.record.total_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Shift finalized"
    );
    Ok((StatusCode::CREATED, Json(shift)))
}

/// Handler for GET /history.
async fn history_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<HistoryRow>> {
    let correlation_id = Uuid::new_v4();
    let ctx = resolve_actor(&state, &headers, &correlation_id)?;

    let rows = state
        .keeper()
        .history(&ctx)
        .map_err(|err| reject(&correlation_id, err))?;

    Ok((StatusCode::OK, Json(rows)))
}

/// Handler for GET /earnings.
async fn earnings_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<EarningsSummary> {
    let correlation_id = Uuid::new_v4();
    let ctx = resolve_actor(&state, &headers, &correlation_id)?;

    let summary = state
        .keeper()
        .earnings(&ctx)
        .map_err(|err| reject(&correlation_id, err))?;

    Ok((StatusCode::OK, Json(summary)))
}

/// Handler for GET /admin/payroll.
async fn payroll_overview_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<PayrollOverview> {
    let correlation_id = Uuid::new_v4();
    let ctx = resolve_actor(&state, &headers, &correlation_id)?;

    let overview = state
        .keeper()
        .payroll_overview(&ctx)
        .map_err(|err| reject(&correlation_id, err))?;

    Ok((StatusCode::OK, Json(overview)))
}

/// Handler for PUT /admin/employees/:id/rates.
async fn update_rates_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
    payload: Result<Json<RateUpdateRequest>, JsonRejection>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    let ctx = resolve_actor(&state, &headers, &correlation_id)?;
    let request = parse_body(payload, &correlation_id)?;

    let employee = state
        .keeper()
        .update_rates(
            &ctx,
            &employee_id,
            request.hourly_rate,
            request.overtime_multiplier,
        )
        .map_err(|err| reject(&correlation_id, err))?;

    Ok((StatusCode::OK, Json(employee)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::{body::Body, http::Request, response::Response};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config").expect("Failed to load config");
        AppState::in_memory(&config)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn json_request(method: &str, uri: &str, actor: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(actor) = actor {
            builder = builder.header("X-Employee-Id", actor);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_punch_in_returns_201() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "POST",
                "/sessions/punch-in",
                Some("u001"),
                r#"{ "date": "2026-03-02", "time": "09:00:00" }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let session: Session = read_json(response).await;
        assert_eq!(session.employee_id, "u001");
        assert!(session.is_open());
    }

    #[tokio::test]
    async fn test_missing_actor_returns_401() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("POST", "/sessions/punch-in", None, "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "MISSING_ACTOR");
    }

    #[tokio::test]
    async fn test_unknown_actor_returns_401() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("GET", "/history", Some("ghost"), ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "UNKNOWN_ACTOR");
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "POST",
                "/sessions/punch-in",
                Some("u001"),
                "{ not json",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_finalize_without_sessions_returns_422() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "POST",
                "/shifts/finalize",
                Some("u001"),
                r#"{ "date": "2026-03-02" }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_full_day_through_router() {
        let router = create_router(create_test_state());

        let steps = [
            ("/sessions/punch-in", r#"{ "date": "2026-03-02", "time": "08:00:00" }"#),
            ("/sessions/punch-out", r#"{ "date": "2026-03-02", "time": "12:00:00" }"#),
            ("/sessions/punch-in", r#"{ "date": "2026-03-02", "time": "12:30:00" }"#),
            ("/sessions/punch-out", r#"{ "date": "2026-03-02", "time": "18:00:00" }"#),
        ];
        for (uri, body) in steps {
            let response = router
                .clone()
                .oneshot(json_request("POST", uri, Some("u001"), body))
                .await
                .unwrap();
            assert!(response.status().is_success(), "{} failed", uri);
        }

        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/shifts/finalize",
                Some("u001"),
                r#"{ "date": "2026-03-02" }"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let shift: FinalizedShift = read_json(response).await;
        // 8 * 10 + 1.5 * 10 * 1.5
        assert_eq!(shift.total_hours, dec("9.5"));
        assert_eq!(shift.record.overtime_hours, dec("1.5"));
        assert_eq!(shift.record.total_pay, dec("102.5"));

        let response = router
            .oneshot(json_request("GET", "/history", Some("u001"), ""))
            .await
            .unwrap();
        let rows: Vec<HistoryRow> = read_json(response).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].session_count, 2);
        assert_eq!(rows[0].status.total_pay(), Some(dec("102.5")));
    }

    #[tokio::test]
    async fn test_sessions_query_filters_by_date() {
        let router = create_router(create_test_state());

        router
            .clone()
            .oneshot(json_request(
                "POST",
                "/sessions/punch-in",
                Some("u001"),
                r#"{ "date": "2026-03-02", "time": "09:00:00" }"#,
            ))
            .await
            .unwrap();

        let response = router
            .clone()
            .oneshot(json_request("GET", "/sessions?date=2026-03-02", Some("u001"), ""))
            .await
            .unwrap();
        let sessions: Vec<Session> = read_json(response).await;
        assert_eq!(sessions.len(), 1);

        let response = router
            .oneshot(json_request("GET", "/sessions?date=2026-03-03", Some("u001"), ""))
            .await
            .unwrap();
        let sessions: Vec<Session> = read_json(response).await;
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_bad_sessions_date_returns_json_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("GET", "/sessions?date=not-a-date", Some("u001"), ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "INVALID_QUERY");
        assert!(!error.message.is_empty());
    }

    #[tokio::test]
    async fn test_worker_cannot_view_payroll_overview() {
        let router = create_router(create_test_state());

        let response = router
            .clone()
            .oneshot(json_request("GET", "/admin/payroll", Some("u001"), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = router
            .oneshot(json_request("GET", "/admin/payroll", Some("admin"), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let overview: PayrollOverview = read_json(response).await;
        assert!(overview.records.is_empty());
    }

    #[tokio::test]
    async fn test_admin_updates_rates() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "PUT",
                "/admin/employees/u001/rates",
                Some("admin"),
                r#"{ "hourly_rate": "12.50", "overtime_multiplier": "2" }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let employee: Employee = read_json(response).await;
        assert_eq!(employee.hourly_rate, dec("12.50"));
        assert!(employee.secret.is_empty());
    }

    #[tokio::test]
    async fn test_register_then_duplicate() {
        let router = create_router(create_test_state());
        let body = r#"{ "id": "u002", "name": "Ben Ito", "secret": "pw" }"#;

        let response = router
            .clone()
            .oneshot(json_request("POST", "/employees", None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .oneshot(json_request("POST", "/employees", None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
