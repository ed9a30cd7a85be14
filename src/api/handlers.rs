//! HTTP request handlers for the time and leave engine API.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::LeaveRequest;

use super::request::{
    ApplyLeaveRequest, BalanceQuery, CancelRequest, ClockInRequest, ClockOutRequest,
    CompOffApproveRequest, CompOffRequest, RegularizationRequest, ReviewRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, BalanceResponse, ClockInResponse, ClockOutResponse,
    CompOffApprovalResponse, RegularizationResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/clock-in", post(clock_in_handler))
        .route("/attendance/clock-out", post(clock_out_handler))
        .route("/leave/apply", post(apply_leave_handler))
        .route("/leave/:id/approve", post(approve_leave_handler))
        .route("/leave/:id/reject", post(reject_leave_handler))
        .route("/leave/:id/cancel", post(cancel_leave_handler))
        .route("/leave/balance", get(leave_balance_handler))
        .route("/regularizations", post(submit_regularization_handler))
        .route(
            "/regularizations/:id/approve",
            post(approve_regularization_handler),
        )
        .route(
            "/regularizations/:id/reject",
            post(reject_regularization_handler),
        )
        .route("/comp-off", post(request_comp_off_handler))
        .route("/comp-off/:id/approve", post(approve_comp_off_handler))
        .with_state(state)
}

/// Unwraps a JSON body, mapping extractor rejections to the error envelope.
fn parse<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse {
                status: axum::http::StatusCode::BAD_REQUEST,
                error,
            })
        }
    }
}

async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockInRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Processing clock-in"
    );

    let outcome = state
        .store()
        .lock()
        .await
        .clock_in(request.employee_id, request.timestamp, request.source)
        .inspect_err(|err| warn!(correlation_id = %correlation_id, error = %err, "Clock-in failed"))?;

    Ok(Json(ClockInResponse::from(outcome)))
}

async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockOutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Processing clock-out"
    );

    let outcome = state
        .store()
        .lock()
        .await
        .clock_out(request.employee_id, request.timestamp)
        .inspect_err(|err| warn!(correlation_id = %correlation_id, error = %err, "Clock-out failed"))?;

    Ok(Json(ClockOutResponse::from(outcome)))
}

async fn apply_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApplyLeaveRequest>, JsonRejection>,
) -> Result<Json<LeaveRequest>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        leave_type = %request.leave_type,
        "Processing leave application"
    );

    let created = state
        .store()
        .lock()
        .await
        .apply_leave(
            request.employee_id,
            &request.leave_type,
            request.today,
            request.from_date,
            request.to_date,
            &request.half_day_overrides,
            &request.reason,
        )
        .inspect_err(
            |err| warn!(correlation_id = %correlation_id, error = %err, "Leave application failed"),
        )?;

    Ok(Json(created))
}

async fn approve_leave_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<LeaveRequest>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, request_id = %id, "Processing leave approval");

    let decision = state
        .store()
        .lock()
        .await
        .approve_leave(id, request.actor_id, request.remarks, request.timestamp)
        .inspect_err(
            |err| warn!(correlation_id = %correlation_id, error = %err, "Leave approval failed"),
        )?;

    Ok(Json(decision.request))
}

async fn reject_leave_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<LeaveRequest>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, request_id = %id, "Processing leave rejection");

    let rejected = state
        .store()
        .lock()
        .await
        .reject_leave(id, request.actor_id, request.remarks, request.timestamp)
        .inspect_err(
            |err| warn!(correlation_id = %correlation_id, error = %err, "Leave rejection failed"),
        )?;

    Ok(Json(rejected))
}

async fn cancel_leave_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CancelRequest>, JsonRejection>,
) -> Result<Json<LeaveRequest>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, request_id = %id, "Processing leave cancellation");

    let outcome = state
        .store()
        .lock()
        .await
        .cancel_leave(id, request.actor_id, request.timestamp)
        .inspect_err(
            |err| warn!(correlation_id = %correlation_id, error = %err, "Leave cancellation failed"),
        )?;

    Ok(Json(outcome.request))
}

async fn leave_balance_handler(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<BalanceResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %query.employee_id,
        leave_type = %query.leave_type,
        year = query.year,
        "Processing balance query"
    );

    let summary = state
        .store()
        .lock()
        .await
        .leave_balance(query.employee_id, &query.leave_type, query.year)
        .inspect_err(
            |err| warn!(correlation_id = %correlation_id, error = %err, "Balance query failed"),
        )?;

    Ok(Json(BalanceResponse::from(summary)))
}

async fn submit_regularization_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegularizationRequest>, JsonRejection>,
) -> Result<Json<RegularizationResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        date = %request.date,
        "Processing regularization submission"
    );

    let submission = state
        .store()
        .lock()
        .await
        .submit_regularization(
            request.employee_id,
            request.date,
            request.today,
            request.requested_status,
            &request.reason,
        )
        .inspect_err(
            |err| warn!(correlation_id = %correlation_id, error = %err, "Regularization submission failed"),
        )?;

    Ok(Json(RegularizationResponse::from(submission)))
}

async fn approve_regularization_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<RegularizationResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, regularization_id = %id, "Processing regularization approval");

    let decision = state
        .store()
        .lock()
        .await
        .approve_regularization(id, request.actor_id, request.remarks, request.timestamp)
        .inspect_err(
            |err| warn!(correlation_id = %correlation_id, error = %err, "Regularization approval failed"),
        )?;

    Ok(Json(RegularizationResponse::from(decision)))
}

async fn reject_regularization_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<RegularizationResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, regularization_id = %id, "Processing regularization rejection");

    let decision = state
        .store()
        .lock()
        .await
        .reject_regularization(id, request.actor_id, request.remarks, request.timestamp)
        .inspect_err(
            |err| warn!(correlation_id = %correlation_id, error = %err, "Regularization rejection failed"),
        )?;

    Ok(Json(RegularizationResponse::from(decision)))
}

async fn request_comp_off_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompOffRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        work_date = %request.work_date,
        "Processing comp-off request"
    );

    let grant = state
        .store()
        .lock()
        .await
        .request_comp_off(request.employee_id, request.work_date, &request.reason)
        .inspect_err(
            |err| warn!(correlation_id = %correlation_id, error = %err, "Comp-off request failed"),
        )?;

    Ok(Json(grant))
}

async fn approve_comp_off_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CompOffApproveRequest>, JsonRejection>,
) -> Result<Json<CompOffApprovalResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, grant_id = %id, "Processing comp-off approval");

    let approval = state
        .store()
        .lock()
        .await
        .approve_comp_off(id, request.actor_id)
        .inspect_err(
            |err| warn!(correlation_id = %correlation_id, error = %err, "Comp-off approval failed"),
        )?;

    Ok(Json(CompOffApprovalResponse::from(approval)))
}
