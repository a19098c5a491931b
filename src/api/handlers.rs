//! HTTP request handlers for the timesheet API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::TimesheetError;
use crate::models::YearMonth;
use crate::workflow::RequestContext;

use super::request::{
    ReviewRequest, SaveEntriesRequest, StartRequest, SubmitRequest, actor_from_headers,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/timesheets/:employee_id/:year/:month", get(view_handler))
        .route("/timesheets/:employee_id/:year/:month/start", post(start_handler))
        .route("/timesheets/:employee_id/:year/:month/entries", post(save_handler))
        .route("/timesheets/:employee_id/:year/:month/submit", post(submit_handler))
        .route("/timesheets/:employee_id/:year/:month/review", post(review_handler))
        .with_state(state)
}

type TimesheetPath = Path<(String, i32, u32)>;

fn ok_json<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_json(response: ApiErrorResponse) -> Response {
    (
        response.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response.error),
    )
        .into_response()
}

fn engine_error(correlation_id: Uuid, operation: &str, err: TimesheetError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        operation,
        error = %err,
        "Timesheet request rejected"
    );
    error_json(err.into())
}

fn parse_month(correlation_id: Uuid, year: i32, month: u32) -> Result<YearMonth, Response> {
    YearMonth::new(year, month).map_err(|err| {
        warn!(correlation_id = %correlation_id, year, month, "Invalid month in path");
        error_json(ApiErrorResponse::bad_request(ApiError::bad_request(
            err.to_string(),
        )))
    })
}

/// Turns a body extraction failure into a 400 response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
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
    error_json(ApiErrorResponse::bad_request(error))
}

/// Handler for `GET /timesheets/:employee_id/:year/:month`.
///
/// A future month that is not open yet is answered with the current month's
/// view and a notice.
async fn view_handler(
    State(state): State<AppState>,
    Path((employee_id, year, month)): TimesheetPath,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let month = match parse_month(correlation_id, year, month) {
        Ok(m) => m,
        Err(response) => return response,
    };
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(message) => {
            warn!(correlation_id = %correlation_id, error = %message, "Missing actor");
            return error_json(ApiErrorResponse::bad_request(ApiError::bad_request(message)));
        }
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        month = %month,
        actor = %actor.email,
        "Rendering timesheet view"
    );

    let ctx = RequestContext::new(actor);
    match state.service().view_or_current(&ctx, &employee_id, month) {
        Ok(view) => ok_json(view),
        Err(err) => engine_error(correlation_id, "view", err),
    }
}

/// Handler for `POST .../start`.
async fn start_handler(
    State(state): State<AppState>,
    Path((employee_id, year, month)): TimesheetPath,
    payload: Result<Json<StartRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let month = match parse_month(correlation_id, year, month) {
        Ok(m) => m,
        Err(response) => return response,
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let ctx = RequestContext::new(request.actor);
    match state.service().start(&ctx, &employee_id, month) {
        Ok(timesheet) => {
            info!(
                correlation_id = %correlation_id,
                key = %timesheet.key(),
                entries = timesheet.entries.len(),
                "Timesheet started"
            );
            ok_json(timesheet)
        }
        Err(err) => engine_error(correlation_id, "start", err),
    }
}

/// Handler for `POST .../entries`.
async fn save_handler(
    State(state): State<AppState>,
    Path((employee_id, year, month)): TimesheetPath,
    payload: Result<Json<SaveEntriesRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let month = match parse_month(correlation_id, year, month) {
        Ok(m) => m,
        Err(response) => return response,
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let ctx = RequestContext::new(request.actor);
    match state
        .service()
        .save(&ctx, &employee_id, month, &request.entries)
    {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                key = %result.timesheet.key(),
                updated = result.outcome.updated.len(),
                unchanged = result.outcome.unchanged.len(),
                skipped = result.outcome.skipped.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Entries saved"
            );
            ok_json(result)
        }
        Err(err) => engine_error(correlation_id, "save", err),
    }
}

/// Handler for `POST .../submit`.
async fn submit_handler(
    State(state): State<AppState>,
    Path((employee_id, year, month)): TimesheetPath,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let month = match parse_month(correlation_id, year, month) {
        Ok(m) => m,
        Err(response) => return response,
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let ctx = RequestContext::new(request.actor);
    match state.service().submit(
        &ctx,
        &employee_id,
        month,
        &request.entries,
        &request.comment,
    ) {
        Ok(timesheet) => {
            info!(
                correlation_id = %correlation_id,
                key = %timesheet.key(),
                overtime = %timesheet.monthly_overtime,
                "Timesheet submitted"
            );
            ok_json(timesheet)
        }
        Err(err) => engine_error(correlation_id, "submit", err),
    }
}

/// Handler for `POST .../review`.
async fn review_handler(
    State(state): State<AppState>,
    Path((employee_id, year, month)): TimesheetPath,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let month = match parse_month(correlation_id, year, month) {
        Ok(m) => m,
        Err(response) => return response,
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let ctx = RequestContext::new(request.actor);
    match state.service().review(
        &ctx,
        &employee_id,
        month,
        request.action,
        &request.comment,
    ) {
        Ok(timesheet) => {
            info!(
                correlation_id = %correlation_id,
                key = %timesheet.key(),
                action = %request.action,
                status = %timesheet.status,
                "Timesheet reviewed"
            );
            ok_json(timesheet)
        }
        Err(err) => engine_error(correlation_id, "review", err),
    }
}
