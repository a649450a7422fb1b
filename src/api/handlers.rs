//! HTTP request handlers for the scheduler API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::SchedulerError;

use super::request::{ApprovalRequest, DateQuery, MonthQuery, OvertimeQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
///
/// # Endpoints
///
/// - `GET /health` - Liveness probe
/// - `GET /crews` - Configured crews and rosters
/// - `GET /crews/:crew_id/schedule?date=` - Duty type and cycle position
/// - `GET /crews/:crew_id/rest?date=` - Individually resting member
/// - `GET /crews/:crew_id/responsibilities?date=` - Per-member responsibilities
/// - `GET /planning?month=&year=` - Month planning for every crew
/// - `GET /overtime?member_id=&month=&year=` - Monthly overtime statement
/// - `POST /overtime/approve` - Record approval of an overtime entry
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/crews", get(crews_handler))
        .route("/crews/:crew_id/schedule", get(schedule_handler))
        .route("/crews/:crew_id/rest", get(rest_handler))
        .route("/crews/:crew_id/responsibilities", get(responsibilities_handler))
        .route("/planning", get(planning_handler))
        .route("/overtime", get(overtime_handler))
        .route("/overtime/approve", post(approve_handler))
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn crews_handler(State(state): State<AppState>) -> Response {
    success(state.scheduler().crews())
}

async fn schedule_handler(
    State(state): State<AppState>,
    Path(crew_id): Path<String>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query_or_reject(correlation_id, query) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state.scheduler().resolve_schedule(&crew_id, query.date) {
        Ok(schedule) => {
            info!(
                correlation_id = %correlation_id,
                crew_id = %crew_id,
                date = %query.date,
                duty_type = %schedule.duty_type,
                "Schedule resolved"
            );
            success(schedule)
        }
        Err(err) => failure(correlation_id, err),
    }
}

async fn rest_handler(
    State(state): State<AppState>,
    Path(crew_id): Path<String>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query_or_reject(correlation_id, query) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state
        .scheduler()
        .resolve_rest_assignment(&crew_id, query.date)
    {
        Ok(rest) => {
            info!(
                correlation_id = %correlation_id,
                crew_id = %crew_id,
                date = %query.date,
                resting = ?rest.resting.as_ref().map(|r| r.member_id.as_str()),
                "Rest assignment resolved"
            );
            success(rest)
        }
        Err(err) => failure(correlation_id, err),
    }
}

async fn responsibilities_handler(
    State(state): State<AppState>,
    Path(crew_id): Path<String>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query_or_reject(correlation_id, query) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state
        .scheduler()
        .resolve_responsibilities(&crew_id, query.date)
    {
        Ok(members) => {
            info!(
                correlation_id = %correlation_id,
                crew_id = %crew_id,
                date = %query.date,
                "Responsibilities resolved"
            );
            success(json!({
                "crew_id": crew_id,
                "date": query.date,
                "members": members,
            }))
        }
        Err(err) => failure(correlation_id, err),
    }
}

async fn planning_handler(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query_or_reject(correlation_id, query) {
        Ok(query) => query,
        Err(response) => return response,
    };
    let (month, year) = query.resolve();

    let start_time = Instant::now();
    match state.scheduler().plan_month(month, year) {
        Ok(days) => {
            info!(
                correlation_id = %correlation_id,
                month,
                year,
                days = days.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Planning built"
            );
            success(json!({
                "month": month,
                "year": year,
                "days": days,
            }))
        }
        Err(err) => failure(correlation_id, err),
    }
}

async fn overtime_handler(
    State(state): State<AppState>,
    query: Result<Query<OvertimeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query_or_reject(correlation_id, query) {
        Ok(query) => query,
        Err(response) => return response,
    };
    let (month, year) = query.resolve();
    info!(
        correlation_id = %correlation_id,
        member_id = %query.member_id,
        month,
        year,
        "Processing overtime request"
    );

    let start_time = Instant::now();
    match state
        .overtime()
        .get_or_create_overtime_for_month(&query.member_id, month, year)
        .await
    {
        Ok(statement) => {
            info!(
                correlation_id = %correlation_id,
                member_id = %query.member_id,
                total_minutes = statement.total_minutes,
                total_days = statement.total_days,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Overtime statement completed"
            );
            success(statement)
        }
        Err(err) => failure(correlation_id, err),
    }
}

async fn approve_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApprovalRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing approval request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
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
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    match state
        .overtime()
        .approve_overtime(
            &request.member_id,
            request.date,
            request.approved_by,
            request.reason,
        )
        .await
    {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                member_id = %record.member_id,
                date = %record.date,
                "Approval recorded"
            );
            success(record)
        }
        Err(err) => failure(correlation_id, err),
    }
}

fn query_or_reject<T>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, Response> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Query string rejected"
            );
            Err(ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response())
        }
    }
}

fn success<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn failure(correlation_id: Uuid, err: SchedulerError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        retryable = err.is_retryable(),
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}
