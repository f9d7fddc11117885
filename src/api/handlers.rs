//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    Form,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{
    controls::{InputError, StartFields, StartRequest, INVALID_INPUT_MESSAGE},
    state::AppState,
};
use super::{
    page::INDEX_PAGE,
    responses::{ApiResponse, ErrorResponse, HealthResponse, StatusResponse},
};

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn internal_error(context: &str, e: String) -> ErrorReply {
    error!("{}: {}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(context, None)),
    )
}

/// Handle GET / - Serve the control page
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Handle POST /start - Parse the form and start the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<StartFields>,
) -> Result<Json<ApiResponse>, ErrorReply> {
    let request = match fields.parse() {
        Ok(request) => request,
        Err(InputError::InvalidDurationInput { field, value }) => {
            warn!("Rejected start: {:?} is not a number in `{}`", value, field);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(INVALID_INPUT_MESSAGE, Some(field))),
            ));
        }
    };

    let started = match request {
        StartRequest::Ignored => false,
        StartRequest::Start { duration_millis, repeat_millis } => state
            .start(duration_millis, repeat_millis)
            .map_err(|e| internal_error("Failed to start timer", e))?,
    };

    let snapshot = state.snapshot()
        .map_err(|e| internal_error("Failed to read timer state", e))?;

    if started {
        info!("Start endpoint called - countdown running");
        Ok(Json(ApiResponse::running("Timer started", snapshot)))
    } else {
        Ok(Json(ApiResponse::ignored("Duration must be positive", snapshot)))
    }
}

/// Handle POST /stop - Stop the countdown, keeping the last duration shown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ErrorReply> {
    state.stop()
        .map_err(|e| internal_error("Failed to stop timer", e))?;

    let snapshot = state.snapshot()
        .map_err(|e| internal_error("Failed to read timer state", e))?;
    Ok(Json(ApiResponse::idle("Timer stopped", snapshot)))
}

/// Handle POST /reset - Stop the countdown and clear the dial
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ErrorReply> {
    state.reset()
        .map_err(|e| internal_error("Failed to reset timer", e))?;

    // Repaint right away rather than waiting for the next tick
    if let Err(e) = state.redraw() {
        warn!("Failed to redraw after reset: {}", e);
    }

    let snapshot = state.snapshot()
        .map_err(|e| internal_error("Failed to read timer state", e))?;
    Ok(Json(ApiResponse::idle("Timer reset", snapshot)))
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Optional surface size for GET /dial.svg
#[derive(Debug, Default, Deserialize)]
pub struct DialQuery {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Handle GET /dial.svg - Return the latest frame, or paint one at the
/// requested size
pub async fn dial_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DialQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let svg = if query.width.is_none() && query.height.is_none() {
        state.latest_frame()
    } else {
        let width = query.width.unwrap_or(state.dial_width);
        let height = query.height.unwrap_or(state.dial_height);
        state.render_frame(width, height).map_err(|e| {
            error!("Failed to render dial: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
    };

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        svg,
    ))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
