// Turning dashboard errors into HTTP responses
use crate::domain::error::DashboardError;
use crate::presentation::templates::{RenderError, render_error};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;

fn status_for(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
        DashboardError::Api(_) | DashboardError::Transport { .. } => StatusCode::BAD_GATEWAY,
    }
}

fn log(err: &DashboardError) {
    if err.is_upstream() {
        tracing::error!(error = %err, "Activity API request failed");
    } else {
        tracing::warn!(error = %err, "Rejected dashboard request");
    }
}

/// Replaces the whole dashboard with the error panel.
#[derive(Debug)]
pub struct PageError {
    pub status: StatusCode,
    pub message: String,
}

impl From<DashboardError> for PageError {
    fn from(err: DashboardError) -> Self {
        log(&err);
        Self {
            status: status_for(&err),
            message: err.to_string(),
        }
    }
}

impl From<RenderError> for PageError {
    fn from(err: RenderError) -> Self {
        tracing::error!(error = %err, "Failed to render dashboard");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Error: the dashboard could not be rendered".to_string(),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match render_error(&self.message) {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error panel");
                (self.status, self.message).into_response()
            }
        }
    }
}

/// JSON body in the same envelope shape the upstream API uses.
#[derive(Debug)]
pub struct JsonError {
    pub status: StatusCode,
    pub message: String,
}

impl From<DashboardError> for JsonError {
    fn from(err: DashboardError) -> Self {
        log(&err);
        Self {
            status: status_for(&err),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "success": false, "message": self.message }));
        (self.status, body).into_response()
    }
}
