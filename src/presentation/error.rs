// HTTP error responses
use crate::domain::error::ChartError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Machine-readable error code, e.g. "INVALID_CHART_TYPE"
    pub code: &'static str,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("unknown chart: {0}")]
    UnknownChart(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Chart(ChartError::InvalidChartType(_)) => (StatusCode::BAD_REQUEST, "INVALID_CHART_TYPE"),
            ApiError::Chart(ChartError::UnresolvedReference(_)) => (StatusCode::NOT_FOUND, "UNKNOWN_JURISDICTION"),
            ApiError::Chart(ChartError::EmptyInput) => (StatusCode::NOT_FOUND, "NO_DATA"),
            ApiError::Chart(ChartError::Store(_)) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::UnknownChart(_) => (StatusCode::NOT_FOUND, "UNKNOWN_CHART"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = if status.is_server_error() {
            tracing::error!("Chart request failed: {:#}", self);
            "internal server error".to_string()
        } else {
            tracing::warn!("Chart request rejected: {}", self);
            self.to_string()
        };
        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}
