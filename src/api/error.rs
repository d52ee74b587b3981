use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Route-handler failures, all flattened to a 500 with an `{error}` body at
/// the boundary. Configuration problems are never retried; upstream bodies
/// and statuses get embedded in the message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not set")]
    MissingConfig(&'static str),

    #[error("{0}")]
    Upstream(String),

    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("api error: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
