use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq)]
pub enum StreetImageError {
    #[error("city must not be empty")]
    EmptyCity,

    #[error("quality threshold {0} is not a finite number")]
    InvalidThreshold(f64),
}

impl IntoResponse for StreetImageError {
    fn into_response(self) -> Response {
        warn!("Rejected street image request: {self}");
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
