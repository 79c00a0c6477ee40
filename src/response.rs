//! Standard response envelope: `{code, message, data}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

/// Default message for a status when the caller passes an empty one.
pub fn default_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "status bad response",
        StatusCode::UNAUTHORIZED => "status unauthorized",
        StatusCode::FORBIDDEN => "status forbidden",
        StatusCode::INTERNAL_SERVER_ERROR => "status internal server error",
        _ => "status ok",
    }
}

pub fn simple_response<T>(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Envelope<T> {
    let message = message.into();
    let message = if message.is_empty() {
        default_message(status).to_string()
    } else {
        message
    };
    Envelope {
        code: status.as_u16(),
        message,
        data,
    }
}

/// 200 envelope carrying `data`.
pub fn success<T>(message: &str, data: T) -> Envelope<T> {
    simple_response(StatusCode::OK, message, Some(data))
}

/// 200 envelope with `data: null`.
pub fn success_empty(message: &str) -> Envelope<()> {
    simple_response(StatusCode::OK, message, None)
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
