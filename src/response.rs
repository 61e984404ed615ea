use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub type ApiResult<T> = Result<JsonApiResponse<T>, AppError>;

/// Success envelope: `{"message": ..., "data": ...}`, `data` omitted when empty.
#[derive(Debug, Serialize)]
pub struct JsonApiResponse<T: Serialize> {
    #[serde(skip)]
    pub status: StatusCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> JsonApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> ApiResult<T> {
        Ok(Self {
            status: StatusCode::OK,
            message: message.into(),
            data: Some(data),
        })
    }
}

impl JsonApiResponse<()> {
    pub fn message(message: impl Into<String>) -> ApiResult<()> {
        Ok(Self {
            status: StatusCode::OK,
            message: message.into(),
            data: None,
        })
    }
}

/// Error envelope: `{"error": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn from_error(err: &AppError) -> Self {
        Self {
            error: err.message().to_string(),
        }
    }
}

pub(crate) fn log_app_error(err: &AppError, status: StatusCode) {
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), error = %err, "request failed");
    } else {
        tracing::warn!(status = status.as_u16(), error = %err, "request rejected");
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        log_app_error(&self, status);
        (status, Json(ErrorBody::from_error(&self))).into_response()
    }
}

impl<T: Serialize> IntoResponse for JsonApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ErrorBody, JsonApiResponse};
    use crate::error::AppError;

    #[test]
    fn success_envelope_skips_missing_data() {
        let with_data = JsonApiResponse::ok("Got all todos", vec![1, 2]).expect("ok response");
        assert_eq!(
            serde_json::to_value(&with_data).expect("serialize"),
            json!({ "message": "Got all todos", "data": [1, 2] })
        );

        let message_only = JsonApiResponse::message("Deleted todo").expect("ok response");
        assert_eq!(
            serde_json::to_value(&message_only).expect("serialize"),
            json!({ "message": "Deleted todo" })
        );
    }

    #[test]
    fn error_envelope_carries_message() {
        let body = ErrorBody::from_error(&AppError::bad_request("wrong date"));
        assert_eq!(
            serde_json::to_value(&body).expect("serialize"),
            json!({ "error": "wrong date" })
        );
    }
}
