use axum::http::StatusCode;

use crate::{db::dao::DaoLayerError, rules::RuleError};

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
    /// Any other status produced outside the handlers, passed through as-is.
    Rejected { status: StatusCode, message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                AppError::bad_request(message)
            }
            StatusCode::NOT_FOUND => AppError::not_found(message),
            _ if status.is_server_error() => AppError::internal(message),
            _ => AppError::Rejected { status, message },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) | Self::Internal(message) => {
                message.as_str()
            }
            Self::Rejected { message, .. } => message.as_str(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<RuleError> for AppError {
    fn from(err: RuleError) -> Self {
        AppError::bad_request(err.to_string())
    }
}

impl From<DaoLayerError> for AppError {
    fn from(err: DaoLayerError) -> Self {
        match err {
            DaoLayerError::NotFound { .. } => AppError::not_found(err.to_string()),
            DaoLayerError::Db(_) => AppError::internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use sea_orm::DbErr;

    use super::AppError;
    use crate::{db::dao::DaoLayerError, rules::RuleError};

    #[test]
    fn rule_errors_are_bad_requests() {
        let err = AppError::from(RuleError::AlreadyDone);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "todo is already done");
    }

    #[test]
    fn store_errors_map_by_kind() {
        let missing = AppError::from(DaoLayerError::NotFound {
            entity: "Todo",
            id: 4,
        });
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.message(), "Todo not found (id=4)");

        let lost = AppError::from(DaoLayerError::Db(DbErr::Custom(
            "connection lost".to_string(),
        )));
        assert_eq!(lost.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(lost.message().contains("connection lost"));
    }

    #[test]
    fn status_mapping_normalizes_unprocessable_entity() {
        assert_eq!(
            AppError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "missing field").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from_status(StatusCode::METHOD_NOT_ALLOWED, "nope").status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::from_status(StatusCode::BAD_GATEWAY, "upstream").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
