//! HTTP error mapping
//!
//! Every failure leaves the API as `{ "error": "..." }` with a status code
//! derived from the domain error kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use stuntpitch::DomainError;

use crate::models::ErrorResponse;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Upstream(_) | DomainError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("Embedding request failed: {}", err);
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(DomainError::not_found("Profile", Uuid::nil())).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DomainError::Validation("bad".into())).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DomainError::Upstream("429".into())).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(DomainError::Persistence("down".into())).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
