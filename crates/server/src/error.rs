use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{
        ErrorResponse, RouteNotFoundResponse, INTERNAL_ERROR_MESSAGE, PAYLOAD_TOO_LARGE_MESSAGE,
        ROUTE_NOT_FOUND_MESSAGE,
    },
};
use tracing::{error, warn};

/// Handler error. Maps the shared taxonomy onto status codes and envelopes;
/// internal details are logged and never sent to the caller.
#[derive(Debug)]
pub(crate) struct HttpError(pub(crate) ApiError);

impl From<ApiError> for HttpError {
    fn from(value: ApiError) -> Self {
        Self(value)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let err = self.0;
        match err.code {
            ErrorCode::Validation => {
                warn!(errors = ?err.errors, "request failed validation");
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(&err))).into_response()
            }
            ErrorCode::NotFound => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::from(&err))).into_response()
            }
            ErrorCode::Internal => {
                error!(error = %err.message, "request processing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        success: false,
                        message: INTERNAL_ERROR_MESSAGE.to_string(),
                        errors: Vec::new(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

pub(crate) fn route_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFoundResponse {
            error: ROUTE_NOT_FOUND_MESSAGE.to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn payload_too_large() -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(ErrorResponse {
            success: false,
            message: PAYLOAD_TOO_LARGE_MESSAGE.to_string(),
            errors: Vec::new(),
        }),
    )
        .into_response()
}
