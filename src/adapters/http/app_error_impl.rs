use crate::app_error::{AppError, ErrorCode, FieldError};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const INTERNAL_MESSAGE: &str = "Internal server error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        match &self {
            AppError::Storage(_) | AppError::Internal(_) => {
                tracing::error!(error = ?self, "Request failed");
            }
            _ => tracing::warn!(error = %self, "Request rejected"),
        }

        let message = self.to_string();
        match self {
            AppError::Validation(errors) => error_resp(
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidFormData,
                &message,
                Some(errors),
            ),
            AppError::DuplicateEmail => error_resp(
                StatusCode::BAD_REQUEST,
                ErrorCode::AlreadyRegistered,
                &message,
                None,
            ),
            AppError::Conflict(msg) => {
                error_resp(StatusCode::CONFLICT, ErrorCode::Conflict, &msg, None)
            }
            AppError::NotFound => {
                error_resp(StatusCode::NOT_FOUND, ErrorCode::NotFound, &message, None)
            }
            AppError::RateLimited => error_resp(
                StatusCode::TOO_MANY_REQUESTS,
                ErrorCode::RateLimited,
                &message,
                None,
            ),
            AppError::Storage(_) | AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                INTERNAL_MESSAGE,
                None,
            ),
        }
    }
}

fn error_resp(
    status: StatusCode,
    code: ErrorCode,
    message: &str,
    errors: Option<Vec<FieldError>>,
) -> Response {
    let body = match errors {
        Some(errors) => {
            serde_json::json!({ "code": code.as_str(), "message": message, "errors": errors })
        }
        None => serde_json::json!({ "code": code.as_str(), "message": message }),
    };
    (status, Json(body)).into_response()
}
