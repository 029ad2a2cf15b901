use serde::Serialize;
use thiserror::Error;

/// One failing field of a submitted form.
///
/// `path` names the offending field; it is empty when the body as a whole
/// could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: Vec<String>,
    pub message: String,
}

impl FieldError {
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        Self {
            path: vec![name.to_string()],
            message: message.into(),
        }
    }

    pub fn body(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid form data")]
    Validation(Vec<FieldError>),

    #[error("This email is already on our waitlist!")]
    DuplicateEmail,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found")]
    NotFound,

    #[error("Too many requests. Please slow down.")]
    RateLimited,

    #[error("Storage unavailable: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug)]
pub enum ErrorCode {
    InvalidFormData,
    AlreadyRegistered,
    Conflict,
    NotFound,
    RateLimited,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidFormData => "INVALID_FORM_DATA",
            ErrorCode::AlreadyRegistered => "ALREADY_REGISTERED",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
