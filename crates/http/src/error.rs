//! Error handling for the books HTTP client

use std::collections::BTreeMap;

use reqwest::StatusCode;
use thiserror::Error;

/// Validation messages keyed by submitted field name (`"isbn"`, `"publicationDate"`, ...).
pub type FieldErrors = BTreeMap<String, String>;

/// Result type for calls against the books service.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures surfaced by the HTTP client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("not found")]
    NotFound,

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Map a non-success status and its body to an error.
    ///
    /// A 400 whose body is a flat `{field: message}` object becomes
    /// [`ApiError::Validation`]; any other 400 body is kept as a plain status error.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::BAD_REQUEST => match serde_json::from_str::<FieldErrors>(body) {
                Ok(fields) if !fields.is_empty() => ApiError::Validation(fields),
                _ => ApiError::Status {
                    status: status.as_u16(),
                    body: body.to_string(),
                },
            },
            StatusCode::NOT_FOUND => ApiError::NotFound,
            other => ApiError::Status {
                status: other.as_u16(),
                body: body.to_string(),
            },
        }
    }

    /// Field errors carried by a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}
