//! HTTP client facade for the books REST service, with request ids and error mapping.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult, FieldErrors};
