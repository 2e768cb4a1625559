//! HTTP-facing error type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::market_data::adapters::VendorError;
use crate::market_data::normaliser::QuoteError;

/// Faults that escape the normaliser. Recoverable vendor errors never get
/// here; they are returned as `{"error": ...}` bodies with 200.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Success-shaped payload with a missing quote field
    #[error("quote schema mismatch: {0}")]
    Schema(String),

    /// Vendor could not be reached or its body could not be read
    #[error("upstream failure: {0}")]
    Upstream(VendorError),
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::Schema(detail) => ApiError::Schema(detail),
            QuoteError::Vendor(e) => ApiError::Upstream(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Detail stays in the logs; clients get the generic fault body.
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
