// Shared trait + error for vendor quote adapters

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendorError {
    // Request never produced a body (connect, TLS, timeout, read failure)
    #[error("vendor request failed: {0}")]
    Transport(#[from] reqwest::Error),

    // Base URL unusable, or the symbol cannot be expressed as a path segment
    #[error("cannot build vendor url: {0}")]
    Url(String),
}

#[async_trait::async_trait]
pub trait QuoteSource {
    // One intraday quote round trip. The payload is returned untouched; judging
    // its shape is the normaliser's job.
    async fn intraday_quote(&self, symbol: &str) -> Result<Value, VendorError>;
}

// Make the Fugle adapter visible
pub mod fugle;
