// Turns an untrusted vendor payload into the flat price record we serve.
//
// Decoding happens once, at the boundary: every payload lands in exactly one
// `VendorResult` variant and everything downstream matches on that.

use crate::market_data::adapters::{QuoteSource, VendorError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, instrument};

pub const SUCCESS_STATUS: u64 = 200;

// Values are copied through untouched, whatever their JSON type, but every
// key must be present. A plain `Value` field would default a missing key to null.
fn required<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFields {
    #[serde(deserialize_with = "required")]
    pub name: Value,
    #[serde(deserialize_with = "required")]
    pub last_price: Value,
    #[serde(deserialize_with = "required")]
    pub open_price: Value,
    #[serde(deserialize_with = "required")]
    pub high_price: Value,
    #[serde(deserialize_with = "required")]
    pub low_price: Value,
    #[serde(deserialize_with = "required")]
    pub close_price: Value,
    #[serde(deserialize_with = "required")]
    pub change: Value,
    #[serde(deserialize_with = "required")]
    pub change_percent: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VendorResult {
    Success(QuoteFields),
    // Vendor-reported failure: non-200 statusCode, with its message if any
    BusinessError(Option<String>),
    // Payload was not a JSON object; holds its JSON text
    ProtocolError(String),
    // Success-shaped object missing a quote field
    SchemaError(String),
}

/// Faults that cannot be folded into an `{"error": ...}` record.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("quote schema mismatch: {0}")]
    Schema(String),

    #[error(transparent)]
    Vendor(#[from] VendorError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub symbol: String,
    #[serde(flatten)]
    pub fields: QuoteFields,
}

// Serialized flat: either the full quote or a lone `error` key, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PriceRecord {
    Quote(PriceQuote),
    Error { error: Option<String> },
}

// statusCode counts only when set to something truthy; 0, null, false and ""
// are treated the same as an absent key.
fn is_failure_status(code: &Value) -> bool {
    match code {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => {
            let code = n.as_f64();
            code != Some(0.0) && code != Some(SUCCESS_STATUS as f64)
        }
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Bool(true) => true,
    }
}

fn message_text(message: Option<&Value>) -> Option<String> {
    match message? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn decode(payload: &Value) -> VendorResult {
    let Some(obj) = payload.as_object() else {
        return VendorResult::ProtocolError(payload.to_string());
    };

    if let Some(code) = obj.get("statusCode") {
        if is_failure_status(code) {
            return VendorResult::BusinessError(message_text(obj.get("message")));
        }
    }

    match QuoteFields::deserialize(payload) {
        Ok(fields) => VendorResult::Success(fields),
        Err(e) => VendorResult::SchemaError(e.to_string()),
    }
}

fn count_outcome(outcome: &'static str) {
    metrics::counter!("price_requests_total", "outcome" => outcome).increment(1);
}

/// Fetch one intraday quote for `symbol` and flatten it.
///
/// Vendor-side failures come back as `Ok(PriceRecord::Error)`. Transport
/// failures and schema drift are server faults and come back as `Err`.
#[instrument(skip(source))]
pub async fn get_stock_price<S>(source: &S, symbol: &str) -> Result<PriceRecord, QuoteError>
where
    S: QuoteSource + Send + Sync + ?Sized,
{
    let payload = match source.intraday_quote(symbol).await {
        Ok(payload) => payload,
        Err(e) => {
            error!(symbol, error = %e, "vendor request failed");
            count_outcome("upstream_error");
            return Err(e.into());
        }
    };

    match decode(&payload) {
        VendorResult::Success(fields) => {
            info!(symbol, name = %fields.name, "quote fetched");
            count_outcome("success");
            Ok(PriceRecord::Quote(PriceQuote { symbol: symbol.to_string(), fields }))
        }
        VendorResult::ProtocolError(raw) => {
            error!(symbol, response = %raw, "Unexpected response");
            count_outcome("protocol_error");
            Ok(PriceRecord::Error { error: Some(raw) })
        }
        VendorResult::BusinessError(message) => {
            error!(symbol, message = ?message, "Failed to get stock price");
            count_outcome("vendor_error");
            Ok(PriceRecord::Error { error: message })
        }
        VendorResult::SchemaError(detail) => {
            error!(symbol, detail = %detail, "quote payload does not match expected schema");
            count_outcome("schema_error");
            Err(QuoteError::Schema(detail))
        }
    }
}
