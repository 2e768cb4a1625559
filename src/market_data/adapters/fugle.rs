// Fugle Market Data REST adapter (intraday quote endpoint)

use super::{QuoteSource, VendorError};
use crate::config::Settings;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, instrument};

pub struct FugleAdapter {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String, // "https://api.fugle.tw/marketdata/v1.0"
}

impl FugleAdapter {
    const API_KEY_HEADER: &'static str = "X-API-KEY";

    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.market_data_api_key, &settings.market_data_base_url)
    }

    // The symbol is pushed as a single, percent-encoded path segment so it can
    // never reach another vendor operation or add a query string.
    fn quote_url(&self, symbol: &str) -> Result<Url, VendorError> {
        // Dot segments are dropped by URL normalisation.
        if symbol == "." || symbol == ".." {
            return Err(VendorError::Url(format!("symbol {symbol:?} is not a path segment")));
        }

        let mut url = Url::parse(&self.base_url).map_err(|e| VendorError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| VendorError::Url(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(["stock", "intraday", "quote"])
            .push(symbol);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl QuoteSource for FugleAdapter {
    #[instrument(skip(self))]
    async fn intraday_quote(&self, symbol: &str) -> Result<Value, VendorError> {
        let res = self
            .http_client
            .get(self.quote_url(symbol)?)
            .header(Self::API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        // Error statuses still carry a JSON body ({"statusCode", "message"}),
        // so the status line is only logged.
        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "vendor responded");

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
