use std::time::Duration;

use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{quote_for, ApiError, SimplePriceResponse, VS_CURRENCY};
use crate::api::QuoteFetcher;

/// Build the HTTP client shared by the API and page fetchers
pub fn build_http_client(timeout: Duration) -> Result<HttpClient, ApiError> {
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ApiError::Request(format!("Failed to build HTTP client: {}", e)))
}

/// CoinGecko simple-price API client
pub struct CoinGeckoClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl CoinGeckoClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.coingecko.com/api/v3";

    pub fn with_base_url(http_client: HttpClient, api_key: String, base_url: String) -> Self {
        Self {
            http_client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Map a non-success response onto an error variant
    pub(crate) async fn handle_error_response(response: reqwest::Response) -> ApiError {
        let status_code = response.status().as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            429 => {
                warn!("CoinGecko rate limited the request: {}", body_text);
                ApiError::RateLimited(body_text)
            }
            500..=599 => {
                warn!("CoinGecko server error {}: {}", status_code, body_text);
                ApiError::Http(status_code, body_text)
            }
            _ => ApiError::Http(status_code, body_text),
        }
    }

    /// GET /simple/price
    ///
    /// Returns `Ok(None)` when the response has no `usd` quote for `code`.
    pub async fn get_simple_price(&self, code: &str) -> Result<Option<f64>, ApiError> {
        let url = format!("{}/simple/price", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("x_cg_demo_api_key", self.api_key.as_str()),
                ("vs_currencies", VS_CURRENCY),
                ("ids", code),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Request(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        let body = response
            .json::<SimplePriceResponse>()
            .await
            .map_err(|e| ApiError::Deserialization(format!("Failed to parse response: {}", e)))?;

        let quote = quote_for(&body, code);
        debug!("CoinGecko quote for {}: {:?}", code, quote);
        Ok(quote)
    }
}

impl QuoteFetcher for CoinGeckoClient {
    async fn fetch_quote(&self, code: &str) -> Result<Option<f64>, ApiError> {
        self.get_simple_price(code).await
    }
}
