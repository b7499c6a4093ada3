use lazy_static::lazy_static;
use reqwest::Client as HttpClient;
use scraper::{Html, Selector};
use tracing::debug;

use super::client::CoinGeckoClient;
use super::models::ApiError;
use crate::api::QuoteFetcher;

// Coupled to the markup of CoinGecko's coin pages. If they rename the
// converter widget this stops matching and lookups report "not found".
const PRICE_SELECTOR: &str = r#"span[data-converter-target="price"]"#;
const PRICE_ATTRIBUTE: &str = "data-price-usd";

lazy_static! {
    static ref PRICE_SPAN: Selector =
        Selector::parse(PRICE_SELECTOR).expect("price selector is valid CSS");
}

/// Extract the USD price from the first converter price span in `html`
pub fn extract_price_usd(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let span = doc.select(&PRICE_SPAN).next()?;

    span.value()
        .attr(PRICE_ATTRIBUTE)
        .filter(|price| !price.is_empty())
        .map(str::to_string)
}

/// Reads prices off a rendered coin page when no structured API is available
pub struct PageScraper {
    http_client: HttpClient,
    page_url: String,
}

impl PageScraper {
    pub fn new(http_client: HttpClient, page_url: String) -> Self {
        Self { http_client, page_url }
    }

    /// GET `page_url` and extract the price attribute
    ///
    /// `Ok(None)` means the page loaded but held no usable price.
    pub async fn fetch_scraped_price(&self, page_url: &str) -> Result<Option<String>, ApiError> {
        let response = self
            .http_client
            .get(page_url)
            .send()
            .await
            .map_err(|e| ApiError::Request(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(CoinGeckoClient::handle_error_response(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(format!("Failed to read page body: {}", e)))?;

        let price = extract_price_usd(&body);
        debug!("Scraped price from {}: {:?}", page_url, price);
        Ok(price)
    }
}

impl QuoteFetcher for PageScraper {
    /// The page is fixed per scraper, so `code` only shows up in logs.
    async fn fetch_quote(&self, code: &str) -> Result<Option<f64>, ApiError> {
        let price = self.fetch_scraped_price(&self.page_url).await?;

        Ok(price.and_then(|p| match p.parse::<f64>() {
            Ok(quote) => Some(quote),
            Err(e) => {
                debug!("Scraped price {:?} for {} is not a number: {}", p, code, e);
                None
            }
        }))
    }
}
