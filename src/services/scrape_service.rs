use tracing::warn;

use crate::api::coingecko::{ApiError, PageScraper};
use crate::models::ScrapedPrice;
use crate::utils::errors::PriceError;

/// Anything that can read a price string off a web page
pub trait PagePriceSource {
    async fn fetch_scraped_price(&self, page_url: &str) -> Result<Option<String>, ApiError>;
}

impl PagePriceSource for PageScraper {
    async fn fetch_scraped_price(&self, page_url: &str) -> Result<Option<String>, ApiError> {
        PageScraper::fetch_scraped_price(self, page_url).await
    }
}

/// Scrape the current price for `coin_id` from `page_url`
///
/// Nothing is cached or persisted, so upstream failures are returned as-is.
pub async fn lookup_scraped_price<P: PagePriceSource>(
    source: &P,
    page_url: &str,
    coin_id: &str,
) -> Result<ScrapedPrice, PriceError> {
    let price = source.fetch_scraped_price(page_url).await.map_err(|e| {
        warn!("Scraping {} failed: {}", page_url, e);
        PriceError::from(e)
    })?;

    match price {
        Some(price_usd) => Ok(ScrapedPrice {
            coin_id: coin_id.to_string(),
            price_usd,
        }),
        None => Err(PriceError::NotExtracted),
    }
}
