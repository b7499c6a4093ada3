use std::sync::Arc;

use sqlx::postgres::PgPool;

use crate::api::coingecko::client::build_http_client;
use crate::api::coingecko::{ApiError, CoinGeckoClient, PageScraper};
use crate::config::Config;
use crate::db::price::PgPriceStore;
use crate::services::price_service::{PriceService, StalenessPolicy};

/// Shared state handed to every route through `axum::extract::State`
pub struct AppState {
    pub config: Config,
    pub prices: PriceService<PgPriceStore, CoinGeckoClient>,
    pub scraper: PageScraper,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Result<Arc<Self>, ApiError> {
        let http = build_http_client(config.http_timeout)?;

        let coingecko = CoinGeckoClient::with_base_url(
            http.clone(),
            config.coingecko_api_key.clone(),
            config.coingecko_base_url.clone(),
        );
        let policy = StalenessPolicy::new(config.provider.clone(), config.stale_after);
        let prices = PriceService::new(PgPriceStore::new(pool), coingecko, policy);
        let scraper = PageScraper::new(http, config.scrape_page_url.clone());

        Ok(Arc::new(Self { config, prices, scraper }))
    }
}
