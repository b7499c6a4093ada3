use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::models::{PriceRecord, ScrapedPrice};
use crate::services::scrape_service;
use crate::state::AppState;
use crate::utils::errors::PriceError;

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    #[serde(default)]
    code: Option<String>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/prices", get(get_prices))
        .route("/price", get(get_scraped_price))
}

/// GET /prices?code=<code>
async fn get_prices(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PriceQuery>,
) -> Result<Json<PriceRecord>, PriceError> {
    let code = q
        .code
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| state.config.default_code.clone());
    let span = info_span!("prices", request_id = %Uuid::new_v4(), code = %code);

    async {
        info!("💹 Price lookup");
        state.prices.resolve_price(&code).await.map(Json)
    }
    .instrument(span)
    .await
}

/// GET /price
async fn get_scraped_price(State(state): State<Arc<AppState>>) -> Result<Json<ScrapedPrice>, PriceError> {
    let span = info_span!("price", request_id = %Uuid::new_v4());

    async {
        info!("🔎 Scraped price lookup");
        scrape_service::lookup_scraped_price(
            &state.scraper,
            &state.config.scrape_page_url,
            &state.config.scrape_coin_id,
        )
        .await
        .map(Json)
    }
    .instrument(span)
    .await
}
