//! Price record and lookup result models

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted price in fixed-point form: real price = `value / 10^decimal`
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct PriceRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub source: Option<String>,
    pub value: i64,
    pub decimal: i64,
    pub code: Option<String>,
}

/// Result of a standalone page scrape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapedPrice {
    pub coin_id: String,
    pub price_usd: String,
}
