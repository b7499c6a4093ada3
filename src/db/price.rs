use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;

use super::PriceStore;
use crate::models::PriceRecord;
use crate::utils::errors::{extract_clean_error, PriceError};

/// Get the price record for an asset code
pub async fn get_price_by_code(pool: &PgPool, code: &str) -> Result<Option<PriceRecord>, sqlx::Error> {
    sqlx::query_as::<_, PriceRecord>(
        r#"SELECT id, created_at, updated_at, source, value, "decimal", code FROM prices WHERE code = $1"#
    )
    .bind(code)
    .fetch_optional(pool)
    .await
}

/// Overwrite the value and refresh timestamp of a price record
pub async fn update_price_value(
    pool: &PgPool,
    id: i64,
    value: i64,
    updated_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE prices SET value = $1, updated_at = $2 WHERE id = $3")
        .bind(value)
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// `PriceStore` backed by the `prices` table
#[derive(Clone)]
pub struct PgPriceStore {
    pool: PgPool,
}

impl PgPriceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(e: sqlx::Error) -> PriceError {
    PriceError::StoreUnavailable(extract_clean_error(&e.to_string()))
}

impl PriceStore for PgPriceStore {
    async fn get_by_code(&self, code: &str) -> Result<Option<PriceRecord>, PriceError> {
        get_price_by_code(&self.pool, code).await.map_err(store_error)
    }

    async fn update_value_and_timestamp(
        &self,
        id: i64,
        value: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<(), PriceError> {
        update_price_value(&self.pool, id, value, updated_at)
            .await
            .map_err(store_error)
    }
}
