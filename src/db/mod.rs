use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use tracing::{debug, warn};

use crate::models::PriceRecord;
use crate::utils::errors::PriceError;

pub mod price;

/// Read/write contract of the persisted price records
pub trait PriceStore {
    /// `Ok(None)` when no record has this code
    async fn get_by_code(&self, code: &str) -> Result<Option<PriceRecord>, PriceError>;

    async fn update_value_and_timestamp(
        &self,
        id: i64,
        value: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<(), PriceError>;
}

/// Connect the Postgres pool and create tables
pub async fn init_db(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPool::connect(database_url).await?;

    create_tables(&pool).await;

    Ok(pool)
}

/// Split a `//`-separated SQL file into statements
///
/// The first chunk is the file header and is never executed.
fn sql_statements(sql_content: &str) -> Vec<&str> {
    sql_content
        .split("//")
        .skip(1)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Read and execute a `//`-separated SQL file
async fn execute_sql_file(pool: &PgPool, file_path: &str) -> Result<(), String> {
    let sql_content = std::fs::read_to_string(file_path)
        .map_err(|e| format!("Failed to read {}: {}", file_path, e))?;

    for statement in sql_statements(&sql_content) {
        if let Err(e) = sqlx::raw_sql(statement).execute(pool).await {
            debug!("Skipping statement from {}: {}", file_path, e);
        }
    }

    Ok(())
}

async fn create_tables(pool: &PgPool) {
    if let Err(e) = execute_sql_file(pool, "migrations/create_tables.sql").await {
        warn!("Failed to create tables: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_file_splits_into_create_statements() {
        let statements = sql_statements(include_str!("../../migrations/create_tables.sql"));

        assert_eq!(statements.len(), 2);
        for statement in &statements {
            assert!(statement.starts_with("CREATE "), "unexpected statement: {:?}", statement);
        }
        assert!(statements[0].contains("CREATE TABLE IF NOT EXISTS prices"));
    }

    #[test]
    fn test_header_and_blank_chunks_are_skipped() {
        let sql = "-- header\n//\nSELECT 1\n//\n  \n//\nSELECT 2\n";
        assert_eq!(sql_statements(sql), vec!["SELECT 1", "SELECT 2"]);
    }
}
