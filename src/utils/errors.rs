use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::api::coingecko::ApiError;

/// Errors surfaced by the price lookups
#[derive(Debug, Error)]
pub enum PriceError {
    /// No record exists for the requested code
    #[error("Price not found")]
    NotFound,
    /// The persistence layer failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    /// An external source failed at the transport or status level
    #[error("External source unavailable: {0}")]
    ExternalUnavailable(String),
    /// The scraped page had no usable price element
    #[error("Coin price not found")]
    NotExtracted,
}

impl From<ApiError> for PriceError {
    fn from(e: ApiError) -> Self {
        PriceError::ExternalUnavailable(e.to_string())
    }
}

impl PriceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PriceError::NotFound | PriceError::NotExtracted => StatusCode::NOT_FOUND,
            PriceError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PriceError::ExternalUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for PriceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Store and upstream failures report the underlying error text
        let message = match &self {
            PriceError::StoreUnavailable(msg) | PriceError::ExternalUnavailable(msg) => msg.clone(),
            other => other.to_string(),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// Strip the driver prefix sqlx puts in front of database error messages
///
/// "error returned from database: relation \"prices\" does not exist"
/// becomes "relation \"prices\" does not exist"
pub fn extract_clean_error(error_msg: &str) -> String {
    match error_msg.strip_prefix("error returned from database:") {
        Some(rest) => rest.trim().to_string(),
        None => error_msg.to_string(),
    }
}
