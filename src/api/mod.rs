pub mod coingecko;

use coingecko::ApiError;

/// A source of current quotes for an asset code
///
/// `Ok(None)` means the source answered but had no quote for the code.
pub trait QuoteFetcher {
    async fn fetch_quote(&self, code: &str) -> Result<Option<f64>, ApiError>;
}
