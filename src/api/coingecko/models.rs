use std::collections::HashMap;

use thiserror::Error;

/// Body of `GET /simple/price`: asset code -> currency code -> quote
pub type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// Currency every quote is requested in
pub const VS_CURRENCY: &str = "usd";

/// Pull the `usd` quote for `code` out of a decoded response
pub fn quote_for(response: &SimplePriceResponse, code: &str) -> Option<f64> {
    response.get(code)?.get(VS_CURRENCY).copied()
}

/// Error type for calls against CoinGecko (API and web pages)
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Network/request error, including timeouts
    #[error("Request Error: {0}")]
    Request(String),
    /// 429 Too Many Requests
    #[error("Rate Limited: {0}")]
    RateLimited(String),
    /// Any other non-success status
    #[error("HTTP Error ({0}): {1}")]
    Http(u16, String),
    /// Body could not be decoded
    #[error("Deserialization Error: {0}")]
    Deserialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_for_present_code() {
        let body: SimplePriceResponse =
            serde_json::from_str(r#"{"turtle-2": {"usd": 1.2345}}"#).unwrap();
        assert_eq!(quote_for(&body, "turtle-2"), Some(1.2345));
    }

    #[test]
    fn test_quote_for_missing_code_or_currency() {
        let body: SimplePriceResponse =
            serde_json::from_str(r#"{"bitcoin": {"eur": 60000.0}}"#).unwrap();
        assert_eq!(quote_for(&body, "turtle-2"), None);
        assert_eq!(quote_for(&body, "bitcoin"), None);

        let empty: SimplePriceResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(quote_for(&empty, "bitcoin"), None);
    }

    #[test]
    fn test_integer_quotes_decode_as_float() {
        let body: SimplePriceResponse =
            serde_json::from_str(r#"{"tether": {"usd": 1}}"#).unwrap();
        assert_eq!(quote_for(&body, "tether"), Some(1.0));
    }
}
