pub mod client;
pub mod models;
pub mod page;

pub use client::CoinGeckoClient;
pub use models::ApiError;
pub use page::PageScraper;
