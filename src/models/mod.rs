//! Data models shared by the store, services and routes

pub mod price;

pub use price::{PriceRecord, ScrapedPrice};
