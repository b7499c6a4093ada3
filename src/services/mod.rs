pub mod price_service;
pub mod scrape_service;
