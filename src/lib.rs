// Library interface for social_scraper
// The binary and the integration tests drive the scrapers through these modules

pub mod app;
pub mod browser;
pub mod config;
pub mod export;
pub mod helpers;
pub mod models;
pub mod resolver;
pub mod scraper;
pub mod sources;
