//! Browser sessions for scraping JavaScript-rendered profile pages
//!
//! A [`Session`] is the capability set scrapers need: navigate with retries,
//! read an element through a [`Locator`], evaluate a script, close. Two
//! implementations ship with the crate:
//!
//! - [`ChromeSession`] drives a headless Chrome process.
//! - [`SnapshotSession`] answers CSS locators from a saved HTML page.
//!
//! # Example
//!
//! ```no_run
//! use social_scraper::browser::{BrowserConfig, ChromeSession, Locator, Session};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = ChromeSession::start(BrowserConfig::default())?;
//!
//! if session.navigate("https://example.com") {
//!     let heading = session.read(&Locator::css("h1"), Duration::from_secs(10))?;
//!     println!("{}", heading.trim());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod retry;
pub mod session;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod stub;

pub use config::BrowserConfig;
pub use manager::{BrowserError, ChromeSession};
pub use retry::RetryPolicy;
pub use session::{Extract, Locator, Session, Strategy};
pub use snapshot::SnapshotSession;
