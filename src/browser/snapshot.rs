//! Offline session over a saved HTML page
//!
//! Answers CSS and id locators with the `scraper` parser, so the locator
//! tables can be checked against a page captured with "Save as…" without
//! launching Chrome. XPath locators and scripts are reported as unsupported.

use super::manager::BrowserError;
use super::session::{Extract, Locator, Session};
use scraper::{Html, Selector};
use std::path::Path;
use std::time::Duration;

pub struct SnapshotSession {
    document: Html,
    navigated: Option<String>,
    closed: bool,
}

impl SnapshotSession {
    pub fn new(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
            navigated: None,
            closed: false,
        }
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::new(&html))
    }

    /// URL passed to the last `navigate` call
    pub fn navigated_url(&self) -> Option<&str> {
        self.navigated.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Session for SnapshotSession {
    fn navigate(&mut self, url: &str) -> bool {
        if self.closed {
            return false;
        }
        log::debug!("Snapshot session ignores navigation to {}", url);
        self.navigated = Some(url.to_string());
        true
    }

    fn read(&mut self, locator: &Locator, _timeout: Duration) -> Result<String, BrowserError> {
        if self.closed {
            return Err(BrowserError::Closed);
        }

        let css = locator
            .as_css()
            .ok_or_else(|| BrowserError::Unsupported(format!("{} in a snapshot", locator)))?;
        let selector = Selector::parse(&css)
            .map_err(|e| BrowserError::ElementNotFound(format!("{}: {:?}", locator, e)))?;

        let element = self
            .document
            .select(&selector)
            .next()
            .ok_or_else(|| BrowserError::ElementNotFound(locator.to_string()))?;

        match locator.extract {
            Extract::Text => Ok(element.text().collect::<String>()),
            Extract::Attribute(name) => element
                .value()
                .attr(name)
                .map(|v| v.to_string())
                .ok_or_else(|| {
                    BrowserError::ElementNotFound(format!("{} has no attribute {}", locator, name))
                }),
        }
    }

    fn evaluate(&mut self, _script: &str) -> Result<Option<String>, BrowserError> {
        Err(BrowserError::Unsupported("script evaluation in a snapshot".to_string()))
    }

    fn title(&mut self) -> String {
        Selector::parse("title")
            .ok()
            .and_then(|sel| {
                self.document
                    .select(&sel)
                    .next()
                    .map(|t| t.text().collect::<String>().trim().to_string())
            })
            .unwrap_or_default()
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
