//! Request flow shared by the CLI: classify, scrape, render

use crate::browser::{BrowserConfig, ChromeSession, Session, SnapshotSession};
use crate::helpers::classify_link;
use crate::models::{Platform, ScrapeResult, ScrapeTarget};
use crate::resolver::ElementResolver;
use crate::scraper::{PlatformScraper, ScrapeError};
use std::path::Path;

/// Classify `url` for `platform`. Invalid links are rejected before any browser work.
pub fn prepare(platform: Platform, url: &str) -> Result<ScrapeTarget, ScrapeError> {
    let url = url.trim();
    let link = classify_link(platform, url).ok_or_else(|| ScrapeError::InvalidLink {
        platform,
        url: url.to_string(),
    })?;

    log::info!("{} link classified as {}", platform, link.label);

    Ok(ScrapeTarget {
        platform,
        url: url.to_string(),
        kind: link.kind,
        label: link.label,
    })
}

/// Open the session a request runs on: a saved page when `snapshot` is set,
/// otherwise a fresh Chrome.
pub fn open_session(
    snapshot: Option<&Path>,
    config: &BrowserConfig,
) -> Result<Box<dyn Session>, ScrapeError> {
    match snapshot {
        Some(path) => {
            let session = SnapshotSession::from_file(path).map_err(|source| ScrapeError::Snapshot {
                path: path.to_path_buf(),
                source,
            })?;
            log::info!("Using saved page {}", path.display());
            Ok(Box::new(session))
        }
        None => Ok(Box::new(ChromeSession::start(config.clone())?)),
    }
}

/// Scrape one target. The session is closed when this returns, on every path.
pub fn run<S: Session>(
    target: &ScrapeTarget,
    session: S,
    config: &BrowserConfig,
    settle: bool,
) -> Result<ScrapeResult, ScrapeError> {
    let resolver = ElementResolver::new(config.element_timeout);
    let mut scraper = PlatformScraper::new(target.platform, session, resolver, &config.user_agent);
    if !settle {
        scraper = scraper.skip_settle();
    }

    scraper.fetch(target)
}

/// Render a result as a bordered single-row table
pub fn render_table(result: &ScrapeResult) -> String {
    let headers = result.headers();
    let row = result.row();

    let widths: Vec<usize> = headers
        .iter()
        .zip(&row)
        .map(|(h, v)| h.chars().count().max(v.chars().count()))
        .collect();

    let border = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line
    };

    let format_line = |cells: &[&str]| {
        let mut line = String::from("|");
        for (cell, w) in cells.iter().zip(&widths) {
            let pad = w - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line
    };

    [
        border.clone(),
        format_line(&headers),
        border.clone(),
        format_line(&row),
        border,
    ]
    .join("\n")
}
