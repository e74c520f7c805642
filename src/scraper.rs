use crate::browser::{BrowserError, Session};
use crate::export::ExportError;
use crate::helpers::format_url;
use crate::models::{LinkKind, Platform, ScrapeResult, ScrapeTarget};
use crate::resolver::ElementResolver;
use crate::sources::{spec_for, PageSpec, PlatformSpec};
use std::path::PathBuf;

/// Errors that abort a scrape request
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Launch(#[from] BrowserError),

    #[error("Failed to load {platform} page {url}")]
    Navigation { platform: Platform, url: String },

    #[error("Invalid {platform} link: {url}")]
    InvalidLink { platform: Platform, url: String },

    #[error("Cannot read snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Scrapes one platform through a session it owns.
///
/// Every operation follows the same steps: format the URL, navigate, prepare
/// and settle, then resolve each declared field on its own. Dropping the
/// scraper closes the session.
pub struct PlatformScraper<S: Session> {
    spec: &'static PlatformSpec,
    session: S,
    resolver: ElementResolver,
    settle: bool,
}

impl<S: Session> PlatformScraper<S> {
    pub fn new(platform: Platform, mut session: S, resolver: ElementResolver, user_agent: &str) -> Self {
        let spec = spec_for(platform);

        if spec.harden {
            match session.harden(user_agent) {
                Ok(()) => log::info!("Applied {} stealth settings", platform),
                Err(e) => log::warn!("Could not apply {} stealth settings: {}", platform, e),
            }
        }

        Self {
            spec,
            session,
            resolver,
            settle: true,
        }
    }

    /// Skip settle delays and preparation pauses, for pages that never re-render
    pub fn skip_settle(mut self) -> Self {
        self.settle = false;
        self
    }

    pub fn platform(&self) -> Platform {
        self.spec.platform
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn fetch_profile(&mut self, url: &str) -> Result<ScrapeResult, ScrapeError> {
        self.fetch_page(LinkKind::Profile, url)
    }

    pub fn fetch_post(&mut self, url: &str) -> Result<ScrapeResult, ScrapeError> {
        self.fetch_page(LinkKind::Post, url)
    }

    /// Dispatch on the target's classified kind. Targets of another platform are rejected.
    pub fn fetch(&mut self, target: &ScrapeTarget) -> Result<ScrapeResult, ScrapeError> {
        if target.platform != self.spec.platform {
            return Err(ScrapeError::InvalidLink {
                platform: self.spec.platform,
                url: target.url.clone(),
            });
        }
        self.fetch_page(target.kind, &target.url)
    }

    fn fetch_page(&mut self, kind: LinkKind, url: &str) -> Result<ScrapeResult, ScrapeError> {
        let spec = self.spec;
        let platform = spec.platform;
        let page = spec.page(kind);
        let url = format_url(url);

        log::info!("Scraping {} {} {}", platform, page.label, url);

        if !self.session.navigate(&url) {
            return Err(ScrapeError::Navigation { platform, url });
        }

        self.prepare(page);

        let resolver = page
            .lookup_timeout
            .map_or(self.resolver, |t| self.resolver.with_timeout(t));

        let mut result = ScrapeResult::new(platform, page.label, page.field_names());
        for field in page.fields {
            if let Some(value) = resolver.resolve_field(&mut self.session, field) {
                result.set(field.name, value);
            }
        }

        let missing = result.missing();
        if !missing.is_empty() {
            log::warn!(
                "Failed to find {} for {} (page title: \"{}\")",
                missing.join(", "),
                url,
                self.session.title()
            );
        }

        Ok(result)
    }

    /// Settle first: preparation scripts need a rendered page to act on
    fn prepare(&mut self, page: &PageSpec) {
        if self.settle && !page.settle.is_zero() {
            log::debug!("Waiting {:?} for client-side rendering", page.settle);
            std::thread::sleep(page.settle);
        }

        for step in page.prepare {
            if let Err(e) = self.session.evaluate(step.script) {
                log::warn!("Preparation script failed: {}", e);
            }
            if self.settle {
                std::thread::sleep(step.pause);
            }
        }
    }
}

impl<S: Session> Drop for PlatformScraper<S> {
    fn drop(&mut self) {
        self.session.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::stub::StubSession;
    use crate::browser::config::DEFAULT_USER_AGENT;
    use crate::models::NOT_AVAILABLE;
    use crate::sources::Prepare;
    use std::time::Duration;

    const SCROLLED_PAGE: PageSpec = PageSpec {
        kind: LinkKind::Profile,
        label: "channel",
        settle: Duration::from_millis(80),
        prepare: &[Prepare {
            script: "window.scrollTo(0, document.body.scrollHeight / 2);",
            pause: Duration::ZERO,
        }],
        lookup_timeout: None,
        fields: &[],
    };

    fn scraper(platform: Platform, session: StubSession) -> PlatformScraper<StubSession> {
        PlatformScraper::new(
            platform,
            session,
            ElementResolver::new(Duration::from_millis(10)),
            DEFAULT_USER_AGENT,
        )
        .skip_settle()
    }

    #[test]
    fn test_missing_followers_is_not_an_error() {
        let session = StubSession::new().answer("strong[data-e2e='following-count']", "87");
        let mut scraper = scraper(Platform::TikTok, session);

        let result = scraper.fetch_profile("https://tiktok.com/@someone").unwrap();

        assert_eq!(result.get("followers"), Some(NOT_AVAILABLE));
        assert_eq!(result.get("following"), Some("87"));
        assert_eq!(result.label(), "profile");
    }

    #[test]
    fn test_every_declared_field_is_present() {
        for platform in Platform::ALL {
            for kind in [LinkKind::Profile, LinkKind::Post] {
                let mut scraper = scraper(platform, StubSession::new());
                let result = scraper.fetch_page(kind, "https://example.com/x").unwrap();

                let declared: Vec<_> = spec_for(platform).page(kind).field_names().collect();
                assert_eq!(result.field_names(), declared);
                assert_eq!(result.missing(), declared);
            }
        }
    }

    #[test]
    fn test_navigation_failure_is_fatal() {
        let mut scraper = scraper(Platform::YouTube, StubSession::unreachable());

        match scraper.fetch_post("youtube.com/watch?v=abc123") {
            Err(ScrapeError::Navigation { platform, url }) => {
                assert_eq!(platform, Platform::YouTube);
                assert_eq!(url, "https://youtube.com/watch?v=abc123");
            }
            other => panic!("expected navigation error, got {:?}", other),
        }
        assert!(scraper.session().attempts.is_empty());
    }

    #[test]
    fn test_youtube_channel_uses_fallbacks() {
        let session = StubSession::new()
            .answer("meta[property='og:title']", "Example Channel - YouTube")
            .script(
                "(() => { const el = document.querySelector('#subscriber-count'); return el ? el.innerText : null; })()",
                "1.2M subscribers\n",
            );
        let mut scraper = scraper(Platform::YouTube, session);

        let result = scraper.fetch_profile("https://youtube.com/@example/").unwrap();

        assert_eq!(result.get("channel_name"), Some("Example Channel"));
        assert_eq!(result.get("subscribers"), Some("1.2M subscribers"));
        assert_eq!(scraper.session().visited, vec!["https://youtube.com/@example"]);
        assert!(scraper.session().evaluated[0].contains("scrollTo"));
    }

    #[test]
    fn test_only_hardened_platforms_call_the_hook() {
        let instagram = scraper(Platform::Instagram, StubSession::new());
        assert_eq!(
            instagram.session().hardened_with.as_deref(),
            Some(DEFAULT_USER_AGENT)
        );

        let youtube = scraper(Platform::YouTube, StubSession::new());
        assert!(youtube.session().hardened_with.is_none());
    }

    #[test]
    fn test_drop_closes_session() {
        let session = StubSession::new();
        let closes = session.close_calls.clone();

        {
            let mut scraper = scraper(Platform::Facebook, session);
            let _ = scraper.fetch_post("https://facebook.com/page/posts/1");
        }

        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_fetch_dispatches_on_kind() {
        let session = StubSession::new().answer("span.like-count", "1,024");
        let mut scraper = scraper(Platform::Instagram, session);
        let target = ScrapeTarget {
            platform: Platform::Instagram,
            url: "https://instagram.com/p/XYZ".to_string(),
            kind: LinkKind::Post,
            label: "post",
        };

        let result = scraper.fetch(&target).unwrap();

        assert_eq!(result.field_names(), vec!["likes", "comments"]);
        assert_eq!(result.get("likes"), Some("1,024"));
    }

    #[test]
    fn test_preparation_runs_after_settle() {
        let mut scraper = PlatformScraper::new(
            Platform::YouTube,
            StubSession::new(),
            ElementResolver::new(Duration::from_millis(10)),
            DEFAULT_USER_AGENT,
        );
        assert!(scraper.session.navigate("https://youtube.com/@example"));

        scraper.prepare(&SCROLLED_PAGE);

        let navigated = scraper.session.navigated_at.unwrap();
        let scrolled = scraper.session.evaluated_at[0];
        assert!(scrolled.duration_since(navigated) >= SCROLLED_PAGE.settle);
    }

    #[test]
    fn test_youtube_channel_scrolls_after_settle() {
        let mut scraper = PlatformScraper::new(
            Platform::YouTube,
            StubSession::new(),
            ElementResolver::new(Duration::from_millis(10)),
            DEFAULT_USER_AGENT,
        );

        scraper.fetch_profile("https://youtube.com/@example").unwrap();

        let settle = spec_for(Platform::YouTube).profile.settle;
        let session = scraper.session();
        assert!(session.evaluated[0].contains("scrollTo"));
        assert!(session.evaluated_at[0].duration_since(session.navigated_at.unwrap()) >= settle);
    }

    #[test]
    fn test_fetch_rejects_other_platform_target() {
        let mut scraper = scraper(Platform::TikTok, StubSession::new());
        let target = ScrapeTarget {
            platform: Platform::Instagram,
            url: "https://instagram.com/p/XYZ".to_string(),
            kind: LinkKind::Post,
            label: "post",
        };

        match scraper.fetch(&target) {
            Err(ScrapeError::InvalidLink { platform, url }) => {
                assert_eq!(platform, Platform::TikTok);
                assert_eq!(url, "https://instagram.com/p/XYZ");
            }
            other => panic!("expected invalid link, got {:?}", other),
        }
        assert!(scraper.session().visited.is_empty());
    }
}
