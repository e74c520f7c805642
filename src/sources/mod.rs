//! Per-platform page tables
//!
//! Each platform declares, for its profile page and its post page, which
//! fields are scraped and the ordered locators tried for each field (most
//! specific first, most generic last). The tables are consumed by
//! [`crate::scraper::PlatformScraper`]; nothing platform-specific lives
//! outside this module.

use crate::browser::Locator;
use crate::models::{LinkKind, Platform};
use std::time::Duration;

pub mod facebook;
pub mod instagram;
pub mod tiktok;
pub mod youtube;

/// Post-processing applied to a resolved value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleanup {
    None,
    /// Drop a trailing suffix such as " - YouTube"
    StripSuffix(&'static str),
    /// Keep only the first non-empty line
    FirstLine,
}

impl Cleanup {
    pub fn apply(&self, value: &str) -> String {
        let value = value.trim();
        match self {
            Cleanup::None => value.to_string(),
            Cleanup::StripSuffix(suffix) => value
                .strip_suffix(suffix)
                .unwrap_or(value)
                .trim()
                .to_string(),
            Cleanup::FirstLine => value
                .lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// One logical field and where to find it
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub locators: &'static [Locator],
    /// Script returning rendered text, tried once when every locator fails
    pub fallback_script: Option<&'static str>,
    pub cleanup: Cleanup,
}

/// Script run after navigation, followed by a pause
#[derive(Debug)]
pub struct Prepare {
    pub script: &'static str,
    pub pause: Duration,
}

/// Everything scraped from one kind of page
#[derive(Debug)]
pub struct PageSpec {
    pub kind: LinkKind,
    pub label: &'static str,
    /// Wait after navigation so client-side rendering can finish
    pub settle: Duration,
    pub prepare: &'static [Prepare],
    /// Per-locator wait; `None` uses the session default
    pub lookup_timeout: Option<Duration>,
    pub fields: &'static [FieldSpec],
}

impl PageSpec {
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

#[derive(Debug)]
pub struct PlatformSpec {
    pub platform: Platform,
    /// Apply the session's extra stealth hook after launch
    pub harden: bool,
    pub profile: PageSpec,
    pub post: PageSpec,
}

impl PlatformSpec {
    pub fn page(&self, kind: LinkKind) -> &PageSpec {
        match kind {
            LinkKind::Profile => &self.profile,
            LinkKind::Post => &self.post,
        }
    }
}

pub fn spec_for(platform: Platform) -> &'static PlatformSpec {
    match platform {
        Platform::YouTube => &youtube::SPEC,
        Platform::Instagram => &instagram::SPEC,
        Platform::TikTok => &tiktok::SPEC,
        Platform::Facebook => &facebook::SPEC,
    }
}
