//! Helper functions for turning user input into scrape targets
//!
//! - Platform name parsing
//! - Link classification (profile vs post) per platform
//! - URL normalization before navigation
//!
//! # Examples
//!
//! ```
//! use social_scraper::helpers::{classify_link, parse_platform};
//! use social_scraper::models::LinkKind;
//!
//! let platform = parse_platform("yt").unwrap();
//! let link = classify_link(platform, "https://youtube.com/watch?v=abc123").unwrap();
//! assert_eq!(link.label, "video");
//! assert_eq!(link.kind, LinkKind::Post);
//! ```

use crate::models::{LinkKind, Platform};
use regex::Regex;

/// A link kind recognized for a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkMatch {
    pub label: &'static str,
    pub kind: LinkKind,
}

struct LinkPattern {
    label: &'static str,
    kind: LinkKind,
    pattern: &'static str,
}

const YOUTUBE_LINKS: &[LinkPattern] = &[
    LinkPattern {
        label: "channel",
        kind: LinkKind::Profile,
        pattern: r"youtube\.com/@?[\w-]+/?$",
    },
    LinkPattern {
        label: "video",
        kind: LinkKind::Post,
        pattern: r"youtube\.com/watch\?v=[\w-]+",
    },
];

const INSTAGRAM_LINKS: &[LinkPattern] = &[
    LinkPattern {
        label: "profile",
        kind: LinkKind::Profile,
        pattern: r"instagram\.com/[\w_.]+/?$",
    },
    LinkPattern {
        label: "post",
        kind: LinkKind::Post,
        pattern: r"instagram\.com/p/[\w-]+",
    },
];

const TIKTOK_LINKS: &[LinkPattern] = &[
    LinkPattern {
        label: "profile",
        kind: LinkKind::Profile,
        pattern: r"tiktok\.com/@[\w.]+/?$",
    },
    LinkPattern {
        label: "video",
        kind: LinkKind::Post,
        pattern: r"tiktok\.com/@[\w.]+/video/\d+",
    },
];

const FACEBOOK_LINKS: &[LinkPattern] = &[
    LinkPattern {
        label: "profile",
        kind: LinkKind::Profile,
        pattern: r"facebook\.com/[\w.]+/?$",
    },
    LinkPattern {
        label: "post",
        kind: LinkKind::Post,
        pattern: r"facebook\.com/[\w.]+/posts/[\w-]+",
    },
];

fn link_patterns(platform: Platform) -> &'static [LinkPattern] {
    match platform {
        Platform::YouTube => YOUTUBE_LINKS,
        Platform::Instagram => INSTAGRAM_LINKS,
        Platform::TikTok => TIKTOK_LINKS,
        Platform::Facebook => FACEBOOK_LINKS,
    }
}

/// Classify a link for a platform.
///
/// Patterns are checked in declared order and the first match wins; `None`
/// means the link is not valid for that platform.
pub fn classify_link(platform: Platform, link: &str) -> Option<LinkMatch> {
    let link = link.trim();

    link_patterns(platform).iter().find_map(|p| {
        let re = Regex::new(p.pattern).ok()?;
        re.is_match(link).then_some(LinkMatch {
            label: p.label,
            kind: p.kind,
        })
    })
}

/// Parse a platform name, case-insensitive
pub fn parse_platform(s: &str) -> Option<Platform> {
    match s.trim().to_lowercase().as_str() {
        "youtube" | "yt" => Some(Platform::YouTube),
        "instagram" | "ig" | "insta" => Some(Platform::Instagram),
        "tiktok" | "tt" => Some(Platform::TikTok),
        "facebook" | "fb" => Some(Platform::Facebook),
        _ => None,
    }
}

/// Ensure a scheme and drop trailing slashes
pub fn format_url(url: &str) -> String {
    let url = url.trim();
    let url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_links() {
        let channel = classify_link(Platform::YouTube, "https://youtube.com/@example").unwrap();
        assert_eq!(channel.label, "channel");
        assert_eq!(channel.kind, LinkKind::Profile);

        let video = classify_link(Platform::YouTube, "https://youtube.com/watch?v=abc123").unwrap();
        assert_eq!(video.label, "video");
        assert_eq!(video.kind, LinkKind::Post);

        assert!(classify_link(Platform::YouTube, "https://www.youtube.com/c/Example/").is_none());
        assert!(classify_link(Platform::YouTube, "https://www.youtube.com/Example/").is_some());
    }

    #[test]
    fn test_instagram_post_is_not_a_profile() {
        let post = classify_link(Platform::Instagram, "https://instagram.com/p/XYZ").unwrap();
        assert_eq!(post.label, "post");

        let profile = classify_link(Platform::Instagram, "instagram.com/some.user_1/").unwrap();
        assert_eq!(profile.label, "profile");
    }

    #[test]
    fn test_tiktok_and_facebook() {
        assert_eq!(
            classify_link(Platform::TikTok, "https://www.tiktok.com/@user.name/video/7301").map(|m| m.label),
            Some("video")
        );
        assert_eq!(
            classify_link(Platform::Facebook, "https://facebook.com/page.name/posts/pfbid02x").map(|m| m.label),
            Some("post")
        );
        assert!(classify_link(Platform::TikTok, "not-a-url").is_none());
    }

    #[test]
    fn test_link_for_wrong_platform() {
        assert!(classify_link(Platform::TikTok, "https://youtube.com/@example").is_none());
        assert!(classify_link(Platform::Facebook, "https://instagram.com/p/XYZ").is_none());
    }

    #[test]
    fn test_all_patterns_compile() {
        for platform in Platform::ALL {
            for p in link_patterns(platform) {
                assert!(Regex::new(p.pattern).is_ok(), "bad pattern {}", p.pattern);
            }
        }
    }

    #[test]
    fn test_parse_platform() {
        assert_eq!(parse_platform("YouTube"), Some(Platform::YouTube));
        assert_eq!(parse_platform(" ig "), Some(Platform::Instagram));
        assert_eq!(parse_platform("TT"), Some(Platform::TikTok));
        assert_eq!(parse_platform("fb"), Some(Platform::Facebook));
        assert_eq!(parse_platform("myspace"), None);
    }

    #[test]
    fn test_format_url() {
        assert_eq!(format_url("youtube.com/@example/"), "https://youtube.com/@example");
        assert_eq!(format_url("http://tiktok.com/@a"), "http://tiktok.com/@a");
        assert_eq!(format_url(" https://instagram.com/p/XYZ// "), "https://instagram.com/p/XYZ");
    }
}
