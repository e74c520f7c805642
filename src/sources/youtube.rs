use super::{Cleanup, FieldSpec, PageSpec, PlatformSpec, Prepare};
use crate::browser::Locator;
use crate::models::{LinkKind, Platform};
use std::time::Duration;

/// YouTube renders channel headers and video metadata client-side, so every
/// page waits five seconds before lookups start.
pub static SPEC: PlatformSpec = PlatformSpec {
    platform: Platform::YouTube,
    harden: false,
    profile: PageSpec {
        kind: LinkKind::Profile,
        label: "channel",
        settle: Duration::from_secs(5),
        prepare: &[Prepare {
            script: "window.scrollTo(0, document.body.scrollHeight / 2);",
            pause: Duration::from_secs(2),
        }],
        // The page has settled and scrolled by the time lookups run
        lookup_timeout: Some(Duration::from_secs(3)),
        fields: &[
            FieldSpec {
                name: "channel_name",
                locators: &[
                    Locator::xpath("//yt-formatted-string[contains(@class, 'ytd-channel-name')]"),
                    Locator::css("ytd-channel-name h1"),
                    Locator::css("meta[property='og:title']").attr("content"),
                ],
                fallback_script: Some(
                    "(() => { const el = document.querySelector('ytd-channel-name'); return el ? el.innerText : null; })()",
                ),
                cleanup: Cleanup::StripSuffix(" - YouTube"),
            },
            FieldSpec {
                name: "subscribers",
                locators: &[
                    Locator::id("subscriber-count"),
                    Locator::xpath("//yt-formatted-string[@id='subscriber-count']"),
                    Locator::css("#metadata-container #subscriber-count"),
                ],
                fallback_script: Some(
                    "(() => { const el = document.querySelector('#subscriber-count'); return el ? el.innerText : null; })()",
                ),
                cleanup: Cleanup::FirstLine,
            },
        ],
    },
    post: PageSpec {
        kind: LinkKind::Post,
        label: "video",
        settle: Duration::from_secs(5),
        prepare: &[],
        lookup_timeout: None,
        fields: &[
            FieldSpec {
                name: "title",
                locators: &[
                    Locator::css("h1.ytd-video-primary-info-renderer yt-formatted-string"),
                    Locator::css("#container h1.ytd-video-primary-info-renderer"),
                    Locator::css("ytd-watch-metadata h1.ytd-watch-metadata yt-formatted-string"),
                    Locator::css("#title h1 yt-formatted-string"),
                    Locator::xpath(
                        "//h1[contains(@class, 'ytd-video-primary-info-renderer')]//yt-formatted-string",
                    ),
                    Locator::css("meta[property='og:title']").attr("content"),
                ],
                fallback_script: None,
                cleanup: Cleanup::StripSuffix(" - YouTube"),
            },
            FieldSpec {
                name: "likes",
                locators: &[
                    Locator::css("#top-level-buttons-computed ytd-toggle-button-renderer:first-child #text"),
                    Locator::css("ytd-menu-renderer ytd-toggle-button-renderer #text"),
                    Locator::css("#info ytd-toggle-button-renderer:first-child #text"),
                    Locator::css("ytd-watch-metadata ytd-toggle-button-renderer #text"),
                    Locator::css("like-button-view-model button").attr("aria-label"),
                ],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
            FieldSpec {
                name: "views",
                locators: &[
                    Locator::css("ytd-video-view-count-renderer span.view-count"),
                    Locator::css("#info-container #info span:first-child"),
                    Locator::css("meta[itemprop='interactionCount']").attr("content"),
                ],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
        ],
    },
};
