use super::{Cleanup, FieldSpec, PageSpec, PlatformSpec};
use crate::browser::Locator;
use crate::models::{LinkKind, Platform};
use std::time::Duration;

// TikTok tags its counters with stable data-e2e attributes
pub static SPEC: PlatformSpec = PlatformSpec {
    platform: Platform::TikTok,
    harden: false,
    profile: PageSpec {
        kind: LinkKind::Profile,
        label: "profile",
        settle: Duration::ZERO,
        prepare: &[],
        lookup_timeout: None,
        fields: &[
            FieldSpec {
                name: "followers",
                locators: &[Locator::css("strong[data-e2e='followers-count']")],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
            FieldSpec {
                name: "following",
                locators: &[Locator::css("strong[data-e2e='following-count']")],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
            FieldSpec {
                name: "likes",
                locators: &[Locator::css("strong[data-e2e='likes-count']")],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
        ],
    },
    post: PageSpec {
        kind: LinkKind::Post,
        label: "video",
        settle: Duration::ZERO,
        prepare: &[],
        lookup_timeout: None,
        fields: &[
            FieldSpec {
                name: "likes",
                locators: &[
                    Locator::css("strong[data-e2e='like-count']"),
                    Locator::css("strong[data-e2e='browse-like-count']"),
                ],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
            FieldSpec {
                name: "comments",
                locators: &[
                    Locator::css("strong[data-e2e='comment-count']"),
                    Locator::css("strong[data-e2e='browse-comment-count']"),
                ],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
            FieldSpec {
                name: "shares",
                locators: &[Locator::css("strong[data-e2e='share-count']")],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
        ],
    },
};
