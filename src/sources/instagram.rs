use super::{Cleanup, FieldSpec, PageSpec, PlatformSpec};
use crate::browser::Locator;
use crate::models::{LinkKind, Platform};
use std::time::Duration;

/// Instagram blocks obvious automation, so sessions are hardened before use.
/// Class names like `_ac2a` are build hashes and change without notice.
pub static SPEC: PlatformSpec = PlatformSpec {
    platform: Platform::Instagram,
    harden: true,
    profile: PageSpec {
        kind: LinkKind::Profile,
        label: "profile",
        settle: Duration::from_secs(5),
        prepare: &[],
        lookup_timeout: None,
        fields: &[
            FieldSpec {
                name: "followers",
                locators: &[
                    Locator::css("li:nth-child(2) span span"),
                    Locator::css("span._ac2a"),
                    Locator::css("span.g47SY"),
                ],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
            FieldSpec {
                name: "following",
                locators: &[
                    Locator::css("li:nth-child(3) span span"),
                    Locator::css("span._ac2a:nth-child(2)"),
                    Locator::css("span.g47SY:nth-child(2)"),
                ],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
            FieldSpec {
                name: "posts",
                locators: &[
                    Locator::css("li:nth-child(1) span span"),
                    Locator::css("header section ul li:first-child span"),
                ],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
        ],
    },
    post: PageSpec {
        kind: LinkKind::Post,
        label: "post",
        settle: Duration::from_secs(5),
        prepare: &[],
        lookup_timeout: None,
        fields: &[
            FieldSpec {
                name: "likes",
                locators: &[
                    Locator::css("span.like-count"),
                    Locator::css("section._ae5m span"),
                    Locator::css("span._aacl"),
                ],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
            FieldSpec {
                name: "comments",
                locators: &[
                    Locator::css("span.comment-count"),
                    Locator::css("ul._a9z6 > div > li"),
                ],
                fallback_script: None,
                cleanup: Cleanup::None,
            },
        ],
    },
};
