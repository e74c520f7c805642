use super::{Cleanup, FieldSpec, PageSpec, PlatformSpec};
use crate::browser::Locator;
use crate::models::{LinkKind, Platform};
use std::time::Duration;

pub static SPEC: PlatformSpec = PlatformSpec {
    platform: Platform::Facebook,
    harden: false,
    profile: PageSpec {
        kind: LinkKind::Profile,
        label: "profile",
        settle: Duration::ZERO,
        prepare: &[],
        lookup_timeout: None,
        fields: &[FieldSpec {
            name: "followers",
            locators: &[
                Locator::css("div[data-key='followers']"),
                Locator::xpath("//a[contains(@href, '/followers')]"),
            ],
            fallback_script: None,
            cleanup: Cleanup::FirstLine,
        }],
    },
    post: PageSpec {
        kind: LinkKind::Post,
        label: "post",
        settle: Duration::ZERO,
        prepare: &[],
        lookup_timeout: None,
        fields: &[FieldSpec {
            name: "likes",
            locators: &[
                Locator::css("span.like-count"),
                Locator::css("span[aria-label*='reactions']").attr("aria-label"),
            ],
            fallback_script: None,
            cleanup: Cleanup::None,
        }],
    },
};
