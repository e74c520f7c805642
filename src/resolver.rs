//! First-match-wins element lookup across ordered fallback locators

use crate::browser::{Locator, Session};
use crate::sources::FieldSpec;
use std::time::Duration;

/// Resolves logical fields against a session.
///
/// Locators are ordered from most reliable to most generic, so the first
/// non-empty value is taken rather than the "best" one. Exhausting the list
/// is not an error: the caller gets `None` and keeps its sentinel.
#[derive(Debug, Clone, Copy)]
pub struct ElementResolver {
    timeout: Duration,
}

impl ElementResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Same resolver with a different per-locator wait
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Try `locators` in order and return the first non-empty, trimmed value
    pub fn resolve<S: Session + ?Sized>(
        &self,
        session: &mut S,
        field: &str,
        locators: &[Locator],
    ) -> Option<String> {
        for locator in locators {
            match session.read(locator, self.timeout) {
                Ok(raw) => {
                    let value = raw.trim();
                    if !value.is_empty() {
                        log::debug!("{}: resolved via {}", field, locator);
                        return Some(value.to_string());
                    }
                    log::warn!(
                        "{}: {} matched an empty element on \"{}\"",
                        field,
                        locator,
                        session.title()
                    );
                }
                Err(e) => {
                    log::warn!(
                        "{}: {} failed on \"{}\": {}",
                        field,
                        locator,
                        session.title(),
                        e
                    );
                }
            }
        }

        None
    }

    /// Resolve a declared field: its locators, then its fallback script, then cleanup
    pub fn resolve_field<S: Session + ?Sized>(
        &self,
        session: &mut S,
        spec: &FieldSpec,
    ) -> Option<String> {
        let raw = self
            .resolve(session, spec.name, spec.locators)
            .or_else(|| Self::run_fallback(session, spec))?;

        let value = spec.cleanup.apply(&raw);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Read rendered text directly, for content that appears after the locators gave up
    fn run_fallback<S: Session + ?Sized>(session: &mut S, spec: &FieldSpec) -> Option<String> {
        let script = spec.fallback_script?;

        match session.evaluate(script) {
            Ok(Some(text)) if !text.trim().is_empty() => {
                log::info!("{}: recovered by script fallback", spec.name);
                Some(text)
            }
            Ok(_) => None,
            Err(e) => {
                log::warn!("{}: script fallback failed: {}", spec.name, e);
                None
            }
        }
    }
}

impl Default for ElementResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(20))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::stub::StubSession;
    use crate::sources::Cleanup;

    const LOCATORS: &[Locator] = &[
        Locator::css("#first"),
        Locator::css("#second"),
        Locator::css("#third"),
        Locator::css("#fourth"),
    ];

    fn resolver() -> ElementResolver {
        ElementResolver::new(Duration::from_millis(10))
    }

    #[test]
    fn test_empty_list_touches_nothing() {
        let mut session = StubSession::new();
        assert_eq!(resolver().resolve(&mut session, "followers", &[]), None);
        assert!(session.attempts.is_empty());
    }

    #[test]
    fn test_first_match_wins_in_declared_order() {
        let mut session = StubSession::new()
            .answer("#third", " 12.5K ")
            .answer("#fourth", "should not be read");

        let value = resolver().resolve(&mut session, "followers", LOCATORS);

        assert_eq!(value.as_deref(), Some("12.5K"));
        assert_eq!(session.attempts, vec!["#first", "#second", "#third"]);
        assert_eq!(session.attempts_of("#first"), 1);
        assert_eq!(session.attempts_of("#second"), 1);
        assert_eq!(session.attempts_of("#fourth"), 0);
    }

    #[test]
    fn test_blank_match_falls_through() {
        let mut session = StubSession::new()
            .answer("#first", "   ")
            .answer("#second", "42");

        let value = resolver().resolve(&mut session, "likes", LOCATORS);
        assert_eq!(value.as_deref(), Some("42"));
    }

    #[test]
    fn test_exhaustion_is_none() {
        let mut session = StubSession::new();
        assert_eq!(resolver().resolve(&mut session, "likes", LOCATORS), None);
        assert_eq!(session.attempts.len(), LOCATORS.len());
    }

    const CHANNEL_NAME: FieldSpec = FieldSpec {
        name: "channel_name",
        locators: &[Locator::css("ytd-channel-name h1")],
        fallback_script: Some("return name"),
        cleanup: Cleanup::FirstLine,
    };

    const META_TITLE: FieldSpec = FieldSpec {
        name: "channel_name",
        locators: &[Locator::css("meta")],
        fallback_script: Some("return name"),
        cleanup: Cleanup::StripSuffix(" - YouTube"),
    };

    const VIEWS: FieldSpec = FieldSpec {
        name: "views",
        locators: &[Locator::css("span.view-count")],
        fallback_script: None,
        cleanup: Cleanup::None,
    };

    #[test]
    fn test_script_fallback_after_locators() {
        let spec = CHANNEL_NAME;
        let mut session = StubSession::new().script("return name", "Example\nVerified");

        let value = resolver().resolve_field(&mut session, &spec);

        assert_eq!(value.as_deref(), Some("Example"));
        assert_eq!(session.attempts, vec!["ytd-channel-name h1"]);
        assert_eq!(session.evaluated, vec!["return name"]);
    }

    #[test]
    fn test_script_fallback_skipped_on_hit() {
        let spec = META_TITLE;
        let mut session = StubSession::new().answer("meta", "Example - YouTube");

        let value = resolver().resolve_field(&mut session, &spec);

        assert_eq!(value.as_deref(), Some("Example"));
        assert!(session.evaluated.is_empty());
    }

    #[test]
    fn test_field_without_fallback_stays_missing() {
        let spec = VIEWS;
        let mut session = StubSession::new();

        assert_eq!(resolver().resolve_field(&mut session, &spec), None);
        assert!(session.evaluated.is_empty());
    }
}
