use super::manager::BrowserError;
use super::session::{Locator, Session};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Scripted session for unit tests.
///
/// Selectors and scripts not registered fail; every call is recorded.
#[derive(Default)]
pub(crate) struct StubSession {
    pub answers: HashMap<&'static str, String>,
    pub scripts: HashMap<String, String>,
    pub navigation_ok: bool,
    pub attempts: Vec<&'static str>,
    pub evaluated: Vec<String>,
    pub visited: Vec<String>,
    pub navigated_at: Option<Instant>,
    pub evaluated_at: Vec<Instant>,
    pub hardened_with: Option<String>,
    pub close_calls: Rc<Cell<usize>>,
}

impl StubSession {
    pub fn new() -> Self {
        Self {
            navigation_ok: true,
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn answer(mut self, selector: &'static str, value: &str) -> Self {
        self.answers.insert(selector, value.to_string());
        self
    }

    pub fn script(mut self, script: &str, value: &str) -> Self {
        self.scripts.insert(script.to_string(), value.to_string());
        self
    }

    pub fn attempts_of(&self, selector: &str) -> usize {
        self.attempts.iter().filter(|s| **s == selector).count()
    }
}

impl Session for StubSession {
    fn navigate(&mut self, url: &str) -> bool {
        self.visited.push(url.to_string());
        self.navigated_at = Some(Instant::now());
        self.navigation_ok
    }

    fn read(&mut self, locator: &Locator, _timeout: Duration) -> Result<String, BrowserError> {
        self.attempts.push(locator.selector);
        self.answers
            .get(locator.selector)
            .cloned()
            .ok_or_else(|| BrowserError::Timeout(locator.to_string()))
    }

    fn evaluate(&mut self, script: &str) -> Result<Option<String>, BrowserError> {
        self.evaluated.push(script.to_string());
        self.evaluated_at.push(Instant::now());
        Ok(self.scripts.get(script).cloned())
    }

    fn title(&mut self) -> String {
        "Stub page".to_string()
    }

    fn harden(&mut self, user_agent: &str) -> Result<(), BrowserError> {
        self.hardened_with = Some(user_agent.to_string());
        Ok(())
    }

    fn close(&mut self) {
        self.close_calls.set(self.close_calls.get() + 1);
    }
}
