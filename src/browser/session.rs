use super::manager::BrowserError;
use std::fmt;
use std::time::Duration;

/// How a selector string is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Css,
    XPath,
    Id,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Css => write!(f, "css"),
            Strategy::XPath => write!(f, "xpath"),
            Strategy::Id => write!(f, "id"),
        }
    }
}

/// What to read from a located element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    Text,
    Attribute(&'static str),
}

/// One candidate location for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub strategy: Strategy,
    pub selector: &'static str,
    pub extract: Extract,
}

impl Locator {
    pub const fn css(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::Css,
            selector,
            extract: Extract::Text,
        }
    }

    pub const fn xpath(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::XPath,
            selector,
            extract: Extract::Text,
        }
    }

    pub const fn id(selector: &'static str) -> Self {
        Self {
            strategy: Strategy::Id,
            selector,
            extract: Extract::Text,
        }
    }

    /// Read an attribute (e.g. a meta tag's `content`) instead of text
    pub const fn attr(self, name: &'static str) -> Self {
        Self {
            extract: Extract::Attribute(name),
            ..self
        }
    }

    /// Equivalent CSS selector, when the strategy has one
    pub fn as_css(&self) -> Option<String> {
        match self.strategy {
            Strategy::Css => Some(self.selector.to_string()),
            Strategy::Id => Some(format!("[id=\"{}\"]", self.selector)),
            Strategy::XPath => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.strategy, self.selector)?;
        if let Extract::Attribute(name) = self.extract {
            write!(f, " @{}", name)?;
        }
        Ok(())
    }
}

/// Capabilities a scraper needs from a browser.
///
/// One session is owned by one scrape; implementations are not shared.
pub trait Session {
    /// Load `url`, retrying per the session's policy. `false` once retries run out.
    fn navigate(&mut self, url: &str) -> bool;

    /// Wait up to `timeout` for the element and read it as `locator.extract` says
    fn read(&mut self, locator: &Locator, timeout: Duration) -> Result<String, BrowserError>;

    /// Evaluate a script; `None` when it produced no string value
    fn evaluate(&mut self, script: &str) -> Result<Option<String>, BrowserError>;

    /// Current page title, empty when unavailable
    fn title(&mut self) -> String;

    /// Extra stealth applied after launch
    fn harden(&mut self, _user_agent: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    /// Release the browser. Must be idempotent.
    fn close(&mut self);
}

impl<S: Session + ?Sized> Session for Box<S> {
    fn navigate(&mut self, url: &str) -> bool {
        (**self).navigate(url)
    }

    fn read(&mut self, locator: &Locator, timeout: Duration) -> Result<String, BrowserError> {
        (**self).read(locator, timeout)
    }

    fn evaluate(&mut self, script: &str) -> Result<Option<String>, BrowserError> {
        (**self).evaluate(script)
    }

    fn title(&mut self) -> String {
        (**self).title()
    }

    fn harden(&mut self, user_agent: &str) -> Result<(), BrowserError> {
        (**self).harden(user_agent)
    }

    fn close(&mut self) {
        (**self).close()
    }
}
