use super::config::BrowserConfig;
use super::retry::RetryPolicy;
use super::session::{Extract, Locator, Session};
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

/// Injected into every new document so `navigator.webdriver` reads as a normal browser
const HIDE_WEBDRIVER: &str = r#"
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined
    });
"#;

/// A single Chrome process and the tab it scrapes with.
///
/// Dropping the session closes the browser, including after a failed scrape.
pub struct ChromeSession {
    browser: Option<Browser>,
    tab: Option<Arc<Tab>>,
    config: BrowserConfig,
}

impl ChromeSession {
    /// Launch Chrome, retrying per `config.retry`
    pub fn start(config: BrowserConfig) -> Result<Self, BrowserError> {
        let (browser, tab) = launch_with_retries(&config.retry, || Self::launch_once(&config))?;
        log::info!("Chrome driver initialized successfully");

        Ok(Self {
            browser: Some(browser),
            tab: Some(tab),
            config,
        })
    }

    fn launch_once(config: &BrowserConfig) -> Result<(Browser, Arc<Tab>), BrowserError> {
        let args = config.launch_args();
        let options = Self::build_launch_options(config, &args)?;

        let browser =
            Browser::new(options).map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::TabCreationError(e.to_string()))?;
        tab.set_default_timeout(config.page_load_timeout);

        Ok((browser, tab))
    }

    /// Build Chrome launch options from our config
    fn build_launch_options<'a>(
        config: &BrowserConfig,
        args: &'a [String],
    ) -> Result<LaunchOptions<'a>, BrowserError> {
        let args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();

        LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(false)
            .window_size(Some(config.window_size))
            .path(config.resolve_chrome_path())
            .idle_browser_timeout(config.page_load_timeout * 4)
            .args(args)
            .build()
            .map_err(|e| BrowserError::ConfigurationError(e.to_string()))
    }

    /// Whether the browser is still running
    pub fn is_open(&self) -> bool {
        self.browser.is_some()
    }

    fn tab(&self) -> Result<Arc<Tab>, BrowserError> {
        self.tab.clone().ok_or(BrowserError::Closed)
    }
}

/// Launch something with bounded retries, turning exhaustion into `BrowserError::Launch`
pub fn launch_with_retries<T, F>(policy: &RetryPolicy, mut launch: F) -> Result<T, BrowserError>
where
    F: FnMut() -> Result<T, BrowserError>,
{
    policy
        .run("Chrome launch", |_| launch())
        .map_err(|exhausted| BrowserError::Launch {
            attempts: exhausted.attempts,
            last_error: exhausted.last_error.to_string(),
        })
}

impl Session for ChromeSession {
    fn navigate(&mut self, url: &str) -> bool {
        let tab = match self.tab() {
            Ok(tab) => tab,
            Err(e) => {
                log::error!("Cannot load {}: {}", url, e);
                return false;
            }
        };

        let what = format!("Loading {}", url);
        self.config
            .retry
            .run(&what, |_| {
                tab.navigate_to(url)
                    .and_then(|t| t.wait_until_navigated())
                    .map(|_| ())
                    .map_err(|e| BrowserError::NavigationError(e.to_string()))
            })
            .is_ok()
    }

    fn read(&mut self, locator: &Locator, timeout: Duration) -> Result<String, BrowserError> {
        let tab = self.tab()?;
        let css = locator.as_css();

        let element = match css.as_deref() {
            Some(selector) => tab.wait_for_element_with_custom_timeout(selector, timeout),
            None => tab.wait_for_xpath_with_custom_timeout(locator.selector, timeout),
        }
        .map_err(|e| BrowserError::Timeout(format!("{}: {}", locator, e)))?;

        match locator.extract {
            Extract::Text => element
                .get_inner_text()
                .map_err(|e| BrowserError::ElementNotFound(format!("{}: {}", locator, e))),
            Extract::Attribute(name) => element
                .get_attribute_value(name)
                .map_err(|e| BrowserError::ElementNotFound(format!("{}: {}", locator, e)))?
                .ok_or_else(|| {
                    BrowserError::ElementNotFound(format!("{} has no attribute {}", locator, name))
                }),
        }
    }

    fn evaluate(&mut self, script: &str) -> Result<Option<String>, BrowserError> {
        let result = self
            .tab()?
            .evaluate(script, false)
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))?;

        Ok(result
            .value
            .and_then(|v| v.as_str().map(|s| s.to_string())))
    }

    fn title(&mut self) -> String {
        self.tab()
            .and_then(|tab| {
                tab.get_title()
                    .map_err(|e| BrowserError::JavaScriptError(e.to_string()))
            })
            .unwrap_or_default()
    }

    fn harden(&mut self, user_agent: &str) -> Result<(), BrowserError> {
        let tab = self.tab()?;

        tab.set_user_agent(user_agent, Some("en-US,en"), None)
            .map_err(|e| BrowserError::JavaScriptError(format!("User agent override failed: {}", e)))?;

        tab.call_method(Page::AddScriptToEvaluateOnNewDocument {
            source: HIDE_WEBDRIVER.to_string(),
            world_name: None,
            include_command_line_api: None,
            run_immediately: None,
        })
        .map_err(|e| BrowserError::JavaScriptError(format!("Stealth script failed: {}", e)))?;

        log::debug!("Applied network user agent override and webdriver mask");
        Ok(())
    }

    fn close(&mut self) {
        if let Some(tab) = self.tab.take() {
            if let Err(e) = tab.close(true) {
                log::debug!("Tab close failed: {}", e);
            }
        }

        // Dropping the Browser kills the Chrome process
        if self.browser.take().is_some() {
            log::info!("Chrome session closed");
        }
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Errors that can occur during browser operations
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Failed to initialize Chrome after {attempts} attempts: {last_error}")]
    Launch { attempts: usize, last_error: String },

    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    #[error("Browser configuration error: {0}")]
    ConfigurationError(String),

    #[error("Tab creation failed: {0}")]
    TabCreationError(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("JavaScript execution error: {0}")]
    JavaScriptError(String),

    #[error("Not supported by this session: {0}")]
    Unsupported(String),

    #[error("Browser session is closed")]
    Closed,
}
