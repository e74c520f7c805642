use std::path::PathBuf;
use std::time::Duration;

use super::retry::RetryPolicy;

/// Desktop Chrome user agent presented to every platform
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.111 Safari/537.36";

/// Configuration for a browser session
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// Spoofed user agent
    pub user_agent: String,

    /// Explicit Chrome binary, otherwise headless_chrome detects one
    pub chrome_path: Option<PathBuf>,

    /// Default timeout for page loads
    pub page_load_timeout: Duration,

    /// How long a single locator may wait for its element
    pub element_timeout: Duration,

    /// Retry policy shared by launch and navigation
    pub retry: RetryPolicy,

    /// Additional Chrome flags
    pub chrome_flags: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_path: None,
            page_load_timeout: Duration::from_secs(30),
            element_timeout: Duration::from_secs(20),
            retry: RetryPolicy::default(),
            chrome_flags: Self::container_flags(),
        }
    }
}

impl BrowserConfig {
    /// Flags for running inside containers and hiding the automation signal
    fn container_flags() -> Vec<String> {
        [
            "--disable-gpu",
            "--disable-dev-shm-usage",
            "--disable-extensions",
            "--disable-software-rasterizer",
            "--ignore-certificate-errors",
            "--disable-notifications",
            "--disable-popup-blocking",
            "--disable-blink-features=AutomationControlled",
            "--start-maximized",
        ]
        .iter()
        .map(|f| f.to_string())
        .collect()
    }

    /// Create a configuration for debugging (non-headless, visible browser)
    pub fn debug_mode() -> Self {
        Self {
            headless: false,
            ..Self::default()
        }
    }

    /// Full argument list passed to Chrome, user agent included
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = self.chrome_flags.clone();
        args.push(format!("--user-agent={}", self.user_agent));
        args
    }

    /// Chrome binary to launch, if one was configured or exported in `CHROME_PATH`
    pub fn resolve_chrome_path(&self) -> Option<PathBuf> {
        self.chrome_path.clone().or_else(|| {
            std::env::var_os("CHROME_PATH")
                .map(PathBuf::from)
                .filter(|p| p.exists())
        })
    }
}
