use crate::browser::config::DEFAULT_USER_AGENT;
use crate::browser::{BrowserConfig, RetryPolicy};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    /// Run Chrome without a window
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Chrome binary; falls back to `CHROME_PATH`, then auto-detection
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Launch and navigation attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_page_load_timeout")]
    pub page_load_timeout_secs: u64,

    /// How long each locator waits for its element
    #[serde(default = "default_element_timeout")]
    pub element_timeout_secs: u64,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// env_logger filter, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file; empty logs to stderr
    #[serde(default = "default_log_file")]
    pub file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

fn default_true() -> bool { true }
fn default_user_agent() -> String { DEFAULT_USER_AGENT.to_string() }
fn default_max_retries() -> usize { 3 }
fn default_retry_delay() -> u64 { 2000 }
fn default_page_load_timeout() -> u64 { 30 }
fn default_element_timeout() -> u64 { 20 }
fn default_window_width() -> u32 { 1920 }
fn default_window_height() -> u32 { 1080 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_file() -> String { "scraper.log".to_string() }
fn default_output_dir() -> PathBuf { PathBuf::from(".") }

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            user_agent: default_user_agent(),
            max_retries: 3,
            retry_delay_ms: 2000,
            page_load_timeout_secs: 30,
            element_timeout_secs: 20,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, or defaults when it is absent or invalid
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            return Self::default();
        }

        Self::from_path(path).unwrap_or_else(|e| {
            // Logging is not initialized yet, the log config lives in this file
            eprintln!("warning: {}; using defaults", e);
            Self::default()
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl BrowserSettings {
    /// Create the runtime browser configuration from these settings
    pub fn to_browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            headless: self.headless,
            window_size: (self.window_width, self.window_height),
            user_agent: self.user_agent.clone(),
            chrome_path: self.chrome_path.clone(),
            page_load_timeout: Duration::from_secs(self.page_load_timeout_secs),
            element_timeout: Duration::from_secs(self.element_timeout_secs),
            retry: RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_delay_ms)),
            ..BrowserConfig::default()
        }
    }
}
