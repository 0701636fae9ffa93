// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub browser: BrowserConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Host name used in printed URLs and for the browser launch
    pub public_host: String,
    pub workers: Option<usize>,
}

/// Where demo content lives and how request paths map onto it
#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// Directory the rewritten paths are resolved against
    pub project_dir: PathBuf,
    /// Prefix every request path is moved under (no trailing slash)
    pub mount: String,
    /// Target for a request to `/`
    pub index: String,
    pub index_files: Vec<String>,
    /// Pages listed in the startup banner
    #[serde(default = "default_pages")]
    pub pages: Vec<DemoPage>,
}

/// A page advertised in the startup banner
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DemoPage {
    pub label: String,
    pub path: String,
    /// Emoji printed before the label
    #[serde(default)]
    pub icon: Option<String>,
}

impl DemoPage {
    fn new(icon: &str, label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            path: path.to_string(),
            icon: Some(icon.to_string()),
        }
    }
}

pub fn default_pages() -> Vec<DemoPage> {
    vec![
        DemoPage::new("🏠", "Home", "/"),
        DemoPage::new("🔐", "Login", "/login.html"),
        DemoPage::new("📊", "Dashboard", "/dashboard.html"),
    ]
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub cache_control: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    pub open: bool,
}
