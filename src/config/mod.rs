// Configuration module entry point
// Layers the optional config file, environment and defaults, then CLI overrides

mod state;
mod types;

use std::net::SocketAddr;

use crate::cli::Cli;
use crate::error::{DemoError, Result};

// Re-export public types
pub use state::AppState;
pub use types::{
    default_pages, BrowserConfig, Config, ContentConfig, DemoPage, HttpConfig, LoggingConfig,
    PerformanceConfig, ServerConfig,
};

/// Config file stem used when none is given on the command line
pub const DEFAULT_CONFIG_STEM: &str = "demo_server";

/// Content root when none is configured: the directory holding this crate,
/// so `demo/` is found regardless of the working directory
pub const DEFAULT_PROJECT_DIR: &str = env!("CARGO_MANIFEST_DIR");

impl Config {
    /// Load configuration from the given file stem (extension picked by the `config` crate).
    /// A missing file is fine; defaults cover every key.
    pub fn load_from(config_path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("DEMO_SERVER")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.public_host", "localhost")?
            .set_default("content.project_dir", DEFAULT_PROJECT_DIR)?
            .set_default("content.mount", "/demo")?
            .set_default("content.index", "/demo/index.html")?
            .set_default("content.index_files", vec!["index.html", "index.htm"])?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "demo_server")?
            .set_default("http.cache_control", "no-cache")?
            .set_default("browser.open", true)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load from the CLI's config path and apply its flag overrides
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut cfg = Self::load_from(&cli.config)?;
        cfg.apply_cli(cli);
        Ok(cfg)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(dir) = &cli.dir {
            self.content.project_dir.clone_from(dir);
        }
        if cli.no_browser {
            self.browser.open = false;
        }
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        match addr.parse::<SocketAddr>() {
            Ok(socket_addr) => Ok(socket_addr),
            Err(e) => Err(DemoError::InvalidAddress {
                reason: e.to_string(),
                addr,
            }),
        }
    }

    /// URL shown to the user and handed to the browser
    pub fn public_url(&self) -> String {
        format!("http://{}:{}", self.server.public_host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn defaults() -> Config {
        Config::load_from("no-such-demo-server-config").unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = defaults();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.content.project_dir, PathBuf::from(DEFAULT_PROJECT_DIR));
        assert!(cfg.content.project_dir.is_absolute());
        assert!(cfg.content.project_dir.join("demo/index.html").is_file());
        assert_eq!(cfg.content.mount, "/demo");
        assert_eq!(cfg.content.index, "/demo/index.html");
        assert_eq!(cfg.content.index_files, vec!["index.html", "index.htm"]);
        assert_eq!(cfg.content.pages, default_pages());
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.browser.open);
        assert_eq!(cfg.public_url(), "http://localhost:8000");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = defaults();
        assert_eq!(cfg.get_socket_addr().unwrap(), "0.0.0.0:8000".parse().unwrap());

        let mut bad = cfg;
        bad.server.host = "not an address".to_string();
        assert!(matches!(
            bad.get_socket_addr(),
            Err(DemoError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_cli_overrides() {
        let mut cfg = defaults();
        let cli = Cli {
            config: DEFAULT_CONFIG_STEM.to_string(),
            host: Some("127.0.0.1".to_string()),
            port: Some(9001),
            dir: Some(PathBuf::from("/srv/timetracker")),
            no_browser: true,
        };
        cfg.apply_cli(&cli);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.content.project_dir, PathBuf::from("/srv/timetracker"));
        assert!(!cfg.browser.open);
        assert_eq!(cfg.public_url(), "http://localhost:9001");
    }
}
