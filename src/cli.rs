use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_STEM;

/// Serves the TimeTracker HTML demo on a local port.
///
/// Every flag is optional; running without arguments serves `./demo` on port 8000.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "serves the TimeTracker HTML demo")]
pub struct Cli {
    /// Config file stem (demo_server.toml, demo_server.yaml, ...)
    #[arg(short, long, default_value = DEFAULT_CONFIG_STEM)]
    pub config: String,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Project directory that contains `demo/`
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Don't try to open a browser at startup
    #[arg(long)]
    pub no_browser: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["demo_server"]).unwrap();
        assert_eq!(cli.config, DEFAULT_CONFIG_STEM);
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(cli.dir.is_none());
        assert!(!cli.no_browser);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "demo_server",
            "-p",
            "9000",
            "--dir",
            "/tmp/tt",
            "--no-browser",
        ])
        .unwrap();
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/tt")));
        assert!(cli.no_browser);
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["demo_server", "--port", "http"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
