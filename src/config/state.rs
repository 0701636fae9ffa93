// Application state module
// Read-only state shared by every connection

use crate::handler::rewrite::PathRewriter;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    pub rewriter: PathRewriter,
    /// Copied out of `config` so the hot path doesn't chase it
    pub access_log: bool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rewriter = PathRewriter::new(&config.content.mount, &config.content.index);
        let access_log = config.logging.access_log;

        Self {
            config,
            rewriter,
            access_log,
        }
    }
}
