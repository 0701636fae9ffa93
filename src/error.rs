//! Crate error type

use thiserror::Error;

pub type Result<T> = core::result::Result<T, DemoError>;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listen address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },
}
