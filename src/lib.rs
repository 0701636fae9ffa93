//! Local HTTP server for the TimeTracker HTML demo.
//!
//! Every request path is rewritten into the `/demo` mount and then served
//! as a static file from the project directory.

pub mod banner;
pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::{DemoError, Result};
