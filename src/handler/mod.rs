//! Request handler module
//!
//! Rewrites each request path into the demo mount and serves the result
//! from the content root.

pub mod rewrite;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use rewrite::PathRewriter;
pub use router::handle_request;
