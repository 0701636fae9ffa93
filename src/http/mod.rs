//! HTTP protocol layer module
//!
//! Content types, cache validators, byte ranges and response builders,
//! kept apart from request dispatch.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use cache::Validators;
pub use range::{ByteRange, RangeOutcome};
pub use response::{
    build_301_response, build_304_response, build_404_response, build_405_response,
    build_416_response, build_options_response, FileHeaders, HttpResponse,
};
