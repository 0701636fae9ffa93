//! HTTP response builders
//!
//! Builder failures are logged and replaced by an empty response, so no
//! request can panic the connection task.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    ACCEPT_RANGES, ALLOW, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, ETAG,
    LAST_MODIFIED, LOCATION,
};
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};

use super::cache::Validators;
use super::range::ByteRange;

pub type HttpResponse = Response<Full<Bytes>>;

const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Headers shared by every response that carries file content
pub struct FileHeaders<'a> {
    pub content_type: &'a str,
    pub validators: &'a Validators,
    pub cache_control: &'a str,
}

impl FileHeaders<'_> {
    fn apply(&self, builder: Builder) -> Builder {
        builder
            .header(CONTENT_TYPE, self.content_type)
            .header(ETAG, &self.validators.etag)
            .header(LAST_MODIFIED, self.validators.last_modified_header())
            .header(CACHE_CONTROL, self.cache_control)
            .header(ACCEPT_RANGES, "bytes")
    }
}

/// 200 with the whole file
pub fn build_file_response(data: Bytes, file: &FileHeaders<'_>, is_head: bool) -> HttpResponse {
    let builder = file
        .apply(Response::builder().status(StatusCode::OK))
        .header(CONTENT_LENGTH, data.len());
    finish(builder, head_or(data, is_head), "200")
}

/// 206 with `data` holding exactly the bytes of `range`
pub fn build_partial_response(
    data: Bytes,
    range: ByteRange,
    total: usize,
    file: &FileHeaders<'_>,
    is_head: bool,
) -> HttpResponse {
    let builder = file
        .apply(Response::builder().status(StatusCode::PARTIAL_CONTENT))
        .header(CONTENT_LENGTH, range.length())
        .header(CONTENT_RANGE, range.content_range(total));
    finish(builder, head_or(data, is_head), "206")
}

pub fn build_304_response(validators: &Validators, cache_control: &str) -> HttpResponse {
    let builder = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(ETAG, &validators.etag)
        .header(LAST_MODIFIED, validators.last_modified_header())
        .header(CACHE_CONTROL, cache_control);
    finish(builder, Bytes::new(), "304")
}

/// 301 pointing a directory request at its slash-terminated form
pub fn build_301_response(location: &str) -> HttpResponse {
    let builder = Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0);
    finish(builder, Bytes::new(), "301")
}

pub fn build_404_response(is_head: bool) -> HttpResponse {
    text_response(StatusCode::NOT_FOUND, "404 Not Found", is_head)
}

pub fn build_405_response() -> HttpResponse {
    let body = "405 Method Not Allowed";
    let builder = Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(ALLOW, ALLOWED_METHODS)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, body.len());
    finish(builder, Bytes::from_static(body.as_bytes()), "405")
}

pub fn build_options_response() -> HttpResponse {
    let builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ALLOW, ALLOWED_METHODS);
    finish(builder, Bytes::new(), "OPTIONS")
}

pub fn build_416_response(total: usize, is_head: bool) -> HttpResponse {
    let body = "416 Range Not Satisfiable";
    let builder = Response::builder()
        .status(StatusCode::RANGE_NOT_SATISFIABLE)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_RANGE, format!("bytes */{total}"))
        .header(CONTENT_LENGTH, body.len());
    finish(builder, head_or(Bytes::from_static(body.as_bytes()), is_head), "416")
}

fn text_response(status: StatusCode, body: &'static str, is_head: bool) -> HttpResponse {
    let builder = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, body.len());
    finish(builder, head_or(Bytes::from_static(body.as_bytes()), is_head), status.as_str())
}

fn head_or(data: Bytes, is_head: bool) -> Bytes {
    if is_head {
        Bytes::new()
    } else {
        data
    }
}

fn finish(builder: Builder, body: Bytes, label: &str) -> HttpResponse {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        crate::logger::log_error(&format!("Failed to build {label} response: {e}"));
        Response::new(Full::new(Bytes::new()))
    })
}
