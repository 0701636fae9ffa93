//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, path
//! rewriting, then hand-off to the static file responder.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, HttpResponse};
use crate::logger::{self, AccessLogEntry};
use hyper::body::Body;
use hyper::header::{HeaderMap, HeaderValue, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// What the static responder needs to know about one request
pub struct RequestContext<'a> {
    /// Path as the client sent it
    pub original_path: &'a str,
    /// Path after rewriting; this is what gets looked up
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<HttpResponse, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();

    if state.access_log {
        logger::log_request(method, uri, req.version());
    }

    let mut response = match check_http_method(method) {
        Some(resp) => resp,
        None => {
            let rewritten = state.rewriter.rewrite(uri.path());
            logger::log_debug(&format!("[Rewrite] {} -> {rewritten}", uri.path()));
            let ctx = RequestContext {
                original_path: uri.path(),
                path: &rewritten,
                query: uri.query(),
                is_head: *method == Method::HEAD,
                if_none_match: header_string(req.headers(), "if-none-match"),
                if_modified_since: header_string(req.headers(), "if-modified-since"),
                range_header: header_string(req.headers(), "range"),
            };
            static_files::serve(
                &ctx,
                &state.config.content,
                &state.config.http.cache_control,
            )
            .await
        }
    };

    if let Ok(name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, name);
    }

    if state.access_log {
        let entry = access_entry(&req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// GET and HEAD go through; OPTIONS and everything else are answered here
fn check_http_method(method: &Method) -> Option<HttpResponse> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn access_entry<B>(
    req: &Request<B>,
    response: &HttpResponse,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header_string(req.headers(), REFERER.as_str());
    entry.user_agent = header_string(req.headers(), USER_AGENT.as_str());
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

const fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use hyper::header::{ALLOW, CONTENT_TYPE};
    use hyper::StatusCode;
    use tempfile::TempDir;

    /// Project tree with a `demo/` folder, removed when the guard drops
    fn project() -> TempDir {
        let root = TempDir::new().unwrap();
        let demo = root.path().join("demo");
        std::fs::create_dir_all(&demo).unwrap();
        std::fs::write(demo.join("index.html"), "<h1>home</h1>").unwrap();
        std::fs::write(demo.join("login.html"), "<h1>login</h1>").unwrap();
        std::fs::write(demo.join("style.css"), "h1 {}").unwrap();
        std::fs::write(demo.join("demolish.html"), "<h1>gone</h1>").unwrap();
        root
    }

    fn state(root: &TempDir) -> Arc<AppState> {
        let mut cfg = Config::load_from("no-such-demo-server-config").unwrap();
        cfg.content.project_dir = root.path().to_path_buf();
        cfg.logging.access_log = false;
        Arc::new(AppState::new(cfg))
    }

    async fn send(state: &Arc<AppState>, method: Method, path: &str) -> HttpResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(())
            .unwrap();
        let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
        handle_request(req, Arc::clone(state), peer).await.unwrap()
    }

    fn body_len(resp: &HttpResponse) -> u64 {
        resp.body().size_hint().exact().unwrap_or(u64::MAX)
    }

    #[tokio::test]
    async fn test_root_serves_demo_index() {
        let root = project();
        let st = state(&root);
        let resp = send(&st, Method::GET, "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(body_len(&resp), "<h1>home</h1>".len() as u64);
        assert_eq!(resp.headers()[SERVER], "demo_server");
    }

    #[tokio::test]
    async fn test_top_level_page_is_rewritten() {
        let root = project();
        let st = state(&root);
        let resp = send(&st, Method::GET, "/login.html?next=/dashboard").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_len(&resp), "<h1>login</h1>".len() as u64);
    }

    #[tokio::test]
    async fn test_mounted_path_served_directly() {
        let root = project();
        let st = state(&root);
        let resp = send(&st, Method::GET, "/demo/style.css").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/css; charset=utf-8");
    }

    #[tokio::test]
    async fn test_missing_under_mount_is_404() {
        let root = project();
        let st = state(&root);
        let resp = send(&st, Method::GET, "/demo/missing.html").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_prefix_lookalike_is_prefixed() {
        let root = project();
        let st = state(&root);
        // /demolish.html -> /demo/demolish.html
        let resp = send(&st, Method::GET, "/demolish.html").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_len(&resp), "<h1>gone</h1>".len() as u64);
    }

    #[tokio::test]
    async fn test_head_is_rewritten_too() {
        let root = project();
        let st = state(&root);
        let resp = send(&st, Method::HEAD, "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_len(&resp), 0);
    }

    #[tokio::test]
    async fn test_other_methods_rejected() {
        let root = project();
        let st = state(&root);
        let resp = send(&st, Method::POST, "/login.html").await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[ALLOW], "GET, HEAD, OPTIONS");

        let resp = send(&st, Method::OPTIONS, "/").await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_default_root_ignores_working_directory() {
        let mut cfg = Config::load_from("no-such-demo-server-config").unwrap();
        cfg.logging.access_log = false;
        let st = Arc::new(AppState::new(cfg));

        let elsewhere = TempDir::new().unwrap();
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(elsewhere.path()).unwrap();
        let resp = send(&st, Method::GET, "/").await;
        std::env::set_current_dir(previous).unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(hyper::Version::HTTP_10), "1.0");
        assert_eq!(version_label(hyper::Version::HTTP_11), "1.1");
    }
}
