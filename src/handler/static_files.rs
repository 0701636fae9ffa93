//! Static file serving module
//!
//! Resolves a rewritten request path under the project directory and
//! answers with the file, a directory redirect, or 404.

use crate::config::ContentConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, mime, range, FileHeaders, HttpResponse, RangeOutcome, Validators};
use crate::logger;
use hyper::body::Bytes;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Outcome of mapping a URL path onto the filesystem
#[derive(Debug)]
pub enum Lookup {
    File { path: PathBuf, meta: Metadata },
    /// Directory asked for without its trailing slash
    Redirect,
    NotFound,
}

/// Serve the rewritten path in `ctx` from the content root
pub async fn serve(
    ctx: &RequestContext<'_>,
    content: &ContentConfig,
    cache_control: &str,
) -> HttpResponse {
    match lookup(&content.project_dir, ctx.path, &content.index_files).await {
        Lookup::File { path, meta } => serve_file(ctx, &path, &meta, cache_control).await,
        Lookup::Redirect => {
            let location = match ctx.query {
                Some(q) => format!("{}/?{q}", ctx.path),
                None => format!("{}/", ctx.path),
            };
            http::build_301_response(&location)
        }
        Lookup::NotFound => {
            logger::log_debug(&format!("[404] {} -> {}", ctx.original_path, ctx.path));
            http::build_404_response(ctx.is_head)
        }
    }
}

/// Map a URL path to a file under `root`
///
/// The path is percent-decoded and `.`/`..`/empty segments are dropped, so
/// the result never climbs above `root`. Symlinks leading outside `root` are
/// refused after canonicalisation.
pub async fn lookup(root: &Path, url_path: &str, index_files: &[String]) -> Lookup {
    let Some(relative) = relative_path(url_path) else {
        return Lookup::NotFound;
    };
    let wants_dir = url_path.ends_with('/');
    let candidate = root.join(relative);

    let Ok(meta) = fs::metadata(&candidate).await else {
        return Lookup::NotFound;
    };

    let (path, meta) = if meta.is_dir() {
        if !wants_dir {
            return Lookup::Redirect;
        }
        match find_index(&candidate, index_files).await {
            Some(found) => found,
            None => return Lookup::NotFound,
        }
    } else if wants_dir {
        return Lookup::NotFound;
    } else {
        (candidate, meta)
    };

    if !is_inside(root, &path).await {
        return Lookup::NotFound;
    }
    Lookup::File { path, meta }
}

/// Decode and normalise a URL path into a relative filesystem path
pub fn relative_path(url_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url_path).ok()?;
    if decoded.contains('\0') || decoded.contains('\\') {
        return None;
    }
    Some(
        decoded
            .split('/')
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .collect(),
    )
}

async fn find_index(dir: &Path, index_files: &[String]) -> Option<(PathBuf, Metadata)> {
    for name in index_files {
        let path = dir.join(name);
        if let Ok(meta) = fs::metadata(&path).await {
            if meta.is_file() {
                return Some((path, meta));
            }
        }
    }
    None
}

async fn is_inside(root: &Path, path: &Path) -> bool {
    let root_canonical = match fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Content root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return false;
        }
    };
    let Ok(path_canonical) = fs::canonicalize(path).await else {
        return false;
    };
    if path_canonical.starts_with(&root_canonical) {
        true
    } else {
        logger::log_warning(&format!(
            "Refusing to serve outside content root: {} -> {}",
            path.display(),
            path_canonical.display()
        ));
        false
    }
}

async fn serve_file(
    ctx: &RequestContext<'_>,
    path: &Path,
    meta: &Metadata,
    cache_control: &str,
) -> HttpResponse {
    let validators = Validators::from_metadata(meta);
    if validators.is_not_modified(
        ctx.if_none_match.as_deref(),
        ctx.if_modified_since.as_deref(),
    ) {
        return http::build_304_response(&validators, cache_control);
    }

    let data = match fs::read(path).await {
        Ok(d) => Bytes::from(d),
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return http::build_404_response(ctx.is_head);
        }
    };

    let content_type = mime::content_type_for(path);
    let file = FileHeaders {
        content_type: &content_type,
        validators: &validators,
        cache_control,
    };

    let total = data.len();
    match range::resolve(ctx.range_header.as_deref(), total) {
        RangeOutcome::Full => http::response::build_file_response(data, &file, ctx.is_head),
        RangeOutcome::Partial(r) => {
            let slice = data.slice(r.start..=r.end);
            http::response::build_partial_response(slice, r, total, &file, ctx.is_head)
        }
        RangeOutcome::Unsatisfiable => http::build_416_response(total, ctx.is_head),
    }
}
