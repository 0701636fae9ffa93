//! Content-Type detection
//!
//! Guessed from the file extension; textual types are served as UTF-8.

use mime::Mime;
use std::path::Path;

/// Content-Type header value for a file on disk
///
/// # Examples
/// ```
/// use demo_server::http::mime::content_type_for;
/// use std::path::Path;
/// assert_eq!(content_type_for(Path::new("demo/index.html")), "text/html; charset=utf-8");
/// assert_eq!(content_type_for(Path::new("demo/logo.png")), "image/png");
/// ```
pub fn content_type_for(path: &Path) -> String {
    let guessed = mime_guess::from_path(path).first_or_octet_stream();
    if is_textual(&guessed) && guessed.get_param(mime::CHARSET).is_none() {
        format!("{guessed}; charset=utf-8")
    } else {
        guessed.to_string()
    }
}

fn is_textual(m: &Mime) -> bool {
    m.type_() == mime::TEXT
        || (m.type_() == mime::APPLICATION
            && (m.subtype() == mime::JAVASCRIPT || m.subtype() == mime::JSON))
}
