//! Request path rewriting
//!
//! Moves every request path under the demo mount before file lookup:
//!
//! 1. `/` becomes the configured index (`/demo/index.html`)
//! 2. a path not starting with `<mount>/` gets `<mount>` prepended
//! 3. a path already under `<mount>/` is left alone
//!
//! The prefix check includes the trailing slash, so `/demolish.html` is still
//! prefixed (`/demo/demolish.html`) and a bare `/demo` becomes `/demo/demo`.

use std::borrow::Cow;

/// Stateless rewriter built once from the content config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRewriter {
    mount: String,
    mount_dir: String,
    index: String,
}

impl PathRewriter {
    /// `mount` is the prefix without trailing slash (`/demo`), `index` the target for `/`.
    pub fn new(mount: &str, index: &str) -> Self {
        let mount = mount.trim_end_matches('/').to_string();
        let mount_dir = format!("{mount}/");
        Self {
            mount,
            mount_dir,
            index: index.to_string(),
        }
    }

    /// Rewrite a raw request path; first matching rule wins.
    pub fn rewrite<'a>(&self, path: &'a str) -> Cow<'a, str> {
        if path == "/" {
            Cow::Owned(self.index.clone())
        } else if !path.starts_with(&self.mount_dir) {
            Cow::Owned(format!("{}{path}", self.mount))
        } else {
            Cow::Borrowed(path)
        }
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }
}

impl Default for PathRewriter {
    fn default() -> Self {
        Self::new("/demo", "/demo/index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_goes_to_index() {
        let r = PathRewriter::default();
        assert_eq!(r.rewrite("/"), "/demo/index.html");
    }

    #[test]
    fn test_paths_outside_mount_are_prefixed() {
        let r = PathRewriter::default();
        assert_eq!(r.rewrite("/login.html"), "/demo/login.html");
        assert_eq!(r.rewrite("/dashboard.html"), "/demo/dashboard.html");
        assert_eq!(r.rewrite("/css/app.css"), "/demo/css/app.css");
        assert_eq!(r.rewrite("/index.html"), "/demo/index.html");
    }

    #[test]
    fn test_paths_under_mount_unchanged() {
        let r = PathRewriter::default();
        for p in ["/demo/index.html", "/demo/style.css", "/demo/", "/demo/a/b/c.js"] {
            assert!(matches!(r.rewrite(p), Cow::Borrowed(_)), "{p} should not allocate");
            assert_eq!(r.rewrite(p), p);
        }
    }

    #[test]
    fn test_prefix_check_includes_slash() {
        let r = PathRewriter::default();
        assert_eq!(r.rewrite("/demolish.html"), "/demo/demolish.html");
        assert_eq!(r.rewrite("/demo"), "/demo/demo");
    }

    #[test]
    fn test_second_pass_is_fixed_point() {
        let r = PathRewriter::default();
        for p in ["/", "/login.html", "/demo/style.css", "/demolish.html", "/demo", "/x/y/"] {
            let once = r.rewrite(p).into_owned();
            assert!(once.starts_with("/demo/"));
            assert_eq!(r.rewrite(&once), once);
        }
    }

    #[test]
    fn test_custom_mount() {
        let r = PathRewriter::new("/site/", "/site/home.html");
        assert_eq!(r.mount(), "/site");
        assert_eq!(r.rewrite("/"), "/site/home.html");
        assert_eq!(r.rewrite("/about.html"), "/site/about.html");
        assert_eq!(r.rewrite("/site/about.html"), "/site/about.html");
    }
}
