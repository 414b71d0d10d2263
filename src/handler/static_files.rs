//! Static site serving module
//!
//! Resolves request paths against the configured site directory with a
//! canonicalized-prefix traversal guard, serves the index document for
//! the root path, and falls back to a built-in page when no site has
//! been deployed yet.

use crate::config::SiteConfig;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Per-request information the static responder needs
pub struct StaticRequest<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Serve a file from the site directory
pub async fn serve_site(req: &StaticRequest<'_>, site: &SiteConfig) -> Response<Full<Bytes>> {
    match load_site_file(&site.root_dir, req.path, &site.index_file).await {
        Some((content, content_type)) => build_static_response(
            &content,
            content_type,
            req.if_none_match.as_deref(),
            req.is_head,
        ),
        // Root still answers something useful before a site is deployed
        None if req.path == "/" => {
            http::response::build_html_response(placeholder_page(), req.is_head)
        }
        None => http::build_404_response(),
    }
}

/// Resolve and read a file underneath the site directory.
///
/// Directory paths (including the root) resolve to the configured
/// index file. Returns `None` if the file is missing or the resolved
/// path escapes the site directory.
pub async fn load_site_file(
    root_dir: &str,
    path: &str,
    index_file: &str,
) -> Option<(Vec<u8>, &'static str)> {
    // Strip the leading slash and the cheap traversal tokens up front
    let clean_path = path.trim_start_matches('/').replace("..", "");

    let mut file_path = Path::new(root_dir).join(&clean_path);
    if clean_path.is_empty() || clean_path.ends_with('/') || file_path.is_dir() {
        file_path = file_path.join(index_file);
    }

    let root_canonical = match Path::new(root_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Site directory not found or inaccessible '{root_dir}': {e}"
            ));
            return None;
        }
    };

    // Missing files are ordinary 404s, not worth a warning
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type =
        mime::content_type_for(file_path_canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

/// Build a static file response with `ETag` support
fn build_static_response(
    data: &[u8],
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data.to_owned())
    };

    http::response::build_cached_response(body, data.len(), content_type, &etag, is_head)
}

/// Built-in page served when the site directory has no index document
pub fn placeholder_page() -> String {
    String::from(
        r"<!DOCTYPE html>
<html>
<head>
    <meta charset='utf-8'>
    <meta name='viewport' content='width=device-width, initial-scale=1'>
    <title>Portfolio Server</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #10141f;
            color: #e6e9f0;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            margin: 0;
        }
        .card {
            text-align: center;
            padding: 48px;
            background: #1a2030;
            border-radius: 14px;
            max-width: 520px;
        }
        h1 { margin: 0 0 12px; }
        p { opacity: 0.8; line-height: 1.6; }
        code {
            background: #10141f;
            padding: 2px 6px;
            border-radius: 4px;
        }
    </style>
</head>
<body>
    <div class='card'>
        <h1>Portfolio Server</h1>
        <p>The server is running, but no site has been deployed yet.</p>
        <p>Drop your pages into the site directory (default <code>site/</code>)
        and they will be served from here. The contact form endpoint is
        <code>POST /send-message</code>.</p>
    </div>
</body>
</html>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::path::PathBuf;

    /// Create a throwaway site directory with an index and one asset
    fn setup_site(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("portfolio-server-test-{tag}"));
        let _ = std_fs::remove_dir_all(&dir);
        std_fs::create_dir_all(&dir).unwrap();
        std_fs::write(dir.join("index.html"), "<html>portfolio</html>").unwrap();
        std_fs::write(dir.join("style.css"), "body {}").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_root_serves_index_unchanged() {
        let dir = setup_site("root");
        let root = dir.to_str().unwrap();

        let (content, content_type) = load_site_file(root, "/", "index.html").await.unwrap();
        assert_eq!(content, b"<html>portfolio</html>");
        assert_eq!(content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_asset_served_with_mime_type() {
        let dir = setup_site("asset");
        let root = dir.to_str().unwrap();

        let (content, content_type) = load_site_file(root, "/style.css", "index.html")
            .await
            .unwrap();
        assert_eq!(content, b"body {}");
        assert_eq!(content_type, "text/css");
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = setup_site("missing");
        let root = dir.to_str().unwrap();

        assert!(load_site_file(root, "/nope.html", "index.html")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_traversal_never_escapes_site_dir() {
        let dir = setup_site("traversal");
        let root = dir.to_str().unwrap();

        assert!(load_site_file(root, "/../../etc/passwd", "index.html")
            .await
            .is_none());
        assert!(load_site_file(root, "/..%2f..%2fetc/passwd", "index.html")
            .await
            .is_none());
    }
}
