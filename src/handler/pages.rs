//! Page and asset serving module
//!
//! Fixed HTML pages, the templated product view, the raw static
//! passthrough and the log viewer.

use crate::http::{mime, response};
use crate::logger;
use crate::state::AppState;
use crate::templates;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// Serve a fixed page from `<static_root>/html/<name>.html`
pub async fn serve_page(state: &AppState, name: &str) -> Response<Full<Bytes>> {
    let path = Path::new(&state.config.resources.static_root)
        .join("html")
        .join(format!("{name}.html"));

    match fs::read(&path).await {
        Ok(content) => {
            response::build_static_file_response(content, "text/html; charset=utf-8")
        }
        Err(e) => {
            logger::log_warning(&format!("Page '{}' not readable: {e}", path.display()));
            response::build_404_response()
        }
    }
}

/// Render the product view for one item ("all" for the catalog page)
pub fn render_product(state: &AppState, item: &str) -> Response<Full<Bytes>> {
    #[derive(Serialize)]
    struct ProductView<'a> {
        itemtoshow: &'a str,
    }

    match templates::render(&state.templates, "product.html", &ProductView { itemtoshow: item }) {
        Some(html) => response::build_html_response(html),
        None => response::build_empty_response(),
    }
}

/// Serve a static asset from under the static root
pub async fn serve_asset(state: &AppState, asset: &str) -> Response<Full<Bytes>> {
    match load_asset(&state.config.resources.static_root, asset).await {
        Some((content, content_type)) => {
            response::build_static_file_response(content, content_type)
        }
        None => response::build_404_response(),
    }
}

/// Render the log file as an HTML list
pub async fn serve_log(state: &AppState) -> Response<Full<Bytes>> {
    let log_file = &state.config.resources.log_file;
    let mut body =
        String::from("<p style=\"color:blue;\"><a href=\"/home\">Home</a></p><p>Access log</p>");

    match fs::read_to_string(log_file).await {
        Ok(content) => {
            body.push_str("<ul>");
            for line in content.lines() {
                body.push_str("<li>");
                body.push_str(line);
                body.push_str("</li>");
            }
            body.push_str("</ul>");
        }
        Err(e) => {
            body.push_str(&format!(
                "<p style=\"color:blue;\">{log_file} failed to open: {e}</p>"
            ));
        }
    }

    response::build_html_response(body)
}

/// Load an asset, refusing paths that escape the static root
async fn load_asset(static_root: &str, asset: &str) -> Option<(Vec<u8>, &'static str)> {
    let clean_path = asset.trim_start_matches('/').replace("..", "");
    let file_path = Path::new(static_root).join(&clean_path);

    let root_canonical = match Path::new(static_root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{static_root}': {e}"
            ));
            return None;
        }
    };

    // File not found is common (404), no need to log at warning level
    let Ok(file_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {asset} -> {}",
            file_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}
