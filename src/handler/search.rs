//! Search proxy handler
//!
//! Forwards the visitor's query to the external search API and
//! renders the result set. An empty query bounces back to the
//! sanitized referer instead.

use crate::http::{form, response};
use crate::logger;
use crate::state::AppState;
use crate::templates;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};

pub async fn handle(
    req: Request<hyper::body::Incoming>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let query = req.uri().query().map(ToString::to_string);
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Search body read: {e}"));
            return response::build_empty_response();
        }
    };

    let fields = form::parse_fields(query.as_deref(), &body);
    let search_key = form::value(&fields, "searchKey").unwrap_or("");

    if search_key.is_empty() {
        // No query: bounce back where the visitor came from
        let target = sanitize_referer(form::value(&fields, "referer"));
        return response::build_see_other_response(target);
    }

    match state.search.fetch(search_key).await {
        Ok(results) => match templates::render(&state.templates, "search.html", &results) {
            Some(html) => response::build_html_response(html),
            None => response::build_empty_response(),
        },
        Err(e) => {
            logger::log_error(&format!("Search API err: {e}"));
            response::build_empty_response()
        }
    }
}

/// Constrain the redirect target to same-origin paths.
///
/// Only single-slash path-absolute values are honored; absolute URLs
/// and scheme-relative values fall back to the site root.
fn sanitize_referer(referer: Option<&str>) -> &str {
    match referer {
        Some(r) if r.starts_with('/') && !r.starts_with("//") => r,
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_origin_paths_pass() {
        assert_eq!(sanitize_referer(Some("/home")), "/home");
        assert_eq!(sanitize_referer(Some("/products")), "/products");
    }

    #[test]
    fn test_absolute_urls_fall_back() {
        assert_eq!(sanitize_referer(Some("https://evil.example/")), "/");
        assert_eq!(sanitize_referer(Some("http://evil.example")), "/");
    }

    #[test]
    fn test_scheme_relative_falls_back() {
        assert_eq!(sanitize_referer(Some("//evil.example/page")), "/");
    }

    #[test]
    fn test_missing_or_empty_falls_back() {
        assert_eq!(sanitize_referer(None), "/");
        assert_eq!(sanitize_referer(Some("")), "/");
        assert_eq!(sanitize_referer(Some("relative/path")), "/");
    }
}
