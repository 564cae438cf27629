//! Route table
//!
//! Maps (method, path) onto exactly one handler. Parameterized
//! segments are validated by character class; a failing parameter
//! leaves the request unmatched. The API surface resolves through an
//! enumerated table, so unsupported version/request pairs are a 404
//! rather than an empty success.

use hyper::Method;

/// A resolved request target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Fixed HTML page, by file stem under `html/`
    Page(&'static str),
    ContactForm,
    Search,
    Products,
    /// Product view for one item
    Product(String),
    GetLog,
    RequestEcho,
    /// Static page named by the path parameter
    TestObject(String),
    Api(ApiRoute),
    /// Asset path relative to the static root
    StaticAsset(String),
}

/// The versioned API table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRoute {
    TelemetryCapture,
    RequestEcho,
}

/// Resolve a request to a route, or `None` for 404
pub fn resolve(method: &Method, path: &str) -> Option<Route> {
    if *method == Method::GET {
        if let Some(page) = fixed_page(path) {
            return Some(Route::Page(page));
        }
    }

    match (method, path) {
        (&Method::GET | &Method::POST, "/contactus") => Some(Route::ContactForm),
        (&Method::GET | &Method::POST, "/search") => Some(Route::Search),
        (&Method::GET, "/products") => Some(Route::Products),
        (&Method::GET, "/getlog") => Some(Route::GetLog),
        (&Method::POST, "/request") => Some(Route::RequestEcho),
        _ => resolve_parameterized(method, path),
    }
}

/// Fixed pages, all GET-only
fn fixed_page(path: &str) -> Option<&'static str> {
    match path {
        "/" => Some("index"),
        "/home" => Some("home"),
        "/company" => Some("company"),
        "/staff" => Some("staff"),
        "/history" => Some("history"),
        "/expertise" => Some("expertise"),
        "/terms" => Some("terms"),
        "/privacy" => Some("privacy"),
        _ => None,
    }
}

fn resolve_parameterized(method: &Method, path: &str) -> Option<Route> {
    if let Some(item) = path.strip_prefix("/product/") {
        if *method == Method::GET && is_alphabetic(item) {
            return Some(Route::Product(item.to_string()));
        }
        return None;
    }

    if let Some(object) = path.strip_prefix("/test/") {
        if matches!(*method, Method::GET | Method::POST) && is_lowercase(object) {
            return Some(Route::TestObject(object.to_string()));
        }
        return None;
    }

    if let Some(rest) = path.strip_prefix("/api/") {
        if !matches!(*method, Method::GET | Method::POST) {
            return None;
        }
        let (version, request) = rest.split_once('/')?;
        if !is_lowercase_alphanumeric(version) || !is_alphabetic(request) {
            return None;
        }
        return api_route(version, request).map(Route::Api);
    }

    if let Some(asset) = path.strip_prefix("/static/") {
        if *method == Method::GET {
            return Some(Route::StaticAsset(asset.to_string()));
        }
        return None;
    }

    None
}

/// The enumerated (version, request) table
fn api_route(version: &str, request: &str) -> Option<ApiRoute> {
    match (version, request) {
        ("v1", "qTurHm") => Some(ApiRoute::TelemetryCapture),
        ("v1", "request") => Some(ApiRoute::RequestEcho),
        _ => None,
    }
}

fn is_alphabetic(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_lowercase(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase())
}

fn is_lowercase_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}
