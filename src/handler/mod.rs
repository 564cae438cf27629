//! Request handling module
//!
//! Entry point for HTTP request processing: attaches the per-request
//! visitor context, writes the access-log line, resolves the route
//! and dispatches to the matching handler.

mod api;
mod contact;
mod pages;
mod search;

use crate::http::response;
use crate::logger;
use crate::routing::{self, ApiRoute, Route};
use crate::state::AppState;
use crate::visitor::Visitor;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    // 1. Per-request actor context
    let visitor = Visitor::guest();

    // 2. Access log line before any dispatch
    if state.config.logging.access_log {
        logger::log_request(
            &visitor.username,
            req.uri().path(),
            req.method().as_str(),
            &client_ip(&req, peer_addr),
        );
    }

    // 3. Resolve against the route table
    let Some(route) = routing::resolve(req.method(), req.uri().path()) else {
        return Ok(response::build_404_response());
    };

    // 4. Dispatch
    let resp = match route {
        Route::Page(page) => pages::serve_page(&state, page).await,
        Route::ContactForm => contact::handle(req, &state, &visitor).await,
        Route::Search => search::handle(req, &state).await,
        Route::Products => pages::render_product(&state, "all"),
        Route::Product(item) => {
            logger::log_info(&format!("Item: {item}"));
            pages::render_product(&state, &item)
        }
        Route::GetLog => pages::serve_log(&state).await,
        Route::TestObject(object) => {
            logger::log_info(&format!("Object: {object}"));
            pages::serve_page(&state, &object).await
        }
        Route::RequestEcho | Route::Api(ApiRoute::RequestEcho) => api::handle_echo(req).await,
        Route::Api(ApiRoute::TelemetryCapture) => api::handle_telemetry(req, &state).await,
        Route::StaticAsset(asset) => pages::serve_asset(&state, &asset).await,
    };

    Ok(resp)
}

/// Client origin address, preferring the forwarding header
fn client_ip(req: &Request<hyper::body::Incoming>, peer_addr: SocketAddr) -> String {
    req.headers()
        .get("x-forward-for")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| peer_addr.to_string(), ToString::to_string)
}
