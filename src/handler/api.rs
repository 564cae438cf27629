//! Versioned JSON API handlers
//!
//! Two endpoints under `/api/v1/`: the pointer-telemetry capture
//! (wire name `qTurHm`) and the request echo, which is also mounted
//! at `/request`.

use crate::http::response;
use crate::logger;
use crate::state::AppState;
use chrono::{DateTime, Utc};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Acknowledgement payload written for each stored capture
const CAPTURE_PAYLOAD: &[u8] = b"8";

/// Wire shape of a telemetry capture submission
#[derive(Debug, Default, Deserialize)]
pub struct CaptureSession {
    #[serde(default, rename = "userkey")]
    pub key: String,
    #[serde(default, rename = "timestamp")]
    pub time_created: i64,
    #[serde(default, rename = "resultcontent")]
    pub result_content: String,
    #[serde(default, rename = "origURL")]
    pub orig_url: String,
    #[serde(default)]
    pub mobile: bool,
    #[serde(default)]
    pub target: TargetRect,
    #[serde(default)]
    pub receiver: String,
    #[serde(default, rename = "samples")]
    pub sample_count: i64,
    #[serde(default)]
    pub moves: Vec<PointerSample>,
}

/// Bounding rectangle of the capture target element
#[derive(Debug, Default, Deserialize)]
pub struct TargetRect {
    #[serde(default)]
    pub top: i64,
    #[serde(default)]
    pub left: i64,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

/// One timestamped pointer position
#[derive(Debug, Default, Deserialize)]
pub struct PointerSample {
    #[serde(default)]
    pub t: i64,
    #[serde(default)]
    pub x: i64,
    #[serde(default)]
    pub y: i64,
}

/// Echoed request record
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RequestRecord {
    #[serde(default)]
    pub reqtype: String,
    #[serde(default)]
    pub reqcmd: String,
    #[serde(default, rename = "Timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Telemetry capture endpoint
pub async fn handle_telemetry(
    req: Request<hyper::body::Incoming>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    if *req.method() == Method::GET {
        // No page belongs here
        logger::log_api_request("GET", "/api/v1/qTurHm", 404);
        return response::build_404_response();
    }

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("API error (qTurHm): {e}"));
            return response::build_empty_response();
        }
    };

    let session: CaptureSession = match serde_json::from_slice(&body) {
        Ok(s) => s,
        Err(e) => {
            logger::log_error(&format!("API error (qTurHm): {e}"));
            return response::build_empty_response();
        }
    };

    logger::log_info(&format!(
        "Capture key: {} time: {} from {} (mobile: {}, receiver: {}, target {}x{} at {},{}): {} of {} moves",
        session.key,
        session.time_created,
        session.orig_url,
        session.mobile,
        session.receiver,
        session.target.width,
        session.target.height,
        session.target.left,
        session.target.top,
        session.moves.len(),
        session.sample_count
    ));

    let Some(file_name) = capture_file_name(&session.key, session.time_created) else {
        logger::log_warning(&format!(
            "Capture key rejected (path characters): {}",
            session.key
        ));
        return response::build_empty_response();
    };

    logger::log_info(&format!(
        "Result file name: {file_name} should be: {}",
        session.result_content
    ));

    let path = Path::new(&state.config.resources.capture_dir).join(&file_name);
    if let Err(e) = fs::write(&path, CAPTURE_PAYLOAD).await {
        logger::log_error(&format!(
            "Error writing capture file {}: {e}",
            path.display()
        ));
    }

    logger::log_api_request("POST", "/api/v1/qTurHm", 200);
    response::build_empty_response()
}

/// Request echo endpoint
pub async fn handle_echo(req: Request<hyper::body::Incoming>) -> Response<Full<Bytes>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Error reading request body: {e}"));
            Bytes::new()
        }
    };

    // Best-effort decode; a malformed body still gets an echo with
    // empty fields and a fresh timestamp
    let mut record: RequestRecord = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            logger::log_error(&format!("Request decode: {e}"));
            RequestRecord::default()
        }
    };
    record.timestamp = Some(Utc::now());

    logger::log_info(&format!("Request command received: {}", record.reqtype));

    response::build_json_response(&record)
}

/// File name for a stored capture, refusing keys that would escape
/// the capture directory
fn capture_file_name(key: &str, timestamp: i64) -> Option<String> {
    if key.contains('/') || key.contains('\\') || key.contains("..") {
        return None;
    }
    Some(format!("{key}_{timestamp}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_payload_is_one_byte() {
        assert_eq!(CAPTURE_PAYLOAD.len(), 1);
    }

    #[test]
    fn test_capture_file_name() {
        assert_eq!(
            capture_file_name("u123abc", 1596211200).as_deref(),
            Some("u123abc_1596211200")
        );
    }

    #[test]
    fn test_capture_file_name_rejects_path_keys() {
        assert_eq!(capture_file_name("../../etc/passwd", 1), None);
        assert_eq!(capture_file_name("a/b", 1), None);
        assert_eq!(capture_file_name("a\\b", 1), None);
    }

    #[test]
    fn test_capture_session_decodes_full_shape() {
        let json = r#"{
            "userkey": "u123",
            "timestamp": 1596211200,
            "resultcontent": "8",
            "origURL": "https://example.com/contactus",
            "mobile": false,
            "target": {"top": 10, "left": 20, "width": 300, "height": 40},
            "receiver": "form",
            "samples": 2,
            "moves": [{"t": 1, "x": 5, "y": 6}, {"t": 2, "x": 7, "y": 8}]
        }"#;

        let s: CaptureSession = serde_json::from_str(json).unwrap();
        assert_eq!(s.key, "u123");
        assert_eq!(s.time_created, 1_596_211_200);
        assert_eq!(s.target.width, 300);
        assert_eq!(s.moves.len(), 2);
        assert_eq!(s.moves[1].y, 8);
    }

    #[test]
    fn test_capture_session_fields_default() {
        let s: CaptureSession = serde_json::from_str("{}").unwrap();
        assert_eq!(s.key, "");
        assert_eq!(s.time_created, 0);
        assert!(s.moves.is_empty());
    }

    #[test]
    fn test_request_record_round_trip() {
        let r: RequestRecord =
            serde_json::from_str(r#"{"reqtype":"test","reqcmd":"do the thing"}"#).unwrap();
        assert_eq!(r.reqtype, "test");
        assert_eq!(r.reqcmd, "do the thing");
        assert!(r.timestamp.is_none());

        let stamped = RequestRecord {
            timestamp: Some(Utc::now()),
            ..r
        };
        let json = serde_json::to_string(&stamped).unwrap();
        assert!(json.contains("\"Timestamp\""));
        assert!(json.contains("\"reqtype\":\"test\""));
    }
}
