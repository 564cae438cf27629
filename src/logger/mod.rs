//! Logger module
//!
//! Provides logging utilities for the site server including:
//! - Server lifecycle logging
//! - Per-request access logging
//! - Error and warning logging
//! - File-based logging teed to stdout

mod format;
pub mod writer;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. Opens the configured
/// log file in append mode; every line is also written to stdout.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(Some(&config.resources.log_file))
}

/// Fall back to stdout-only logging when the log file cannot be opened
pub fn init_stdout_only() -> std::io::Result<()> {
    writer::init(None)
}

fn write_line(message: &str) {
    if writer::is_initialized() {
        writer::get().write_line(message);
    } else {
        println!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_line("======================================");
    write_line("Site server started successfully");
    write_line(&format!("Listening on: http://{addr}"));
    write_line(&format!("Log level: {}", config.logging.level));
    write_line(&format!("Static root: {}", config.resources.static_root));
    write_line(&format!("Log file: {}", config.resources.log_file));
    if let Some(workers) = config.server.workers {
        write_line(&format!("Worker threads: {workers}"));
    }
    write_line("Using Tokio runtime for concurrency");
    write_line("======================================");
}

/// Log the access entry for an inbound request
pub fn log_request(username: &str, url: &str, method: &str, ip: &str) {
    write_line(&format::format_line(
        "INFO",
        &format::format_access(username, url, method, ip),
    ));
}

pub fn log_info(message: &str) {
    write_line(&format::format_line("INFO", message));
}

pub fn log_warning(message: &str) {
    write_line(&format::format_line("WARN", message));
}

pub fn log_error(message: &str) {
    write_line(&format::format_line("ERROR", message));
}

pub fn log_api_request(method: &str, path: &str, status: u16) {
    write_line(&format::format_line(
        "INFO",
        &format!("[API] {method} {path} - {status}"),
    ));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}
