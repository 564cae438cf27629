//! Log line formatting
//!
//! Timestamped level-tagged lines plus the per-request access entry.

use chrono::Utc;

/// RFC822-style timestamp used as the line prefix
pub fn timestamp() -> String {
    Utc::now().format("%d %b %y %H:%M %Z").to_string()
}

/// Format a level-tagged log line
pub fn format_line(level: &str, message: &str) -> String {
    format!("{} [{level}] {message}", timestamp())
}

/// Format the access entry written for every inbound request
pub fn format_access(username: &str, url: &str, method: &str, ip: &str) -> String {
    format!("User: {username} | URL: {url} | Method: {method} | IP: {ip}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_entry_layout() {
        let line = format_access("WWW", "/contactus", "POST", "203.0.113.9");
        assert_eq!(
            line,
            "User: WWW | URL: /contactus | Method: POST | IP: 203.0.113.9"
        );
    }

    #[test]
    fn test_line_carries_level_tag() {
        let line = format_line("ERROR", "boom");
        assert!(line.ends_with("[ERROR] boom"));
    }

    #[test]
    fn test_timestamp_is_utc() {
        assert!(timestamp().ends_with("UTC"));
    }
}
