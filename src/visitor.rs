//! Visitor context
//!
//! The actor attached to each inbound request. Constructed fresh per
//! request and never mutated; all concurrent requests see their own
//! copy rather than a shared record.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identity of the actor issuing a request
#[derive(Debug, Clone, Serialize)]
pub struct Visitor {
    pub username: String,
    pub realname: String,
    pub title: String,
    pub login_time: DateTime<Utc>,
}

impl Visitor {
    /// The default anonymous web visitor
    pub fn guest() -> Self {
        Self {
            username: "WWW".to_string(),
            realname: "Visitor".to_string(),
            title: "User".to_string(),
            login_time: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_identity() {
        let v = Visitor::guest();
        assert_eq!(v.username, "WWW");
        assert_eq!(v.realname, "Visitor");
        assert_eq!(v.title, "User");
    }
}
