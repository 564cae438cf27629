//! External search API client
//!
//! Thin wrapper over the hosted search endpoint. The query string is
//! percent-encoded by the client; responses decode into
//! [`SearchResults`] for the results template.

use crate::config::SearchConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

pub struct SearchClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl SearchClient {
    pub fn new(cfg: &SearchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: cfg.endpoint.clone(),
            api_key: cfg.api_key.clone(),
        }
    }

    /// Forward a search term to the external API
    pub async fn fetch(&self, search_key: &str) -> Result<SearchResults, reqwest::Error> {
        self.http
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str()), ("q", search_key)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_decode_with_missing_fields() {
        let json = r#"{"results":[{"title":"Widgets"},{"link":"example.com/a","snippet":"..."}]}"#;
        let parsed: SearchResults = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.query, "");
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].title, "Widgets");
        assert_eq!(parsed.results[1].link, "example.com/a");
    }
}
