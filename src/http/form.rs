//! Form decoding module
//!
//! Collects urlencoded fields from the request body and the query
//! string into one list. Body fields come first, so they win when a
//! name appears in both places.

use url::form_urlencoded;

/// Decode body and query-string fields into ordered pairs
pub fn parse_fields(query: Option<&str>, body: &[u8]) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if let Some(query) = query {
        fields.extend(
            form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned())),
        );
    }

    fields
}

/// First value submitted under a field name
pub fn value<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_fields_decode() {
        let fields = parse_fields(None, b"contactName=Jane+Doe&contactEmail=j%40x.com");
        assert_eq!(value(&fields, "contactName"), Some("Jane Doe"));
        assert_eq!(value(&fields, "contactEmail"), Some("j@x.com"));
        assert_eq!(value(&fields, "contactPhone"), None);
    }

    #[test]
    fn test_query_fields_decode() {
        let fields = parse_fields(Some("searchKey=rust+servers&referer=%2Fhome"), b"");
        assert_eq!(value(&fields, "searchKey"), Some("rust servers"));
        assert_eq!(value(&fields, "referer"), Some("/home"));
    }

    #[test]
    fn test_body_wins_over_query() {
        let fields = parse_fields(Some("searchKey=from-query"), b"searchKey=from-body");
        assert_eq!(value(&fields, "searchKey"), Some("from-body"));
    }
}
