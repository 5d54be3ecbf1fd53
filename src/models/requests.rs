//! Request DTOs for the fetch-through API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

/// Query for the fetch operation (GET /fetch?url=...)
#[derive(Debug, Clone, Deserialize)]
pub struct FetchQuery {
    /// URL to fetch (also the cache key)
    #[serde(default)]
    pub url: String,
}

impl FetchQuery {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("url cannot be empty".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_query_deserialize() {
        let json = r#"{"url": "http://a"}"#;
        let query: FetchQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.url, "http://a");
        assert!(query.validate().is_none());
    }

    #[test]
    fn test_validate_missing_url() {
        let query: FetchQuery = serde_json::from_str("{}").unwrap();
        assert!(query.validate().is_some());
    }

    #[test]
    fn test_validate_blank_url() {
        let query = FetchQuery {
            url: "   ".to_string(),
        };
        assert!(query.validate().is_some());
    }
}
