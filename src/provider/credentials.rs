//! Host-supplied credentials
//!
//! The host owns credential storage; the plugin only ever reads it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Credential key holding the bearer token for the legal analysis API.
pub const API_KEY: &str = "api_key";
/// Credential key holding the URL the analysis request is POSTed to.
pub const API_ENDPOINT: &str = "api_endpoint";

/// Read-only mapping of credential names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(HashMap<String, String>);

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Raw lookup, blank values included
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Lookup that treats blank values as absent
    pub fn require(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for Credentials {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_skips_blank_values() {
        let creds = Credentials::new()
            .with(API_KEY, "   ")
            .with(API_ENDPOINT, " https://legal.example.com/analyze ");

        assert_eq!(creds.get(API_KEY), Some("   "));
        assert_eq!(creds.require(API_KEY), None);
        assert_eq!(
            creds.require(API_ENDPOINT),
            Some("https://legal.example.com/analyze")
        );
        assert_eq!(creds.require("unknown"), None);
    }

    #[test]
    fn test_deserializes_from_flat_json_object() {
        let creds: Credentials =
            serde_json::from_str(r#"{"api_key": "k", "api_endpoint": "http://x"}"#).unwrap();
        assert_eq!(creds.len(), 2);
        assert_eq!(creds.get(API_KEY), Some("k"));
    }
}
