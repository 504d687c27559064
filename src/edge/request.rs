//! Request descriptor exchanged with the invoking edge platform.
//!
//! The platform hands the router a JSON request descriptor (camelCase keys)
//! and consumes either the rewritten descriptor or a rejection object. Header
//! names arrive lowercased; each name maps to an ordered list of key/value
//! entries to tolerate multi-valued headers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One header occurrence. `key` preserves the platform's casing of the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Header map: lowercase header name → ordered occurrences.
pub type Headers = HashMap<String, Vec<HeaderEntry>>;

/// Inbound or outbound request descriptor.
///
/// The router mutates only `origin` and the `host` header; method, uri,
/// querystring and all other headers pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRequest {
    #[serde(default)]
    pub method: String,

    #[serde(default)]
    pub uri: String,

    #[serde(default)]
    pub querystring: String,

    #[serde(default)]
    pub headers: Headers,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<RequestOrigin>,
}

impl EdgeRequest {
    /// First value of the header named `name` (lowercase), if any.
    pub fn first_header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|entries| entries.first())
            .map(|entry| entry.value.as_str())
    }
}

/// Origin descriptor holding the upstream the platform will forward to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOrigin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomOrigin>,
}

/// A custom (non-managed) upstream origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOrigin {
    pub domain_name: String,

    pub port: u16,

    pub protocol: String,

    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub ssl_protocols: Vec<String>,

    #[serde(default)]
    pub read_timeout: u64,

    #[serde(default)]
    pub keepalive_timeout: u64,

    #[serde(default)]
    pub custom_headers: Headers,
}

impl CustomOrigin {
    /// First value of the custom configuration header named `name`.
    pub fn first_custom_header_value(&self, name: &str) -> Option<&str> {
        self.custom_headers
            .get(name)
            .and_then(|entries| entries.first())
            .map(|entry| entry.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_round_trips_camel_case() {
        let json = r#"{
            "method": "GET",
            "uri": "/orders",
            "querystring": "limit=5",
            "headers": {
                "apiv": [{ "key": "APIV", "value": "v1" }]
            },
            "origin": {
                "custom": {
                    "domainName": "edge.example.com",
                    "port": 443,
                    "protocol": "https",
                    "path": "",
                    "sslProtocols": ["TLSv1.2"],
                    "readTimeout": 30,
                    "keepaliveTimeout": 5,
                    "customHeaders": {
                        "custom-apigw-table-name": [
                            { "key": "custom-apigw-table-name", "value": "vers" }
                        ]
                    }
                }
            }
        }"#;

        let request: EdgeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.first_header_value("apiv"), Some("v1"));
        let custom = request.origin.as_ref().unwrap().custom.as_ref().unwrap();
        assert_eq!(custom.domain_name, "edge.example.com");
        assert_eq!(
            custom.first_custom_header_value("custom-apigw-table-name"),
            Some("vers")
        );

        let reparsed: EdgeRequest =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(reparsed, request);
    }

    #[test]
    fn test_missing_header_yields_none() {
        let request = EdgeRequest {
            method: "GET".to_string(),
            uri: "/".to_string(),
            querystring: String::new(),
            headers: Headers::new(),
            origin: None,
        };
        assert_eq!(request.first_header_value("apiv"), None);
    }
}
