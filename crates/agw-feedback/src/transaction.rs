//! Read-only view of the network transaction behind a lifecycle event.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The parts of an `XMLHttpRequest` the coordinator looks at.
pub trait Transaction {
    /// HTTP status. `0` when no response arrived.
    fn status(&self) -> u16;

    /// Raw response body.
    fn response_text(&self) -> &str;

    /// Header value, looked up case-insensitively.
    fn response_header(&self, name: &str) -> Option<&str>;

    /// True when the header is present with a non-empty value.
    fn has_response_header(&self, name: &str) -> bool {
        self.response_header(name)
            .is_some_and(|value| !value.is_empty())
    }
}

/// Owned snapshot of a finished transaction.
///
/// Field names follow the XHR object so recorded transcripts can be written
/// straight from the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XhrSnapshot {
    pub status: u16,
    pub response_text: String,
    pub headers: BTreeMap<String, String>,
}

impl XhrSnapshot {
    /// Snapshot of a request that never got a response.
    pub fn unsent() -> Self {
        Self::default()
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn body(mut self, text: impl Into<String>) -> Self {
        self.response_text = text.into();
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl Transaction for XhrSnapshot {
    fn status(&self) -> u16 {
        self.status
    }

    fn response_text(&self) -> &str {
        &self.response_text
    }

    fn response_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let xhr = XhrSnapshot::with_status(200).header("hx-location", "/sessions/1");
        assert_eq!(xhr.response_header("HX-Location"), Some("/sessions/1"));
        assert!(xhr.has_response_header("HX-LOCATION"));
    }

    #[test]
    fn empty_header_counts_as_absent() {
        let xhr = XhrSnapshot::with_status(200).header("HX-Location", "");
        assert_eq!(xhr.response_header("HX-Location"), Some(""));
        assert!(!xhr.has_response_header("HX-Location"));
    }

    #[test]
    fn deserializes_xhr_field_names() {
        let xhr: XhrSnapshot = serde_json::from_str(
            r#"{"status":404,"responseText":"{\"error\":\"Not found\"}","headers":{"Content-Type":"application/json"}}"#,
        )
        .expect("deserialize snapshot");
        assert_eq!(xhr.status(), 404);
        assert_eq!(xhr.response_text(), r#"{"error":"Not found"}"#);
        assert_eq!(
            xhr.response_header("content-type"),
            Some("application/json")
        );
    }

    #[test]
    fn missing_fields_default_to_unsent() {
        let xhr: XhrSnapshot = serde_json::from_str("{}").expect("deserialize snapshot");
        assert_eq!(xhr, XhrSnapshot::unsent());
    }
}
