//! Response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

/// Wrapper around every API payload: `{ metadata, data, error }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub metadata: Metadata,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Request echo returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub http_code: u16,
    pub path: String,
    pub message: String,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
}

/// Top-level keys every response body must carry.
pub const ENVELOPE_KEYS: [&str; 3] = ["metadata", "data", "error"];

/// Check a raw body for the envelope keys, returning the missing ones.
pub fn missing_envelope_keys(body: &serde_json::Value) -> Vec<&'static str> {
    ENVELOPE_KEYS
        .iter()
        .copied()
        .filter(|key| body.get(key).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_page_envelope() {
        let body = json!({
            "metadata": { "httpCode": 200, "path": "/api/v1/departments", "message": "OK" },
            "data": { "content": [1, 2, 3], "totalElements": 3 },
            "error": null
        });

        let envelope: Envelope<Page<u32>> = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.metadata.http_code, 200);
        assert_eq!(envelope.metadata.message, "OK");
        let page = envelope.data.unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_elements, 3);
        assert!(envelope.error.is_none());
    }

    #[test]
    fn test_null_data_decodes_to_none() {
        let body = json!({
            "metadata": { "httpCode": 200, "path": "/api/v1/departments/99999", "message": "OK" },
            "data": null,
            "error": null
        });

        let envelope: Envelope<Page<u32>> = serde_json::from_value(body).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_missing_envelope_keys() {
        assert!(missing_envelope_keys(&json!({"metadata": {}, "data": null, "error": null})).is_empty());
        assert_eq!(missing_envelope_keys(&json!({"data": 1})), vec!["metadata", "error"]);
        assert_eq!(missing_envelope_keys(&json!("text")).len(), 3);
    }
}
