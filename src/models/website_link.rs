//! Website link entity.

use serde::{Deserialize, Serialize};

/// Website link; attributes beyond `id` are server-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteLink {
    pub id: i64,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}
