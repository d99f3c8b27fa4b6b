//! User entity as embedded in department detail.

use serde::{Deserialize, Serialize};

/// User record. The embedded shape is server-defined, so nothing is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}
