use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: i32 = 1;

/// On-disk shape of the identity file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityDocument {
    pub schema_version: i32,
    pub updated_at: String,
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl IdentityDocument {
    pub fn new() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            updated_at: chrono::Utc::now().to_rfc3339(),
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for IdentityDocument {
    fn default() -> Self {
        Self::new()
    }
}
