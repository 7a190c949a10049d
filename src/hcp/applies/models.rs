//! Apply data models

use serde::{Deserialize, Serialize};

/// Apply data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Apply {
    pub id: String,
    pub attributes: ApplyAttributes,
}

/// Apply attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ApplyAttributes {
    pub status: String,
    #[serde(rename = "resource-additions")]
    pub resource_additions: Option<i32>,
    #[serde(rename = "resource-changes")]
    pub resource_changes: Option<i32>,
    #[serde(rename = "resource-destructions")]
    pub resource_destructions: Option<i32>,
    #[serde(rename = "resource-imports")]
    pub resource_imports: Option<i32>,
    #[serde(rename = "log-read-url")]
    pub log_read_url: Option<String>,
    #[serde(rename = "status-timestamps")]
    pub status_timestamps: Option<serde_json::Value>,
}

impl Apply {
    pub fn status(&self) -> &str {
        &self.attributes.status
    }

    pub fn log_read_url(&self) -> Option<&str> {
        self.attributes.log_read_url.as_deref()
    }

    /// Check if apply is in a final state
    pub fn is_final(&self) -> bool {
        matches!(
            self.status(),
            "finished" | "errored" | "canceled" | "unreachable"
        )
    }

    /// Added, changed and destroyed resource counts
    pub fn resource_counts(&self) -> (i32, i32, i32) {
        (
            self.attributes.resource_additions.unwrap_or(0),
            self.attributes.resource_changes.unwrap_or(0),
            self.attributes.resource_destructions.unwrap_or(0),
        )
    }
}
