//! Plan data models

use serde::{Deserialize, Serialize};

/// Plan data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: String,
    pub attributes: PlanAttributes,
}

/// Plan attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct PlanAttributes {
    pub status: String,
    #[serde(rename = "has-changes")]
    pub has_changes: Option<bool>,
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

impl Plan {
    pub fn status(&self) -> &str {
        &self.attributes.status
    }

    pub fn has_changes(&self) -> bool {
        self.attributes.has_changes.unwrap_or(false)
    }

    pub fn resource_additions(&self) -> i32 {
        self.attributes.resource_additions.unwrap_or(0)
    }

    pub fn resource_changes(&self) -> i32 {
        self.attributes.resource_changes.unwrap_or(0)
    }

    pub fn resource_destructions(&self) -> i32 {
        self.attributes.resource_destructions.unwrap_or(0)
    }

    /// Temporary log URL, valid for about a minute after the read
    pub fn log_read_url(&self) -> Option<&str> {
        self.attributes.log_read_url.as_deref()
    }

    /// Check if plan is in a final state
    pub fn is_final(&self) -> bool {
        matches!(
            self.status(),
            "finished" | "errored" | "canceled" | "unreachable"
        )
    }
}
