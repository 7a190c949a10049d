//! Configuration version data models

use serde::{Deserialize, Serialize};

use crate::hcp::traits::{ListPage, TfeResource};

/// One page of configuration versions
pub type ConfigurationVersionList = ListPage<ConfigurationVersion>;

/// Configuration version data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ConfigurationVersion {
    pub id: String,
    pub attributes: ConfigurationVersionAttributes,
    pub links: Option<ConfigurationVersionLinks>,
}

/// Configuration version attributes
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigurationVersionAttributes {
    /// Source of the configuration (e.g., "tfe-api", "gitlab", "github")
    pub source: Option<String>,
    /// Status: pending, fetching, uploaded, archived, errored
    pub status: String,
    #[serde(default)]
    pub speculative: bool,
    #[serde(default)]
    pub provisional: bool,
    #[serde(rename = "auto-queue-runs", default)]
    pub auto_queue_runs: bool,
    /// Error message if status is "errored"
    #[serde(rename = "error-message")]
    pub error_message: Option<String>,
    /// Where to PUT the archive; only present while the status is pending
    #[serde(rename = "upload-url")]
    pub upload_url: Option<String>,
}

/// Configuration version links
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigurationVersionLinks {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub download: Option<String>,
}

impl TfeResource for ConfigurationVersion {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        // Configuration versions don't have names, use ID
        &self.id
    }
}

impl ConfigurationVersion {
    /// Check if configuration version is downloadable
    pub fn is_downloadable(&self) -> bool {
        self.attributes.status == "uploaded"
    }

    pub fn upload_url(&self) -> Option<&str> {
        self.attributes.upload_url.as_deref()
    }

    pub fn source(&self) -> &str {
        self.attributes.source.as_deref().unwrap_or("unknown")
    }
}

/// Options for creating a configuration version
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigurationVersionCreateOptions {
    /// Queue a run as soon as the upload finishes (server default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_queue_runs: Option<bool>,
    /// Only allow plan-only runs from this configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speculative: Option<bool>,
    /// Do not make this the workspace's current configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisional: Option<bool>,
}
