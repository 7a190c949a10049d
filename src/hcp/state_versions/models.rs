//! State version data models

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hcp::helpers::{require_id, require_string, Query};
use crate::hcp::jsonapi::{Document, RelationshipData};
use crate::hcp::traits::{ListPage, TfeResource};
use crate::hcp::ListOptions;

/// One page of state versions
pub type StateVersionList = ListPage<StateVersion>;

/// State version data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StateVersion {
    pub id: String,
    pub attributes: StateVersionAttributes,
    #[serde(default)]
    pub relationships: Option<StateVersionRelationships>,
}

/// State version attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct StateVersionAttributes {
    #[serde(default)]
    pub serial: u64,
    pub created_at: Option<String>,
    pub terraform_version: Option<String>,
    pub hosted_state_download_url: Option<String>,
    pub hosted_json_state_download_url: Option<String>,
    pub resources_processed: Option<bool>,
    pub lineage: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct StateVersionRelationships {
    pub run: Option<RelationshipData>,
    pub created_by: Option<RelationshipData>,
}

impl StateVersion {
    pub fn serial(&self) -> u64 {
        self.attributes.serial
    }

    pub fn download_url(&self) -> Option<&str> {
        self.attributes.hosted_state_download_url.as_deref()
    }

    pub fn run_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.run.as_ref())
            .and_then(|r| r.id())
    }
}

impl TfeResource for StateVersion {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }
}

/// Filters for listing state versions; both names are required
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateVersionListOptions {
    pub list: ListOptions,
    pub organization: String,
    pub workspace: String,
}

impl StateVersionListOptions {
    pub fn new(organization: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            workspace: workspace.into(),
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_id(&self.organization, "organization")?;
        require_id(&self.workspace, "workspace")
    }

    pub(crate) fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .page(&self.list)
            .push("filter[organization][name]", &self.organization)
            .push("filter[workspace][name]", &self.workspace);
        query
    }
}

/// Options for uploading a state version
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct StateVersionCreateOptions {
    pub serial: Option<u64>,
    /// Hex MD5 of the raw state
    pub md5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineage: Option<String>,
    /// Base64 encoded state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl StateVersionCreateOptions {
    /// Options for raw state JSON with the checksum and encoding filled in
    pub fn from_state(serial: u64, lineage: Option<String>, state: &[u8]) -> Self {
        Self {
            serial: Some(serial),
            md5: Some(md5_hex(state)),
            lineage,
            state: Some(BASE64.encode(state)),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.serial.is_none() {
            return Err(crate::TfeError::validation("serial is required"));
        }
        require_string(self.md5.as_deref(), "MD5")
    }

    pub(crate) fn to_document(&self) -> Document<&Self> {
        Document::new("state-versions", self)
    }
}

fn md5_hex(data: &[u8]) -> String {
    Md5::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
