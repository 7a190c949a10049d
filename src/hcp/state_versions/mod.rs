//! State versions - snapshots of a workspace's Terraform state

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use api::StateVersionsApi;
pub use models::{
    StateVersion, StateVersionAttributes, StateVersionCreateOptions, StateVersionList,
    StateVersionListOptions, StateVersionRelationships,
};

/// Operations on state versions
#[async_trait]
pub trait StateVersions: Send + Sync {
    /// List one page of state versions of a workspace
    async fn list(&self, options: &StateVersionListOptions) -> Result<StateVersionList>;

    /// Upload a new state version; the workspace must be locked by the caller
    async fn create(
        &self,
        workspace_id: &str,
        options: StateVersionCreateOptions,
    ) -> Result<StateVersion>;

    /// Upload raw state JSON, computing its checksum and encoding
    async fn create_from_state(
        &self,
        workspace_id: &str,
        serial: u64,
        lineage: Option<String>,
        state: &[u8],
    ) -> Result<StateVersion>;

    async fn read(&self, state_version_id: &str) -> Result<StateVersion>;

    /// Read the state version currently used by a workspace
    async fn read_current(&self, workspace_id: &str) -> Result<StateVersion>;

    /// Download a state file from its hosted download URL
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}
