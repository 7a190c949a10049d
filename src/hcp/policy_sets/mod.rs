//! Policy sets - groups of Sentinel or OPA policies enforced on runs

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use api::PolicySetsApi;
pub use models::{
    PolicyKind, PolicySet, PolicySetAttributes, PolicySetCreateOptions, PolicySetList,
    PolicySetListOptions, PolicySetRelationships, PolicySetUpdateOptions,
};

/// Operations on policy sets
#[async_trait]
pub trait PolicySets: Send + Sync {
    /// List one page of an organization's policy sets
    async fn list(
        &self,
        organization: &str,
        options: &PolicySetListOptions,
    ) -> Result<PolicySetList>;

    /// Create a policy set
    async fn create(
        &self,
        organization: &str,
        options: PolicySetCreateOptions,
    ) -> Result<PolicySet>;

    /// Read a policy set by ID
    async fn read(&self, policy_set_id: &str) -> Result<PolicySet>;

    /// Update a policy set
    async fn update(
        &self,
        policy_set_id: &str,
        options: PolicySetUpdateOptions,
    ) -> Result<PolicySet>;

    /// Delete a policy set
    async fn delete(&self, policy_set_id: &str) -> Result<()>;

    /// Attach the policy set to workspaces
    async fn add_workspaces(&self, policy_set_id: &str, workspace_ids: &[String]) -> Result<()>;

    /// Detach the policy set from workspaces
    async fn remove_workspaces(&self, policy_set_id: &str, workspace_ids: &[String])
        -> Result<()>;

    /// Attach the policy set to projects
    async fn add_projects(&self, policy_set_id: &str, project_ids: &[String]) -> Result<()>;

    /// Detach the policy set from projects
    async fn remove_projects(&self, policy_set_id: &str, project_ids: &[String]) -> Result<()>;
}
