//! Workspaces - the unit that owns state, variables and runs

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;
use crate::hcp::ListOptions;

pub use api::WorkspacesApi;
pub use models::{
    ExecutionMode, Tag, TagAttributes, TagList, TagRef, VcsRepo, VcsRepoOptions, Workspace,
    WorkspaceAttributes, WorkspaceCreateOptions, WorkspaceList, WorkspaceListOptions,
    WorkspaceLockOptions, WorkspaceRelationships, WorkspaceUpdateOptions,
};

/// Operations on workspaces
#[async_trait]
pub trait Workspaces: Send + Sync {
    /// List one page of workspaces in an organization
    async fn list(
        &self,
        organization: &str,
        options: &WorkspaceListOptions,
    ) -> Result<WorkspaceList>;

    /// List every workspace in an organization, fetching all pages
    async fn list_all(
        &self,
        organization: &str,
        options: &WorkspaceListOptions,
    ) -> Result<Vec<Workspace>>;

    /// Create a workspace in an organization
    async fn create(
        &self,
        organization: &str,
        options: WorkspaceCreateOptions,
    ) -> Result<Workspace>;

    /// Read a workspace by organization and name
    async fn read(&self, organization: &str, workspace: &str) -> Result<Workspace>;

    /// Read a workspace by ID
    async fn read_by_id(&self, workspace_id: &str) -> Result<Workspace>;

    /// Read several workspaces by ID concurrently
    ///
    /// Workspaces that no longer exist are skipped; the rest keep the order
    /// of `workspace_ids`.
    async fn read_by_ids(&self, workspace_ids: &[String]) -> Result<Vec<Workspace>>;

    /// Update a workspace by organization and name
    async fn update(
        &self,
        organization: &str,
        workspace: &str,
        options: WorkspaceUpdateOptions,
    ) -> Result<Workspace>;

    /// Update a workspace by ID
    async fn update_by_id(
        &self,
        workspace_id: &str,
        options: WorkspaceUpdateOptions,
    ) -> Result<Workspace>;

    /// Delete a workspace by organization and name
    async fn delete(&self, organization: &str, workspace: &str) -> Result<()>;

    /// Delete a workspace by ID
    async fn delete_by_id(&self, workspace_id: &str) -> Result<()>;

    /// Lock a workspace
    ///
    /// Returns [`TfeError::WorkspaceLocked`](crate::TfeError::WorkspaceLocked)
    /// if it is already locked.
    async fn lock(&self, workspace_id: &str, options: WorkspaceLockOptions) -> Result<Workspace>;

    /// Unlock a workspace locked by a user or team
    async fn unlock(&self, workspace_id: &str) -> Result<Workspace>;

    /// Unlock a workspace regardless of who holds the lock
    async fn force_unlock(&self, workspace_id: &str) -> Result<Workspace>;

    /// List the tags attached to a workspace
    async fn list_tags(&self, workspace_id: &str, options: &ListOptions) -> Result<TagList>;

    /// Attach tags to a workspace, creating them as needed
    async fn add_tags(&self, workspace_id: &str, tags: &[TagRef]) -> Result<()>;

    /// Detach tags from a workspace
    async fn remove_tags(&self, workspace_id: &str, tags: &[TagRef]) -> Result<()>;
}
