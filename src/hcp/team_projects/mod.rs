//! Team project access - what a team may do in a project

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;
use crate::hcp::ListOptions;

pub use api::TeamProjectAccessesApi;
pub use models::{
    ProjectAccessPermissions, TeamProjectAccess, TeamProjectAccessAddOptions,
    TeamProjectAccessAttributes, TeamProjectAccessList, TeamProjectAccessRelationships,
    TeamProjectAccessType, TeamProjectAccessUpdateOptions, WorkspaceAccessPermissions,
};

/// Operations on team project access bindings
#[async_trait]
pub trait TeamProjectAccesses: Send + Sync {
    /// List one page of the bindings of a project
    async fn list(&self, project_id: &str, options: &ListOptions)
        -> Result<TeamProjectAccessList>;

    /// Grant a team access to a project
    async fn add(&self, options: TeamProjectAccessAddOptions) -> Result<TeamProjectAccess>;

    /// Read a binding by ID
    async fn read(&self, access_id: &str) -> Result<TeamProjectAccess>;

    /// Change the access level of a binding
    async fn update(
        &self,
        access_id: &str,
        options: TeamProjectAccessUpdateOptions,
    ) -> Result<TeamProjectAccess>;

    /// Revoke a binding
    async fn remove(&self, access_id: &str) -> Result<()>;
}
