//! Teams - groups of users sharing permissions in an organization

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use api::TeamsApi;
pub use models::{
    OrganizationAccess, Team, TeamAttributes, TeamCreateOptions, TeamList, TeamListOptions,
    TeamPermissions, TeamRelationships, TeamUpdateOptions, TeamVisibility,
};

/// Operations on teams
#[async_trait]
pub trait Teams: Send + Sync {
    /// List one page of an organization's teams
    async fn list(&self, organization: &str, options: &TeamListOptions) -> Result<TeamList>;

    /// Create a team
    async fn create(&self, organization: &str, options: TeamCreateOptions) -> Result<Team>;

    /// Read a team by ID
    async fn read(&self, team_id: &str) -> Result<Team>;

    /// Update a team
    async fn update(&self, team_id: &str, options: TeamUpdateOptions) -> Result<Team>;

    /// Delete a team
    async fn delete(&self, team_id: &str) -> Result<()>;
}
