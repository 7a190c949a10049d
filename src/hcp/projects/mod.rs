//! Projects - groups of workspaces within an organization

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use api::ProjectsApi;
pub use models::{
    Project, ProjectAttributes, ProjectCreateOptions, ProjectList, ProjectListOptions,
    ProjectUpdateOptions,
};

/// Operations on projects
#[async_trait]
pub trait Projects: Send + Sync {
    /// List one page of projects in an organization
    async fn list(&self, organization: &str, options: &ProjectListOptions) -> Result<ProjectList>;

    /// List every project in an organization, fetching all pages
    async fn list_all(
        &self,
        organization: &str,
        options: &ProjectListOptions,
    ) -> Result<Vec<Project>>;

    /// Create a project in an organization
    async fn create(&self, organization: &str, options: ProjectCreateOptions) -> Result<Project>;

    /// Read a project by ID
    async fn read(&self, project_id: &str) -> Result<Project>;

    /// Update a project by ID
    async fn update(&self, project_id: &str, options: ProjectUpdateOptions) -> Result<Project>;

    /// Delete a project by ID
    async fn delete(&self, project_id: &str) -> Result<()>;
}
