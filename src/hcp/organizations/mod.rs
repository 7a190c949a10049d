//! Organizations - the top-level container for every other resource

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;
use crate::hcp::ListOptions;

pub use api::OrganizationsApi;
pub use models::{
    Organization, OrganizationAttributes, OrganizationCreateOptions, OrganizationList,
    OrganizationPermissions, OrganizationRelationships, OrganizationUpdateOptions,
};

/// Operations on organizations
#[async_trait]
pub trait Organizations: Send + Sync {
    /// List the organizations visible to the token
    async fn list(&self, options: &ListOptions) -> Result<OrganizationList>;

    /// Create an organization
    async fn create(&self, options: OrganizationCreateOptions) -> Result<Organization>;

    /// Read an organization by name
    async fn read(&self, organization: &str) -> Result<Organization>;

    /// Update an organization by name
    async fn update(
        &self,
        organization: &str,
        options: OrganizationUpdateOptions,
    ) -> Result<Organization>;

    /// Delete an organization by name
    async fn delete(&self, organization: &str) -> Result<()>;
}
