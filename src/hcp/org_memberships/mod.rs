//! Organization memberships - users invited to or belonging to an organization

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use api::OrganizationMembershipsApi;
pub use models::{
    MembershipStatus, OrganizationMembership, OrganizationMembershipAttributes,
    OrganizationMembershipCreateOptions, OrganizationMembershipList,
    OrganizationMembershipListOptions, OrganizationMembershipRelationships,
};

/// Operations on organization memberships
#[async_trait]
pub trait OrganizationMemberships: Send + Sync {
    /// List one page of an organization's memberships
    async fn list(
        &self,
        organization: &str,
        options: &OrganizationMembershipListOptions,
    ) -> Result<OrganizationMembershipList>;

    /// Invite a user by email
    async fn create(
        &self,
        organization: &str,
        options: OrganizationMembershipCreateOptions,
    ) -> Result<OrganizationMembership>;

    /// Read a membership by ID
    async fn read(&self, membership_id: &str) -> Result<OrganizationMembership>;

    /// Remove a user from the organization
    async fn delete(&self, membership_id: &str) -> Result<()>;
}
