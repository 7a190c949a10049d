//! Organization membership API operations

use async_trait::async_trait;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::require_id;
use crate::hcp::TfeClient;

use super::models::{
    OrganizationMembership, OrganizationMembershipCreateOptions, OrganizationMembershipList,
    OrganizationMembershipListOptions,
};
use super::OrganizationMemberships;

/// HTTP implementation of [`OrganizationMemberships`]
#[derive(Clone, Debug)]
pub struct OrganizationMembershipsApi {
    client: TfeClient,
}

impl TfeClient {
    /// Organization membership operations
    pub fn organization_memberships(&self) -> OrganizationMembershipsApi {
        OrganizationMembershipsApi {
            client: self.clone(),
        }
    }
}

fn org_memberships_path(organization: &str) -> String {
    format!(
        "/{}/{}/{}",
        api::ORGANIZATIONS,
        organization,
        api::ORGANIZATION_MEMBERSHIPS
    )
}

fn membership_path(membership_id: &str) -> String {
    format!("/{}/{}", api::ORGANIZATION_MEMBERSHIPS, membership_id)
}

#[async_trait]
impl OrganizationMemberships for OrganizationMembershipsApi {
    async fn list(
        &self,
        organization: &str,
        options: &OrganizationMembershipListOptions,
    ) -> Result<OrganizationMembershipList> {
        require_id(organization, "organization")?;
        self.client
            .fetch_page(
                &org_memberships_path(organization),
                &options.to_query(),
                &format!("memberships for organization '{}'", organization),
            )
            .await
    }

    async fn create(
        &self,
        organization: &str,
        options: OrganizationMembershipCreateOptions,
    ) -> Result<OrganizationMembership> {
        require_id(organization, "organization")?;
        options.validate()?;
        self.client
            .create_resource(
                &org_memberships_path(organization),
                &options.to_document(),
                "organization membership",
            )
            .await
    }

    async fn read(&self, membership_id: &str) -> Result<OrganizationMembership> {
        require_id(membership_id, "membership ID")?;
        self.client
            .fetch_resource(
                &membership_path(membership_id),
                &format!("organization membership '{}'", membership_id),
            )
            .await
    }

    async fn delete(&self, membership_id: &str) -> Result<()> {
        require_id(membership_id, "membership ID")?;
        self.client
            .delete_resource(
                &membership_path(membership_id),
                &format!("organization membership '{}'", membership_id),
            )
            .await
    }
}
