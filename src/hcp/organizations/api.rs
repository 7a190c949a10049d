//! Organization API operations

use async_trait::async_trait;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::{require_id, Query};
use crate::hcp::jsonapi::Document;
use crate::hcp::{ListOptions, TfeClient};

use super::models::{
    Organization, OrganizationCreateOptions, OrganizationList, OrganizationUpdateOptions,
};
use super::Organizations;

/// HTTP implementation of [`Organizations`]
#[derive(Clone, Debug)]
pub struct OrganizationsApi {
    client: TfeClient,
}

impl TfeClient {
    /// Organization operations
    pub fn organizations(&self) -> OrganizationsApi {
        OrganizationsApi {
            client: self.clone(),
        }
    }
}

fn org_path(organization: &str) -> String {
    format!("/{}/{}", api::ORGANIZATIONS, organization)
}

#[async_trait]
impl Organizations for OrganizationsApi {
    async fn list(&self, options: &ListOptions) -> Result<OrganizationList> {
        let mut query = Query::new();
        query.page(options);
        self.client
            .fetch_page(&format!("/{}", api::ORGANIZATIONS), &query, "organizations")
            .await
    }

    async fn create(&self, options: OrganizationCreateOptions) -> Result<Organization> {
        options.validate()?;
        let body = Document::new("organizations", &options);
        self.client
            .create_resource(&format!("/{}", api::ORGANIZATIONS), &body, "organization")
            .await
    }

    async fn read(&self, organization: &str) -> Result<Organization> {
        require_id(organization, "organization")?;
        self.client
            .fetch_resource(
                &org_path(organization),
                &format!("organization '{}'", organization),
            )
            .await
    }

    async fn update(
        &self,
        organization: &str,
        options: OrganizationUpdateOptions,
    ) -> Result<Organization> {
        require_id(organization, "organization")?;
        let body = Document::new("organizations", &options);
        self.client
            .update_resource(
                &org_path(organization),
                &body,
                &format!("organization '{}'", organization),
            )
            .await
    }

    async fn delete(&self, organization: &str) -> Result<()> {
        require_id(organization, "organization")?;
        self.client
            .delete_resource(
                &org_path(organization),
                &format!("organization '{}'", organization),
            )
            .await
    }
}
