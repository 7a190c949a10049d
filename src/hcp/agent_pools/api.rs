//! Agent pool API operations

use async_trait::async_trait;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::{require_id, Query};
use crate::hcp::{ListOptions, TfeClient};

use super::models::{AgentPool, AgentPoolCreateOptions, AgentPoolList, AgentPoolUpdateOptions};
use super::AgentPools;

/// HTTP implementation of [`AgentPools`]
#[derive(Clone, Debug)]
pub struct AgentPoolsApi {
    client: TfeClient,
}

impl TfeClient {
    /// Agent pool operations
    pub fn agent_pools(&self) -> AgentPoolsApi {
        AgentPoolsApi {
            client: self.clone(),
        }
    }
}

fn org_pools_path(organization: &str) -> String {
    format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::AGENT_POOLS)
}

fn pool_path(pool_id: &str) -> String {
    format!("/{}/{}", api::AGENT_POOLS, pool_id)
}

#[async_trait]
impl AgentPools for AgentPoolsApi {
    async fn list(&self, organization: &str, options: &ListOptions) -> Result<AgentPoolList> {
        require_id(organization, "organization")?;
        let mut query = Query::new();
        query.page(options);
        self.client
            .fetch_page(
                &org_pools_path(organization),
                &query,
                &format!("agent pools for organization '{}'", organization),
            )
            .await
    }

    async fn create(
        &self,
        organization: &str,
        options: AgentPoolCreateOptions,
    ) -> Result<AgentPool> {
        require_id(organization, "organization")?;
        options.validate()?;
        self.client
            .create_resource(
                &org_pools_path(organization),
                &options.to_document(),
                "agent pool",
            )
            .await
    }

    async fn read(&self, pool_id: &str) -> Result<AgentPool> {
        require_id(pool_id, "agent pool ID")?;
        self.client
            .fetch_resource(&pool_path(pool_id), &format!("agent pool '{}'", pool_id))
            .await
    }

    async fn update(&self, pool_id: &str, options: AgentPoolUpdateOptions) -> Result<AgentPool> {
        require_id(pool_id, "agent pool ID")?;
        options.validate()?;
        self.client
            .update_resource(
                &pool_path(pool_id),
                &options.to_document(pool_id),
                &format!("agent pool '{}'", pool_id),
            )
            .await
    }

    async fn delete(&self, pool_id: &str) -> Result<()> {
        require_id(pool_id, "agent pool ID")?;
        self.client
            .delete_resource(&pool_path(pool_id), &format!("agent pool '{}'", pool_id))
            .await
    }
}
