//! Agent pools - groups of self-hosted agents a workspace can run on

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;
use crate::hcp::ListOptions;

pub use api::AgentPoolsApi;
pub use models::{
    AgentPool, AgentPoolAttributes, AgentPoolCreateOptions, AgentPoolList,
    AgentPoolRelationships, AgentPoolUpdateOptions,
};

/// Operations on agent pools
#[async_trait]
pub trait AgentPools: Send + Sync {
    /// List one page of an organization's agent pools
    async fn list(&self, organization: &str, options: &ListOptions) -> Result<AgentPoolList>;

    /// Create an agent pool
    async fn create(&self, organization: &str, options: AgentPoolCreateOptions)
        -> Result<AgentPool>;

    /// Read an agent pool by ID
    async fn read(&self, pool_id: &str) -> Result<AgentPool>;

    /// Update an agent pool
    async fn update(&self, pool_id: &str, options: AgentPoolUpdateOptions) -> Result<AgentPool>;

    /// Delete an agent pool
    async fn delete(&self, pool_id: &str) -> Result<()>;
}
