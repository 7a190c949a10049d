//! Agents - individual self-hosted agent processes registered in a pool

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use api::AgentsApi;
pub use models::{Agent, AgentAttributes, AgentList, AgentListOptions, AgentStatus};

/// Operations on agents
#[async_trait]
pub trait Agents: Send + Sync {
    /// List one page of the agents in a pool
    async fn list(&self, pool_id: &str, options: &AgentListOptions) -> Result<AgentList>;

    /// Read an agent by ID
    async fn read(&self, agent_id: &str) -> Result<Agent>;
}
