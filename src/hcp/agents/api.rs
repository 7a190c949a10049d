//! Agent API operations

use async_trait::async_trait;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::require_id;
use crate::hcp::TfeClient;

use super::models::{Agent, AgentList, AgentListOptions};
use super::Agents;

/// HTTP implementation of [`Agents`]
#[derive(Clone, Debug)]
pub struct AgentsApi {
    client: TfeClient,
}

impl TfeClient {
    /// Agent operations
    pub fn agents(&self) -> AgentsApi {
        AgentsApi {
            client: self.clone(),
        }
    }
}

#[async_trait]
impl Agents for AgentsApi {
    async fn list(&self, pool_id: &str, options: &AgentListOptions) -> Result<AgentList> {
        require_id(pool_id, "agent pool ID")?;
        self.client
            .fetch_page(
                &format!("/{}/{}/{}", api::AGENT_POOLS, pool_id, api::AGENTS),
                &options.to_query(),
                &format!("agents in pool '{}'", pool_id),
            )
            .await
    }

    async fn read(&self, agent_id: &str) -> Result<Agent> {
        require_id(agent_id, "agent ID")?;
        self.client
            .fetch_resource(
                &format!("/{}/{}", api::AGENTS, agent_id),
                &format!("agent '{}'", agent_id),
            )
            .await
    }
}
