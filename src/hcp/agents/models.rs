//! Agent data models

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::hcp::helpers::Query;
use crate::hcp::traits::{ListPage, TfeResource};
use crate::hcp::ListOptions;

/// One page of agents
pub type AgentList = ListPage<Agent>;

/// Agent states reported by the server
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Idle,
    Busy,
    Unknown,
    Errored,
    Exited,
}

/// Agent data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: String,
    pub attributes: AgentAttributes,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AgentAttributes {
    pub name: Option<String>,
    pub status: AgentStatus,
    #[serde(rename = "ip-address")]
    pub ip_address: Option<String>,
    #[serde(rename = "last-ping-at")]
    pub last_ping_at: Option<DateTime<Utc>>,
}

impl TfeResource for Agent {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.attributes.name.as_deref().unwrap_or(&self.id)
    }
}

/// Filters for listing agents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentListOptions {
    pub list: ListOptions,
    /// Only agents that pinged at or after this time (`filter[last-ping-since]`)
    pub last_ping_since: Option<DateTime<Utc>>,
}

impl AgentListOptions {
    pub(crate) fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.page(&self.list).push_opt(
            "filter[last-ping-since]",
            self.last_ping_since
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        query
    }
}
