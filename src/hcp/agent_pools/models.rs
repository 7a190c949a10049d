//! Agent pool data models

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hcp::helpers::{require_id, require_ids};
use crate::hcp::jsonapi::{Document, RelationshipData, RelationshipList};
use crate::hcp::traits::{ListPage, TfeResource};

/// One page of agent pools
pub type AgentPoolList = ListPage<AgentPool>;

/// Agent pool data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AgentPool {
    pub id: String,
    pub attributes: AgentPoolAttributes,
    pub relationships: Option<AgentPoolRelationships>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AgentPoolAttributes {
    pub name: String,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    /// Usable by every workspace of the organization
    #[serde(rename = "organization-scoped", default)]
    pub organization_scoped: bool,
    #[serde(rename = "agent-count")]
    pub agent_count: Option<u32>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AgentPoolRelationships {
    pub organization: Option<RelationshipData>,
    /// Workspaces currently configured to use the pool
    pub workspaces: Option<RelationshipList>,
    /// Workspaces allowed to use a pool that is not organization scoped
    #[serde(rename = "allowed-workspaces")]
    pub allowed_workspaces: Option<RelationshipList>,
}

impl TfeResource for AgentPool {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl AgentPool {
    pub fn allowed_workspace_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.allowed_workspaces.as_ref())
            .map(RelationshipList::ids)
            .unwrap_or_default()
    }
}

/// Options for creating an agent pool
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_scoped: Option<bool>,
    #[serde(skip)]
    pub allowed_workspace_ids: Vec<String>,
}

impl AgentPoolCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_id(&self.name, "name")?;
        if !self.allowed_workspace_ids.is_empty() {
            require_ids(&self.allowed_workspace_ids, "workspace ID")?;
        }
        Ok(())
    }

    pub(crate) fn to_document(&self) -> Document<&Self> {
        Document::new("agent-pools", self).with_relationships(
            "allowed-workspaces",
            "workspaces",
            &self.allowed_workspace_ids,
        )
    }
}

/// Options for updating an agent pool; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_scoped: Option<bool>,
    /// Replaces the allowed workspaces when not empty
    #[serde(skip)]
    pub allowed_workspace_ids: Vec<String>,
}

impl AgentPoolUpdateOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_id(name, "name")?;
        }
        if !self.allowed_workspace_ids.is_empty() {
            require_ids(&self.allowed_workspace_ids, "workspace ID")?;
        }
        Ok(())
    }

    pub(crate) fn to_document<'a>(&'a self, pool_id: &str) -> Document<&'a Self> {
        Document::new("agent-pools", self)
            .with_id(pool_id)
            .with_relationships(
                "allowed-workspaces",
                "workspaces",
                &self.allowed_workspace_ids,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_document() {
        let opts = AgentPoolCreateOptions {
            organization_scoped: Some(false),
            allowed_workspace_ids: vec!["ws-1".to_string()],
            ..AgentPoolCreateOptions::new("build-pool")
        };
        assert!(opts.validate().is_ok());
        assert_eq!(
            serde_json::to_value(opts.to_document()).unwrap(),
            serde_json::json!({
                "data": {
                    "type": "agent-pools",
                    "attributes": {"name": "build-pool", "organization-scoped": false},
                    "relationships": {
                        "allowed-workspaces": {"data": [{"type": "workspaces", "id": "ws-1"}]}
                    }
                }
            })
        );
    }

    #[test]
    fn test_validation() {
        assert!(AgentPoolCreateOptions::new("").validate().is_err());
        let update = AgentPoolUpdateOptions {
            name: Some("bad name".to_string()),
            ..Default::default()
        };
        assert_eq!(
            update.validate().unwrap_err().to_string(),
            "invalid value for name"
        );
    }

    #[test]
    fn test_allowed_workspace_ids() {
        let pool: AgentPool = serde_json::from_value(serde_json::json!({
            "id": "apool-1",
            "attributes": {"name": "pool", "organization-scoped": false, "agent-count": 3},
            "relationships": {
                "allowed-workspaces": {"data": [{"id": "ws-1", "type": "workspaces"}]}
            }
        }))
        .unwrap();
        assert_eq!(pool.allowed_workspace_ids(), vec!["ws-1"]);
        assert_eq!(pool.attributes.agent_count, Some(3));
    }
}
