//! Policy set data models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hcp::helpers::{require_id, require_ids, Query};
use crate::hcp::jsonapi::{Document, RelationshipData, RelationshipList};
use crate::hcp::traits::{ListPage, TfeResource};
use crate::hcp::ListOptions;

/// One page of policy sets
pub type PolicySetList = ListPage<PolicySet>;

/// Policy framework of a set
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Sentinel,
    Opa,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PolicyKind::Sentinel => "sentinel",
            PolicyKind::Opa => "opa",
        })
    }
}

/// Filters for listing policy sets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicySetListOptions {
    pub list: ListOptions,
    /// Partial name match (`search[name]`)
    pub search: Option<String>,
    pub kind: Option<PolicyKind>,
}

impl PolicySetListOptions {
    pub(crate) fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .page(&self.list)
            .push_opt("search[name]", self.search.as_deref())
            .push_opt("filter[kind]", self.kind);
        query
    }
}

/// Policy set data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PolicySet {
    pub id: String,
    pub attributes: PolicySetAttributes,
    pub relationships: Option<PolicySetRelationships>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct PolicySetAttributes {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub global: bool,
    pub kind: Option<PolicyKind>,
    pub overridable: Option<bool>,
    #[serde(rename = "policies-path")]
    pub policies_path: Option<String>,
    #[serde(rename = "policy-count")]
    pub policy_count: Option<u32>,
    #[serde(rename = "workspace-count")]
    pub workspace_count: Option<u32>,
    #[serde(rename = "project-count")]
    pub project_count: Option<u32>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated-at")]
    pub updated_at: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct PolicySetRelationships {
    pub organization: Option<RelationshipData>,
    pub workspaces: Option<RelationshipList>,
    pub projects: Option<RelationshipList>,
}

impl TfeResource for PolicySet {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl PolicySet {
    /// IDs of the workspaces the set is attached to
    pub fn workspace_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.workspaces.as_ref())
            .map(RelationshipList::ids)
            .unwrap_or_default()
    }

    /// IDs of the projects the set is attached to
    pub fn project_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.projects.as_ref())
            .map(RelationshipList::ids)
            .unwrap_or_default()
    }
}

/// Options for creating a policy set
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct PolicySetCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Enforce on every workspace of the organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<PolicyKind>,
    /// Whether failed mandatory policies may be overridden (OPA only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overridable: Option<bool>,
    /// Subdirectory of a VCS repository holding the policies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies_path: Option<String>,
    #[serde(skip)]
    pub workspace_ids: Vec<String>,
    #[serde(skip)]
    pub project_ids: Vec<String>,
}

impl PolicySetCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_id(&self.name, "name")?;
        if !self.workspace_ids.is_empty() {
            require_ids(&self.workspace_ids, "workspace ID")?;
        }
        if !self.project_ids.is_empty() {
            require_ids(&self.project_ids, "project ID")?;
        }
        Ok(())
    }

    pub(crate) fn to_document(&self) -> Document<&Self> {
        Document::new("policy-sets", self)
            .with_relationships("workspaces", "workspaces", &self.workspace_ids)
            .with_relationships("projects", "projects", &self.project_ids)
    }
}

/// Options for updating a policy set; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct PolicySetUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overridable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies_path: Option<String>,
}

impl PolicySetUpdateOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_id(name, "name")?;
        }
        Ok(())
    }
}
