//! Workspace data models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TfeError};
use crate::hcp::helpers::{require_id, require_optional_id, require_string, Query};
use crate::hcp::jsonapi::RelationshipData;
use crate::hcp::traits::{ListPage, TfeResource};
use crate::hcp::ListOptions;

/// One page of workspaces
pub type WorkspaceList = ListPage<Workspace>;

/// One page of workspace tags
pub type TagList = ListPage<Tag>;

/// Workspace data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Workspace {
    pub id: String,
    pub attributes: WorkspaceAttributes,
    pub relationships: Option<WorkspaceRelationships>,
}

/// Workspace attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct WorkspaceAttributes {
    pub name: String,

    pub description: Option<String>,

    #[serde(rename = "execution-mode")]
    pub execution_mode: Option<String>,

    #[serde(rename = "auto-apply")]
    pub auto_apply: Option<bool>,

    #[serde(rename = "allow-destroy-plan")]
    pub allow_destroy_plan: Option<bool>,

    #[serde(rename = "resource-count")]
    pub resource_count: Option<u32>,

    pub locked: Option<bool>,

    #[serde(rename = "terraform-version")]
    pub terraform_version: Option<String>,

    #[serde(rename = "working-directory")]
    pub working_directory: Option<String>,

    #[serde(rename = "queue-all-runs")]
    pub queue_all_runs: Option<bool>,

    #[serde(rename = "speculative-enabled")]
    pub speculative_enabled: Option<bool>,

    #[serde(rename = "tag-names", default)]
    pub tag_names: Vec<String>,

    #[serde(rename = "vcs-repo")]
    pub vcs_repo: Option<VcsRepo>,

    #[serde(rename = "created-at")]
    pub created_at: Option<String>,

    #[serde(rename = "updated-at")]
    pub updated_at: Option<String>,
}

/// VCS connection of a workspace
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct VcsRepo {
    pub identifier: Option<String>,
    pub branch: Option<String>,
    #[serde(rename = "oauth-token-id")]
    pub oauth_token_id: Option<String>,
    #[serde(rename = "ingress-submodules")]
    pub ingress_submodules: Option<bool>,
    #[serde(rename = "repository-http-url")]
    pub repository_http_url: Option<String>,
}

/// Workspace relationships from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct WorkspaceRelationships {
    pub project: Option<RelationshipData>,
    pub organization: Option<RelationshipData>,
    #[serde(rename = "current-run")]
    pub current_run: Option<RelationshipData>,
    #[serde(rename = "agent-pool")]
    pub agent_pool: Option<RelationshipData>,
    #[serde(rename = "locked-by")]
    pub locked_by: Option<RelationshipData>,
}

impl TfeResource for Workspace {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Workspace {
    /// Get resource count, defaulting to 0 if not available
    pub fn resource_count(&self) -> u32 {
        self.attributes.resource_count.unwrap_or(0)
    }

    /// Get execution mode, defaulting to "unknown" if not available
    pub fn execution_mode(&self) -> &str {
        self.attributes
            .execution_mode
            .as_deref()
            .unwrap_or("unknown")
    }

    /// Check if workspace is locked
    pub fn is_locked(&self) -> bool {
        self.attributes.locked.unwrap_or(false)
    }

    /// Get terraform version, defaulting to "unknown" if not available
    pub fn terraform_version(&self) -> &str {
        self.attributes
            .terraform_version
            .as_deref()
            .unwrap_or("unknown")
    }

    /// Get updated_at timestamp, defaulting to empty string if not available
    pub fn updated_at(&self) -> &str {
        self.attributes.updated_at.as_deref().unwrap_or("")
    }

    fn relationship(
        &self,
        pick: impl Fn(&WorkspaceRelationships) -> Option<&RelationshipData>,
    ) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(pick)
            .and_then(|r| r.id())
    }

    /// Get project ID if available
    pub fn project_id(&self) -> Option<&str> {
        self.relationship(|r| r.project.as_ref())
    }

    /// Get organization name if available (from relationships)
    pub fn organization_name(&self) -> Option<&str> {
        self.relationship(|r| r.organization.as_ref())
    }

    /// ID of the run currently holding the workspace, if any
    pub fn current_run_id(&self) -> Option<&str> {
        self.relationship(|r| r.current_run.as_ref())
    }

    /// Agent pool used in `agent` execution mode
    pub fn agent_pool_id(&self) -> Option<&str> {
        self.relationship(|r| r.agent_pool.as_ref())
    }
}

/// Where a workspace's runs execute
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Remote,
    Local,
    Agent,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionMode::Remote => "remote",
            ExecutionMode::Local => "local",
            ExecutionMode::Agent => "agent",
        };
        write!(f, "{}", s)
    }
}

/// VCS settings for creating or updating a workspace
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct VcsRepoOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_token_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_submodules: Option<bool>,
}

/// Filters for listing workspaces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspaceListOptions {
    pub list: ListOptions,
    /// Fuzzy name search (`search[name]`)
    pub search: Option<String>,
    /// Only workspaces with all of these tags (`search[tags]`)
    pub tags: Vec<String>,
    /// Skip workspaces with any of these tags (`search[exclude-tags]`)
    pub exclude_tags: Vec<String>,
    /// Only workspaces in this project (`filter[project][id]`)
    pub project_id: Option<String>,
    /// Name pattern with `*` wildcards (`search[wildcard-name]`)
    pub wildcard_name: Option<String>,
}

impl WorkspaceListOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        require_optional_id(self.project_id.as_deref(), "project ID")
    }

    /// Page selection followed by the filters
    pub(crate) fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.page(&self.list);
        self.push_filters(&mut query);
        query
    }

    /// Filters only, for walking every page
    pub(crate) fn filter_query(&self) -> Query {
        let mut query = Query::new();
        self.push_filters(&mut query);
        query
    }

    fn push_filters(&self, query: &mut Query) {
        query
            .push_opt("search[name]", self.search.as_deref())
            .push_list("search[tags]", &self.tags)
            .push_list("search[exclude-tags]", &self.exclude_tags)
            .push_opt("filter[project][id]", self.project_id.as_deref())
            .push_opt("search[wildcard-name]", self.wildcard_name.as_deref());
    }
}

/// Options for creating a workspace
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceCreateOptions {
    /// Workspace name (required)
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_mode: Option<ExecutionMode>,
    /// Required when `execution_mode` is `agent`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_apply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_destroy_plan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terraform_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_all_runs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speculative_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_triggers_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trigger_prefixes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_repo: Option<VcsRepoOptions>,
    /// Sent as the `project` relationship
    #[serde(skip)]
    pub project_id: Option<String>,
}

impl WorkspaceCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_string(Some(self.name.as_str()), "name")?;
        require_id(&self.name, "name")?;
        require_optional_id(self.project_id.as_deref(), "project ID")?;
        validate_agent_mode(self.execution_mode, self.agent_pool_id.as_deref())
    }
}

/// Options for updating a workspace; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceUpdateOptions {
    /// New name; renames the workspace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_mode: Option<ExecutionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_apply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_destroy_plan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terraform_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_all_runs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speculative_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_triggers_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_repo: Option<VcsRepoOptions>,
    /// Moves the workspace to another project
    #[serde(skip)]
    pub project_id: Option<String>,
}

impl WorkspaceUpdateOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_id(name, "name")?;
        }
        require_optional_id(self.project_id.as_deref(), "project ID")?;
        if self.execution_mode.is_some() || self.agent_pool_id.is_some() {
            validate_agent_mode(self.execution_mode, self.agent_pool_id.as_deref())?;
        }
        Ok(())
    }
}

fn validate_agent_mode(mode: Option<ExecutionMode>, agent_pool_id: Option<&str>) -> Result<()> {
    match (mode, agent_pool_id) {
        (Some(ExecutionMode::Agent), None) => Err(TfeError::validation(
            "'agent' execution mode requires an agent pool ID to be specified",
        )),
        (Some(ExecutionMode::Agent), Some(id)) => require_id(id, "agent pool ID"),
        (_, Some(_)) => Err(TfeError::validation(
            "specifying an agent pool ID requires 'agent' execution mode",
        )),
        (_, None) => Ok(()),
    }
}

/// Options for locking a workspace
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct WorkspaceLockOptions {
    /// Shown to other users while the lock is held
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Tag attached to a workspace
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: String,
    #[serde(rename = "type")]
    pub tag_type: Option<String>,
    pub attributes: TagAttributes,
}

/// Tag attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct TagAttributes {
    pub name: String,
    #[serde(rename = "instance-count", default)]
    pub instance_count: u32,
}

impl TfeResource for Tag {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// Reference to a tag when adding or removing tags: by ID or by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagRef {
    Id(String),
    Name(String),
}

impl TagRef {
    pub fn id(id: impl Into<String>) -> Self {
        TagRef::Id(id.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        TagRef::Name(name.into())
    }

    fn validate(&self) -> Result<()> {
        match self {
            TagRef::Id(id) => require_id(id, "tag ID"),
            TagRef::Name(name) => require_string(Some(name.as_str()), "tag name"),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            TagRef::Id(id) => serde_json::json!({ "type": "tags", "id": id }),
            TagRef::Name(name) => {
                serde_json::json!({ "type": "tags", "attributes": { "name": name } })
            }
        }
    }
}

/// Validate a tag list and build the relationship body for it
pub(crate) fn tags_document(tags: &[TagRef]) -> Result<serde_json::Value> {
    if tags.is_empty() {
        return Err(TfeError::validation(
            "must specify at least one tag by ID or name",
        ));
    }
    for tag in tags {
        tag.validate()?;
    }
    Ok(serde_json::json!({
        "data": tags.iter().map(TagRef::to_json).collect::<Vec<_>>()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_workspace(name: &str, locked: bool) -> Workspace {
        Workspace {
            id: format!("ws-{}", name),
            attributes: WorkspaceAttributes {
                name: name.to_string(),
                execution_mode: Some("remote".to_string()),
                resource_count: Some(42),
                locked: Some(locked),
                terraform_version: Some("1.5.0".to_string()),
                ..Default::default()
            },
            relationships: None,
        }
    }

    #[test]
    fn test_workspace_accessors() {
        let ws = create_test_workspace("my-workspace", true);
        assert_eq!(ws.name(), "my-workspace");
        assert_eq!(ws.resource_count(), 42);
        assert_eq!(ws.execution_mode(), "remote");
        assert_eq!(ws.terraform_version(), "1.5.0");
        assert!(ws.is_locked());
        assert_eq!(ws.updated_at(), "");
        assert_eq!(ws.project_id(), None);
    }

    #[test]
    fn test_workspace_defaults() {
        let ws: Workspace = serde_json::from_value(serde_json::json!({
            "id": "ws-123",
            "attributes": {"name": "test"}
        }))
        .unwrap();
        assert_eq!(ws.resource_count(), 0);
        assert_eq!(ws.execution_mode(), "unknown");
        assert!(!ws.is_locked());
        assert!(ws.attributes.tag_names.is_empty());
    }

    #[test]
    fn test_workspace_relationships() {
        let ws: Workspace = serde_json::from_value(serde_json::json!({
            "id": "ws-123",
            "attributes": {"name": "test", "tag-names": ["prod"]},
            "relationships": {
                "project": {"data": {"id": "prj-1", "type": "projects"}},
                "organization": {"data": {"id": "acme", "type": "organizations"}},
                "current-run": {"data": {"id": "run-9", "type": "runs"}},
                "agent-pool": {"data": null}
            }
        }))
        .unwrap();
        assert_eq!(ws.project_id(), Some("prj-1"));
        assert_eq!(ws.organization_name(), Some("acme"));
        assert_eq!(ws.current_run_id(), Some("run-9"));
        assert_eq!(ws.agent_pool_id(), None);
        assert_eq!(ws.attributes.tag_names, vec!["prod"]);
    }

    #[test]
    fn test_list_options_query() {
        let opts = WorkspaceListOptions {
            search: Some("app".to_string()),
            tags: vec!["prod".to_string(), "team a".to_string()],
            exclude_tags: vec!["legacy".to_string()],
            project_id: Some("prj-1".to_string()),
            wildcard_name: Some("*-dev".to_string()),
            ..Default::default()
        };
        assert_eq!(
            opts.to_query().append_to("/w"),
            "/w?search[name]=app&search[tags]=prod,team%20a&search[exclude-tags]=legacy\
             &filter[project][id]=prj-1&search[wildcard-name]=%2A-dev"
        );
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_create_options_validation() {
        assert!(WorkspaceCreateOptions::new("app-dev").validate().is_ok());
        assert_eq!(
            WorkspaceCreateOptions::new("").validate().unwrap_err().to_string(),
            "name is required"
        );
        assert_eq!(
            WorkspaceCreateOptions::new("app dev")
                .validate()
                .unwrap_err()
                .to_string(),
            "invalid value for name"
        );
    }

    #[test]
    fn test_agent_mode_requires_pool() {
        let mut opts = WorkspaceCreateOptions::new("ws");
        opts.execution_mode = Some(ExecutionMode::Agent);
        assert!(opts.validate().is_err());

        opts.agent_pool_id = Some("apool-1".to_string());
        assert!(opts.validate().is_ok());

        opts.execution_mode = Some(ExecutionMode::Remote);
        assert_eq!(
            opts.validate().unwrap_err().to_string(),
            "specifying an agent pool ID requires 'agent' execution mode"
        );

        opts.execution_mode = None;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_update_options_validation() {
        assert!(WorkspaceUpdateOptions::default().validate().is_ok());

        let opts = WorkspaceUpdateOptions {
            name: Some("bad name".to_string()),
            ..Default::default()
        };
        assert!(opts.validate().is_err());

        let opts = WorkspaceUpdateOptions {
            execution_mode: Some(ExecutionMode::Local),
            ..Default::default()
        };
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_create_options_serialization() {
        let opts = WorkspaceCreateOptions {
            execution_mode: Some(ExecutionMode::Agent),
            agent_pool_id: Some("apool-1".to_string()),
            auto_apply: Some(true),
            project_id: Some("prj-1".to_string()),
            ..WorkspaceCreateOptions::new("ws")
        };
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            serde_json::json!({
                "name": "ws",
                "execution-mode": "agent",
                "agent-pool-id": "apool-1",
                "auto-apply": true
            })
        );
    }

    #[test]
    fn test_tags_document() {
        let doc = tags_document(&[TagRef::name("prod"), TagRef::id("tag-1")]).unwrap();
        assert_eq!(
            doc,
            serde_json::json!({"data": [
                {"type": "tags", "attributes": {"name": "prod"}},
                {"type": "tags", "id": "tag-1"}
            ]})
        );
        assert!(tags_document(&[]).is_err());
        assert!(tags_document(&[TagRef::name("")]).is_err());
    }

    #[test]
    fn test_execution_mode_display() {
        assert_eq!(ExecutionMode::Agent.to_string(), "agent");
        let mode: ExecutionMode = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(mode, ExecutionMode::Local);
    }
}
