//! Team project access data models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TfeError};
use crate::hcp::helpers::require_id;
use crate::hcp::jsonapi::{Document, RelationshipData};
use crate::hcp::traits::{ListPage, TfeResource};

/// One page of team project access bindings
pub type TeamProjectAccessList = ListPage<TeamProjectAccess>;

/// Fixed permission sets, or `custom` for per-permission settings
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeamProjectAccessType {
    Admin,
    Maintain,
    Write,
    Read,
    Custom,
}

impl fmt::Display for TeamProjectAccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TeamProjectAccessType::Admin => "admin",
            TeamProjectAccessType::Maintain => "maintain",
            TeamProjectAccessType::Write => "write",
            TeamProjectAccessType::Read => "read",
            TeamProjectAccessType::Custom => "custom",
        })
    }
}

/// Team project access binding from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TeamProjectAccess {
    pub id: String,
    pub attributes: TeamProjectAccessAttributes,
    pub relationships: Option<TeamProjectAccessRelationships>,
}

/// Team project access attributes
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TeamProjectAccessAttributes {
    pub access: TeamProjectAccessType,
    #[serde(rename = "project-access")]
    pub project_access: Option<ProjectAccessPermissions>,
    #[serde(rename = "workspace-access")]
    pub workspace_access: Option<WorkspaceAccessPermissions>,
}

/// Custom project-level access permissions
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectAccessPermissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<String>,
}

/// Custom workspace-level access permissions
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceAccessPermissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_versions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentinel_mocks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    pub move_workspace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_tasks: Option<bool>,
}

/// Relationships for team project access
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct TeamProjectAccessRelationships {
    pub team: Option<RelationshipData>,
    pub project: Option<RelationshipData>,
}

impl TeamProjectAccess {
    pub fn access(&self) -> TeamProjectAccessType {
        self.attributes.access
    }

    pub fn team_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.team.as_ref())
            .and_then(|t| t.id())
    }

    pub fn project_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.project.as_ref())
            .and_then(|p| p.id())
    }
}

impl TfeResource for TeamProjectAccess {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        // Bindings have no name of their own
        &self.id
    }
}

fn require_custom(
    access: Option<TeamProjectAccessType>,
    project_access: &Option<ProjectAccessPermissions>,
    workspace_access: &Option<WorkspaceAccessPermissions>,
) -> Result<()> {
    let has_custom = project_access.is_some() || workspace_access.is_some();
    if has_custom && access != Some(TeamProjectAccessType::Custom) {
        return Err(TfeError::validation(
            "custom permissions can only be set with custom access",
        ));
    }
    Ok(())
}

/// Options for granting a team access to a project
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TeamProjectAccessAddOptions {
    pub access: TeamProjectAccessType,
    #[serde(skip)]
    pub team_id: String,
    #[serde(skip)]
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_access: Option<ProjectAccessPermissions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_access: Option<WorkspaceAccessPermissions>,
}

impl TeamProjectAccessAddOptions {
    pub fn new(
        access: TeamProjectAccessType,
        team_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            access,
            team_id: team_id.into(),
            project_id: project_id.into(),
            project_access: None,
            workspace_access: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_id(&self.team_id, "team ID")?;
        require_id(&self.project_id, "project ID")?;
        require_custom(
            Some(self.access),
            &self.project_access,
            &self.workspace_access,
        )
    }

    pub(crate) fn to_document(&self) -> Document<&Self> {
        Document::new("team-projects", self)
            .with_relationship("team", "teams", Some(self.team_id.as_str()))
            .with_relationship("project", "projects", Some(self.project_id.as_str()))
    }
}

/// Options for changing a binding
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TeamProjectAccessUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<TeamProjectAccessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_access: Option<ProjectAccessPermissions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_access: Option<WorkspaceAccessPermissions>,
}

impl TeamProjectAccessUpdateOptions {
    pub fn access(access: TeamProjectAccessType) -> Self {
        Self {
            access: Some(access),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_custom(self.access, &self.project_access, &self.workspace_access)
    }
}
