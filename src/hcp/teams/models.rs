//! Team data models

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hcp::helpers::{require_id, Query};
use crate::hcp::jsonapi::RelationshipList;
use crate::hcp::traits::{ListPage, TfeResource};
use crate::hcp::ListOptions;

/// One page of teams
pub type TeamList = ListPage<Team>;

/// Who can see a team
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeamVisibility {
    /// Only members and owners
    Secret,
    /// Every member of the organization
    Organization,
}

/// Team data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Team {
    pub id: String,
    pub attributes: Option<TeamAttributes>,
    pub relationships: Option<TeamRelationships>,
}

/// Team attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct TeamAttributes {
    pub name: Option<String>,
    #[serde(rename = "sso-team-id")]
    pub sso_team_id: Option<String>,
    #[serde(rename = "users-count")]
    pub users_count: Option<u32>,
    pub visibility: Option<TeamVisibility>,
    #[serde(rename = "allow-member-token-management")]
    pub allow_member_token_management: Option<bool>,
    pub permissions: Option<TeamPermissions>,
    #[serde(rename = "organization-access")]
    pub organization_access: Option<OrganizationAccess>,
}

/// Team permissions
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct TeamPermissions {
    #[serde(rename = "can-update-membership")]
    pub can_update_membership: Option<bool>,
    #[serde(rename = "can-destroy")]
    pub can_destroy: Option<bool>,
    #[serde(rename = "can-update-organization-access")]
    pub can_update_organization_access: Option<bool>,
    #[serde(rename = "can-update-api-token")]
    pub can_update_api_token: Option<bool>,
    #[serde(rename = "can-update-visibility")]
    pub can_update_visibility: Option<bool>,
}

/// Organization-level access of a team
///
/// Also used in create and update options; unset flags are not sent.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct OrganizationAccess {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_policies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_policy_overrides: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_run_tasks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_workspaces: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_vcs_settings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_agent_pools: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_workspaces: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_membership: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_teams: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_organization_access: Option<bool>,
}

/// Team relationships from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct TeamRelationships {
    pub users: Option<RelationshipList>,
}

impl Team {
    fn attrs(&self) -> Option<&TeamAttributes> {
        self.attributes.as_ref()
    }

    pub fn users_count(&self) -> u32 {
        self.attrs().and_then(|a| a.users_count).unwrap_or(0)
    }

    /// Visibility, `secret` when the server did not say
    pub fn visibility(&self) -> TeamVisibility {
        self.attrs()
            .and_then(|a| a.visibility)
            .unwrap_or(TeamVisibility::Secret)
    }

    /// Check if team has manage-workspaces permission
    pub fn can_manage_workspaces(&self) -> bool {
        self.attrs()
            .and_then(|a| a.organization_access.as_ref())
            .and_then(|oa| oa.manage_workspaces)
            .unwrap_or(false)
    }

    pub fn user_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.users.as_ref())
            .map(RelationshipList::ids)
            .unwrap_or_default()
    }
}

impl TfeResource for Team {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.attrs().and_then(|a| a.name.as_deref()).unwrap_or("")
    }
}

/// Filters for listing teams
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamListOptions {
    pub list: ListOptions,
    /// Exact team names (`filter[names]`)
    pub names: Vec<String>,
    /// Partial name match (`q`)
    pub query: Option<String>,
}

impl TeamListOptions {
    pub(crate) fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .page(&self.list)
            .push_list("filter[names]", &self.names)
            .push_opt("q", self.query.as_deref());
        query
    }
}

/// Options for creating a team
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TeamCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<TeamVisibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sso_team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_member_token_management: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_access: Option<OrganizationAccess>,
}

impl TeamCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_id(&self.name, "name")
    }
}

/// Options for updating a team; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TeamUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<TeamVisibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sso_team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_member_token_management: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_access: Option<OrganizationAccess>,
}

impl TeamUpdateOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_id(name, "name")?;
        }
        Ok(())
    }
}
