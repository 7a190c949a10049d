//! Organization data models

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hcp::helpers::{require_id, require_string};
use crate::hcp::jsonapi::RelationshipData;
use crate::hcp::traits::{ListPage, TfeResource};

/// One page of organizations
pub type OrganizationList = ListPage<Organization>;

/// Organization data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: String,
    #[serde(rename = "type")]
    pub org_type: Option<String>,
    pub attributes: Option<OrganizationAttributes>,
    pub relationships: Option<OrganizationRelationships>,
}

/// Organization attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct OrganizationAttributes {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "external-id")]
    pub external_id: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "saml-enabled")]
    pub saml_enabled: Option<bool>,
    #[serde(rename = "collaborator-auth-policy")]
    pub collaborator_auth_policy: Option<String>,
    #[serde(rename = "cost-estimation-enabled")]
    pub cost_estimation_enabled: Option<bool>,
    #[serde(rename = "default-execution-mode")]
    pub default_execution_mode: Option<String>,
    #[serde(rename = "session-timeout")]
    pub session_timeout: Option<u32>,
    #[serde(rename = "session-remember")]
    pub session_remember: Option<u32>,
    #[serde(rename = "two-factor-conformant")]
    pub two_factor_conformant: Option<bool>,
    pub permissions: Option<OrganizationPermissions>,
}

/// What the token may do with the organization
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct OrganizationPermissions {
    #[serde(rename = "can-update")]
    pub can_update: Option<bool>,
    #[serde(rename = "can-destroy")]
    pub can_destroy: Option<bool>,
    #[serde(rename = "can-create-workspace")]
    pub can_create_workspace: Option<bool>,
    #[serde(rename = "can-create-team")]
    pub can_create_team: Option<bool>,
    #[serde(rename = "can-manage-subscription")]
    pub can_manage_subscription: Option<bool>,
}

/// Organization relationships from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct OrganizationRelationships {
    #[serde(rename = "default-project")]
    pub default_project: Option<RelationshipData>,
}

impl Organization {
    /// Get email from attributes
    pub fn email(&self) -> &str {
        self.attributes
            .as_ref()
            .and_then(|a| a.email.as_deref())
            .unwrap_or("")
    }

    /// Get external ID from attributes
    pub fn external_id(&self) -> &str {
        self.attributes
            .as_ref()
            .and_then(|a| a.external_id.as_deref())
            .unwrap_or("")
    }

    /// Get created_at from attributes
    pub fn created_at(&self) -> &str {
        self.attributes
            .as_ref()
            .and_then(|a| a.created_at.as_deref())
            .unwrap_or("")
    }

    /// Get saml_enabled from attributes
    pub fn saml_enabled(&self) -> bool {
        self.attributes
            .as_ref()
            .and_then(|a| a.saml_enabled)
            .unwrap_or(false)
    }

    /// Get default project ID from relationships
    pub fn default_project_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.default_project.as_ref())
            .and_then(|dp| dp.id())
    }
}

impl TfeResource for Organization {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        // For orgs, id and name are the same
        &self.id
    }

    /// Organizations can also be matched by their `external-id` (`org-...`)
    fn matches(&self, input: &str) -> bool {
        self.id() == input || self.external_id() == input
    }
}

/// Options for creating an organization
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct OrganizationCreateOptions {
    /// Organization name (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Admin email address (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_remember: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator_auth_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_estimation_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_execution_mode: Option<String>,
}

impl OrganizationCreateOptions {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_string(self.name.as_deref(), "name")?;
        require_id(self.name.as_deref().unwrap_or_default(), "name")?;
        require_string(self.email.as_deref(), "email")
    }
}

/// Options for updating an organization; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct OrganizationUpdateOptions {
    /// New name; renames the organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_remember: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator_auth_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_estimation_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_execution_mode: Option<String>,
}
