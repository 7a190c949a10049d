//! OAuth Client data models

use serde::{Deserialize, Serialize};

use crate::error::{Result, TfeError};
use crate::hcp::helpers::require_string;
use crate::hcp::jsonapi::{RelationshipData, RelationshipList};
use crate::hcp::traits::{ListPage, TfeResource};

/// One page of OAuth clients
pub type OAuthClientList = ListPage<OAuthClient>;

/// Supported VCS providers
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServiceProviderType {
    /// Azure DevOps Server
    AdoServer,
    /// Azure DevOps Services
    AdoServices,
    BitbucketDataCenter,
    BitbucketHosted,
    BitbucketServer,
    BitbucketServerLegacy,
    Github,
    GithubEnterprise,
    GitlabHosted,
    GitlabCommunityEdition,
    GitlabEnterpriseEdition,
}

/// OAuth Client data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OAuthClient {
    pub id: String,
    pub attributes: OAuthClientAttributes,
    pub relationships: Option<OAuthClientRelationships>,
}

/// OAuth Client attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct OAuthClientAttributes {
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "service-provider")]
    pub service_provider: Option<String>,
    #[serde(rename = "service-provider-display-name")]
    pub service_provider_display_name: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "http-url")]
    pub http_url: Option<String>,
    #[serde(rename = "api-url")]
    pub api_url: Option<String>,
    #[serde(rename = "callback-url")]
    pub callback_url: Option<String>,
    #[serde(rename = "organization-scoped")]
    pub organization_scoped: Option<bool>,
}

/// OAuth Client relationships from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct OAuthClientRelationships {
    pub organization: Option<RelationshipData>,
    #[serde(rename = "oauth-tokens")]
    pub oauth_tokens: Option<RelationshipList>,
}

impl TfeResource for OAuthClient {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.attributes
            .name
            .as_deref()
            .or(self.attributes.service_provider_display_name.as_deref())
            .unwrap_or(&self.id)
    }
}

impl OAuthClient {
    /// Get service provider (github, gitlab, etc.)
    pub fn service_provider(&self) -> &str {
        self.attributes
            .service_provider
            .as_deref()
            .unwrap_or("unknown")
    }

    /// Check if organization scoped
    pub fn is_organization_scoped(&self) -> bool {
        self.attributes.organization_scoped.unwrap_or(true)
    }

    /// Get OAuth token IDs
    pub fn oauth_token_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.oauth_tokens.as_ref())
            .map(RelationshipList::ids)
            .unwrap_or_default()
    }

    pub fn organization_name(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.organization.as_ref())
            .and_then(|o| o.id())
    }
}

/// Options for connecting a VCS provider
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct OAuthClientCreateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Base URL of the provider's API
    pub api_url: Option<String>,
    /// Base URL of the provider's web interface
    pub http_url: Option<String>,
    /// Personal access token for the provider
    #[serde(rename = "oauth-token-string", skip_serializing_if = "Option::is_none")]
    pub oauth_token: Option<String>,
    /// Only for Azure DevOps Server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// Bitbucket Server only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsa_public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub service_provider: Option<ServiceProviderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_scoped: Option<bool>,
}

impl OAuthClientCreateOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        require_string(self.api_url.as_deref(), "API URL")?;
        require_string(self.http_url.as_deref(), "HTTP URL")?;
        let provider = self
            .service_provider
            .ok_or_else(|| TfeError::validation("service provider is required"))?;
        if provider != ServiceProviderType::BitbucketServer {
            require_string(self.oauth_token.as_deref(), "OAuth token")?;
        }
        if self.private_key.is_some() && provider != ServiceProviderType::AdoServer {
            return Err(TfeError::validation(
                "private key can only be used with the ado_server service provider",
            ));
        }
        Ok(())
    }
}

/// Options for updating an OAuth client; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct OAuthClientUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "oauth-token-string", skip_serializing_if = "Option::is_none")]
    pub oauth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsa_public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_scoped: Option<bool>,
}

impl OAuthClientUpdateOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.is_some() {
            require_string(self.name.as_deref(), "name")?;
        }
        Ok(())
    }
}
