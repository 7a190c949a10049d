//! OAuth clients - VCS provider connections of an organization

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;
use crate::hcp::ListOptions;

pub use api::OAuthClientsApi;
pub use models::{
    OAuthClient, OAuthClientAttributes, OAuthClientCreateOptions, OAuthClientList,
    OAuthClientRelationships, OAuthClientUpdateOptions, ServiceProviderType,
};

/// Operations on OAuth clients
#[async_trait]
pub trait OAuthClients: Send + Sync {
    /// List one page of an organization's OAuth clients
    async fn list(&self, organization: &str, options: &ListOptions) -> Result<OAuthClientList>;

    /// Connect a VCS provider
    async fn create(
        &self,
        organization: &str,
        options: OAuthClientCreateOptions,
    ) -> Result<OAuthClient>;

    /// Read an OAuth client by ID
    async fn read(&self, client_id: &str) -> Result<OAuthClient>;

    /// Update an OAuth client
    async fn update(
        &self,
        client_id: &str,
        options: OAuthClientUpdateOptions,
    ) -> Result<OAuthClient>;

    /// Delete an OAuth client
    async fn delete(&self, client_id: &str) -> Result<()>;
}
