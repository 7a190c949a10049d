//! OAuth Client API operations

use async_trait::async_trait;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::{require_id, Query};
use crate::hcp::jsonapi::Document;
use crate::hcp::{ListOptions, TfeClient};

use super::models::{
    OAuthClient, OAuthClientCreateOptions, OAuthClientList, OAuthClientUpdateOptions,
};
use super::OAuthClients;

/// HTTP implementation of [`OAuthClients`]
#[derive(Clone, Debug)]
pub struct OAuthClientsApi {
    client: TfeClient,
}

impl TfeClient {
    /// OAuth client operations
    pub fn oauth_clients(&self) -> OAuthClientsApi {
        OAuthClientsApi {
            client: self.clone(),
        }
    }
}

fn org_clients_path(organization: &str) -> String {
    format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::OAUTH_CLIENTS)
}

fn client_path(client_id: &str) -> String {
    format!("/{}/{}", api::OAUTH_CLIENTS, client_id)
}

#[async_trait]
impl OAuthClients for OAuthClientsApi {
    async fn list(&self, organization: &str, options: &ListOptions) -> Result<OAuthClientList> {
        require_id(organization, "organization")?;
        let mut query = Query::new();
        query.page(options);
        self.client
            .fetch_page(
                &org_clients_path(organization),
                &query,
                &format!("OAuth clients for organization '{}'", organization),
            )
            .await
    }

    async fn create(
        &self,
        organization: &str,
        options: OAuthClientCreateOptions,
    ) -> Result<OAuthClient> {
        require_id(organization, "organization")?;
        options.validate()?;
        let body = Document::new("oauth-clients", &options);
        self.client
            .create_resource(&org_clients_path(organization), &body, "OAuth client")
            .await
    }

    async fn read(&self, client_id: &str) -> Result<OAuthClient> {
        require_id(client_id, "OAuth client ID")?;
        self.client
            .fetch_resource(
                &client_path(client_id),
                &format!("OAuth client '{}'", client_id),
            )
            .await
    }

    async fn update(
        &self,
        client_id: &str,
        options: OAuthClientUpdateOptions,
    ) -> Result<OAuthClient> {
        require_id(client_id, "OAuth client ID")?;
        options.validate()?;
        let body = Document::new("oauth-clients", &options);
        self.client
            .update_resource(
                &client_path(client_id),
                &body,
                &format!("OAuth client '{}'", client_id),
            )
            .await
    }

    async fn delete(&self, client_id: &str) -> Result<()> {
        require_id(client_id, "OAuth client ID")?;
        self.client
            .delete_resource(
                &client_path(client_id),
                &format!("OAuth client '{}'", client_id),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcp::oauth_clients::ServiceProviderType;
    use crate::hcp::TfeResource;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn oauth_client_json(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "oauth-clients",
            "attributes": {
                "name": name,
                "service-provider": "github",
                "service-provider-display-name": "GitHub",
                "http-url": "https://github.com",
                "api-url": "https://api.github.com"
            }
        })
    }

    #[tokio::test]
    async fn test_list_oauth_clients() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/oauth-clients"))
            .and(query_param("page[size]", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [oauth_client_json("oc-1", "github-main")],
                "meta": {"pagination": {"current-page": 1, "total-pages": 1}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = ListOptions {
            page_number: None,
            page_size: Some(20),
        };
        let page = client
            .oauth_clients()
            .list("my-org", &options)
            .await
            .unwrap();
        assert_eq!(page.items[0].name(), "github-main");
    }

    #[tokio::test]
    async fn test_create_oauth_client() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/organizations/my-org/oauth-clients"))
            .and(body_json(serde_json::json!({
                "data": {
                    "type": "oauth-clients",
                    "attributes": {
                        "name": "github-main",
                        "api-url": "https://api.github.com",
                        "http-url": "https://github.com",
                        "oauth-token-string": "ghp_secret",
                        "service-provider": "github"
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": oauth_client_json("oc-new", "github-main")
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = OAuthClientCreateOptions {
            name: Some("github-main".to_string()),
            api_url: Some("https://api.github.com".to_string()),
            http_url: Some("https://github.com".to_string()),
            oauth_token: Some("ghp_secret".to_string()),
            service_provider: Some(ServiceProviderType::Github),
            ..Default::default()
        };
        let created = client
            .oauth_clients()
            .create("my-org", options)
            .await
            .unwrap();
        assert_eq!(created.id, "oc-new");
    }

    #[tokio::test]
    async fn test_create_invalid_options_are_rejected_locally() {
        let client = TfeClient::test_client("http://127.0.0.1:1");
        let err = client
            .oauth_clients()
            .create("my-org", OAuthClientCreateOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API URL is required");
    }

    #[tokio::test]
    async fn test_read_update_delete_oauth_client() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/oauth-clients/oc-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": oauth_client_json("oc-1", "github-main")
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/oauth-clients/oc-1"))
            .and(body_json(serde_json::json!({
                "data": {"type": "oauth-clients", "attributes": {"organization-scoped": false}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": oauth_client_json("oc-1", "github-main")
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/oauth-clients/oc-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let clients = client.oauth_clients();
        assert_eq!(clients.read("oc-1").await.unwrap().service_provider(), "github");
        let update = OAuthClientUpdateOptions {
            organization_scoped: Some(false),
            ..Default::default()
        };
        clients.update("oc-1", update).await.unwrap();
        clients.delete("oc-1").await.unwrap();
    }
}
