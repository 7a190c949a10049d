//! State version API operations

use async_trait::async_trait;
use log::debug;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::helpers::require_id;
use crate::hcp::TfeClient;

use super::models::{
    StateVersion, StateVersionCreateOptions, StateVersionList, StateVersionListOptions,
};
use super::StateVersions;

/// HTTP implementation of [`StateVersions`]
#[derive(Clone, Debug)]
pub struct StateVersionsApi {
    client: TfeClient,
}

impl TfeClient {
    /// State version operations
    pub fn state_versions(&self) -> StateVersionsApi {
        StateVersionsApi {
            client: self.clone(),
        }
    }
}

#[async_trait]
impl StateVersions for StateVersionsApi {
    async fn list(&self, options: &StateVersionListOptions) -> Result<StateVersionList> {
        options.validate()?;
        self.client
            .fetch_page(
                &format!("/{}", api::STATE_VERSIONS),
                &options.to_query(),
                &format!("state versions for workspace '{}'", options.workspace),
            )
            .await
    }

    async fn create(
        &self,
        workspace_id: &str,
        options: StateVersionCreateOptions,
    ) -> Result<StateVersion> {
        require_id(workspace_id, "workspace ID")?;
        options.validate()?;
        debug!(
            "Uploading state version (serial: {:?}) for: {}",
            options.serial, workspace_id
        );
        let path = format!(
            "/{}/{}/{}",
            api::WORKSPACES,
            workspace_id,
            api::STATE_VERSIONS
        );
        self.client
            .create_resource(
                &path,
                &options.to_document(),
                &format!("state version for workspace '{}'", workspace_id),
            )
            .await
    }

    async fn create_from_state(
        &self,
        workspace_id: &str,
        serial: u64,
        lineage: Option<String>,
        state: &[u8],
    ) -> Result<StateVersion> {
        let options = StateVersionCreateOptions::from_state(serial, lineage, state);
        self.create(workspace_id, options).await
    }

    async fn read(&self, state_version_id: &str) -> Result<StateVersion> {
        require_id(state_version_id, "state version ID")?;
        self.client
            .fetch_resource(
                &format!("/{}/{}", api::STATE_VERSIONS, state_version_id),
                &format!("state version '{}'", state_version_id),
            )
            .await
    }

    async fn read_current(&self, workspace_id: &str) -> Result<StateVersion> {
        require_id(workspace_id, "workspace ID")?;
        debug!("Fetching current state version for: {}", workspace_id);
        self.client
            .fetch_resource(
                &format!(
                    "/{}/{}/current-state-version",
                    api::WORKSPACES,
                    workspace_id
                ),
                &format!("current state version for workspace '{}'", workspace_id),
            )
            .await
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        if url.is_empty() {
            return Err(TfeError::validation("download URL is required"));
        }
        debug!("Downloading state from: {}", url);
        self.client.fetch_url_bytes(url, "state download").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state_version_json(id: &str, serial: u64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "state-versions",
            "attributes": {"serial": serial, "lineage": "lin-1"}
        })
    }

    #[tokio::test]
    async fn test_list_state_versions() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/state-versions"))
            .and(query_param("filter[organization][name]", "my-org"))
            .and(query_param("filter[workspace][name]", "app"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [state_version_json("sv-2", 2), state_version_json("sv-1", 1)],
                "meta": {"pagination": {"current-page": 1, "total-pages": 1}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let page = client
            .state_versions()
            .list(&StateVersionListOptions::new("my-org", "app"))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].serial(), 2);
    }

    #[tokio::test]
    async fn test_list_requires_names() {
        let client = TfeClient::test_client("http://127.0.0.1:1");
        let err = client
            .state_versions()
            .list(&StateVersionListOptions::new("my-org", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, TfeError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_from_state() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/workspaces/ws-1/state-versions"))
            .and(body_json(serde_json::json!({
                "data": {
                    "type": "state-versions",
                    "attributes": {
                        "serial": 4,
                        "md5": "900150983cd24fb0d6963f7d28e17f72",
                        "lineage": "lin-1",
                        "state": "YWJj"
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": state_version_json("sv-4", 4)
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sv = client
            .state_versions()
            .create_from_state("ws-1", 4, Some("lin-1".to_string()), b"abc")
            .await
            .unwrap();
        assert_eq!(sv.id, "sv-4");
    }

    #[tokio::test]
    async fn test_read_current_not_found() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/workspaces/ws-empty/current-state-version"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let err = client
            .state_versions()
            .read_current("ws-empty")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_read_and_download() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());
        let download_url = format!("{}/archivist/sv-1", mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/state-versions/sv-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "id": "sv-1",
                    "type": "state-versions",
                    "attributes": {"serial": 1, "hosted-state-download-url": download_url}
                }
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/archivist/sv-1"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"version":4}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let state_versions = client.state_versions();
        let sv = state_versions.read("sv-1").await.unwrap();
        let url = sv.download_url().unwrap();
        let bytes = state_versions.download(url).await.unwrap();
        assert_eq!(bytes, br#"{"version":4}"#);
    }
}
