//! API metadata from the ping endpoint

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::hcp::TfeClient;

const API_VERSION_HEADER: &str = "TFP-API-Version";
const TFE_VERSION_HEADER: &str = "X-TFE-Version";
const APP_NAME_HEADER: &str = "TFP-AppName";
const RATE_LIMIT_HEADER: &str = "X-RateLimit-Limit";

/// Version information the server reports in response headers
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ApiMetadata {
    /// JSON:API version, e.g. `2.6`
    pub api_version: Option<String>,
    /// Terraform Enterprise release, absent on HCP Terraform
    pub tfe_version: Option<String>,
    /// `HCP Terraform` or `Terraform Enterprise`
    pub app_name: Option<String>,
    /// Requests per second allowed for this token
    pub rate_limit: Option<f64>,
}

impl ApiMetadata {
    fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            api_version: get(API_VERSION_HEADER),
            tfe_version: get(TFE_VERSION_HEADER),
            app_name: get(APP_NAME_HEADER),
            rate_limit: get(RATE_LIMIT_HEADER).and_then(|v| v.parse().ok()),
        }
    }

    /// Whether the server is Terraform Enterprise rather than HCP Terraform
    pub fn is_enterprise(&self) -> bool {
        self.tfe_version.is_some()
    }
}

impl TfeClient {
    /// Ping the API and read the version headers
    pub async fn ping(&self) -> Result<ApiMetadata> {
        let response = self
            .execute(self.request(Method::GET, "/ping"), "ping")
            .await?;
        Ok(ApiMetadata::from_headers(response.headers()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_ping_reads_headers() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(
                ResponseTemplate::new(204)
                    .insert_header(API_VERSION_HEADER, "2.6")
                    .insert_header(TFE_VERSION_HEADER, "v202409-1")
                    .insert_header(APP_NAME_HEADER, "Terraform Enterprise")
                    .insert_header(RATE_LIMIT_HEADER, "30"),
            )
            .mount(&mock_server)
            .await;

        let meta = client.ping().await.unwrap();
        assert_eq!(meta.api_version.as_deref(), Some("2.6"));
        assert_eq!(meta.tfe_version.as_deref(), Some("v202409-1"));
        assert_eq!(meta.app_name.as_deref(), Some("Terraform Enterprise"));
        assert_eq!(meta.rate_limit, Some(30.0));
        assert!(meta.is_enterprise());
    }

    #[tokio::test]
    async fn test_ping_without_headers() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let meta = client.ping().await.unwrap();
        assert_eq!(meta, ApiMetadata::default());
        assert!(!meta.is_enterprise());
    }
}
