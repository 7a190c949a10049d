//! Configuration version API operations

use std::path::Path;

use async_trait::async_trait;
use log::debug;
use reqwest::Method;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::helpers::{require_id, Query};
use crate::hcp::jsonapi::Document;
use crate::hcp::{ListOptions, TfeClient};

use super::archive::pack_directory;
use super::models::{
    ConfigurationVersion, ConfigurationVersionCreateOptions, ConfigurationVersionList,
};
use super::ConfigurationVersions;

/// HTTP implementation of [`ConfigurationVersions`]
#[derive(Clone, Debug)]
pub struct ConfigurationVersionsApi {
    client: TfeClient,
}

impl TfeClient {
    /// Configuration version operations
    pub fn configuration_versions(&self) -> ConfigurationVersionsApi {
        ConfigurationVersionsApi {
            client: self.clone(),
        }
    }
}

fn workspace_versions_path(workspace_id: &str) -> String {
    format!(
        "/{}/{}/{}",
        api::WORKSPACES,
        workspace_id,
        api::CONFIGURATION_VERSIONS
    )
}

fn version_path(cv_id: &str) -> String {
    format!("/{}/{}", api::CONFIGURATION_VERSIONS, cv_id)
}

#[async_trait]
impl ConfigurationVersions for ConfigurationVersionsApi {
    async fn list(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> Result<ConfigurationVersionList> {
        require_id(workspace_id, "workspace ID")?;
        let mut query = Query::new();
        query.page(options);
        self.client
            .fetch_page(
                &workspace_versions_path(workspace_id),
                &query,
                &format!("configuration versions for workspace '{}'", workspace_id),
            )
            .await
    }

    async fn create(
        &self,
        workspace_id: &str,
        options: ConfigurationVersionCreateOptions,
    ) -> Result<ConfigurationVersion> {
        require_id(workspace_id, "workspace ID")?;
        let body = Document::new(api::CONFIGURATION_VERSIONS, &options);
        self.client
            .create_resource(
                &workspace_versions_path(workspace_id),
                &body,
                "configuration version",
            )
            .await
    }

    async fn read(&self, cv_id: &str) -> Result<ConfigurationVersion> {
        require_id(cv_id, "configuration version ID")?;
        self.client
            .fetch_resource(
                &version_path(cv_id),
                &format!("configuration version '{}'", cv_id),
            )
            .await
    }

    async fn upload(&self, upload_url: &str, dir: &Path) -> Result<()> {
        let dir = dir.to_path_buf();
        let archive = tokio::task::spawn_blocking(move || pack_directory(&dir))
            .await
            .map_err(|e| TfeError::Io {
                message: format!("Failed to pack configuration: {}", e),
            })??;
        self.upload_tar_gzip(upload_url, archive).await
    }

    async fn upload_tar_gzip(&self, upload_url: &str, archive: Vec<u8>) -> Result<()> {
        if upload_url.is_empty() {
            return Err(TfeError::validation("upload URL is required"));
        }
        debug!("Uploading {} byte configuration archive", archive.len());
        let builder = self
            .client
            .raw_request(Method::PUT, upload_url)
            .header("Content-Type", "application/octet-stream")
            .body(archive);
        self.client
            .execute(builder, "configuration upload")
            .await?;
        Ok(())
    }

    async fn download(&self, cv_id: &str) -> Result<Vec<u8>> {
        require_id(cv_id, "configuration version ID")?;
        self.client
            .fetch_bytes(
                &format!("{}/download", version_path(cv_id)),
                &format!("configuration version '{}'", cv_id),
            )
            .await
    }

    async fn archive(&self, cv_id: &str) -> Result<()> {
        require_id(cv_id, "configuration version ID")?;
        self.client
            .send_without_result::<()>(
                Method::POST,
                &format!("{}/actions/archive", version_path(cv_id)),
                None,
                &format!("configuration version '{}'", cv_id),
            )
            .await
    }
}
