//! Configuration versions - uploaded Terraform configuration for a workspace

mod api;
mod archive;
mod models;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::hcp::ListOptions;

pub use api::ConfigurationVersionsApi;
pub use archive::pack_directory;
pub use models::{
    ConfigurationVersion, ConfigurationVersionAttributes, ConfigurationVersionCreateOptions,
    ConfigurationVersionLinks, ConfigurationVersionList,
};

/// Operations on configuration versions
#[async_trait]
pub trait ConfigurationVersions: Send + Sync {
    /// List one page of configuration versions of a workspace
    async fn list(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> Result<ConfigurationVersionList>;

    /// Create a configuration version; the returned `upload_url` accepts the archive
    async fn create(
        &self,
        workspace_id: &str,
        options: ConfigurationVersionCreateOptions,
    ) -> Result<ConfigurationVersion>;

    /// Read a configuration version by ID
    async fn read(&self, cv_id: &str) -> Result<ConfigurationVersion>;

    /// Pack `dir` as a tar.gz archive and upload it
    ///
    /// `.git` and `.terraform` directories are left out.
    async fn upload(&self, upload_url: &str, dir: &Path) -> Result<()>;

    /// Upload an already packed tar.gz archive
    async fn upload_tar_gzip(&self, upload_url: &str, archive: Vec<u8>) -> Result<()>;

    /// Download the configuration archive
    async fn download(&self, cv_id: &str) -> Result<Vec<u8>>;

    /// Archive a configuration version, removing its files from storage
    async fn archive(&self, cv_id: &str) -> Result<()>;
}
