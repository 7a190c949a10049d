//! Apply API operations

use async_trait::async_trait;
use log::debug;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::helpers::require_id;
use crate::hcp::TfeClient;

use super::models::Apply;
use super::Applies;

/// HTTP implementation of [`Applies`]
#[derive(Clone, Debug)]
pub struct AppliesApi {
    client: TfeClient,
}

impl TfeClient {
    /// Apply operations
    pub fn applies(&self) -> AppliesApi {
        AppliesApi {
            client: self.clone(),
        }
    }
}

#[async_trait]
impl Applies for AppliesApi {
    async fn read(&self, apply_id: &str) -> Result<Apply> {
        require_id(apply_id, "apply ID")?;
        self.client
            .fetch_resource(
                &format!("/{}/{}", api::APPLIES, apply_id),
                &format!("apply '{}'", apply_id),
            )
            .await
    }

    async fn read_for_run(&self, run_id: &str) -> Result<Apply> {
        require_id(run_id, "run ID")?;
        self.client
            .fetch_resource(
                &format!("/{}/{}/apply", api::RUNS, run_id),
                &format!("apply for run '{}'", run_id),
            )
            .await
    }

    async fn logs(&self, apply_id: &str) -> Result<String> {
        let apply = self.read(apply_id).await?;
        let url = apply
            .log_read_url()
            .ok_or_else(|| TfeError::NotFound(format!("logs for apply '{}'", apply_id)))?;
        debug!("Fetching apply log from: {}", url);
        let bytes = self
            .client
            .fetch_raw_bytes(url, &format!("logs for apply '{}'", apply_id))
            .await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
