//! Plan API operations

use async_trait::async_trait;
use log::debug;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::helpers::require_id;
use crate::hcp::TfeClient;

use super::models::Plan;
use super::Plans;

/// HTTP implementation of [`Plans`]
#[derive(Clone, Debug)]
pub struct PlansApi {
    client: TfeClient,
}

impl TfeClient {
    /// Plan operations
    pub fn plans(&self) -> PlansApi {
        PlansApi {
            client: self.clone(),
        }
    }
}

#[async_trait]
impl Plans for PlansApi {
    async fn read(&self, plan_id: &str) -> Result<Plan> {
        require_id(plan_id, "plan ID")?;
        self.client
            .fetch_resource(
                &format!("/{}/{}", api::PLANS, plan_id),
                &format!("plan '{}'", plan_id),
            )
            .await
    }

    async fn read_for_run(&self, run_id: &str) -> Result<Plan> {
        require_id(run_id, "run ID")?;
        self.client
            .fetch_resource(
                &format!("/{}/{}/plan", api::RUNS, run_id),
                &format!("plan for run '{}'", run_id),
            )
            .await
    }

    async fn logs(&self, plan_id: &str) -> Result<String> {
        let plan = self.read(plan_id).await?;
        let url = plan
            .log_read_url()
            .ok_or_else(|| TfeError::NotFound(format!("logs for plan '{}'", plan_id)))?;
        debug!("Fetching plan log from: {}", url);
        let bytes = self
            .client
            .fetch_raw_bytes(url, &format!("logs for plan '{}'", plan_id))
            .await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
