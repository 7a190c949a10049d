//! Run API operations

use async_trait::async_trait;
use log::debug;
use reqwest::Method;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::require_id;
use crate::hcp::TfeClient;

use super::models::{Run, RunActionOptions, RunCreateOptions, RunList, RunListOptions};
use super::Runs;

/// HTTP implementation of [`Runs`]
///
/// The list endpoints are rate limited to 30 requests per minute server side;
/// the client retries 429 responses on its own.
#[derive(Clone, Debug)]
pub struct RunsApi {
    client: TfeClient,
}

impl TfeClient {
    /// Run operations
    pub fn runs(&self) -> RunsApi {
        RunsApi {
            client: self.clone(),
        }
    }
}

fn run_path(run_id: &str) -> String {
    format!("/{}/{}", api::RUNS, run_id)
}

impl RunsApi {
    async fn action(&self, run_id: &str, action: &str, options: RunActionOptions) -> Result<()> {
        require_id(run_id, "run ID")?;
        debug!("Requesting {} for run '{}'", action, run_id);
        self.client
            .send_without_result(
                Method::POST,
                &format!("{}/actions/{}", run_path(run_id), action),
                Some(&options),
                &format!("run '{}'", run_id),
            )
            .await
    }
}

#[async_trait]
impl Runs for RunsApi {
    async fn list(&self, workspace_id: &str, options: &RunListOptions) -> Result<RunList> {
        require_id(workspace_id, "workspace ID")?;
        let path = format!("/{}/{}/{}", api::WORKSPACES, workspace_id, api::RUNS);
        self.client
            .fetch_page(
                &path,
                &options.to_query(),
                &format!("runs for workspace '{}'", workspace_id),
            )
            .await
    }

    async fn list_for_organization(
        &self,
        organization: &str,
        options: &RunListOptions,
        workspace_names: &[String],
    ) -> Result<RunList> {
        require_id(organization, "organization")?;
        let path = format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::RUNS);
        let mut query = options.to_query();
        query.push_list("filter[workspace_names]", workspace_names);
        self.client
            .fetch_page(
                &path,
                &query,
                &format!("runs for organization '{}'", organization),
            )
            .await
    }

    async fn create(&self, options: RunCreateOptions) -> Result<Run> {
        options.validate()?;
        self.client
            .create_resource(&format!("/{}", api::RUNS), &options.to_document(), "run")
            .await
    }

    async fn read(&self, run_id: &str) -> Result<Run> {
        require_id(run_id, "run ID")?;
        self.client
            .fetch_resource(&run_path(run_id), &format!("run '{}'", run_id))
            .await
    }

    async fn apply(&self, run_id: &str, options: RunActionOptions) -> Result<()> {
        self.action(run_id, "apply", options).await
    }

    async fn cancel(&self, run_id: &str, options: RunActionOptions) -> Result<()> {
        self.action(run_id, "cancel", options).await
    }

    async fn force_cancel(&self, run_id: &str, options: RunActionOptions) -> Result<()> {
        self.action(run_id, "force-cancel", options).await
    }

    async fn discard(&self, run_id: &str, options: RunActionOptions) -> Result<()> {
        self.action(run_id, "discard", options).await
    }
}
