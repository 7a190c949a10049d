//! Runs - plan and apply executions against a workspace

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use api::RunsApi;
pub use models::{
    Run, RunActionOptions, RunActions, RunAttributes, RunCreateOptions, RunList, RunListOptions,
    RunRelationships, RunStatus, RunStatusGroup, RunVariable,
};

/// Operations on runs
#[async_trait]
pub trait Runs: Send + Sync {
    /// List one page of runs in a workspace
    async fn list(&self, workspace_id: &str, options: &RunListOptions) -> Result<RunList>;

    /// List one page of runs across an organization, optionally limited to
    /// some workspaces by name
    async fn list_for_organization(
        &self,
        organization: &str,
        options: &RunListOptions,
        workspace_names: &[String],
    ) -> Result<RunList>;

    /// Queue a new run
    async fn create(&self, options: RunCreateOptions) -> Result<Run>;

    /// Read a run by ID
    async fn read(&self, run_id: &str) -> Result<Run>;

    /// Confirm a planned run so it proceeds to apply
    async fn apply(&self, run_id: &str, options: RunActionOptions) -> Result<()>;

    /// Interrupt a planning or applying run
    async fn cancel(&self, run_id: &str, options: RunActionOptions) -> Result<()>;

    /// Stop a run that did not react to `cancel`
    async fn force_cancel(&self, run_id: &str, options: RunActionOptions) -> Result<()>;

    /// Skip the apply phase of a run waiting for confirmation
    async fn discard(&self, run_id: &str, options: RunActionOptions) -> Result<()>;
}
