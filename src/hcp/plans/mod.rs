//! Plans - the plan phase of a run

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use api::PlansApi;
pub use models::{Plan, PlanAttributes};

/// Operations on plans
#[async_trait]
pub trait Plans: Send + Sync {
    /// Read a plan by ID
    async fn read(&self, plan_id: &str) -> Result<Plan>;

    /// Read the plan belonging to a run
    async fn read_for_run(&self, run_id: &str) -> Result<Plan>;

    /// Fetch the plan log through its pre-authenticated `log-read-url`
    async fn logs(&self, plan_id: &str) -> Result<String>;
}
