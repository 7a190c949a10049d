//! Applies - the apply phase of a run

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;

pub use api::AppliesApi;
pub use models::{Apply, ApplyAttributes};

/// Operations on applies
#[async_trait]
pub trait Applies: Send + Sync {
    /// Read an apply by ID
    async fn read(&self, apply_id: &str) -> Result<Apply>;

    /// Read the apply belonging to a run
    async fn read_for_run(&self, run_id: &str) -> Result<Apply>;

    /// Fetch the apply log through its pre-authenticated `log-read-url`
    async fn logs(&self, apply_id: &str) -> Result<String>;
}
