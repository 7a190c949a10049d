//! Workspace variables

mod api;
mod models;

use async_trait::async_trait;

use crate::error::Result;
use crate::hcp::ListOptions;

pub use api::VariablesApi;
pub use models::{
    CategoryType, Variable, VariableAttributes, VariableCreateOptions, VariableList,
    VariableUpdateOptions,
};

/// Operations on the variables of a workspace
#[async_trait]
pub trait Variables: Send + Sync {
    /// List one page of a workspace's variables
    async fn list(&self, workspace_id: &str, options: &ListOptions) -> Result<VariableList>;

    /// Create a variable
    async fn create(&self, workspace_id: &str, options: VariableCreateOptions)
        -> Result<Variable>;

    /// Read a variable
    async fn read(&self, workspace_id: &str, variable_id: &str) -> Result<Variable>;

    /// Update a variable
    async fn update(
        &self,
        workspace_id: &str,
        variable_id: &str,
        options: VariableUpdateOptions,
    ) -> Result<Variable>;

    /// Delete a variable
    async fn delete(&self, workspace_id: &str, variable_id: &str) -> Result<()>;
}
