//! Variable API operations

use async_trait::async_trait;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::{require_id, Query};
use crate::hcp::jsonapi::Document;
use crate::hcp::{ListOptions, TfeClient};

use super::models::{Variable, VariableCreateOptions, VariableList, VariableUpdateOptions};
use super::Variables;

/// HTTP implementation of [`Variables`]
#[derive(Clone, Debug)]
pub struct VariablesApi {
    client: TfeClient,
}

impl TfeClient {
    /// Workspace variable operations
    pub fn variables(&self) -> VariablesApi {
        VariablesApi {
            client: self.clone(),
        }
    }
}

fn vars_path(workspace_id: &str) -> String {
    format!("/{}/{}/{}", api::WORKSPACES, workspace_id, api::VARS)
}

fn var_path(workspace_id: &str, variable_id: &str) -> String {
    format!("{}/{}", vars_path(workspace_id), variable_id)
}

fn validate_ids(workspace_id: &str, variable_id: &str) -> Result<()> {
    require_id(workspace_id, "workspace ID")?;
    require_id(variable_id, "variable ID")
}

#[async_trait]
impl Variables for VariablesApi {
    async fn list(&self, workspace_id: &str, options: &ListOptions) -> Result<VariableList> {
        require_id(workspace_id, "workspace ID")?;
        let mut query = Query::new();
        query.page(options);
        self.client
            .fetch_page(
                &vars_path(workspace_id),
                &query,
                &format!("variables for workspace '{}'", workspace_id),
            )
            .await
    }

    async fn create(
        &self,
        workspace_id: &str,
        options: VariableCreateOptions,
    ) -> Result<Variable> {
        require_id(workspace_id, "workspace ID")?;
        options.validate()?;
        let body = Document::new("vars", &options);
        self.client
            .create_resource(&vars_path(workspace_id), &body, "variable")
            .await
    }

    async fn read(&self, workspace_id: &str, variable_id: &str) -> Result<Variable> {
        validate_ids(workspace_id, variable_id)?;
        self.client
            .fetch_resource(
                &var_path(workspace_id, variable_id),
                &format!("variable '{}'", variable_id),
            )
            .await
    }

    async fn update(
        &self,
        workspace_id: &str,
        variable_id: &str,
        options: VariableUpdateOptions,
    ) -> Result<Variable> {
        validate_ids(workspace_id, variable_id)?;
        options.validate()?;
        let body = Document::new("vars", &options).with_id(variable_id);
        self.client
            .update_resource(
                &var_path(workspace_id, variable_id),
                &body,
                &format!("variable '{}'", variable_id),
            )
            .await
    }

    async fn delete(&self, workspace_id: &str, variable_id: &str) -> Result<()> {
        validate_ids(workspace_id, variable_id)?;
        self.client
            .delete_resource(
                &var_path(workspace_id, variable_id),
                &format!("variable '{}'", variable_id),
            )
            .await
    }
}
