//! Workspace API operations

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use log::debug;
use reqwest::Method;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::client::check_response;
use crate::hcp::helpers::{require_id, require_ids, Query};
use crate::hcp::jsonapi::Document;
use crate::hcp::traits::{ApiListResponse, ApiResponse};
use crate::hcp::{ListOptions, TfeClient};

use super::models::{
    tags_document, TagList, TagRef, Workspace, WorkspaceCreateOptions, WorkspaceList,
    WorkspaceListOptions, WorkspaceLockOptions, WorkspaceUpdateOptions,
};
use super::Workspaces;

/// HTTP implementation of [`Workspaces`]
#[derive(Clone, Debug)]
pub struct WorkspacesApi {
    client: TfeClient,
}

impl TfeClient {
    /// Workspace operations
    pub fn workspaces(&self) -> WorkspacesApi {
        WorkspacesApi {
            client: self.clone(),
        }
    }
}

fn org_workspaces_path(organization: &str) -> String {
    format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::WORKSPACES)
}

fn named_workspace_path(organization: &str, workspace: &str) -> String {
    format!("{}/{}", org_workspaces_path(organization), workspace)
}

fn workspace_path(workspace_id: &str) -> String {
    format!("/{}/{}", api::WORKSPACES, workspace_id)
}

fn validate_name(organization: &str, workspace: &str) -> Result<()> {
    require_id(organization, "organization")?;
    require_id(workspace, "workspace name")
}

/// Which lock action is being performed; decides how a 409 is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockAction {
    Lock,
    Unlock,
    ForceUnlock,
}

impl LockAction {
    fn path_segment(self) -> &'static str {
        match self {
            LockAction::Lock => "lock",
            LockAction::Unlock => "unlock",
            LockAction::ForceUnlock => "force-unlock",
        }
    }

    fn conflict_error(self, body: &str) -> TfeError {
        match self {
            LockAction::Lock => TfeError::WorkspaceLocked,
            LockAction::Unlock | LockAction::ForceUnlock
                if body.to_ascii_lowercase().contains("locked by run") =>
            {
                TfeError::WorkspaceLockedByRun
            }
            LockAction::Unlock | LockAction::ForceUnlock => TfeError::WorkspaceNotLocked,
        }
    }
}

impl WorkspacesApi {
    fn document<A: serde::Serialize>(attributes: A, project_id: Option<&str>) -> Document<A> {
        Document::new("workspaces", attributes).with_relationship("project", "projects", project_id)
    }

    async fn lock_action(
        &self,
        workspace_id: &str,
        action: LockAction,
        options: Option<&WorkspaceLockOptions>,
    ) -> Result<Workspace> {
        require_id(workspace_id, "workspace ID")?;
        let path = format!(
            "{}/actions/{}",
            workspace_path(workspace_id),
            action.path_segment()
        );
        let label = format!("workspace '{}'", workspace_id);

        let mut builder = self.client.request(Method::POST, &path);
        if let Some(options) = options {
            builder = builder.body(serde_json::to_vec(options)?);
        }
        let response = self.client.send(builder).await?;

        if response.status().as_u16() == 409 {
            let body = response.text().await.unwrap_or_default();
            debug!("{} of {} conflicted: {}", action.path_segment(), label, body);
            return Err(action.conflict_error(&body));
        }

        let response = check_response(response, &label).await?;
        let wrapper: ApiResponse<Workspace> =
            self.client.parse_api_response(response, &label).await?;
        Ok(wrapper.data)
    }

    async fn change_tags(&self, method: Method, workspace_id: &str, tags: &[TagRef]) -> Result<()> {
        require_id(workspace_id, "workspace ID")?;
        let body = tags_document(tags)?;
        self.client
            .send_without_result(
                method,
                &format!("{}/relationships/tags", workspace_path(workspace_id)),
                Some(&body),
                &format!("tags for workspace '{}'", workspace_id),
            )
            .await
    }
}

#[async_trait]
impl Workspaces for WorkspacesApi {
    async fn list(
        &self,
        organization: &str,
        options: &WorkspaceListOptions,
    ) -> Result<WorkspaceList> {
        require_id(organization, "organization")?;
        options.validate()?;
        self.client
            .fetch_page(
                &org_workspaces_path(organization),
                &options.to_query(),
                &format!("workspaces for organization '{}'", organization),
            )
            .await
    }

    async fn list_all(
        &self,
        organization: &str,
        options: &WorkspaceListOptions,
    ) -> Result<Vec<Workspace>> {
        require_id(organization, "organization")?;
        options.validate()?;
        let path = options
            .filter_query()
            .append_to(&org_workspaces_path(organization));
        self.client
            .fetch_all_pages::<Workspace, ApiListResponse<Workspace>>(
                &path,
                &format!("workspaces for organization '{}'", organization),
            )
            .await
    }

    async fn create(
        &self,
        organization: &str,
        options: WorkspaceCreateOptions,
    ) -> Result<Workspace> {
        require_id(organization, "organization")?;
        options.validate()?;
        let body = Self::document(&options, options.project_id.as_deref());
        self.client
            .create_resource(&org_workspaces_path(organization), &body, "workspace")
            .await
    }

    async fn read(&self, organization: &str, workspace: &str) -> Result<Workspace> {
        validate_name(organization, workspace)?;
        self.client
            .fetch_resource(
                &named_workspace_path(organization, workspace),
                &format!(
                    "workspace '{}' in organization '{}'",
                    workspace, organization
                ),
            )
            .await
    }

    async fn read_by_id(&self, workspace_id: &str) -> Result<Workspace> {
        require_id(workspace_id, "workspace ID")?;
        self.client
            .fetch_resource(
                &workspace_path(workspace_id),
                &format!("workspace '{}'", workspace_id),
            )
            .await
    }

    async fn read_by_ids(&self, workspace_ids: &[String]) -> Result<Vec<Workspace>> {
        require_ids(workspace_ids, "workspace ID")?;
        let reads: Vec<_> = workspace_ids.iter().map(|id| self.read_by_id(id)).collect();
        let results: Vec<Result<Workspace>> = stream::iter(reads)
            .buffered(api::MAX_CONCURRENT_PAGE_REQUESTS)
            .collect()
            .await;

        let mut workspaces = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(ws) => workspaces.push(ws),
                Err(TfeError::NotFound(label)) => debug!("Skipping missing {}", label),
                Err(e) => return Err(e),
            }
        }
        Ok(workspaces)
    }

    async fn update(
        &self,
        organization: &str,
        workspace: &str,
        options: WorkspaceUpdateOptions,
    ) -> Result<Workspace> {
        validate_name(organization, workspace)?;
        options.validate()?;
        let body = Self::document(&options, options.project_id.as_deref());
        self.client
            .update_resource(
                &named_workspace_path(organization, workspace),
                &body,
                &format!(
                    "workspace '{}' in organization '{}'",
                    workspace, organization
                ),
            )
            .await
    }

    async fn update_by_id(
        &self,
        workspace_id: &str,
        options: WorkspaceUpdateOptions,
    ) -> Result<Workspace> {
        require_id(workspace_id, "workspace ID")?;
        options.validate()?;
        let body = Self::document(&options, options.project_id.as_deref());
        self.client
            .update_resource(
                &workspace_path(workspace_id),
                &body,
                &format!("workspace '{}'", workspace_id),
            )
            .await
    }

    async fn delete(&self, organization: &str, workspace: &str) -> Result<()> {
        validate_name(organization, workspace)?;
        self.client
            .delete_resource(
                &named_workspace_path(organization, workspace),
                &format!(
                    "workspace '{}' in organization '{}'",
                    workspace, organization
                ),
            )
            .await
    }

    async fn delete_by_id(&self, workspace_id: &str) -> Result<()> {
        require_id(workspace_id, "workspace ID")?;
        self.client
            .delete_resource(
                &workspace_path(workspace_id),
                &format!("workspace '{}'", workspace_id),
            )
            .await
    }

    async fn lock(&self, workspace_id: &str, options: WorkspaceLockOptions) -> Result<Workspace> {
        self.lock_action(workspace_id, LockAction::Lock, Some(&options))
            .await
    }

    async fn unlock(&self, workspace_id: &str) -> Result<Workspace> {
        self.lock_action(workspace_id, LockAction::Unlock, None)
            .await
    }

    async fn force_unlock(&self, workspace_id: &str) -> Result<Workspace> {
        self.lock_action(workspace_id, LockAction::ForceUnlock, None)
            .await
    }

    async fn list_tags(&self, workspace_id: &str, options: &ListOptions) -> Result<TagList> {
        require_id(workspace_id, "workspace ID")?;
        let mut query = Query::new();
        query.page(options);
        self.client
            .fetch_page(
                &format!("{}/relationships/tags", workspace_path(workspace_id)),
                &query,
                &format!("tags for workspace '{}'", workspace_id),
            )
            .await
    }

    async fn add_tags(&self, workspace_id: &str, tags: &[TagRef]) -> Result<()> {
        self.change_tags(Method::POST, workspace_id, tags).await
    }

    async fn remove_tags(&self, workspace_id: &str, tags: &[TagRef]) -> Result<()> {
        self.change_tags(Method::DELETE, workspace_id, tags).await
    }
}
