//! Team project access API operations

use async_trait::async_trait;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::{require_id, Query};
use crate::hcp::jsonapi::Document;
use crate::hcp::{ListOptions, TfeClient};

use super::models::{
    TeamProjectAccess, TeamProjectAccessAddOptions, TeamProjectAccessList,
    TeamProjectAccessUpdateOptions,
};
use super::TeamProjectAccesses;

/// HTTP implementation of [`TeamProjectAccesses`]
#[derive(Clone, Debug)]
pub struct TeamProjectAccessesApi {
    client: TfeClient,
}

impl TfeClient {
    /// Team project access operations
    pub fn team_project_access(&self) -> TeamProjectAccessesApi {
        TeamProjectAccessesApi {
            client: self.clone(),
        }
    }
}

fn access_path(access_id: &str) -> String {
    format!("/{}/{}", api::TEAM_PROJECTS, access_id)
}

#[async_trait]
impl TeamProjectAccesses for TeamProjectAccessesApi {
    async fn list(
        &self,
        project_id: &str,
        options: &ListOptions,
    ) -> Result<TeamProjectAccessList> {
        require_id(project_id, "project ID")?;
        let mut query = Query::new();
        query.push("filter[project][id]", project_id).page(options);
        self.client
            .fetch_page(
                &format!("/{}", api::TEAM_PROJECTS),
                &query,
                &format!("team-project access for project '{}'", project_id),
            )
            .await
    }

    async fn add(&self, options: TeamProjectAccessAddOptions) -> Result<TeamProjectAccess> {
        options.validate()?;
        self.client
            .create_resource(
                &format!("/{}", api::TEAM_PROJECTS),
                &options.to_document(),
                "team-project access",
            )
            .await
    }

    async fn read(&self, access_id: &str) -> Result<TeamProjectAccess> {
        require_id(access_id, "team-project access ID")?;
        self.client
            .fetch_resource(
                &access_path(access_id),
                &format!("team-project access '{}'", access_id),
            )
            .await
    }

    async fn update(
        &self,
        access_id: &str,
        options: TeamProjectAccessUpdateOptions,
    ) -> Result<TeamProjectAccess> {
        require_id(access_id, "team-project access ID")?;
        options.validate()?;
        let body = Document::new("team-projects", &options);
        self.client
            .update_resource(
                &access_path(access_id),
                &body,
                &format!("team-project access '{}'", access_id),
            )
            .await
    }

    async fn remove(&self, access_id: &str) -> Result<()> {
        require_id(access_id, "team-project access ID")?;
        self.client
            .delete_resource(
                &access_path(access_id),
                &format!("team-project access '{}'", access_id),
            )
            .await
    }
}
