//! Team API operations

use async_trait::async_trait;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::require_id;
use crate::hcp::jsonapi::Document;
use crate::hcp::TfeClient;

use super::models::{Team, TeamCreateOptions, TeamList, TeamListOptions, TeamUpdateOptions};
use super::Teams;

/// HTTP implementation of [`Teams`]
#[derive(Clone, Debug)]
pub struct TeamsApi {
    client: TfeClient,
}

impl TfeClient {
    /// Team operations
    pub fn teams(&self) -> TeamsApi {
        TeamsApi {
            client: self.clone(),
        }
    }
}

fn org_teams_path(organization: &str) -> String {
    format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::TEAMS)
}

fn team_path(team_id: &str) -> String {
    format!("/{}/{}", api::TEAMS, team_id)
}

#[async_trait]
impl Teams for TeamsApi {
    async fn list(&self, organization: &str, options: &TeamListOptions) -> Result<TeamList> {
        require_id(organization, "organization")?;
        self.client
            .fetch_page(
                &org_teams_path(organization),
                &options.to_query(),
                &format!("teams for organization '{}'", organization),
            )
            .await
    }

    async fn create(&self, organization: &str, options: TeamCreateOptions) -> Result<Team> {
        require_id(organization, "organization")?;
        options.validate()?;
        let body = Document::new("teams", &options);
        self.client
            .create_resource(&org_teams_path(organization), &body, "team")
            .await
    }

    async fn read(&self, team_id: &str) -> Result<Team> {
        require_id(team_id, "team ID")?;
        self.client
            .fetch_resource(&team_path(team_id), &format!("team '{}'", team_id))
            .await
    }

    async fn update(&self, team_id: &str, options: TeamUpdateOptions) -> Result<Team> {
        require_id(team_id, "team ID")?;
        options.validate()?;
        let body = Document::new("teams", &options);
        self.client
            .update_resource(&team_path(team_id), &body, &format!("team '{}'", team_id))
            .await
    }

    async fn delete(&self, team_id: &str) -> Result<()> {
        require_id(team_id, "team ID")?;
        self.client
            .delete_resource(&team_path(team_id), &format!("team '{}'", team_id))
            .await
    }
}
