//! Project API operations

use async_trait::async_trait;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::require_id;
use crate::hcp::jsonapi::Document;
use crate::hcp::traits::ApiListResponse;
use crate::hcp::TfeClient;

use super::models::{
    Project, ProjectCreateOptions, ProjectList, ProjectListOptions, ProjectUpdateOptions,
};
use super::Projects;

/// HTTP implementation of [`Projects`]
#[derive(Clone, Debug)]
pub struct ProjectsApi {
    client: TfeClient,
}

impl TfeClient {
    /// Project operations
    pub fn projects(&self) -> ProjectsApi {
        ProjectsApi {
            client: self.clone(),
        }
    }
}

fn org_projects_path(organization: &str) -> String {
    format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::PROJECTS)
}

fn project_path(project_id: &str) -> String {
    format!("/{}/{}", api::PROJECTS, project_id)
}

#[async_trait]
impl Projects for ProjectsApi {
    async fn list(&self, organization: &str, options: &ProjectListOptions) -> Result<ProjectList> {
        require_id(organization, "organization")?;
        self.client
            .fetch_page(
                &org_projects_path(organization),
                &options.to_query(),
                &format!("projects for organization '{}'", organization),
            )
            .await
    }

    async fn list_all(
        &self,
        organization: &str,
        options: &ProjectListOptions,
    ) -> Result<Vec<Project>> {
        require_id(organization, "organization")?;
        let path = options
            .filter_query()
            .append_to(&org_projects_path(organization));
        self.client
            .fetch_all_pages::<Project, ApiListResponse<Project>>(
                &path,
                &format!("projects for organization '{}'", organization),
            )
            .await
    }

    async fn create(&self, organization: &str, options: ProjectCreateOptions) -> Result<Project> {
        require_id(organization, "organization")?;
        options.validate()?;
        let body = Document::new("projects", &options);
        self.client
            .create_resource(&org_projects_path(organization), &body, "project")
            .await
    }

    async fn read(&self, project_id: &str) -> Result<Project> {
        require_id(project_id, "project ID")?;
        self.client
            .fetch_resource(
                &project_path(project_id),
                &format!("project '{}'", project_id),
            )
            .await
    }

    async fn update(&self, project_id: &str, options: ProjectUpdateOptions) -> Result<Project> {
        require_id(project_id, "project ID")?;
        options.validate()?;
        let body = Document::new("projects", &options);
        self.client
            .update_resource(
                &project_path(project_id),
                &body,
                &format!("project '{}'", project_id),
            )
            .await
    }

    async fn delete(&self, project_id: &str) -> Result<()> {
        require_id(project_id, "project ID")?;
        self.client
            .delete_resource(
                &project_path(project_id),
                &format!("project '{}'", project_id),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use crate::hcp::{ListOptions, TfeResource};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn project_json(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "projects",
            "attributes": {
                "name": name,
                "description": null
            }
        })
    }

    #[tokio::test]
    async fn test_list_projects_with_search() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/projects"))
            .and(query_param("q", "infra"))
            .and(query_param("page[size]", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [project_json("prj-1", "infra-core")],
                "meta": {"pagination": {"current-page": 1, "total-pages": 1, "total-count": 1}}
            })))
            .mount(&mock_server)
            .await;

        let options = ProjectListOptions {
            list: ListOptions {
                page_number: None,
                page_size: Some(10),
            },
            query: Some("infra".to_string()),
            ..Default::default()
        };
        let page = client.projects().list("my-org", &options).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name(), "infra-core");
    }

    #[tokio::test]
    async fn test_list_all_projects() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/projects"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [project_json("prj-1", "a")],
                "meta": {"pagination": {"current-page": 1, "total-pages": 2, "total-count": 2}}
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/organizations/my-org/projects"))
            .and(query_param("page[number]", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [project_json("prj-2", "b")],
                "meta": {"pagination": {"current-page": 2, "total-pages": 2, "total-count": 2}}
            })))
            .mount(&mock_server)
            .await;

        let projects = client
            .projects()
            .list_all("my-org", &ProjectListOptions::default())
            .await
            .unwrap();
        let ids: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["prj-1", "prj-2"]);
    }

    #[tokio::test]
    async fn test_list_projects_api_error() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/projects"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = client
            .projects()
            .list("my-org", &ProjectListOptions::default())
            .await;
        match result {
            Err(TfeError::Api { status, .. }) => assert_eq!(status, 500),
            other => panic!("Expected TfeError::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_project() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/organizations/my-org/projects"))
            .and(body_json(serde_json::json!({
                "data": {
                    "type": "projects",
                    "attributes": {"name": "infra", "description": "core"}
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": project_json("prj-new", "infra")
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = ProjectCreateOptions {
            name: "infra".to_string(),
            description: Some("core".to_string()),
        };
        let project = client.projects().create("my-org", options).await.unwrap();
        assert_eq!(project.id, "prj-new");
    }

    #[tokio::test]
    async fn test_read_project_not_found() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/projects/prj-missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let err = client.projects().read("prj-missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_and_delete_project() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("PATCH"))
            .and(path("/projects/prj-1"))
            .and(body_json(serde_json::json!({
                "data": {"type": "projects", "attributes": {"name": "renamed"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": project_json("prj-1", "renamed")
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/projects/prj-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = ProjectUpdateOptions {
            name: Some("renamed".to_string()),
            ..Default::default()
        };
        let project = client.projects().update("prj-1", options).await.unwrap();
        assert_eq!(project.name(), "renamed");
        client.projects().delete("prj-1").await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_project_id() {
        let client = TfeClient::test_client("http://127.0.0.1:1");
        let err = client.projects().read("prj/../x").await.unwrap_err();
        assert_eq!(err.to_string(), "invalid value for project ID");
    }
}
