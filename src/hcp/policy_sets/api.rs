//! Policy set API operations

use async_trait::async_trait;
use reqwest::Method;

use crate::config::api;
use crate::error::Result;
use crate::hcp::helpers::{require_id, require_ids};
use crate::hcp::jsonapi::{Document, RelationshipDocument};
use crate::hcp::TfeClient;

use super::models::{
    PolicySet, PolicySetCreateOptions, PolicySetList, PolicySetListOptions, PolicySetUpdateOptions,
};
use super::PolicySets;

/// HTTP implementation of [`PolicySets`]
#[derive(Clone, Debug)]
pub struct PolicySetsApi {
    client: TfeClient,
}

impl TfeClient {
    /// Policy set operations
    pub fn policy_sets(&self) -> PolicySetsApi {
        PolicySetsApi {
            client: self.clone(),
        }
    }
}

fn org_policy_sets_path(organization: &str) -> String {
    format!("/{}/{}/{}", api::ORGANIZATIONS, organization, api::POLICY_SETS)
}

fn policy_set_path(policy_set_id: &str) -> String {
    format!("/{}/{}", api::POLICY_SETS, policy_set_id)
}

/// Which side of a policy set attachment is changed
#[derive(Debug, Clone, Copy)]
enum Attachment {
    Workspaces,
    Projects,
}

impl Attachment {
    fn resource_type(self) -> &'static str {
        match self {
            Attachment::Workspaces => "workspaces",
            Attachment::Projects => "projects",
        }
    }

    fn id_label(self) -> &'static str {
        match self {
            Attachment::Workspaces => "workspace ID",
            Attachment::Projects => "project ID",
        }
    }
}

impl PolicySetsApi {
    async fn change_attachment(
        &self,
        method: Method,
        policy_set_id: &str,
        attachment: Attachment,
        ids: &[String],
    ) -> Result<()> {
        require_id(policy_set_id, "policy set ID")?;
        require_ids(ids, attachment.id_label())?;
        let body = RelationshipDocument::new(attachment.resource_type(), ids);
        self.client
            .send_without_result(
                method,
                &format!(
                    "{}/relationships/{}",
                    policy_set_path(policy_set_id),
                    attachment.resource_type()
                ),
                Some(&body),
                &format!("policy set '{}'", policy_set_id),
            )
            .await
    }
}

#[async_trait]
impl PolicySets for PolicySetsApi {
    async fn list(
        &self,
        organization: &str,
        options: &PolicySetListOptions,
    ) -> Result<PolicySetList> {
        require_id(organization, "organization")?;
        self.client
            .fetch_page(
                &org_policy_sets_path(organization),
                &options.to_query(),
                &format!("policy sets for organization '{}'", organization),
            )
            .await
    }

    async fn create(
        &self,
        organization: &str,
        options: PolicySetCreateOptions,
    ) -> Result<PolicySet> {
        require_id(organization, "organization")?;
        options.validate()?;
        self.client
            .create_resource(
                &org_policy_sets_path(organization),
                &options.to_document(),
                "policy set",
            )
            .await
    }

    async fn read(&self, policy_set_id: &str) -> Result<PolicySet> {
        require_id(policy_set_id, "policy set ID")?;
        self.client
            .fetch_resource(
                &policy_set_path(policy_set_id),
                &format!("policy set '{}'", policy_set_id),
            )
            .await
    }

    async fn update(
        &self,
        policy_set_id: &str,
        options: PolicySetUpdateOptions,
    ) -> Result<PolicySet> {
        require_id(policy_set_id, "policy set ID")?;
        options.validate()?;
        let body = Document::new("policy-sets", &options).with_id(policy_set_id);
        self.client
            .update_resource(
                &policy_set_path(policy_set_id),
                &body,
                &format!("policy set '{}'", policy_set_id),
            )
            .await
    }

    async fn delete(&self, policy_set_id: &str) -> Result<()> {
        require_id(policy_set_id, "policy set ID")?;
        self.client
            .delete_resource(
                &policy_set_path(policy_set_id),
                &format!("policy set '{}'", policy_set_id),
            )
            .await
    }

    async fn add_workspaces(&self, policy_set_id: &str, workspace_ids: &[String]) -> Result<()> {
        self.change_attachment(
            Method::POST,
            policy_set_id,
            Attachment::Workspaces,
            workspace_ids,
        )
        .await
    }

    async fn remove_workspaces(
        &self,
        policy_set_id: &str,
        workspace_ids: &[String],
    ) -> Result<()> {
        self.change_attachment(
            Method::DELETE,
            policy_set_id,
            Attachment::Workspaces,
            workspace_ids,
        )
        .await
    }

    async fn add_projects(&self, policy_set_id: &str, project_ids: &[String]) -> Result<()> {
        self.change_attachment(Method::POST, policy_set_id, Attachment::Projects, project_ids)
            .await
    }

    async fn remove_projects(&self, policy_set_id: &str, project_ids: &[String]) -> Result<()> {
        self.change_attachment(
            Method::DELETE,
            policy_set_id,
            Attachment::Projects,
            project_ids,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcp::policy_sets::PolicyKind;
    use crate::hcp::TfeResource;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn policy_set_json(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "policy-sets",
            "attributes": {"name": name, "global": false, "kind": "sentinel", "policy-count": 2}
        })
    }

    #[tokio::test]
    async fn test_list_policy_sets() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/organizations/my-org/policy-sets"))
            .and(query_param("filter[kind]", "sentinel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [policy_set_json("polset-1", "security")],
                "meta": {"pagination": {"current-page": 1, "total-pages": 1, "total-count": 1}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = PolicySetListOptions {
            kind: Some(PolicyKind::Sentinel),
            ..Default::default()
        };
        let page = client
            .policy_sets()
            .list("my-org", &options)
            .await
            .unwrap();
        assert_eq!(page.items[0].name(), "security");
        assert_eq!(page.items[0].attributes.policy_count, Some(2));
    }

    #[tokio::test]
    async fn test_create_update_delete_policy_set() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/organizations/my-org/policy-sets"))
            .and(body_json(serde_json::json!({
                "data": {
                    "type": "policy-sets",
                    "attributes": {"name": "security", "global": true}
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": policy_set_json("polset-1", "security")
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/policy-sets/polset-1"))
            .and(body_json(serde_json::json!({
                "data": {
                    "type": "policy-sets",
                    "id": "polset-1",
                    "attributes": {"description": "baseline rules"}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": policy_set_json("polset-1", "security")
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/policy-sets/polset-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sets = client.policy_sets();
        let options = PolicySetCreateOptions {
            global: Some(true),
            ..PolicySetCreateOptions::new("security")
        };
        sets.create("my-org", options).await.unwrap();
        let update = PolicySetUpdateOptions {
            description: Some("baseline rules".to_string()),
            ..Default::default()
        };
        sets.update("polset-1", update).await.unwrap();
        sets.delete("polset-1").await.unwrap();
    }

    #[tokio::test]
    async fn test_attach_and_detach() {
        let mock_server = MockServer::start().await;
        let client = TfeClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/policy-sets/polset-1/relationships/workspaces"))
            .and(body_json(serde_json::json!({
                "data": [
                    {"id": "ws-1", "type": "workspaces"},
                    {"id": "ws-2", "type": "workspaces"}
                ]
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/policy-sets/polset-1/relationships/projects"))
            .and(body_json(serde_json::json!({
                "data": [{"id": "prj-1", "type": "projects"}]
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sets = client.policy_sets();
        sets.add_workspaces("polset-1", &["ws-1".to_string(), "ws-2".to_string()])
            .await
            .unwrap();
        sets.remove_projects("polset-1", &["prj-1".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_attach_requires_ids() {
        let client = TfeClient::test_client("http://127.0.0.1:1");
        let err = client
            .policy_sets()
            .add_projects("polset-1", &[])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "must provide at least one project ID");

        let err = client
            .policy_sets()
            .remove_workspaces("polset-1", &["bad id".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for workspace ID");
    }
}
