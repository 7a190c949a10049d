//! Project data models

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hcp::helpers::{require_string, Query};
use crate::hcp::jsonapi::RelationshipData;
use crate::hcp::traits::{ListPage, TfeResource};
use crate::hcp::ListOptions;

/// One page of projects
pub type ProjectList = ListPage<Project>;

/// Project data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub attributes: ProjectAttributes,
    pub relationships: Option<ProjectRelationships>,
}

/// Project attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectAttributes {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "workspace-count")]
    pub workspace_count: Option<u32>,
}

/// Project relationships from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectRelationships {
    pub organization: Option<RelationshipData>,
}

impl TfeResource for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Project {
    /// Get the project description
    pub fn description(&self) -> &str {
        self.attributes.description.as_deref().unwrap_or("")
    }

    /// Name of the owning organization
    pub fn organization(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.organization.as_ref())
            .and_then(|o| o.id())
    }
}

/// Filters for listing projects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectListOptions {
    pub list: ListOptions,
    /// Exact project name (`filter[names]`)
    pub name: Option<String>,
    /// Substring search on the name (`q`)
    pub query: Option<String>,
}

impl ProjectListOptions {
    /// Page selection followed by the filters
    pub(crate) fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.page(&self.list);
        self.push_filters(&mut query);
        query
    }

    /// Filters only, for walking every page
    pub(crate) fn filter_query(&self) -> Query {
        let mut query = Query::new();
        self.push_filters(&mut query);
        query
    }

    fn push_filters(&self, query: &mut Query) {
        query
            .push_opt("filter[names]", self.name.as_deref())
            .push_opt("q", self.query.as_deref());
    }
}

/// Options for creating a project
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectCreateOptions {
    /// Project name (required)
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_string(Some(self.name.as_str()), "name")
    }
}

/// Options for updating a project
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectUpdateOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => require_string(Some(name.as_str()), "name"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            project_type: Some("projects".to_string()),
            attributes: ProjectAttributes {
                name: name.to_string(),
                ..Default::default()
            },
            relationships: None,
        }
    }

    #[test]
    fn test_project_matches_by_id_or_name() {
        let prj = create_test_project("prj-123", "my-project");
        assert!(prj.matches("prj-123"));
        assert!(prj.matches("my-project"));
        assert!(!prj.matches("other"));
    }

    #[test]
    fn test_project_description_default() {
        let prj = create_test_project("prj-123", "my-project");
        assert_eq!(prj.description(), "");
        assert_eq!(prj.organization(), None);
    }

    #[test]
    fn test_deserialize_project() {
        let prj: Project = serde_json::from_value(serde_json::json!({
            "id": "prj-abc",
            "type": "projects",
            "attributes": {"name": "infra", "description": "core", "workspace-count": 4},
            "relationships": {"organization": {"data": {"id": "acme", "type": "organizations"}}}
        }))
        .unwrap();
        assert_eq!(prj.description(), "core");
        assert_eq!(prj.attributes.workspace_count, Some(4));
        assert_eq!(prj.organization(), Some("acme"));
    }

    #[test]
    fn test_list_options_query() {
        let opts = ProjectListOptions {
            list: ListOptions::new(1, 20),
            name: Some("infra".to_string()),
            query: Some("inf ra".to_string()),
        };
        assert_eq!(
            opts.to_query().append_to("/p"),
            "/p?page[number]=1&page[size]=20&filter[names]=infra&q=inf%20ra"
        );
    }

    #[test]
    fn test_create_requires_name() {
        assert!(ProjectCreateOptions::new("infra").validate().is_ok());
        assert_eq!(
            ProjectCreateOptions::default()
                .validate()
                .unwrap_err()
                .to_string(),
            "name is required"
        );
    }

    #[test]
    fn test_update_rejects_empty_name() {
        assert!(ProjectUpdateOptions::default().validate().is_ok());
        let opts = ProjectUpdateOptions {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }
}
