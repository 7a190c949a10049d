//! JSON:API document types shared by all resources

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// To-one relationship: `{"data": {"id": "...", "type": "..."}}`
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RelationshipData {
    pub data: Option<RelationshipId>,
}

impl RelationshipData {
    /// ID of the related resource, if any
    pub fn id(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.id.as_str())
    }
}

/// To-many relationship: `{"data": [{"id": "...", "type": "..."}]}`
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RelationshipList {
    pub data: Option<Vec<RelationshipId>>,
}

impl RelationshipList {
    /// IDs of the related resources
    pub fn ids(&self) -> Vec<&str> {
        self.data
            .as_ref()
            .map(|items| items.iter().map(|d| d.id.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Relationship ID reference
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RelationshipId {
    pub id: String,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
}

impl RelationshipId {
    pub fn new(rel_type: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            rel_type: Some(rel_type.to_string()),
        }
    }
}

/// Request body for the `/relationships/*` endpoints
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RelationshipDocument {
    pub data: Vec<RelationshipId>,
}

impl RelationshipDocument {
    pub fn new(rel_type: &str, ids: &[String]) -> Self {
        Self {
            data: ids.iter().map(|id| RelationshipId::new(rel_type, id)).collect(),
        }
    }
}

/// Request envelope: `{"data": {"type", "id"?, "attributes"?, "relationships"?}}`
#[derive(Serialize, Debug, Clone)]
pub struct Document<A> {
    pub data: ResourceObject<A>,
}

/// Primary data of a request document
#[derive(Serialize, Debug, Clone)]
pub struct ResourceObject<A> {
    #[serde(rename = "type")]
    pub resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<A>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<&'static str, serde_json::Value>,
}

impl<A: Serialize> Document<A> {
    /// Start a document for the given resource type
    pub fn new(resource_type: &'static str, attributes: A) -> Self {
        Self {
            data: ResourceObject {
                resource_type,
                id: None,
                attributes: Some(attributes),
                relationships: BTreeMap::new(),
            },
        }
    }

    /// Set the primary resource ID
    pub fn with_id(mut self, id: &str) -> Self {
        self.data.id = Some(id.to_string());
        self
    }

    /// Add a to-one relationship if `id` is present
    pub fn with_relationship(
        mut self,
        name: &'static str,
        rel_type: &str,
        id: Option<&str>,
    ) -> Self {
        if let Some(id) = id {
            self.data.relationships.insert(
                name,
                serde_json::json!({ "data": { "type": rel_type, "id": id } }),
            );
        }
        self
    }

    /// Add a to-many relationship if `ids` is not empty
    pub fn with_relationships(
        mut self,
        name: &'static str,
        rel_type: &str,
        ids: &[String],
    ) -> Self {
        if !ids.is_empty() {
            let data: Vec<serde_json::Value> = ids
                .iter()
                .map(|id| serde_json::json!({ "type": rel_type, "id": id }))
                .collect();
            self.data
                .relationships
                .insert(name, serde_json::json!({ "data": data }));
        }
        self
    }
}

/// Error document: `{"errors": [{"status", "title", "detail"}]}`
#[derive(Deserialize, Debug, Default)]
pub struct ApiErrorDocument {
    #[serde(default)]
    pub errors: Vec<ApiErrorObject>,
}

/// Single JSON:API error object
#[derive(Deserialize, Debug, Clone)]
pub struct ApiErrorObject {
    pub status: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
}

impl ApiErrorObject {
    fn summary(&self) -> Option<String> {
        match (self.title.as_deref(), self.detail.as_deref()) {
            (Some(title), Some(detail)) if !detail.is_empty() && title != detail => {
                Some(format!("{}\n\n{}", title, detail))
            }
            (_, Some(detail)) if !detail.is_empty() => Some(detail.to_string()),
            (Some(title), _) if !title.is_empty() => Some(title.to_string()),
            _ => None,
        }
    }
}

/// Summarize an error response body
///
/// Joins every error's title and detail; falls back to the status text
/// when the body is not a JSON:API error document.
pub fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    let parsed: ApiErrorDocument = serde_json::from_str(body).unwrap_or_default();
    let messages: Vec<String> = parsed.errors.iter().filter_map(|e| e.summary()).collect();
    if messages.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string()
    } else {
        messages.join("\n")
    }
}
