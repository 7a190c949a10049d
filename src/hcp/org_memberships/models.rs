//! Organization membership data models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hcp::helpers::{require_ids, require_string, Query};
use crate::hcp::jsonapi::{Document, RelationshipData, RelationshipList};
use crate::hcp::traits::{ListPage, TfeResource};
use crate::hcp::ListOptions;

/// One page of organization memberships
pub type OrganizationMembershipList = ListPage<OrganizationMembership>;

/// Whether the invitation was accepted
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Invited,
    Active,
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MembershipStatus::Invited => "invited",
            MembershipStatus::Active => "active",
        })
    }
}

/// Organization membership data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OrganizationMembership {
    pub id: String,
    pub attributes: Option<OrganizationMembershipAttributes>,
    pub relationships: Option<OrganizationMembershipRelationships>,
}

/// Organization membership attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct OrganizationMembershipAttributes {
    pub email: Option<String>,
    pub status: Option<MembershipStatus>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
}

/// Organization membership relationships
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct OrganizationMembershipRelationships {
    pub user: Option<RelationshipData>,
    pub organization: Option<RelationshipData>,
    pub teams: Option<RelationshipList>,
}

impl OrganizationMembership {
    fn attrs(&self) -> Option<&OrganizationMembershipAttributes> {
        self.attributes.as_ref()
    }

    pub fn email(&self) -> &str {
        self.attrs().and_then(|a| a.email.as_deref()).unwrap_or("")
    }

    pub fn status(&self) -> Option<MembershipStatus> {
        self.attrs().and_then(|a| a.status)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.user.as_ref())
            .and_then(|u| u.id())
    }

    pub fn team_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.teams.as_ref())
            .map(RelationshipList::ids)
            .unwrap_or_default()
    }
}

impl TfeResource for OrganizationMembership {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.email()
    }
}

/// Filters for listing memberships
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationMembershipListOptions {
    pub list: ListOptions,
    /// Exact email addresses (`filter[email]`)
    pub emails: Vec<String>,
    pub status: Option<MembershipStatus>,
    /// Partial match on user name or email (`q`)
    pub query: Option<String>,
}

impl OrganizationMembershipListOptions {
    pub(crate) fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .page(&self.list)
            .push_list("filter[email]", &self.emails)
            .push_opt("filter[status]", self.status)
            .push_opt("q", self.query.as_deref());
        query
    }
}

/// Options for inviting a user
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct OrganizationMembershipCreateOptions {
    pub email: String,
    /// Teams the user joins once the invitation is accepted
    #[serde(skip)]
    pub team_ids: Vec<String>,
}

impl OrganizationMembershipCreateOptions {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            team_ids: Vec::new(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_string(Some(self.email.as_str()), "email")?;
        if !self.team_ids.is_empty() {
            require_ids(&self.team_ids, "team ID")?;
        }
        Ok(())
    }

    pub(crate) fn to_document(&self) -> Document<&Self> {
        Document::new("organization-memberships", self).with_relationships(
            "teams",
            "teams",
            &self.team_ids,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_membership() {
        let membership: OrganizationMembership = serde_json::from_value(serde_json::json!({
            "id": "ou-1",
            "type": "organization-memberships",
            "attributes": {"email": "dev@example.com", "status": "invited"},
            "relationships": {
                "user": {"data": {"id": "user-1", "type": "users"}},
                "teams": {"data": [{"id": "team-1", "type": "teams"}]}
            }
        }))
        .unwrap();
        assert_eq!(membership.name(), "dev@example.com");
        assert_eq!(membership.status(), Some(MembershipStatus::Invited));
        assert_eq!(membership.user_id(), Some("user-1"));
        assert_eq!(membership.team_ids(), vec!["team-1"]);
    }

    #[test]
    fn test_list_query() {
        let opts = OrganizationMembershipListOptions {
            emails: vec!["a@example.com".to_string()],
            status: Some(MembershipStatus::Active),
            ..Default::default()
        };
        assert_eq!(
            opts.to_query().append_to("/m"),
            "/m?filter[email]=a%40example.com&filter[status]=active"
        );
    }

    #[test]
    fn test_create_validation_and_document() {
        assert_eq!(
            OrganizationMembershipCreateOptions::new("")
                .validate()
                .unwrap_err()
                .to_string(),
            "email is required"
        );

        let opts = OrganizationMembershipCreateOptions {
            team_ids: vec!["team-1".to_string()],
            ..OrganizationMembershipCreateOptions::new("dev@example.com")
        };
        assert!(opts.validate().is_ok());
        assert_eq!(
            serde_json::to_value(opts.to_document()).unwrap(),
            serde_json::json!({
                "data": {
                    "type": "organization-memberships",
                    "attributes": {"email": "dev@example.com"},
                    "relationships": {
                        "teams": {"data": [{"type": "teams", "id": "team-1"}]}
                    }
                }
            })
        );
    }
}
