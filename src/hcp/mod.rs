//! TFE API client module
//!
//! One submodule per API resource. Each exposes a trait describing the
//! operations, an HTTP implementation reached through an accessor on
//! [`TfeClient`], and the models and option structs the operations use.

mod client;
pub(crate) mod credentials;
pub mod helpers;
pub mod jsonapi;
mod meta;
mod retry;
pub mod traits;

pub mod agent_pools;
pub mod agents;
pub mod applies;
pub mod configuration_versions;
pub mod oauth_clients;
pub mod org_memberships;
pub mod organizations;
pub mod plans;
pub mod policy_sets;
pub mod projects;
pub mod runs;
pub mod state_versions;
pub mod team_projects;
pub mod teams;
pub mod users;
pub mod variables;
pub mod workspaces;

use serde::{Deserialize, Serialize};

pub use client::{TfeClient, USER_AGENT};
pub use credentials::TokenResolver;
pub use meta::ApiMetadata;
pub use retry::RATE_LIMIT_RESET_HEADER;
pub use traits::{ListPage, PaginatedResponse, TfeResource};

pub use agent_pools::{AgentPool, AgentPools};
pub use agents::{Agent, Agents};
pub use applies::{Applies, Apply};
pub use configuration_versions::{ConfigurationVersion, ConfigurationVersions};
pub use oauth_clients::{OAuthClient, OAuthClients};
pub use org_memberships::{OrganizationMembership, OrganizationMemberships};
pub use organizations::{Organization, Organizations};
pub use plans::{Plan, Plans};
pub use policy_sets::{PolicySet, PolicySets};
pub use projects::{Project, Projects};
pub use runs::{Run, RunStatus, Runs};
pub use state_versions::{StateVersion, StateVersions};
pub use team_projects::{TeamProjectAccess, TeamProjectAccesses};
pub use teams::{Team, Teams};
pub use users::{User, Users};
pub use variables::{Variable, Variables};
pub use workspaces::{Workspace, Workspaces};

/// Pagination metadata from TFE API (shared across resources)
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct PaginationMeta {
    pub pagination: Option<Pagination>,
}

/// Pagination details
///
/// `total-pages` and `total-count` are left out by a few endpoints, such as
/// organization-wide run listings.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct Pagination {
    #[serde(rename = "current-page", default)]
    pub current_page: u32,
    #[serde(rename = "prev-page", default)]
    pub prev_page: Option<u32>,
    #[serde(rename = "next-page", default)]
    pub next_page: Option<u32>,
    #[serde(rename = "total-pages", default)]
    pub total_pages: Option<u32>,
    #[serde(rename = "total-count", default)]
    pub total_count: Option<u32>,
}

/// Page selection shared by all list operations
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListOptions {
    /// `page[number]`, 1-based
    pub page_number: Option<u32>,
    /// `page[size]`, at most 100
    pub page_size: Option<u32>,
}

impl ListOptions {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
        }
    }
}
