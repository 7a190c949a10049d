//! tfe - async client for the Terraform Cloud / Enterprise API
//!
//! Typed wrappers over the JSON:API endpoints of organizations, projects,
//! workspaces, runs and the other resources, with retries for rate limited
//! requests, automatic pagination helpers and in-memory mocks for tests.
//!
//! # Example
//!
//! ```no_run
//! use tfe::hcp::workspaces::WorkspaceListOptions;
//! use tfe::{Config, TfeClient, Workspaces};
//!
//! # async fn run() -> tfe::Result<()> {
//! let client = TfeClient::new(Config::from_env()?)?;
//! let workspaces = client
//!     .workspaces()
//!     .list_all("my-org", &WorkspaceListOptions::default())
//!     .await?;
//! for ws in workspaces {
//!     println!("{} {}", ws.id, ws.attributes.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod hcp;
pub mod mocks;

pub use config::Config;
pub use error::{Result, TfeError};
pub use hcp::{
    AgentPools, Agents, Applies, ApiMetadata, ConfigurationVersions, ListOptions, ListPage,
    OAuthClients, OrganizationMemberships, Organizations, Plans, PolicySets, Projects, Runs,
    StateVersions, TeamProjectAccesses, Teams, TfeClient, TfeResource, TokenResolver, Users,
    Variables, Workspaces,
};
