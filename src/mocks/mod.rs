//! In-memory stand-ins for the resource traits
//!
//! Each mock answers from per-method queues of results loaded up front with
//! `expect_<method>` and records every call it receives. A call with nothing
//! queued fails with [`TfeError::Mock`].
//!
//! ```
//! use tfe::hcp::Runs;
//! use tfe::mocks::MockRuns;
//!
//! # tokio_test_block(async {
//! let runs = MockRuns::new();
//! runs.expect_discard(Ok(()));
//! runs.discard("run-1", Default::default()).await.unwrap();
//! assert_eq!(runs.calls()[0].method, "discard");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

mod state;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::hcp::agent_pools::{
    AgentPool, AgentPoolCreateOptions, AgentPoolList, AgentPoolUpdateOptions, AgentPools,
};
use crate::hcp::agents::{Agent, AgentList, AgentListOptions, Agents};
use crate::hcp::applies::{Applies, Apply};
use crate::hcp::configuration_versions::{
    ConfigurationVersion, ConfigurationVersionCreateOptions, ConfigurationVersionList,
    ConfigurationVersions,
};
use crate::hcp::oauth_clients::{
    OAuthClient, OAuthClientCreateOptions, OAuthClientList, OAuthClientUpdateOptions,
    OAuthClients,
};
use crate::hcp::org_memberships::{
    OrganizationMembership, OrganizationMembershipCreateOptions, OrganizationMembershipList,
    OrganizationMembershipListOptions, OrganizationMemberships,
};
use crate::hcp::organizations::{
    Organization, OrganizationCreateOptions, OrganizationList, OrganizationUpdateOptions,
    Organizations,
};
use crate::hcp::plans::{Plan, Plans};
use crate::hcp::policy_sets::{
    PolicySet, PolicySetCreateOptions, PolicySetList, PolicySetListOptions,
    PolicySetUpdateOptions, PolicySets,
};
use crate::hcp::projects::{
    Project, ProjectCreateOptions, ProjectList, ProjectListOptions, ProjectUpdateOptions,
    Projects,
};
use crate::hcp::runs::{Run, RunActionOptions, RunCreateOptions, RunList, RunListOptions, Runs};
use crate::hcp::state_versions::{
    StateVersion, StateVersionCreateOptions, StateVersionList, StateVersionListOptions,
    StateVersions,
};
use crate::hcp::team_projects::{
    TeamProjectAccess, TeamProjectAccessAddOptions, TeamProjectAccessList,
    TeamProjectAccessUpdateOptions, TeamProjectAccesses,
};
use crate::hcp::teams::{Team, TeamCreateOptions, TeamList, TeamListOptions, TeamUpdateOptions, Teams};
use crate::hcp::users::{User, Users};
use crate::hcp::variables::{
    Variable, VariableCreateOptions, VariableList, VariableUpdateOptions, Variables,
};
use crate::hcp::workspaces::{
    TagList, TagRef, Workspace, WorkspaceCreateOptions, WorkspaceList, WorkspaceListOptions,
    WorkspaceLockOptions, WorkspaceUpdateOptions, Workspaces,
};
use crate::hcp::ListOptions;

pub use state::MockCall;
use state::MockState;

/// Declares a mock struct with one `expect_<method>` loader per trait method
macro_rules! mock {
    ($(#[$meta:meta])* $name:ident { $($expect:ident($method:literal) -> $ty:ty;)* }) => {
        $(#[$meta])*
        #[derive(Default, Clone)]
        pub struct $name {
            state: Arc<MockState>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Calls received so far, oldest first
            pub fn calls(&self) -> Vec<MockCall> {
                self.state.calls()
            }

            /// Number of queued results not consumed yet
            pub fn pending(&self) -> usize {
                self.state.pending()
            }

            $(
                #[doc = concat!("Queue the result of the next `", $method, "` call")]
                pub fn $expect(&self, result: Result<$ty>) -> &Self {
                    self.state.push($method, result);
                    self
                }
            )*

            fn answer<T: Send + 'static>(&self, method: &'static str, args: Vec<String>) -> Result<T> {
                self.state.answer(stringify!($name), method, args)
            }
        }
    };
}

fn debug(value: &impl std::fmt::Debug) -> String {
    format!("{:?}", value)
}

const REDACTED: &str = "***";

fn redact_sensitive(value: &mut Option<String>, sensitive: Option<bool>) {
    if sensitive == Some(true) && value.is_some() {
        *value = Some(REDACTED.to_string());
    }
}

mock! {
    /// Mock [`Organizations`]
    MockOrganizations {
        expect_list("list") -> OrganizationList;
        expect_create("create") -> Organization;
        expect_read("read") -> Organization;
        expect_update("update") -> Organization;
        expect_delete("delete") -> ();
    }
}

#[async_trait]
impl Organizations for MockOrganizations {
    async fn list(&self, options: &ListOptions) -> Result<OrganizationList> {
        self.answer("list", vec![debug(options)])
    }

    async fn create(&self, options: OrganizationCreateOptions) -> Result<Organization> {
        self.answer("create", vec![debug(&options)])
    }

    async fn read(&self, organization: &str) -> Result<Organization> {
        self.answer("read", vec![organization.to_string()])
    }

    async fn update(
        &self,
        organization: &str,
        options: OrganizationUpdateOptions,
    ) -> Result<Organization> {
        self.answer("update", vec![organization.to_string(), debug(&options)])
    }

    async fn delete(&self, organization: &str) -> Result<()> {
        self.answer("delete", vec![organization.to_string()])
    }
}

mock! {
    /// Mock [`Projects`]
    MockProjects {
        expect_list("list") -> ProjectList;
        expect_list_all("list_all") -> Vec<Project>;
        expect_create("create") -> Project;
        expect_read("read") -> Project;
        expect_update("update") -> Project;
        expect_delete("delete") -> ();
    }
}

#[async_trait]
impl Projects for MockProjects {
    async fn list(&self, organization: &str, options: &ProjectListOptions) -> Result<ProjectList> {
        self.answer("list", vec![organization.to_string(), debug(options)])
    }

    async fn list_all(
        &self,
        organization: &str,
        options: &ProjectListOptions,
    ) -> Result<Vec<Project>> {
        self.answer("list_all", vec![organization.to_string(), debug(options)])
    }

    async fn create(&self, organization: &str, options: ProjectCreateOptions) -> Result<Project> {
        self.answer("create", vec![organization.to_string(), debug(&options)])
    }

    async fn read(&self, project_id: &str) -> Result<Project> {
        self.answer("read", vec![project_id.to_string()])
    }

    async fn update(&self, project_id: &str, options: ProjectUpdateOptions) -> Result<Project> {
        self.answer("update", vec![project_id.to_string(), debug(&options)])
    }

    async fn delete(&self, project_id: &str) -> Result<()> {
        self.answer("delete", vec![project_id.to_string()])
    }
}

mock! {
    /// Mock [`Workspaces`]
    MockWorkspaces {
        expect_list("list") -> WorkspaceList;
        expect_list_all("list_all") -> Vec<Workspace>;
        expect_create("create") -> Workspace;
        expect_read("read") -> Workspace;
        expect_read_by_id("read_by_id") -> Workspace;
        expect_read_by_ids("read_by_ids") -> Vec<Workspace>;
        expect_update("update") -> Workspace;
        expect_update_by_id("update_by_id") -> Workspace;
        expect_delete("delete") -> ();
        expect_delete_by_id("delete_by_id") -> ();
        expect_lock("lock") -> Workspace;
        expect_unlock("unlock") -> Workspace;
        expect_force_unlock("force_unlock") -> Workspace;
        expect_list_tags("list_tags") -> TagList;
        expect_add_tags("add_tags") -> ();
        expect_remove_tags("remove_tags") -> ();
    }
}

#[async_trait]
impl Workspaces for MockWorkspaces {
    async fn list(
        &self,
        organization: &str,
        options: &WorkspaceListOptions,
    ) -> Result<WorkspaceList> {
        self.answer("list", vec![organization.to_string(), debug(options)])
    }

    async fn list_all(
        &self,
        organization: &str,
        options: &WorkspaceListOptions,
    ) -> Result<Vec<Workspace>> {
        self.answer("list_all", vec![organization.to_string(), debug(options)])
    }

    async fn create(
        &self,
        organization: &str,
        options: WorkspaceCreateOptions,
    ) -> Result<Workspace> {
        self.answer("create", vec![organization.to_string(), debug(&options)])
    }

    async fn read(&self, organization: &str, workspace: &str) -> Result<Workspace> {
        self.answer("read", vec![organization.to_string(), workspace.to_string()])
    }

    async fn read_by_id(&self, workspace_id: &str) -> Result<Workspace> {
        self.answer("read_by_id", vec![workspace_id.to_string()])
    }

    async fn read_by_ids(&self, workspace_ids: &[String]) -> Result<Vec<Workspace>> {
        self.answer("read_by_ids", workspace_ids.to_vec())
    }

    async fn update(
        &self,
        organization: &str,
        workspace: &str,
        options: WorkspaceUpdateOptions,
    ) -> Result<Workspace> {
        self.answer(
            "update",
            vec![organization.to_string(), workspace.to_string(), debug(&options)],
        )
    }

    async fn update_by_id(
        &self,
        workspace_id: &str,
        options: WorkspaceUpdateOptions,
    ) -> Result<Workspace> {
        self.answer("update_by_id", vec![workspace_id.to_string(), debug(&options)])
    }

    async fn delete(&self, organization: &str, workspace: &str) -> Result<()> {
        self.answer("delete", vec![organization.to_string(), workspace.to_string()])
    }

    async fn delete_by_id(&self, workspace_id: &str) -> Result<()> {
        self.answer("delete_by_id", vec![workspace_id.to_string()])
    }

    async fn lock(&self, workspace_id: &str, options: WorkspaceLockOptions) -> Result<Workspace> {
        self.answer("lock", vec![workspace_id.to_string(), debug(&options)])
    }

    async fn unlock(&self, workspace_id: &str) -> Result<Workspace> {
        self.answer("unlock", vec![workspace_id.to_string()])
    }

    async fn force_unlock(&self, workspace_id: &str) -> Result<Workspace> {
        self.answer("force_unlock", vec![workspace_id.to_string()])
    }

    async fn list_tags(&self, workspace_id: &str, options: &ListOptions) -> Result<TagList> {
        self.answer("list_tags", vec![workspace_id.to_string(), debug(options)])
    }

    async fn add_tags(&self, workspace_id: &str, tags: &[TagRef]) -> Result<()> {
        self.answer("add_tags", vec![workspace_id.to_string(), debug(&tags)])
    }

    async fn remove_tags(&self, workspace_id: &str, tags: &[TagRef]) -> Result<()> {
        self.answer("remove_tags", vec![workspace_id.to_string(), debug(&tags)])
    }
}

mock! {
    /// Mock [`Runs`]
    MockRuns {
        expect_list("list") -> RunList;
        expect_list_for_organization("list_for_organization") -> RunList;
        expect_create("create") -> Run;
        expect_read("read") -> Run;
        expect_apply("apply") -> ();
        expect_cancel("cancel") -> ();
        expect_force_cancel("force_cancel") -> ();
        expect_discard("discard") -> ();
    }
}

#[async_trait]
impl Runs for MockRuns {
    async fn list(&self, workspace_id: &str, options: &RunListOptions) -> Result<RunList> {
        self.answer("list", vec![workspace_id.to_string(), debug(options)])
    }

    async fn list_for_organization(
        &self,
        organization: &str,
        options: &RunListOptions,
        workspace_names: &[String],
    ) -> Result<RunList> {
        self.answer(
            "list_for_organization",
            vec![organization.to_string(), debug(options), debug(&workspace_names)],
        )
    }

    async fn create(&self, options: RunCreateOptions) -> Result<Run> {
        self.answer("create", vec![debug(&options)])
    }

    async fn read(&self, run_id: &str) -> Result<Run> {
        self.answer("read", vec![run_id.to_string()])
    }

    async fn apply(&self, run_id: &str, options: RunActionOptions) -> Result<()> {
        self.answer("apply", vec![run_id.to_string(), debug(&options)])
    }

    async fn cancel(&self, run_id: &str, options: RunActionOptions) -> Result<()> {
        self.answer("cancel", vec![run_id.to_string(), debug(&options)])
    }

    async fn force_cancel(&self, run_id: &str, options: RunActionOptions) -> Result<()> {
        self.answer("force_cancel", vec![run_id.to_string(), debug(&options)])
    }

    async fn discard(&self, run_id: &str, options: RunActionOptions) -> Result<()> {
        self.answer("discard", vec![run_id.to_string(), debug(&options)])
    }
}

mock! {
    /// Mock [`Plans`]
    MockPlans {
        expect_read("read") -> Plan;
        expect_read_for_run("read_for_run") -> Plan;
        expect_logs("logs") -> String;
    }
}

#[async_trait]
impl Plans for MockPlans {
    async fn read(&self, plan_id: &str) -> Result<Plan> {
        self.answer("read", vec![plan_id.to_string()])
    }

    async fn read_for_run(&self, run_id: &str) -> Result<Plan> {
        self.answer("read_for_run", vec![run_id.to_string()])
    }

    async fn logs(&self, plan_id: &str) -> Result<String> {
        self.answer("logs", vec![plan_id.to_string()])
    }
}

mock! {
    /// Mock [`Applies`]
    MockApplies {
        expect_read("read") -> Apply;
        expect_read_for_run("read_for_run") -> Apply;
        expect_logs("logs") -> String;
    }
}

#[async_trait]
impl Applies for MockApplies {
    async fn read(&self, apply_id: &str) -> Result<Apply> {
        self.answer("read", vec![apply_id.to_string()])
    }

    async fn read_for_run(&self, run_id: &str) -> Result<Apply> {
        self.answer("read_for_run", vec![run_id.to_string()])
    }

    async fn logs(&self, apply_id: &str) -> Result<String> {
        self.answer("logs", vec![apply_id.to_string()])
    }
}

mock! {
    /// Mock [`ConfigurationVersions`]
    ///
    /// `upload` records the directory but never packs it.
    MockConfigurationVersions {
        expect_list("list") -> ConfigurationVersionList;
        expect_create("create") -> ConfigurationVersion;
        expect_read("read") -> ConfigurationVersion;
        expect_upload("upload") -> ();
        expect_upload_tar_gzip("upload_tar_gzip") -> ();
        expect_download("download") -> Vec<u8>;
        expect_archive("archive") -> ();
    }
}

#[async_trait]
impl ConfigurationVersions for MockConfigurationVersions {
    async fn list(
        &self,
        workspace_id: &str,
        options: &ListOptions,
    ) -> Result<ConfigurationVersionList> {
        self.answer("list", vec![workspace_id.to_string(), debug(options)])
    }

    async fn create(
        &self,
        workspace_id: &str,
        options: ConfigurationVersionCreateOptions,
    ) -> Result<ConfigurationVersion> {
        self.answer("create", vec![workspace_id.to_string(), debug(&options)])
    }

    async fn read(&self, cv_id: &str) -> Result<ConfigurationVersion> {
        self.answer("read", vec![cv_id.to_string()])
    }

    async fn upload(&self, upload_url: &str, dir: &Path) -> Result<()> {
        self.answer(
            "upload",
            vec![upload_url.to_string(), dir.display().to_string()],
        )
    }

    async fn upload_tar_gzip(&self, upload_url: &str, archive: Vec<u8>) -> Result<()> {
        self.answer(
            "upload_tar_gzip",
            vec![upload_url.to_string(), format!("{} bytes", archive.len())],
        )
    }

    async fn download(&self, cv_id: &str) -> Result<Vec<u8>> {
        self.answer("download", vec![cv_id.to_string()])
    }

    async fn archive(&self, cv_id: &str) -> Result<()> {
        self.answer("archive", vec![cv_id.to_string()])
    }
}

mock! {
    /// Mock [`Variables`]
    MockVariables {
        expect_list("list") -> VariableList;
        expect_create("create") -> Variable;
        expect_read("read") -> Variable;
        expect_update("update") -> Variable;
        expect_delete("delete") -> ();
    }
}

#[async_trait]
impl Variables for MockVariables {
    async fn list(&self, workspace_id: &str, options: &ListOptions) -> Result<VariableList> {
        self.answer("list", vec![workspace_id.to_string(), debug(options)])
    }

    async fn create(
        &self,
        workspace_id: &str,
        mut options: VariableCreateOptions,
    ) -> Result<Variable> {
        redact_sensitive(&mut options.value, options.sensitive);
        self.answer("create", vec![workspace_id.to_string(), debug(&options)])
    }

    async fn read(&self, workspace_id: &str, variable_id: &str) -> Result<Variable> {
        self.answer("read", vec![workspace_id.to_string(), variable_id.to_string()])
    }

    async fn update(
        &self,
        workspace_id: &str,
        variable_id: &str,
        mut options: VariableUpdateOptions,
    ) -> Result<Variable> {
        redact_sensitive(&mut options.value, options.sensitive);
        self.answer(
            "update",
            vec![workspace_id.to_string(), variable_id.to_string(), debug(&options)],
        )
    }

    async fn delete(&self, workspace_id: &str, variable_id: &str) -> Result<()> {
        self.answer("delete", vec![workspace_id.to_string(), variable_id.to_string()])
    }
}

mock! {
    /// Mock [`PolicySets`]
    MockPolicySets {
        expect_list("list") -> PolicySetList;
        expect_create("create") -> PolicySet;
        expect_read("read") -> PolicySet;
        expect_update("update") -> PolicySet;
        expect_delete("delete") -> ();
        expect_add_workspaces("add_workspaces") -> ();
        expect_remove_workspaces("remove_workspaces") -> ();
        expect_add_projects("add_projects") -> ();
        expect_remove_projects("remove_projects") -> ();
    }
}

#[async_trait]
impl PolicySets for MockPolicySets {
    async fn list(
        &self,
        organization: &str,
        options: &PolicySetListOptions,
    ) -> Result<PolicySetList> {
        self.answer("list", vec![organization.to_string(), debug(options)])
    }

    async fn create(
        &self,
        organization: &str,
        options: PolicySetCreateOptions,
    ) -> Result<PolicySet> {
        self.answer("create", vec![organization.to_string(), debug(&options)])
    }

    async fn read(&self, policy_set_id: &str) -> Result<PolicySet> {
        self.answer("read", vec![policy_set_id.to_string()])
    }

    async fn update(
        &self,
        policy_set_id: &str,
        options: PolicySetUpdateOptions,
    ) -> Result<PolicySet> {
        self.answer("update", vec![policy_set_id.to_string(), debug(&options)])
    }

    async fn delete(&self, policy_set_id: &str) -> Result<()> {
        self.answer("delete", vec![policy_set_id.to_string()])
    }

    async fn add_workspaces(&self, policy_set_id: &str, workspace_ids: &[String]) -> Result<()> {
        self.answer(
            "add_workspaces",
            vec![policy_set_id.to_string(), debug(&workspace_ids)],
        )
    }

    async fn remove_workspaces(
        &self,
        policy_set_id: &str,
        workspace_ids: &[String],
    ) -> Result<()> {
        self.answer(
            "remove_workspaces",
            vec![policy_set_id.to_string(), debug(&workspace_ids)],
        )
    }

    async fn add_projects(&self, policy_set_id: &str, project_ids: &[String]) -> Result<()> {
        self.answer(
            "add_projects",
            vec![policy_set_id.to_string(), debug(&project_ids)],
        )
    }

    async fn remove_projects(&self, policy_set_id: &str, project_ids: &[String]) -> Result<()> {
        self.answer(
            "remove_projects",
            vec![policy_set_id.to_string(), debug(&project_ids)],
        )
    }
}

mock! {
    /// Mock [`AgentPools`]
    MockAgentPools {
        expect_list("list") -> AgentPoolList;
        expect_create("create") -> AgentPool;
        expect_read("read") -> AgentPool;
        expect_update("update") -> AgentPool;
        expect_delete("delete") -> ();
    }
}

#[async_trait]
impl AgentPools for MockAgentPools {
    async fn list(&self, organization: &str, options: &ListOptions) -> Result<AgentPoolList> {
        self.answer("list", vec![organization.to_string(), debug(options)])
    }

    async fn create(
        &self,
        organization: &str,
        options: AgentPoolCreateOptions,
    ) -> Result<AgentPool> {
        self.answer("create", vec![organization.to_string(), debug(&options)])
    }

    async fn read(&self, pool_id: &str) -> Result<AgentPool> {
        self.answer("read", vec![pool_id.to_string()])
    }

    async fn update(&self, pool_id: &str, options: AgentPoolUpdateOptions) -> Result<AgentPool> {
        self.answer("update", vec![pool_id.to_string(), debug(&options)])
    }

    async fn delete(&self, pool_id: &str) -> Result<()> {
        self.answer("delete", vec![pool_id.to_string()])
    }
}

mock! {
    /// Mock [`Agents`]
    MockAgents {
        expect_list("list") -> AgentList;
        expect_read("read") -> Agent;
    }
}

#[async_trait]
impl Agents for MockAgents {
    async fn list(&self, pool_id: &str, options: &AgentListOptions) -> Result<AgentList> {
        self.answer("list", vec![pool_id.to_string(), debug(options)])
    }

    async fn read(&self, agent_id: &str) -> Result<Agent> {
        self.answer("read", vec![agent_id.to_string()])
    }
}

mock! {
    /// Mock [`OAuthClients`]
    MockOAuthClients {
        expect_list("list") -> OAuthClientList;
        expect_create("create") -> OAuthClient;
        expect_read("read") -> OAuthClient;
        expect_update("update") -> OAuthClient;
        expect_delete("delete") -> ();
    }
}

#[async_trait]
impl OAuthClients for MockOAuthClients {
    async fn list(&self, organization: &str, options: &ListOptions) -> Result<OAuthClientList> {
        self.answer("list", vec![organization.to_string(), debug(options)])
    }

    async fn create(
        &self,
        organization: &str,
        options: OAuthClientCreateOptions,
    ) -> Result<OAuthClient> {
        // Debug output of the options carries the token, keep it out of the log
        self.answer(
            "create",
            vec![organization.to_string(), debug(&options.service_provider)],
        )
    }

    async fn read(&self, client_id: &str) -> Result<OAuthClient> {
        self.answer("read", vec![client_id.to_string()])
    }

    async fn update(
        &self,
        client_id: &str,
        options: OAuthClientUpdateOptions,
    ) -> Result<OAuthClient> {
        self.answer("update", vec![client_id.to_string(), debug(&options.name)])
    }

    async fn delete(&self, client_id: &str) -> Result<()> {
        self.answer("delete", vec![client_id.to_string()])
    }
}

mock! {
    /// Mock [`Teams`]
    MockTeams {
        expect_list("list") -> TeamList;
        expect_create("create") -> Team;
        expect_read("read") -> Team;
        expect_update("update") -> Team;
        expect_delete("delete") -> ();
    }
}

#[async_trait]
impl Teams for MockTeams {
    async fn list(&self, organization: &str, options: &TeamListOptions) -> Result<TeamList> {
        self.answer("list", vec![organization.to_string(), debug(options)])
    }

    async fn create(&self, organization: &str, options: TeamCreateOptions) -> Result<Team> {
        self.answer("create", vec![organization.to_string(), debug(&options)])
    }

    async fn read(&self, team_id: &str) -> Result<Team> {
        self.answer("read", vec![team_id.to_string()])
    }

    async fn update(&self, team_id: &str, options: TeamUpdateOptions) -> Result<Team> {
        self.answer("update", vec![team_id.to_string(), debug(&options)])
    }

    async fn delete(&self, team_id: &str) -> Result<()> {
        self.answer("delete", vec![team_id.to_string()])
    }
}

mock! {
    /// Mock [`TeamProjectAccesses`]
    MockTeamProjectAccesses {
        expect_list("list") -> TeamProjectAccessList;
        expect_add("add") -> TeamProjectAccess;
        expect_read("read") -> TeamProjectAccess;
        expect_update("update") -> TeamProjectAccess;
        expect_remove("remove") -> ();
    }
}

#[async_trait]
impl TeamProjectAccesses for MockTeamProjectAccesses {
    async fn list(
        &self,
        project_id: &str,
        options: &ListOptions,
    ) -> Result<TeamProjectAccessList> {
        self.answer("list", vec![project_id.to_string(), debug(options)])
    }

    async fn add(&self, options: TeamProjectAccessAddOptions) -> Result<TeamProjectAccess> {
        self.answer("add", vec![debug(&options)])
    }

    async fn read(&self, access_id: &str) -> Result<TeamProjectAccess> {
        self.answer("read", vec![access_id.to_string()])
    }

    async fn update(
        &self,
        access_id: &str,
        options: TeamProjectAccessUpdateOptions,
    ) -> Result<TeamProjectAccess> {
        self.answer("update", vec![access_id.to_string(), debug(&options)])
    }

    async fn remove(&self, access_id: &str) -> Result<()> {
        self.answer("remove", vec![access_id.to_string()])
    }
}

mock! {
    /// Mock [`OrganizationMemberships`]
    MockOrganizationMemberships {
        expect_list("list") -> OrganizationMembershipList;
        expect_create("create") -> OrganizationMembership;
        expect_read("read") -> OrganizationMembership;
        expect_delete("delete") -> ();
    }
}

#[async_trait]
impl OrganizationMemberships for MockOrganizationMemberships {
    async fn list(
        &self,
        organization: &str,
        options: &OrganizationMembershipListOptions,
    ) -> Result<OrganizationMembershipList> {
        self.answer("list", vec![organization.to_string(), debug(options)])
    }

    async fn create(
        &self,
        organization: &str,
        options: OrganizationMembershipCreateOptions,
    ) -> Result<OrganizationMembership> {
        self.answer("create", vec![organization.to_string(), debug(&options)])
    }

    async fn read(&self, membership_id: &str) -> Result<OrganizationMembership> {
        self.answer("read", vec![membership_id.to_string()])
    }

    async fn delete(&self, membership_id: &str) -> Result<()> {
        self.answer("delete", vec![membership_id.to_string()])
    }
}

mock! {
    /// Mock [`StateVersions`]
    MockStateVersions {
        expect_list("list") -> StateVersionList;
        expect_create("create") -> StateVersion;
        expect_create_from_state("create_from_state") -> StateVersion;
        expect_read("read") -> StateVersion;
        expect_read_current("read_current") -> StateVersion;
        expect_download("download") -> Vec<u8>;
    }
}

#[async_trait]
impl StateVersions for MockStateVersions {
    async fn list(&self, options: &StateVersionListOptions) -> Result<StateVersionList> {
        self.answer("list", vec![debug(options)])
    }

    async fn create(
        &self,
        workspace_id: &str,
        options: StateVersionCreateOptions,
    ) -> Result<StateVersion> {
        self.answer(
            "create",
            vec![workspace_id.to_string(), debug(&options.serial)],
        )
    }

    async fn create_from_state(
        &self,
        workspace_id: &str,
        serial: u64,
        lineage: Option<String>,
        state: &[u8],
    ) -> Result<StateVersion> {
        self.answer(
            "create_from_state",
            vec![
                workspace_id.to_string(),
                serial.to_string(),
                debug(&lineage),
                format!("{} bytes", state.len()),
            ],
        )
    }

    async fn read(&self, state_version_id: &str) -> Result<StateVersion> {
        self.answer("read", vec![state_version_id.to_string()])
    }

    async fn read_current(&self, workspace_id: &str) -> Result<StateVersion> {
        self.answer("read_current", vec![workspace_id.to_string()])
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        self.answer("download", vec![url.to_string()])
    }
}

mock! {
    /// Mock [`Users`]
    MockUsers {
        expect_read_current("read_current") -> User;
    }
}

#[async_trait]
impl Users for MockUsers {
    async fn read_current(&self) -> Result<User> {
        self.answer("read_current", Vec::new())
    }
}
