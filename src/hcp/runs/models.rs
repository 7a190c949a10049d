//! Run data models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TfeError};
use crate::hcp::helpers::{require_id, require_optional_id, Query};
use crate::hcp::jsonapi::{Document, RelationshipData};
use crate::hcp::traits::{ListPage, TfeResource};
use crate::hcp::ListOptions;

/// One page of runs
pub type RunList = ListPage<Run>;

/// Run statuses reported by the server
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Fetching,
    FetchingCompleted,
    PrePlanRunning,
    PrePlanCompleted,
    Queuing,
    PlanQueued,
    Planning,
    Planned,
    CostEstimating,
    CostEstimated,
    PolicyChecking,
    PolicyOverride,
    PolicySoftFailed,
    PolicyChecked,
    Confirmed,
    PostPlanRunning,
    PostPlanCompleted,
    PostPlanAwaitingDecision,
    PlannedAndFinished,
    PlannedAndSaved,
    PreApplyRunning,
    PreApplyCompleted,
    QueuingApply,
    ApplyQueued,
    Applying,
    Applied,
    Discarded,
    Errored,
    Canceled,
    ForceCanceled,
}

impl RunStatus {
    /// Every status, in lifecycle order
    pub const ALL: [RunStatus; 31] = [
        RunStatus::Pending,
        RunStatus::Fetching,
        RunStatus::FetchingCompleted,
        RunStatus::PrePlanRunning,
        RunStatus::PrePlanCompleted,
        RunStatus::Queuing,
        RunStatus::PlanQueued,
        RunStatus::Planning,
        RunStatus::Planned,
        RunStatus::CostEstimating,
        RunStatus::CostEstimated,
        RunStatus::PolicyChecking,
        RunStatus::PolicyOverride,
        RunStatus::PolicySoftFailed,
        RunStatus::PolicyChecked,
        RunStatus::Confirmed,
        RunStatus::PostPlanRunning,
        RunStatus::PostPlanCompleted,
        RunStatus::PostPlanAwaitingDecision,
        RunStatus::PlannedAndFinished,
        RunStatus::PlannedAndSaved,
        RunStatus::PreApplyRunning,
        RunStatus::PreApplyCompleted,
        RunStatus::QueuingApply,
        RunStatus::ApplyQueued,
        RunStatus::Applying,
        RunStatus::Applied,
        RunStatus::Discarded,
        RunStatus::Errored,
        RunStatus::Canceled,
        RunStatus::ForceCanceled,
    ];

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Fetching => "fetching",
            RunStatus::FetchingCompleted => "fetching_completed",
            RunStatus::PrePlanRunning => "pre_plan_running",
            RunStatus::PrePlanCompleted => "pre_plan_completed",
            RunStatus::Queuing => "queuing",
            RunStatus::PlanQueued => "plan_queued",
            RunStatus::Planning => "planning",
            RunStatus::Planned => "planned",
            RunStatus::CostEstimating => "cost_estimating",
            RunStatus::CostEstimated => "cost_estimated",
            RunStatus::PolicyChecking => "policy_checking",
            RunStatus::PolicyOverride => "policy_override",
            RunStatus::PolicySoftFailed => "policy_soft_failed",
            RunStatus::PolicyChecked => "policy_checked",
            RunStatus::Confirmed => "confirmed",
            RunStatus::PostPlanRunning => "post_plan_running",
            RunStatus::PostPlanCompleted => "post_plan_completed",
            RunStatus::PostPlanAwaitingDecision => "post_plan_awaiting_decision",
            RunStatus::PlannedAndFinished => "planned_and_finished",
            RunStatus::PlannedAndSaved => "planned_and_saved",
            RunStatus::PreApplyRunning => "pre_apply_running",
            RunStatus::PreApplyCompleted => "pre_apply_completed",
            RunStatus::QueuingApply => "queuing_apply",
            RunStatus::ApplyQueued => "apply_queued",
            RunStatus::Applying => "applying",
            RunStatus::Applied => "applied",
            RunStatus::Discarded => "discarded",
            RunStatus::Errored => "errored",
            RunStatus::Canceled => "canceled",
            RunStatus::ForceCanceled => "force_canceled",
        }
    }

    /// Check if the run can no longer change
    ///
    /// Final statuses are: applied, discarded, errored, canceled, force_canceled,
    /// planned_and_finished, planned_and_saved
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            RunStatus::Applied
                | RunStatus::Discarded
                | RunStatus::Errored
                | RunStatus::Canceled
                | RunStatus::ForceCanceled
                | RunStatus::PlannedAndFinished
                | RunStatus::PlannedAndSaved
        )
    }

    /// Check if the run is waiting for someone to confirm or discard it
    pub fn needs_confirmation(&self) -> bool {
        matches!(
            self,
            RunStatus::Planned
                | RunStatus::CostEstimated
                | RunStatus::PolicyChecked
                | RunStatus::PolicyOverride
                | RunStatus::PostPlanCompleted
                | RunStatus::PostPlanAwaitingDecision
        )
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RunStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown run status: {}", s))
    }
}

/// Server-side status groups for `filter[status_group]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatusGroup {
    NonFinal,
    Final,
    Discardable,
}

impl fmt::Display for RunStatusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunStatusGroup::NonFinal => "non_final",
            RunStatusGroup::Final => "final",
            RunStatusGroup::Discardable => "discardable",
        })
    }
}

/// Filters for listing runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunListOptions {
    pub list: ListOptions,
    /// Only runs in one of these statuses (`filter[status]`)
    pub status: Vec<RunStatus>,
    pub status_group: Option<RunStatusGroup>,
    /// e.g. `plan_only`, `plan_and_apply`, `destroy` (`filter[operation]`)
    pub operation: Vec<String>,
    /// e.g. `tfe-ui`, `tfe-api`, `tfe-configuration-version` (`filter[source]`)
    pub source: Vec<String>,
    /// Username of the run creator (`search[user]`)
    pub search_user: Option<String>,
    /// Commit SHA that triggered the run (`search[commit]`)
    pub search_commit: Option<String>,
}

impl RunListOptions {
    /// Only runs that have not finished yet
    pub fn non_final() -> Self {
        Self {
            status_group: Some(RunStatusGroup::NonFinal),
            ..Default::default()
        }
    }

    /// Only runs in the given statuses
    pub fn with_statuses(statuses: Vec<RunStatus>) -> Self {
        Self {
            status: statuses,
            ..Default::default()
        }
    }

    pub(crate) fn to_query(&self) -> Query {
        let statuses: Vec<&str> = self.status.iter().map(RunStatus::as_str).collect();
        let mut query = Query::new();
        query
            .page(&self.list)
            .push_list("filter[status]", &statuses)
            .push_opt("filter[status_group]", self.status_group)
            .push_list("filter[operation]", &self.operation)
            .push_list("filter[source]", &self.source)
            .push_opt("search[user]", self.search_user.as_deref())
            .push_opt("search[commit]", self.search_commit.as_deref());
        query
    }
}

/// Run data from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Run {
    pub id: String,
    pub attributes: RunAttributes,
    pub relationships: Option<RunRelationships>,
}

/// Run attributes from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RunAttributes {
    pub status: String,
    pub message: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "has-changes")]
    pub has_changes: Option<bool>,
    #[serde(rename = "is-destroy")]
    pub is_destroy: Option<bool>,
    #[serde(rename = "plan-only")]
    pub plan_only: Option<bool>,
    #[serde(rename = "auto-apply")]
    pub auto_apply: Option<bool>,
    #[serde(rename = "refresh-only")]
    pub refresh_only: Option<bool>,
    #[serde(rename = "trigger-reason")]
    pub trigger_reason: Option<String>,
    #[serde(rename = "target-addrs")]
    pub target_addrs: Option<Vec<String>>,
    #[serde(rename = "replace-addrs")]
    pub replace_addrs: Option<Vec<String>>,
    pub actions: Option<RunActions>,
}

/// Run action flags
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RunActions {
    #[serde(rename = "is-cancelable")]
    pub is_cancelable: Option<bool>,
    #[serde(rename = "is-confirmable")]
    pub is_confirmable: Option<bool>,
    #[serde(rename = "is-discardable")]
    pub is_discardable: Option<bool>,
    #[serde(rename = "is-force-cancelable")]
    pub is_force_cancelable: Option<bool>,
}

/// Run relationships from TFE API
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RunRelationships {
    pub workspace: Option<RelationshipData>,
    #[serde(rename = "configuration-version")]
    pub configuration_version: Option<RelationshipData>,
    #[serde(rename = "created-by")]
    pub created_by: Option<RelationshipData>,
    pub plan: Option<RelationshipData>,
    pub apply: Option<RelationshipData>,
}

impl TfeResource for Run {
    fn id(&self) -> &str {
        &self.id
    }

    /// Runs have no name; the message stands in for it
    fn name(&self) -> &str {
        self.attributes.message.as_deref().unwrap_or("")
    }
}

impl Run {
    /// Parsed status, `None` for statuses this client does not know yet
    pub fn status(&self) -> Option<RunStatus> {
        self.attributes.status.parse().ok()
    }

    /// Check if the run has reached a final status
    pub fn is_final(&self) -> bool {
        self.status().map(|s| s.is_final()).unwrap_or(false)
    }

    /// Get created_at timestamp
    pub fn created_at(&self) -> &str {
        self.attributes.created_at.as_deref().unwrap_or("")
    }

    /// Check if the plan found changes
    pub fn has_changes(&self) -> bool {
        self.attributes.has_changes.unwrap_or(false)
    }

    /// Check if the run can be confirmed
    pub fn is_confirmable(&self) -> bool {
        self.attributes
            .actions
            .as_ref()
            .and_then(|a| a.is_confirmable)
            .unwrap_or(false)
    }

    fn relationship(
        &self,
        pick: impl Fn(&RunRelationships) -> Option<&RelationshipData>,
    ) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(pick)
            .and_then(|r| r.id())
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.relationship(|r| r.workspace.as_ref())
    }

    pub fn configuration_version_id(&self) -> Option<&str> {
        self.relationship(|r| r.configuration_version.as_ref())
    }

    pub fn plan_id(&self) -> Option<&str> {
        self.relationship(|r| r.plan.as_ref())
    }

    pub fn apply_id(&self) -> Option<&str> {
        self.relationship(|r| r.apply.as_ref())
    }
}

/// Terraform variable passed to a single run
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RunVariable {
    pub key: String,
    /// HCL-encoded value, e.g. `"\"eu-west-1\""` or `10`
    pub value: String,
}

/// Options for queuing a run
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RunCreateOptions {
    /// Workspace to run in (required, sent as a relationship)
    #[serde(skip)]
    pub workspace_id: String,
    /// Configuration to run; the latest one when unset
    #[serde(skip)]
    pub configuration_version_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_destroy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_apply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_apply: Option<bool>,
    /// Only valid together with `plan_only`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terraform_version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub target_addrs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replace_addrs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<RunVariable>,
}

impl RunCreateOptions {
    pub fn new(workspace_id: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.workspace_id.is_empty() {
            return Err(TfeError::validation("workspace is required"));
        }
        require_id(&self.workspace_id, "workspace ID")?;
        require_optional_id(
            self.configuration_version_id.as_deref(),
            "configuration version ID",
        )?;
        if self.terraform_version.is_some() && self.plan_only != Some(true) {
            return Err(TfeError::validation(
                "setting terraform-version is only valid when plan-only is set to true",
            ));
        }
        Ok(())
    }

    pub(crate) fn to_document(&self) -> Document<&Self> {
        Document::new("runs", self)
            .with_relationship("workspace", "workspaces", Some(self.workspace_id.as_str()))
            .with_relationship(
                "configuration-version",
                "configuration-versions",
                self.configuration_version_id.as_deref(),
            )
    }
}

/// Optional comment recorded with a run action
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct RunActionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RunActionOptions {
    pub fn comment(comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_round_trip_names() {
        for status in RunStatus::ALL {
            assert_eq!(status.as_str().parse::<RunStatus>().unwrap(), status);
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::json!(status.as_str()));
        }
        assert!("unknown".parse::<RunStatus>().is_err());
    }

    #[test]
    fn test_run_status_is_final() {
        assert!(RunStatus::Applied.is_final());
        assert!(RunStatus::PlannedAndFinished.is_final());
        assert!(RunStatus::ForceCanceled.is_final());
        assert!(!RunStatus::Planning.is_final());
        assert!(!RunStatus::PolicyOverride.is_final());
        assert!(RunStatus::PolicyOverride.needs_confirmation());
        assert!(!RunStatus::Applying.needs_confirmation());
    }

    #[test]
    fn test_deserialize_run() {
        let run: Run = serde_json::from_value(serde_json::json!({
            "id": "run-abc",
            "attributes": {
                "status": "planned",
                "message": "Queued manually",
                "has-changes": true,
                "actions": {"is-confirmable": true}
            },
            "relationships": {
                "workspace": {"data": {"id": "ws-1", "type": "workspaces"}},
                "plan": {"data": {"id": "plan-1", "type": "plans"}},
                "apply": {"data": {"id": "apply-1", "type": "applies"}}
            }
        }))
        .unwrap();
        assert_eq!(run.status(), Some(RunStatus::Planned));
        assert!(!run.is_final());
        assert!(run.has_changes());
        assert!(run.is_confirmable());
        assert_eq!(run.workspace_id(), Some("ws-1"));
        assert_eq!(run.plan_id(), Some("plan-1"));
        assert_eq!(run.apply_id(), Some("apply-1"));
        assert_eq!(run.configuration_version_id(), None);
        assert_eq!(run.name(), "Queued manually");
    }

    #[test]
    fn test_unknown_status_is_not_final() {
        let run: Run = serde_json::from_value(serde_json::json!({
            "id": "run-abc",
            "attributes": {"status": "brand_new_status"}
        }))
        .unwrap();
        assert_eq!(run.status(), None);
        assert!(!run.is_final());
    }

    #[test]
    fn test_list_options_query() {
        let opts = RunListOptions {
            status: vec![RunStatus::Planning, RunStatus::Applying],
            operation: vec!["plan_only".to_string()],
            search_user: Some("alice".to_string()),
            ..RunListOptions::non_final()
        };
        assert_eq!(
            opts.to_query().append_to("/r"),
            "/r?filter[status]=planning,applying&filter[status_group]=non_final\
             &filter[operation]=plan_only&search[user]=alice"
        );
    }

    #[test]
    fn test_create_options_validation() {
        assert!(RunCreateOptions::new("ws-1").validate().is_ok());
        assert_eq!(
            RunCreateOptions::default().validate().unwrap_err().to_string(),
            "workspace is required"
        );

        let mut opts = RunCreateOptions::new("ws-1");
        opts.terraform_version = Some("1.6.0".to_string());
        assert!(opts.validate().is_err());
        opts.plan_only = Some(true);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_create_document() {
        let opts = RunCreateOptions {
            configuration_version_id: Some("cv-1".to_string()),
            message: Some("deploy".to_string()),
            target_addrs: vec!["module.app".to_string()],
            variables: vec![RunVariable {
                key: "region".to_string(),
                value: "\"eu-west-1\"".to_string(),
            }],
            ..RunCreateOptions::new("ws-1")
        };
        assert_eq!(
            serde_json::to_value(opts.to_document()).unwrap(),
            serde_json::json!({
                "data": {
                    "type": "runs",
                    "attributes": {
                        "message": "deploy",
                        "target-addrs": ["module.app"],
                        "variables": [{"key": "region", "value": "\"eu-west-1\""}]
                    },
                    "relationships": {
                        "configuration-version": {"data": {"type": "configuration-versions", "id": "cv-1"}},
                        "workspace": {"data": {"type": "workspaces", "id": "ws-1"}}
                    }
                }
            })
        );
    }
}
