use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::role::Role;
use crate::workflow::action::Action;
use crate::workflow::rules::RoleRules;
use crate::workflow::status::CanonicalStatus;
use crate::workflow::transitions::TransitionTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisabledReason {
    TerminalStatus { status: CanonicalStatus },
    NoWorkflowRules { status: CanonicalStatus },
    RoleNotPermitted { role: Role, action: Action },
    AwaitingStage { required: CanonicalStatus },
    AlreadyAdvanced { status: CanonicalStatus },
    NotAvailableInStatus { action: Action, status: CanonicalStatus },
}

impl DisabledReason {
    pub fn message(&self) -> String {
        match self {
            Self::TerminalStatus { .. } => {
                "Timesheet has been finalised and accepts no further actions".to_owned()
            }
            Self::NoWorkflowRules { .. } => "Timesheet status has no workflow rules".to_owned(),
            Self::RoleNotPermitted { role, action } => {
                format!("{} cannot {} timesheets", role.plural(), action.verb())
            }
            Self::AwaitingStage { required } => match required {
                CanonicalStatus::PendingTutorConfirmation => {
                    "Timesheet must be submitted first".to_owned()
                }
                CanonicalStatus::TutorConfirmed => {
                    "Timesheet must be confirmed by tutor first".to_owned()
                }
                CanonicalStatus::LecturerConfirmed => {
                    "Timesheet must be confirmed by lecturer first".to_owned()
                }
                _ => "Timesheet is not yet ready for this action".to_owned(),
            },
            Self::AlreadyAdvanced { status } => match status {
                CanonicalStatus::PendingTutorConfirmation => {
                    "Timesheet is awaiting tutor confirmation".to_owned()
                }
                CanonicalStatus::TutorConfirmed => {
                    "Timesheet is awaiting lecturer review".to_owned()
                }
                CanonicalStatus::LecturerConfirmed => {
                    "Timesheet is awaiting final confirmation by an administrator".to_owned()
                }
                _ => "Timesheet has already moved past this step".to_owned(),
            },
            Self::NotAvailableInStatus { action, status } => format!(
                "{} is not available while the timesheet is {}",
                action.display_name(),
                status.display_name()
            ),
        }
    }
}

/// Outcome for one (role, status, action) triple: the target status when the
/// action is enabled, the reason when it is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "DecisionView")]
pub struct PermissionDecision {
    action: Action,
    outcome: Result<CanonicalStatus, DisabledReason>,
}

impl PermissionDecision {
    pub fn enabled(action: Action, target_status: CanonicalStatus) -> Self {
        Self { action, outcome: Ok(target_status) }
    }

    pub fn disabled(action: Action, reason: DisabledReason) -> Self {
        Self { action, outcome: Err(reason) }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn is_enabled(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn outcome(&self) -> Result<CanonicalStatus, DisabledReason> {
        self.outcome
    }

    pub fn disabled_reason(&self) -> Option<DisabledReason> {
        self.outcome.err()
    }

    pub fn disabled_message(&self) -> Option<String> {
        self.disabled_reason().map(|reason| reason.message())
    }

    pub fn target_status(&self) -> Option<CanonicalStatus> {
        self.outcome.ok()
    }
}

#[derive(Serialize)]
struct DecisionView {
    action: Action,
    is_enabled: bool,
    disabled_reason: Option<DisabledReason>,
    target_status: Option<CanonicalStatus>,
}

impl From<PermissionDecision> for DecisionView {
    fn from(decision: PermissionDecision) -> Self {
        Self {
            action: decision.action,
            is_enabled: decision.is_enabled(),
            disabled_reason: decision.disabled_reason(),
            target_status: decision.target_status(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RolePermissions {
    pub role: Role,
    pub status: CanonicalStatus,
    pub can_edit: bool,
    pub can_submit: bool,
    pub can_confirm: bool,
    pub can_approve: bool,
    pub can_reject: bool,
    pub can_request_modification: bool,
    pub decisions: Vec<PermissionDecision>,
    pub reasons: BTreeMap<Action, DisabledReason>,
}

impl RolePermissions {
    pub fn decision(&self, action: Action) -> Option<&PermissionDecision> {
        self.decisions.iter().find(|decision| decision.action() == action)
    }

    pub fn enabled_actions(&self) -> Vec<Action> {
        self.decisions
            .iter()
            .filter(|decision| decision.is_enabled())
            .map(PermissionDecision::action)
            .collect()
    }
}

pub fn decide(
    table: &TransitionTable,
    rules: &RoleRules,
    role: Role,
    status: CanonicalStatus,
    action: Action,
) -> PermissionDecision {
    if !table.contains_status(status) {
        return PermissionDecision::disabled(action, DisabledReason::NoWorkflowRules { status });
    }

    if table.is_terminal(status) {
        return PermissionDecision::disabled(action, DisabledReason::TerminalStatus { status });
    }

    match table.target(status, action) {
        Some(target) if rules.allows(role, status, action) => {
            PermissionDecision::enabled(action, target)
        }
        _ => {
            let reason = role_denial(rules, role, status, action);
            tracing::debug!(
                event_name = "workflow.permission.denied",
                role = role.as_str(),
                status = status.as_str(),
                action = action.as_str(),
                reason = ?reason,
                "action disabled"
            );
            PermissionDecision::disabled(action, reason)
        }
    }
}

pub fn decide_all(
    table: &TransitionTable,
    rules: &RoleRules,
    role: Role,
    status: CanonicalStatus,
) -> RolePermissions {
    let decisions: Vec<PermissionDecision> =
        Action::ALL.into_iter().map(|action| decide(table, rules, role, status, action)).collect();

    let enabled = |action: Action| {
        decisions.iter().any(|decision| decision.action() == action && decision.is_enabled())
    };
    let reasons = decisions
        .iter()
        .filter_map(|decision| decision.disabled_reason().map(|reason| (decision.action(), reason)))
        .collect();

    RolePermissions {
        role,
        status,
        can_edit: enabled(Action::Edit),
        can_submit: enabled(Action::Submit),
        can_confirm: enabled(Action::Confirm),
        can_approve: enabled(Action::Approve),
        can_reject: enabled(Action::Reject),
        can_request_modification: enabled(Action::RequestModification),
        reasons,
        decisions,
    }
}

fn role_denial(
    rules: &RoleRules,
    role: Role,
    status: CanonicalStatus,
    action: Action,
) -> DisabledReason {
    let granted = rules.statuses_for(role, action);
    if granted.is_empty() {
        return DisabledReason::RoleNotPermitted { role, action };
    }

    if let Some(required) = granted.iter().find(|granted| granted.stage() > status.stage()) {
        return DisabledReason::AwaitingStage { required: *required };
    }

    if granted.iter().all(|granted| granted.stage() < status.stage()) {
        return DisabledReason::AlreadyAdvanced { status };
    }

    DisabledReason::NotAvailableInStatus { action, status }
}
