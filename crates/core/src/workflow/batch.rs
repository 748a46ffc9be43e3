use serde::Serialize;

use crate::domain::role::Role;
use crate::workflow::action::Action;
use crate::workflow::permissions::{decide, DisabledReason, PermissionDecision};
use crate::workflow::rules::RoleRules;
use crate::workflow::status::CanonicalStatus;
use crate::workflow::transitions::TransitionTable;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BatchDenial {
    EmptySelection,
    MemberDenied { index: usize, status: CanonicalStatus, reason: DisabledReason },
    MixedTargets { targets: Vec<CanonicalStatus> },
}

impl BatchDenial {
    pub fn message(&self) -> String {
        match self {
            Self::EmptySelection => "No timesheets selected".to_owned(),
            Self::MemberDenied { index, status, reason } => format!(
                "Timesheet {} ({}): {}",
                index + 1,
                status.display_name(),
                reason.message()
            ),
            Self::MixedTargets { targets } => {
                let names: Vec<&str> = targets.iter().map(|target| target.display_name()).collect();
                format!(
                    "Selected timesheets would move to different statuses ({}); select timesheets at the same stage",
                    names.join(", ")
                )
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BatchPermissionDecision {
    pub action: Action,
    pub is_enabled: bool,
    pub target_status: Option<CanonicalStatus>,
    pub reason: Option<BatchDenial>,
}

impl BatchPermissionDecision {
    /// Lifts a single-item decision into the shape a one-member batch produces.
    pub fn from_single(decision: PermissionDecision, status: CanonicalStatus) -> Self {
        match decision.outcome() {
            Ok(target) => Self {
                action: decision.action(),
                is_enabled: true,
                target_status: Some(target),
                reason: None,
            },
            Err(reason) => Self::denied(
                decision.action(),
                BatchDenial::MemberDenied { index: 0, status, reason },
            ),
        }
    }

    fn denied(action: Action, reason: BatchDenial) -> Self {
        Self { action, is_enabled: false, target_status: None, reason: Some(reason) }
    }

    pub fn reason_message(&self) -> Option<String> {
        self.reason.as_ref().map(BatchDenial::message)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BatchApprovalSummary {
    pub can_approve: bool,
    pub can_reject: bool,
    pub approve_target_status: Option<CanonicalStatus>,
    pub reject_target_status: Option<CanonicalStatus>,
    pub reasons: Vec<(Action, BatchDenial)>,
}

/// An action is allowed over a selection only when every member allows it
/// and every member lands on the same target status.
pub fn decide_batch(
    table: &TransitionTable,
    rules: &RoleRules,
    role: Role,
    statuses: &[CanonicalStatus],
    action: Action,
) -> BatchPermissionDecision {
    if statuses.is_empty() {
        return BatchPermissionDecision::denied(action, BatchDenial::EmptySelection);
    }

    let mut targets: Vec<CanonicalStatus> = Vec::new();
    for (index, status) in statuses.iter().enumerate() {
        let decision = decide(table, rules, role, *status, action);
        match decision.outcome() {
            Ok(target) => {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
            Err(reason) => {
                return BatchPermissionDecision::denied(
                    action,
                    BatchDenial::MemberDenied { index, status: *status, reason },
                );
            }
        }
    }

    if targets.len() > 1 {
        tracing::debug!(
            event_name = "workflow.batch.mixed_targets",
            role = role.as_str(),
            action = action.as_str(),
            batch_size = statuses.len(),
            "batch rejected because members resolve to different targets"
        );
        return BatchPermissionDecision::denied(action, BatchDenial::MixedTargets { targets });
    }

    BatchPermissionDecision { action, is_enabled: true, target_status: targets.pop(), reason: None }
}

pub fn summarize_batch(
    table: &TransitionTable,
    rules: &RoleRules,
    role: Role,
    statuses: &[CanonicalStatus],
) -> BatchApprovalSummary {
    let approve = decide_batch(table, rules, role, statuses, Action::Approve);
    let reject = decide_batch(table, rules, role, statuses, Action::Reject);

    let reasons = [&approve, &reject]
        .into_iter()
        .filter_map(|decision| decision.reason.clone().map(|reason| (decision.action, reason)))
        .collect();

    BatchApprovalSummary {
        can_approve: approve.is_enabled,
        can_reject: reject.is_enabled,
        approve_target_status: approve.target_status,
        reject_target_status: reject.target_status,
        reasons,
    }
}
