use std::sync::OnceLock;

use chrono::{DateTime, Utc};

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::domain::role::Role;
use crate::domain::timesheet::Timesheet;
use crate::errors::DomainError;
use crate::workflow::action::Action;
use crate::workflow::batch::{
    decide_batch, summarize_batch, BatchApprovalSummary, BatchPermissionDecision,
};
use crate::workflow::permissions::{decide, decide_all, PermissionDecision, RolePermissions};
use crate::workflow::plan::{plan_transition, PlanError, TransitionPlan};
use crate::workflow::presentation::{present_actions, OrderedActionList};
use crate::workflow::rules::RoleRules;
use crate::workflow::status::CanonicalStatus;
use crate::workflow::transitions::{Transition, TransitionTable};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkflowEngine {
    table: TransitionTable,
    rules: RoleRules,
}

impl WorkflowEngine {
    pub fn new(table: TransitionTable, rules: RoleRules) -> Self {
        Self { table, rules }
    }

    /// Process-wide engine over the standard table and grants, built on first use.
    pub fn standard() -> &'static WorkflowEngine {
        static STANDARD: OnceLock<WorkflowEngine> = OnceLock::new();
        STANDARD.get_or_init(|| Self::new(TransitionTable::standard(), RoleRules::standard()))
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn rules(&self) -> &RoleRules {
        &self.rules
    }

    pub fn resolve_permission(
        &self,
        role: Role,
        status: CanonicalStatus,
        action: Action,
    ) -> PermissionDecision {
        decide(&self.table, &self.rules, role, status, action)
    }

    pub fn resolve(&self, role: Role, status: CanonicalStatus) -> RolePermissions {
        decide_all(&self.table, &self.rules, role, status)
    }

    pub fn resolve_batch_permission(
        &self,
        role: Role,
        statuses: &[CanonicalStatus],
        action: Action,
    ) -> BatchPermissionDecision {
        decide_batch(&self.table, &self.rules, role, statuses, action)
    }

    pub fn resolve_batch(&self, role: Role, statuses: &[CanonicalStatus]) -> BatchApprovalSummary {
        summarize_batch(&self.table, &self.rules, role, statuses)
    }

    pub fn present(&self, role: Role, status: CanonicalStatus) -> OrderedActionList {
        present_actions(&self.resolve(role, status).decisions)
    }

    pub fn plan_transition(
        &self,
        role: Role,
        from: CanonicalStatus,
        goal: CanonicalStatus,
    ) -> Result<TransitionPlan, PlanError> {
        plan_transition(&self.table, &self.rules, role, from, goal)
    }

    /// Applies `action` to `timesheet` and records the outcome on `sink`,
    /// whether the transition happened or was refused.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_with_audit<S>(
        &self,
        timesheet: &mut Timesheet,
        role: Role,
        action: Action,
        comment: Option<&str>,
        now: DateTime<Utc>,
        sink: &S,
        audit: &AuditContext,
    ) -> Result<Transition, DomainError>
    where
        S: AuditSink,
    {
        let from = timesheet.status();
        let result = timesheet.apply(self, role, action, comment, now);
        let event = match &result {
            Ok(transition) => {
                let event = AuditEvent::new(
                    Some(timesheet.id.clone()),
                    audit.correlation_id.clone(),
                    "timesheet.transition_applied",
                    AuditCategory::Workflow,
                    audit.actor.clone(),
                    AuditOutcome::Success,
                )
                .with_metadata("to", transition.to.as_str());
                match timesheet.history().last().and_then(|record| record.comment.as_deref()) {
                    Some(comment) => event.with_metadata("comment", comment),
                    None => event,
                }
            }
            Err(error) => {
                let (category, outcome) = match error {
                    DomainError::IllegalTransition { .. } => {
                        (AuditCategory::Workflow, AuditOutcome::Rejected)
                    }
                    DomainError::InvalidTimesheet(_) => {
                        (AuditCategory::Timesheet, AuditOutcome::Rejected)
                    }
                    DomainError::InvariantViolation(_) => {
                        (AuditCategory::Workflow, AuditOutcome::Failed)
                    }
                };
                AuditEvent::new(
                    Some(timesheet.id.clone()),
                    audit.correlation_id.clone(),
                    "timesheet.transition_rejected",
                    category,
                    audit.actor.clone(),
                    outcome,
                )
                .with_metadata("reason", error.to_string())
            }
        };

        sink.emit(
            event
                .with_metadata("role", role.as_str())
                .with_metadata("from", from.as_str())
                .with_metadata("action", action.as_str()),
        );
        result
    }
}

impl Default for WorkflowEngine {
    fn default() -> Self {
        Self::new(TransitionTable::standard(), RoleRules::standard())
    }
}
