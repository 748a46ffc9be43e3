//! Timesheet approval workflow: status normalization, the transition table,
//! role grants and the decisions derived from them.
//!
//! The free functions here run against [`WorkflowEngine::standard`]. Callers
//! with configured grants hold their own [`WorkflowEngine`].

pub mod action;
pub mod batch;
pub mod engine;
pub mod permissions;
pub mod plan;
pub mod presentation;
pub mod rules;
pub mod status;
pub mod transitions;

pub use action::{Action, ActionParseError};
pub use batch::{BatchApprovalSummary, BatchDenial, BatchPermissionDecision};
pub use engine::WorkflowEngine;
pub use permissions::{DisabledReason, PermissionDecision, RolePermissions};
pub use plan::{PlanError, PlannedStep, TransitionPlan};
pub use presentation::{
    present_actions, validate_presentation, ActionPriority, OrderedActionList,
    PresentationViolation, PresentedAction,
};
pub use rules::{RoleGrant, RoleRules};
pub use status::{classify_status, normalize_status, CanonicalStatus, StatusNormalization};
pub use transitions::{Transition, TransitionTable};

use crate::domain::role::Role;

pub fn resolve_permission(
    role: Role,
    status: CanonicalStatus,
    action: Action,
) -> PermissionDecision {
    WorkflowEngine::standard().resolve_permission(role, status, action)
}

pub fn resolve(role: Role, status: CanonicalStatus) -> RolePermissions {
    WorkflowEngine::standard().resolve(role, status)
}

pub fn resolve_batch_permission(
    role: Role,
    statuses: &[CanonicalStatus],
    action: Action,
) -> BatchPermissionDecision {
    WorkflowEngine::standard().resolve_batch_permission(role, statuses, action)
}

pub fn resolve_batch(role: Role, statuses: &[CanonicalStatus]) -> BatchApprovalSummary {
    WorkflowEngine::standard().resolve_batch(role, statuses)
}

pub fn plan_transition(
    role: Role,
    from: CanonicalStatus,
    goal: CanonicalStatus,
) -> Result<TransitionPlan, PlanError> {
    WorkflowEngine::standard().plan_transition(role, from, goal)
}
