use serde::Serialize;
use thiserror::Error;

use crate::domain::role::Role;
use crate::workflow::action::Action;
use crate::workflow::rules::RoleRules;
use crate::workflow::status::CanonicalStatus;
use crate::workflow::transitions::TransitionTable;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    pub from: CanonicalStatus,
    pub action: Action,
    pub to: CanonicalStatus,
    pub performed_by: Vec<Role>,
    pub caller_may_perform: bool,
}

/// The chain of transitions a timesheet goes through to reach a goal status.
/// The same "approve" gesture can mean several steps, each gated on its own
/// role; the plan spells them out instead of jumping straight to the goal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransitionPlan {
    pub role: Role,
    pub from: CanonicalStatus,
    pub goal: CanonicalStatus,
    pub steps: Vec<PlannedStep>,
}

impl TransitionPlan {
    pub fn is_direct(&self) -> bool {
        self.steps.len() == 1
    }

    pub fn caller_can_complete(&self) -> bool {
        self.steps.iter().all(|step| step.caller_may_perform)
    }

    pub fn next_step(&self) -> Option<&PlannedStep> {
        self.steps.first()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("timesheet is already {status}")]
    AlreadyAtGoal { status: CanonicalStatus },
    #[error("no transition chain leads from {from} to {goal}")]
    Unreachable { from: CanonicalStatus, goal: CanonicalStatus },
}

pub fn plan_transition(
    table: &TransitionTable,
    rules: &RoleRules,
    role: Role,
    from: CanonicalStatus,
    goal: CanonicalStatus,
) -> Result<TransitionPlan, PlanError> {
    if from == goal {
        return Err(PlanError::AlreadyAtGoal { status: from });
    }

    let path = table.path(from, goal).ok_or(PlanError::Unreachable { from, goal })?;
    let steps = path
        .into_iter()
        .map(|transition| PlannedStep {
            from: transition.from,
            action: transition.action,
            to: transition.to,
            performed_by: rules.roles_for(transition.from, transition.action),
            caller_may_perform: rules.allows(role, transition.from, transition.action),
        })
        .collect();

    Ok(TransitionPlan { role, from, goal, steps })
}
