use serde::Serialize;
use thiserror::Error;

use crate::workflow::action::Action;
use crate::workflow::permissions::PermissionDecision;
use crate::workflow::status::CanonicalStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionPriority {
    Primary,
    Secondary,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PresentedAction {
    pub action: Action,
    pub label: &'static str,
    pub priority: ActionPriority,
    pub is_enabled: bool,
    pub disabled_reason: Option<String>,
    pub target_status: Option<CanonicalStatus>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OrderedActionList {
    pub actions: Vec<PresentedAction>,
}

impl OrderedActionList {
    pub fn primary(&self) -> Option<&PresentedAction> {
        self.actions.iter().find(|action| action.priority == ActionPriority::Primary)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PresentationViolation {
    #[error("action list has no primary action")]
    MissingPrimary,
    #[error("action list has {count} primary actions: {actions:?}")]
    MultiplePrimaries { count: usize, actions: Vec<Action> },
}

const PRIMARY_PRECEDENCE: [Action; 4] =
    [Action::Approve, Action::Confirm, Action::Submit, Action::Edit];

pub fn present_actions(decisions: &[PermissionDecision]) -> OrderedActionList {
    let mut unique: Vec<&PermissionDecision> = Vec::new();
    for decision in decisions {
        if !unique.iter().any(|seen| seen.action() == decision.action()) {
            unique.push(decision);
        }
    }

    let primary = pick_primary(&unique);

    let mut actions: Vec<PresentedAction> = unique
        .iter()
        .map(|decision| {
            let action = decision.action();
            let priority = if action.is_destructive() {
                ActionPriority::Destructive
            } else if Some(action) == primary {
                ActionPriority::Primary
            } else {
                ActionPriority::Secondary
            };

            PresentedAction {
                action,
                label: label(action, decision.target_status()),
                priority,
                is_enabled: decision.is_enabled(),
                disabled_reason: decision.disabled_message(),
                target_status: decision.target_status(),
            }
        })
        .collect();

    actions.sort_by_key(|presented| (presented.priority, presented.action));
    let list = OrderedActionList { actions };

    if cfg!(debug_assertions) {
        if let Err(violation) = validate_presentation(&list) {
            tracing::warn!(
                event_name = "workflow.presentation.invalid",
                violation = %violation,
                "action list violates the single primary rule"
            );
        }
    }

    list
}

pub fn validate_presentation(list: &OrderedActionList) -> Result<(), PresentationViolation> {
    let primaries: Vec<Action> = list
        .actions
        .iter()
        .filter(|action| action.priority == ActionPriority::Primary)
        .map(|action| action.action)
        .collect();

    match primaries.len() {
        0 => Err(PresentationViolation::MissingPrimary),
        1 => Ok(()),
        count => Err(PresentationViolation::MultiplePrimaries { count, actions: primaries }),
    }
}

fn pick_primary(decisions: &[&PermissionDecision]) -> Option<Action> {
    let find = |enabled_only: bool| {
        PRIMARY_PRECEDENCE.into_iter().find(|candidate| {
            decisions.iter().any(|decision| {
                decision.action() == *candidate && (!enabled_only || decision.is_enabled())
            })
        })
    };

    find(true).or_else(|| find(false))
}

fn label(action: Action, target: Option<CanonicalStatus>) -> &'static str {
    match action {
        Action::Edit => "Edit",
        Action::Submit => "Submit",
        Action::Confirm => "Confirm",
        Action::Approve if target == Some(CanonicalStatus::FinalConfirmed) => "Final Approve",
        Action::Approve => "Approve",
        Action::Reject => "Reject",
        Action::RequestModification => "Request Changes",
    }
}
