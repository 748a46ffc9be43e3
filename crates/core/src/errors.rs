use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::role::RoleParseError;
use crate::domain::timesheet::TimesheetValidationError;
use crate::workflow::action::{Action, ActionParseError};
use crate::workflow::permissions::DisabledReason;
use crate::workflow::plan::PlanError;
use crate::workflow::status::CanonicalStatus;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("cannot {action} timesheet in {status}: {}", .reason.message())]
    IllegalTransition { status: CanonicalStatus, action: Action, reason: DisabledReason },
    #[error(transparent)]
    InvalidTimesheet(#[from] TimesheetValidationError),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable machine-readable class for envelopes and logs.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::IllegalTransition { .. }) => "illegal_transition",
            Self::Domain(DomainError::InvalidTimesheet(_)) => "invalid_timesheet",
            Self::Domain(DomainError::InvariantViolation(_)) => "invariant_violation",
            Self::InvalidInput(_) => "invalid_input",
            Self::Configuration(_) => "config_validation",
        }
    }
}

impl From<ConfigError> for ApplicationError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value.to_string())
    }
}

impl From<RoleParseError> for ApplicationError {
    fn from(value: RoleParseError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl From<ActionParseError> for ApplicationError {
    fn from(value: ActionParseError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl From<PlanError> for ApplicationError {
    fn from(value: PlanError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}
