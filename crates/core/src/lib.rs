pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;
pub mod workflow;

pub use audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
pub use domain::role::{Role, RoleParseError};
pub use domain::timesheet::{
    ApprovalRecord, NewTimesheet, Timesheet, TimesheetEdit, TimesheetId, TimesheetLimits,
    TimesheetValidationError,
};
pub use errors::{ApplicationError, DomainError};
pub use workflow::{
    normalize_status, present_actions, resolve_batch_permission, resolve_permission, Action,
    BatchPermissionDecision, CanonicalStatus, OrderedActionList, PermissionDecision,
    WorkflowEngine,
};
