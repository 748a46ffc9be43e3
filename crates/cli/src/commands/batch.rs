use serde::Serialize;
use tally_core::workflow::BatchPermissionDecision;
use tally_core::{Action, ApplicationError, CanonicalStatus, Role};

use super::{status_arg, CommandContext, CommandResult};

#[derive(Debug, Serialize)]
struct BatchOutput {
    role: Role,
    statuses: Vec<CanonicalStatus>,
    decision: BatchPermissionDecision,
    reason_message: Option<String>,
}

pub fn run(role: &str, action: &str, statuses: &[String]) -> CommandResult {
    match execute(role, action, statuses) {
        Ok(result) => result,
        Err(error) => CommandResult::from_error("batch", &error),
    }
}

fn execute(
    role: &str,
    action: &str,
    statuses: &[String],
) -> Result<CommandResult, ApplicationError> {
    let context = CommandContext::load()?;
    let role = context.role(role)?;
    let action = action.parse::<Action>()?;
    let statuses: Vec<CanonicalStatus> =
        statuses.iter().map(|status| status_arg(status).0).collect();

    let decision = context.engine.resolve_batch_permission(role, &statuses, action);
    let reason_message = decision.reason_message();
    let message = match (&decision.target_status, &reason_message) {
        (Some(target), _) => {
            format!("{action} enabled for {} timesheet(s), moves to {target}", statuses.len())
        }
        (None, Some(reason)) => format!("{action} disabled: {reason}"),
        (None, None) => format!("{action} disabled"),
    };

    Ok(CommandResult::success_with(
        "batch",
        message,
        BatchOutput { role, statuses, decision, reason_message },
    ))
}
