use serde::Serialize;
use tally_core::workflow::{PermissionDecision, RolePermissions, StatusNormalization};
use tally_core::{Action, ApplicationError, CanonicalStatus, Role};

use super::{status_arg, CommandContext, CommandResult};

#[derive(Debug, Serialize)]
struct SingleDecision {
    role: Role,
    status: CanonicalStatus,
    normalization: StatusNormalization,
    decision: PermissionDecision,
    disabled_message: Option<String>,
}

#[derive(Debug, Serialize)]
struct AllDecisions {
    normalization: StatusNormalization,
    permissions: RolePermissions,
    messages: Vec<(Action, String)>,
}

pub fn run(role: &str, status: &str, action: Option<&str>) -> CommandResult {
    match execute(role, status, action) {
        Ok(result) => result,
        Err(error) => CommandResult::from_error("resolve", &error),
    }
}

fn execute(
    role: &str,
    status: &str,
    action: Option<&str>,
) -> Result<CommandResult, ApplicationError> {
    let context = CommandContext::load()?;
    let role = context.role(role)?;
    let (status, normalization) = status_arg(status);

    let Some(action) = action else {
        let permissions = context.engine.resolve(role, status);
        let enabled = permissions.enabled_actions();
        let messages = permissions
            .reasons
            .iter()
            .map(|(action, reason)| (*action, reason.message()))
            .collect();
        let message = format!("{role} in {status}: {} action(s) enabled", enabled.len());
        return Ok(CommandResult::success_with(
            "resolve",
            message,
            AllDecisions { normalization, permissions, messages },
        ));
    };

    let action = action.parse::<Action>()?;
    let decision = context.engine.resolve_permission(role, status, action);
    let message = match decision.outcome() {
        Ok(target) => format!("{action} enabled for {role} in {status}, moves to {target}"),
        Err(reason) => {
            format!("{action} disabled for {role} in {status}: {}", reason.message())
        }
    };

    Ok(CommandResult::success_with(
        "resolve",
        message,
        SingleDecision {
            role,
            status,
            normalization,
            disabled_message: decision.disabled_message(),
            decision,
        },
    ))
}
