use serde::Serialize;
use tally_core::workflow::validate_presentation;
use tally_core::{ApplicationError, CanonicalStatus, OrderedActionList, Role};

use super::{status_arg, CommandContext, CommandResult};

#[derive(Debug, Serialize)]
struct ActionsOutput {
    role: Role,
    status: CanonicalStatus,
    actions: OrderedActionList,
    violation: Option<String>,
}

pub fn run(role: &str, status: &str) -> CommandResult {
    match execute(role, status) {
        Ok(result) => result,
        Err(error) => CommandResult::from_error("actions", &error),
    }
}

fn execute(role: &str, status: &str) -> Result<CommandResult, ApplicationError> {
    let context = CommandContext::load()?;
    let role = context.role(role)?;
    let (status, _) = status_arg(status);

    let actions = context.engine.present(role, status);
    let violation = validate_presentation(&actions).err().map(|violation| violation.to_string());
    let message = match actions.primary() {
        Some(primary) => format!("primary action for {role} in {status}: {}", primary.label),
        None => format!("no primary action for {role} in {status}"),
    };

    Ok(CommandResult::success_with(
        "actions",
        message,
        ActionsOutput { role, status, actions, violation },
    ))
}
