use tally_core::ApplicationError;

use super::{status_arg, CommandContext, CommandResult};

pub fn run(role: &str, from: &str, goal: &str) -> CommandResult {
    match execute(role, from, goal) {
        Ok(result) => result,
        Err(error) => CommandResult::from_error("plan", &error),
    }
}

fn execute(role: &str, from: &str, goal: &str) -> Result<CommandResult, ApplicationError> {
    let context = CommandContext::load()?;
    let role = context.role(role)?;
    let (from, _) = status_arg(from);
    let (goal, _) = status_arg(goal);

    let plan = context.engine.plan_transition(role, from, goal)?;
    let message = if plan.caller_can_complete() {
        format!("{} step(s) from {from} to {goal}, all performable by {role}", plan.steps.len())
    } else {
        format!("{} step(s) from {from} to {goal}, some require other roles", plan.steps.len())
    };

    Ok(CommandResult::success_with("plan", message, plan))
}
