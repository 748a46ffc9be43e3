use serde::Serialize;
use tally_core::{Action, ApplicationError, CanonicalStatus, Role};

use super::{CommandContext, CommandResult};

#[derive(Debug, Serialize)]
struct TableRow {
    from: CanonicalStatus,
    action: Action,
    to: CanonicalStatus,
    performed_by: Vec<Role>,
}

pub fn run() -> CommandResult {
    match execute() {
        Ok(result) => result,
        Err(error) => CommandResult::from_error("table", &error),
    }
}

fn execute() -> Result<CommandResult, ApplicationError> {
    let context = CommandContext::load()?;
    let table = context.engine.table();
    let rules = context.engine.rules();

    if let Err(problems) = table.validate() {
        return Ok(CommandResult::failure(
            "table",
            "invalid_table",
            problems.join("; "),
            super::EXIT_CONFIG,
        ));
    }

    let rows: Vec<TableRow> = table
        .transitions()
        .into_iter()
        .map(|transition| TableRow {
            from: transition.from,
            action: transition.action,
            to: transition.to,
            performed_by: rules.roles_for(transition.from, transition.action),
        })
        .collect();
    let message =
        format!("{} transition(s) across {} statuses", rows.len(), CanonicalStatus::ALL.len());

    Ok(CommandResult::success_with("table", message, rows))
}
