use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Edit,
    Submit,
    Confirm,
    Approve,
    Reject,
    RequestModification,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Edit,
        Action::Submit,
        Action::Confirm,
        Action::Approve,
        Action::Reject,
        Action::RequestModification,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Edit => "EDIT",
            Self::Submit => "SUBMIT",
            Self::Confirm => "CONFIRM",
            Self::Approve => "APPROVE",
            Self::Reject => "REJECT",
            Self::RequestModification => "REQUEST_MODIFICATION",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Submit => "Submit",
            Self::Confirm => "Confirm",
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::RequestModification => "Request modification",
        }
    }

    pub(crate) fn verb(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Submit => "submit",
            Self::Confirm => "confirm",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::RequestModification => "request modifications to",
        }
    }

    pub fn is_destructive(self) -> bool {
        matches!(self, Self::Reject | Self::RequestModification)
    }

    pub(crate) fn comment_required_message(self) -> &'static str {
        match self {
            Self::RequestModification => "Modification request comment is required",
            Self::Reject => "Rejection comment is required",
            _ => "Comment is required",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown timesheet action `{0}` (expected edit|submit|confirm|approve|reject|request_modification)")]
pub struct ActionParseError(pub String);

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == key)
            .ok_or_else(|| ActionParseError(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Action;

    #[test]
    fn parses_case_insensitive_action_names() {
        assert_eq!("approve".parse::<Action>(), Ok(Action::Approve));
        assert_eq!("request-modification".parse::<Action>(), Ok(Action::RequestModification));
        assert!("publish".parse::<Action>().is_err());
    }

    #[test]
    fn only_reject_and_modification_requests_are_destructive() {
        let destructive: Vec<Action> =
            Action::ALL.into_iter().filter(|action| action.is_destructive()).collect();
        assert_eq!(destructive, vec![Action::Reject, Action::RequestModification]);
    }
}
