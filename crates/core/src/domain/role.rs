use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Tutor,
    Lecturer,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Tutor, Role::Lecturer, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tutor => "TUTOR",
            Self::Lecturer => "LECTURER",
            Self::Admin => "ADMIN",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Self::Tutor => "Tutors",
            Self::Lecturer => "Lecturers",
            Self::Admin => "Administrators",
        }
    }

    /// Parses an authenticated role string. `HR` is accepted as an
    /// administrator only when `hr_is_admin` is set.
    pub fn parse(raw: &str, hr_is_admin: bool) -> Result<Self, RoleParseError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TUTOR" => Ok(Self::Tutor),
            "LECTURER" => Ok(Self::Lecturer),
            "ADMIN" | "ADMINISTRATOR" => Ok(Self::Admin),
            "HR" | "HUMAN_RESOURCES" if hr_is_admin => Ok(Self::Admin),
            _ => Err(RoleParseError { role: raw.to_string() }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value, true)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown role `{role}` (expected tutor|lecturer|admin|hr)")]
pub struct RoleParseError {
    pub role: String,
}
