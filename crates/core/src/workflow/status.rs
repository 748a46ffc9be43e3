use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanonicalStatus {
    Draft,
    PendingTutorConfirmation,
    TutorConfirmed,
    LecturerConfirmed,
    FinalConfirmed,
    Rejected,
    ModificationRequested,
}

impl CanonicalStatus {
    pub const ALL: [CanonicalStatus; 7] = [
        CanonicalStatus::Draft,
        CanonicalStatus::PendingTutorConfirmation,
        CanonicalStatus::TutorConfirmed,
        CanonicalStatus::LecturerConfirmed,
        CanonicalStatus::FinalConfirmed,
        CanonicalStatus::Rejected,
        CanonicalStatus::ModificationRequested,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::PendingTutorConfirmation => "PENDING_TUTOR_CONFIRMATION",
            Self::TutorConfirmed => "TUTOR_CONFIRMED",
            Self::LecturerConfirmed => "LECTURER_CONFIRMED",
            Self::FinalConfirmed => "FINAL_CONFIRMED",
            Self::Rejected => "REJECTED",
            Self::ModificationRequested => "MODIFICATION_REQUESTED",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingTutorConfirmation => "Pending Tutor Confirmation",
            Self::TutorConfirmed => "Tutor Confirmed",
            Self::LecturerConfirmed => "Lecturer Confirmed",
            Self::FinalConfirmed => "Final Confirmed",
            Self::Rejected => "Rejected",
            Self::ModificationRequested => "Modification Requested",
        }
    }

    /// Position in the approval pipeline. Statuses a timesheet is edited in
    /// share stage 0; each confirmation tier moves one stage forward.
    pub fn stage(self) -> u8 {
        match self {
            Self::Draft | Self::Rejected | Self::ModificationRequested => 0,
            Self::PendingTutorConfirmation => 1,
            Self::TutorConfirmed => 2,
            Self::LecturerConfirmed => 3,
            Self::FinalConfirmed => 4,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(
            self,
            Self::PendingTutorConfirmation | Self::TutorConfirmed | Self::LecturerConfirmed
        )
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusNormalization {
    Canonical { status: CanonicalStatus },
    LegacyAlias { status: CanonicalStatus },
    Unrecognized { status: CanonicalStatus },
}

impl StatusNormalization {
    pub fn status(self) -> CanonicalStatus {
        match self {
            Self::Canonical { status }
            | Self::LegacyAlias { status }
            | Self::Unrecognized { status } => status,
        }
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, Self::Unrecognized { .. })
    }
}

const LEGACY_ALIASES: &[(&str, CanonicalStatus)] = &[
    ("PENDING_TUTOR_REVIEW", CanonicalStatus::PendingTutorConfirmation),
    ("SUBMITTED", CanonicalStatus::PendingTutorConfirmation),
    ("PENDING", CanonicalStatus::PendingTutorConfirmation),
    ("APPROVED_BY_TUTOR", CanonicalStatus::TutorConfirmed),
    ("TUTOR_APPROVED", CanonicalStatus::TutorConfirmed),
    ("PENDING_LECTURER_APPROVAL", CanonicalStatus::TutorConfirmed),
    ("APPROVED_BY_LECTURER_AND_TUTOR", CanonicalStatus::LecturerConfirmed),
    ("APPROVED", CanonicalStatus::LecturerConfirmed),
    ("PENDING_HR_REVIEW", CanonicalStatus::LecturerConfirmed),
    ("PENDING_FINAL_APPROVAL", CanonicalStatus::LecturerConfirmed),
    ("FINAL_APPROVED", CanonicalStatus::FinalConfirmed),
    ("HR_APPROVED", CanonicalStatus::FinalConfirmed),
    ("HR_CONFIRMED", CanonicalStatus::FinalConfirmed),
];

pub fn classify_status(raw: &str) -> StatusNormalization {
    let key = normalize_key(raw);

    if let Some(status) = CanonicalStatus::ALL.into_iter().find(|status| status.as_str() == key) {
        return StatusNormalization::Canonical { status };
    }

    if let Some((_, status)) = LEGACY_ALIASES.iter().find(|(alias, _)| *alias == key) {
        return StatusNormalization::LegacyAlias { status: *status };
    }

    tracing::debug!(
        event_name = "workflow.status.unrecognized",
        raw_status = raw,
        fallback = CanonicalStatus::Draft.as_str(),
        "unrecognized timesheet status rendered as draft"
    );
    StatusNormalization::Unrecognized { status: CanonicalStatus::Draft }
}

pub fn normalize_status(raw: &str) -> CanonicalStatus {
    classify_status(raw).status()
}

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| if ch == '-' || ch.is_whitespace() { '_' } else { ch.to_ascii_uppercase() })
        .collect()
}
