use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::role::Role;
use crate::errors::DomainError;
use crate::workflow::action::Action;
use crate::workflow::engine::WorkflowEngine;
use crate::workflow::status::CanonicalStatus;
use crate::workflow::transitions::Transition;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimesheetId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TutorId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetLimits {
    pub min_hours: Decimal,
    pub max_hours: Decimal,
    pub min_hourly_rate: Decimal,
    pub max_hourly_rate: Decimal,
    pub max_description_len: usize,
}

impl Default for TimesheetLimits {
    fn default() -> Self {
        Self {
            min_hours: Decimal::new(1, 1),
            max_hours: Decimal::new(40, 0),
            min_hourly_rate: Decimal::new(1_000, 2),
            max_hourly_rate: Decimal::new(20_000, 2),
            max_description_len: 1_000,
        }
    }
}

pub const MAX_COMMENT_LEN: usize = 500;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TimesheetValidationError {
    #[error("week start date {date} is not a Monday")]
    WeekStartNotMonday { date: NaiveDate },
    #[error("hours must be between {min} and {max}, got {hours}")]
    HoursOutOfRange { hours: Decimal, min: Decimal, max: Decimal },
    #[error("hourly rate must be between {min} and {max}, got {rate}")]
    HourlyRateOutOfRange { rate: Decimal, min: Decimal, max: Decimal },
    #[error("description must not be blank")]
    DescriptionBlank,
    #[error("description cannot exceed {max} characters, got {len}")]
    DescriptionTooLong { len: usize, max: usize },
    #[error("role {role} cannot create timesheets")]
    CreatorNotPermitted { role: Role },
    #[error("{}", .action.comment_required_message())]
    CommentRequired { action: Action },
    #[error("comment cannot exceed {max} characters, got {len}")]
    CommentTooLong { len: usize, max: usize },
}


#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimesheet {
    pub tutor_id: TutorId,
    pub course_id: CourseId,
    pub week_start_date: NaiveDate,
    pub hours: Decimal,
    pub hourly_rate: Decimal,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetEdit {
    pub week_start_date: Option<NaiveDate>,
    pub hours: Option<Decimal>,
    pub hourly_rate: Option<Decimal>,
    pub description: Option<String>,
}

/// One applied transition in a timesheet's approval history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    pub approver_role: Role,
    pub action: Action,
    pub previous_status: CanonicalStatus,
    pub new_status: CanonicalStatus,
    pub comment: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timesheet {
    pub id: TimesheetId,
    pub tutor_id: TutorId,
    pub course_id: CourseId,
    pub week_start_date: NaiveDate,
    pub hours: Decimal,
    pub hourly_rate: Decimal,
    pub description: String,
    status: CanonicalStatus,
    #[serde(default)]
    history: Vec<ApprovalRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timesheet {
    pub fn create(
        id: TimesheetId,
        input: NewTimesheet,
        creator: Role,
        limits: &TimesheetLimits,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if creator == Role::Tutor {
            return Err(TimesheetValidationError::CreatorNotPermitted { role: creator }.into());
        }

        let description = input.description.trim().to_owned();
        validate_fields(
            input.week_start_date,
            input.hours,
            input.hourly_rate,
            &description,
            limits,
        )?;

        Ok(Self {
            id,
            tutor_id: input.tutor_id,
            course_id: input.course_id,
            week_start_date: input.week_start_date,
            hours: input.hours,
            hourly_rate: input.hourly_rate,
            description,
            status: CanonicalStatus::Draft,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn status(&self) -> CanonicalStatus {
        self.status
    }

    pub fn pay_amount(&self) -> Decimal {
        self.hours * self.hourly_rate
    }

    /// Applied transitions, oldest first.
    pub fn history(&self) -> &[ApprovalRecord] {
        &self.history
    }

    /// Performs `action` if the engine enables it for `role` in the current
    /// status. Reject and RequestModification need a non-blank comment. A
    /// refused action leaves the timesheet untouched.
    pub fn apply(
        &mut self,
        engine: &WorkflowEngine,
        role: Role,
        action: Action,
        comment: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Transition, DomainError> {
        let target = engine.resolve_permission(role, self.status, action).outcome().map_err(
            |reason| DomainError::IllegalTransition { status: self.status, action, reason },
        )?;
        let comment = validate_comment(action, comment)?;

        let transition = Transition { from: self.status, action, to: target };
        self.history.push(ApprovalRecord {
            approver_role: role,
            action,
            previous_status: self.status,
            new_status: target,
            comment,
            occurred_at: now,
        });
        self.status = target;
        self.updated_at = now;
        Ok(transition)
    }

    /// Applies field changes through the workflow's edit action. Fields are
    /// validated before the status moves.
    pub fn edit(
        &mut self,
        engine: &WorkflowEngine,
        role: Role,
        changes: TimesheetEdit,
        limits: &TimesheetLimits,
        now: DateTime<Utc>,
    ) -> Result<Transition, DomainError> {
        if let Err(reason) = engine.resolve_permission(role, self.status, Action::Edit).outcome() {
            return Err(DomainError::IllegalTransition {
                status: self.status,
                action: Action::Edit,
                reason,
            });
        }

        let week_start_date = changes.week_start_date.unwrap_or(self.week_start_date);
        let hours = changes.hours.unwrap_or(self.hours);
        let hourly_rate = changes.hourly_rate.unwrap_or(self.hourly_rate);
        let description = changes
            .description
            .map(|description| description.trim().to_owned())
            .unwrap_or_else(|| self.description.clone());
        validate_fields(week_start_date, hours, hourly_rate, &description, limits)?;

        let transition = self.apply(engine, role, Action::Edit, None, now)?;
        self.week_start_date = week_start_date;
        self.hours = hours;
        self.hourly_rate = hourly_rate;
        self.description = description;
        Ok(transition)
    }
}

pub fn validate_fields(
    week_start_date: NaiveDate,
    hours: Decimal,
    hourly_rate: Decimal,
    description: &str,
    limits: &TimesheetLimits,
) -> Result<(), TimesheetValidationError> {
    if week_start_date.weekday() != Weekday::Mon {
        return Err(TimesheetValidationError::WeekStartNotMonday { date: week_start_date });
    }

    if hours < limits.min_hours || hours > limits.max_hours {
        return Err(TimesheetValidationError::HoursOutOfRange {
            hours,
            min: limits.min_hours,
            max: limits.max_hours,
        });
    }

    if hourly_rate < limits.min_hourly_rate || hourly_rate > limits.max_hourly_rate {
        return Err(TimesheetValidationError::HourlyRateOutOfRange {
            rate: hourly_rate,
            min: limits.min_hourly_rate,
            max: limits.max_hourly_rate,
        });
    }

    let description = description.trim();
    if description.is_empty() {
        return Err(TimesheetValidationError::DescriptionBlank);
    }

    let len = description.chars().count();
    if len > limits.max_description_len {
        return Err(TimesheetValidationError::DescriptionTooLong {
            len,
            max: limits.max_description_len,
        });
    }

    Ok(())
}

/// Trims `comment`, requiring one for destructive actions and capping its length.
pub fn validate_comment(
    action: Action,
    comment: Option<&str>,
) -> Result<Option<String>, TimesheetValidationError> {
    let comment = comment.map(str::trim).filter(|comment| !comment.is_empty());
    let Some(comment) = comment else {
        if action.is_destructive() {
            return Err(TimesheetValidationError::CommentRequired { action });
        }
        return Ok(None);
    };

    let len = comment.chars().count();
    if len > MAX_COMMENT_LEN {
        return Err(TimesheetValidationError::CommentTooLong { len, max: MAX_COMMENT_LEN });
    }

    Ok(Some(comment.to_owned()))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{
        ApprovalRecord, CourseId, NewTimesheet, Timesheet, TimesheetEdit, TimesheetId,
        TimesheetLimits, TimesheetValidationError, TutorId, MAX_COMMENT_LEN,
    };
    use crate::domain::role::Role;
    use crate::errors::DomainError;
    use crate::workflow::action::Action;
    use crate::workflow::engine::WorkflowEngine;
    use crate::workflow::permissions::DisabledReason;
    use crate::workflow::status::CanonicalStatus;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
    }

    fn new_timesheet() -> NewTimesheet {
        NewTimesheet {
            tutor_id: TutorId("tutor-17".to_owned()),
            course_id: CourseId("COMP5349".to_owned()),
            week_start_date: monday(),
            hours: Decimal::new(105, 1),
            hourly_rate: Decimal::new(4_550, 2),
            description: "  Tutorial delivery and marking  ".to_owned(),
        }
    }

    fn created() -> Timesheet {
        Timesheet::create(
            TimesheetId("ts-1".to_owned()),
            new_timesheet(),
            Role::Lecturer,
            &TimesheetLimits::default(),
            Utc.with_ymd_and_hms(2026, 3, 6, 9, 0, 0).single().expect("valid timestamp"),
        )
        .expect("valid timesheet")
    }

    #[test]
    fn new_timesheets_start_in_draft_with_derived_pay() {
        let timesheet = created();

        assert_eq!(timesheet.status(), CanonicalStatus::Draft);
        assert_eq!(timesheet.description, "Tutorial delivery and marking");
        assert_eq!(timesheet.pay_amount(), Decimal::new(477_750, 3));
        assert_eq!(timesheet.created_at, timesheet.updated_at);
    }

    #[test]
    fn tutors_cannot_create_timesheets() {
        let error = Timesheet::create(
            TimesheetId("ts-2".to_owned()),
            new_timesheet(),
            Role::Tutor,
            &TimesheetLimits::default(),
            Utc::now(),
        )
        .expect_err("tutor creation is refused");

        assert_eq!(
            error,
            DomainError::InvalidTimesheet(TimesheetValidationError::CreatorNotPermitted {
                role: Role::Tutor
            })
        );
    }

    #[test]
    fn week_must_start_on_monday() {
        let mut input = new_timesheet();
        input.week_start_date = NaiveDate::from_ymd_opt(2026, 3, 4).expect("valid date");

        let error = Timesheet::create(
            TimesheetId("ts-3".to_owned()),
            input,
            Role::Admin,
            &TimesheetLimits::default(),
            Utc::now(),
        )
        .expect_err("wednesday is rejected");
        assert!(matches!(
            error,
            DomainError::InvalidTimesheet(TimesheetValidationError::WeekStartNotMonday { .. })
        ));
    }

    #[test]
    fn hours_rate_and_description_are_bounded() {
        let limits = TimesheetLimits::default();

        let mut too_long = new_timesheet();
        too_long.hours = Decimal::new(401, 1);
        assert!(matches!(
            Timesheet::create(TimesheetId("a".into()), too_long, Role::Admin, &limits, Utc::now()),
            Err(DomainError::InvalidTimesheet(TimesheetValidationError::HoursOutOfRange { .. }))
        ));

        let mut cheap = new_timesheet();
        cheap.hourly_rate = Decimal::new(999, 2);
        assert!(matches!(
            Timesheet::create(TimesheetId("b".into()), cheap, Role::Admin, &limits, Utc::now()),
            Err(DomainError::InvalidTimesheet(
                TimesheetValidationError::HourlyRateOutOfRange { .. }
            ))
        ));

        let mut blank = new_timesheet();
        blank.description = "   ".to_owned();
        assert!(matches!(
            Timesheet::create(TimesheetId("c".into()), blank, Role::Admin, &limits, Utc::now()),
            Err(DomainError::InvalidTimesheet(TimesheetValidationError::DescriptionBlank))
        ));

        let mut verbose = new_timesheet();
        verbose.description = "x".repeat(1_001);
        assert!(matches!(
            Timesheet::create(TimesheetId("d".into()), verbose, Role::Admin, &limits, Utc::now()),
            Err(DomainError::InvalidTimesheet(
                TimesheetValidationError::DescriptionTooLong { len: 1_001, max: 1_000 }
            ))
        ));
    }

    #[test]
    fn full_approval_walk_reaches_final_confirmation() {
        let engine = WorkflowEngine::standard();
        let mut timesheet = created();
        let later = Utc.with_ymd_and_hms(2026, 3, 9, 10, 0, 0).single().expect("valid timestamp");

        let steps = [
            (Role::Tutor, Action::Submit, CanonicalStatus::PendingTutorConfirmation),
            (Role::Tutor, Action::Confirm, CanonicalStatus::TutorConfirmed),
            (Role::Lecturer, Action::Approve, CanonicalStatus::LecturerConfirmed),
            (Role::Admin, Action::Approve, CanonicalStatus::FinalConfirmed),
        ];
        for (role, action, expected) in steps {
            let transition =
                timesheet.apply(engine, role, action, None, later).expect("step is permitted");
            assert_eq!(transition.to, expected);
            assert_eq!(timesheet.status(), expected);
        }

        assert_eq!(timesheet.updated_at, later);
        let error = timesheet
            .apply(engine, Role::Admin, Action::Reject, Some("late correction"), later)
            .expect_err("final confirmation is terminal");
        assert!(matches!(
            error,
            DomainError::IllegalTransition { reason: DisabledReason::TerminalStatus { .. }, .. }
        ));
    }

    #[test]
    fn refused_action_leaves_timesheet_untouched() {
        let engine = WorkflowEngine::standard();
        let mut timesheet = created();
        let before = timesheet.clone();

        let error = timesheet
            .apply(engine, Role::Lecturer, Action::Approve, None, Utc::now())
            .expect_err("draft cannot be approved");

        assert_eq!(timesheet, before);
        assert_eq!(
            error.to_string(),
            "cannot APPROVE timesheet in DRAFT: Timesheet must be confirmed by tutor first"
        );
    }

    #[test]
    fn editing_a_rejected_timesheet_returns_it_to_draft() {
        let engine = WorkflowEngine::standard();
        let limits = TimesheetLimits::default();
        let mut timesheet = created();
        for (role, action, comment) in [
            (Role::Tutor, Action::Submit, None),
            (Role::Tutor, Action::Confirm, None),
            (Role::Lecturer, Action::Reject, Some("Hours do not match the roster")),
        ] {
            timesheet.apply(engine, role, action, comment, Utc::now()).expect("step is permitted");
        }
        assert_eq!(timesheet.status(), CanonicalStatus::Rejected);

        let transition = timesheet
            .edit(
                engine,
                Role::Tutor,
                TimesheetEdit { hours: Some(Decimal::new(8, 0)), ..TimesheetEdit::default() },
                &limits,
                Utc::now(),
            )
            .expect("rejected timesheets are editable");

        assert_eq!(transition.to, CanonicalStatus::Draft);
        assert_eq!(timesheet.hours, Decimal::new(8, 0));
    }

    #[test]
    fn invalid_edit_does_not_move_the_status() {
        let engine = WorkflowEngine::standard();
        let mut timesheet = created();

        let error = timesheet
            .edit(
                engine,
                Role::Tutor,
                TimesheetEdit { hours: Some(Decimal::ZERO), ..TimesheetEdit::default() },
                &TimesheetLimits::default(),
                Utc::now(),
            )
            .expect_err("zero hours are out of range");

        assert!(matches!(
            error,
            DomainError::InvalidTimesheet(TimesheetValidationError::HoursOutOfRange { .. })
        ));
        assert_eq!(timesheet.status(), CanonicalStatus::Draft);
        assert_eq!(timesheet.hours, Decimal::new(105, 1));
    }

    fn confirmed_by_tutor() -> Timesheet {
        let engine = WorkflowEngine::standard();
        let mut timesheet = created();
        for action in [Action::Submit, Action::Confirm] {
            timesheet
                .apply(engine, Role::Tutor, action, None, Utc::now())
                .expect("step is permitted");
        }
        timesheet
    }

    #[test]
    fn rejection_requires_a_comment() {
        let engine = WorkflowEngine::standard();
        let mut timesheet = confirmed_by_tutor();
        let before = timesheet.clone();

        for comment in [None, Some(""), Some("   ")] {
            let error = timesheet
                .apply(engine, Role::Lecturer, Action::Reject, comment, Utc::now())
                .expect_err("blank rejection comment is refused");
            assert_eq!(
                error,
                DomainError::InvalidTimesheet(TimesheetValidationError::CommentRequired {
                    action: Action::Reject
                })
            );
            assert_eq!(error.to_string(), "Rejection comment is required");
        }

        let error = timesheet
            .apply(engine, Role::Lecturer, Action::RequestModification, None, Utc::now())
            .expect_err("blank modification request is refused");
        assert_eq!(error.to_string(), "Modification request comment is required");
        assert_eq!(timesheet, before);
    }

    #[test]
    fn comments_are_capped() {
        let engine = WorkflowEngine::standard();
        let mut timesheet = confirmed_by_tutor();
        let long = "x".repeat(MAX_COMMENT_LEN + 1);

        let error = timesheet
            .apply(engine, Role::Lecturer, Action::Approve, Some(&long), Utc::now())
            .expect_err("oversized comment is refused");
        assert_eq!(
            error,
            DomainError::InvalidTimesheet(TimesheetValidationError::CommentTooLong {
                len: 501,
                max: 500
            })
        );
        assert_eq!(timesheet.status(), CanonicalStatus::TutorConfirmed);

        let exact = "y".repeat(MAX_COMMENT_LEN);
        timesheet
            .apply(engine, Role::Lecturer, Action::Approve, Some(&exact), Utc::now())
            .expect("a comment at the cap is accepted");
    }

    #[test]
    fn refused_permission_wins_over_missing_comment() {
        let engine = WorkflowEngine::standard();
        let mut timesheet = created();

        let error = timesheet
            .apply(engine, Role::Tutor, Action::Reject, None, Utc::now())
            .expect_err("tutors cannot reject");
        assert!(matches!(error, DomainError::IllegalTransition { .. }));
    }

    #[test]
    fn applied_transitions_are_recorded_in_history() {
        let engine = WorkflowEngine::standard();
        let mut timesheet = confirmed_by_tutor();
        let rejected_at =
            Utc.with_ymd_and_hms(2026, 3, 10, 14, 30, 0).single().expect("valid timestamp");

        timesheet
            .apply(
                engine,
                Role::Lecturer,
                Action::Reject,
                Some("  Hours do not match the roster  "),
                rejected_at,
            )
            .expect("lecturer can reject");

        let history = timesheet.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].action, Action::Submit);
        assert_eq!(history[0].previous_status, CanonicalStatus::Draft);
        assert_eq!(history[1].new_status, CanonicalStatus::TutorConfirmed);
        assert_eq!(
            history[2],
            ApprovalRecord {
                approver_role: Role::Lecturer,
                action: Action::Reject,
                previous_status: CanonicalStatus::TutorConfirmed,
                new_status: CanonicalStatus::Rejected,
                comment: Some("Hours do not match the roster".to_owned()),
                occurred_at: rejected_at,
            }
        );

        timesheet
            .apply(engine, Role::Admin, Action::Approve, Some("   "), Utc::now())
            .expect_err("rejected timesheets cannot be approved");
        assert_eq!(timesheet.history().len(), 3);
    }
}
