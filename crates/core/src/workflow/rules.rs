use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::role::Role;
use crate::workflow::action::Action;
use crate::workflow::status::CanonicalStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleGrant {
    pub role: Role,
    pub status: CanonicalStatus,
    pub action: Action,
}

impl RoleGrant {
    pub fn new(role: Role, status: CanonicalStatus, action: Action) -> Self {
        Self { role, status, action }
    }
}

/// Which role may perform which action in which status. Grants narrow the
/// transition table; a grant the table does not back is inert.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRules {
    grants: BTreeSet<RoleGrant>,
}

impl RoleRules {
    pub fn new(grants: impl IntoIterator<Item = RoleGrant>) -> Self {
        Self { grants: grants.into_iter().collect() }
    }

    pub fn standard() -> Self {
        use Action::{Approve, Confirm, Edit, Reject, RequestModification, Submit};
        use CanonicalStatus::{
            Draft, LecturerConfirmed, ModificationRequested, PendingTutorConfirmation, Rejected,
            TutorConfirmed,
        };

        let mut grants = Vec::new();
        for status in [Draft, ModificationRequested, Rejected] {
            grants.push(RoleGrant::new(Role::Tutor, status, Edit));
            grants.push(RoleGrant::new(Role::Tutor, status, Submit));
        }
        grants.push(RoleGrant::new(Role::Tutor, PendingTutorConfirmation, Confirm));
        for action in [Approve, Reject, RequestModification] {
            grants.push(RoleGrant::new(Role::Lecturer, TutorConfirmed, action));
        }
        for action in [Approve, Reject] {
            grants.push(RoleGrant::new(Role::Admin, LecturerConfirmed, action));
        }

        Self::new(grants)
    }

    pub fn with_grants(mut self, grants: impl IntoIterator<Item = RoleGrant>) -> Self {
        self.grants.extend(grants);
        self
    }

    pub fn allows(&self, role: Role, status: CanonicalStatus, action: Action) -> bool {
        self.grants.contains(&RoleGrant::new(role, status, action))
    }

    /// Statuses in which `role` holds a grant for `action`, in pipeline order.
    pub fn statuses_for(&self, role: Role, action: Action) -> Vec<CanonicalStatus> {
        let mut statuses: Vec<CanonicalStatus> = self
            .grants
            .iter()
            .filter(|grant| grant.role == role && grant.action == action)
            .map(|grant| grant.status)
            .collect();
        statuses.sort_by_key(|status| (status.stage(), *status));
        statuses
    }

    pub fn roles_for(&self, status: CanonicalStatus, action: Action) -> Vec<Role> {
        self.grants
            .iter()
            .filter(|grant| grant.status == status && grant.action == action)
            .map(|grant| grant.role)
            .collect()
    }

    pub fn grants(&self) -> impl Iterator<Item = &RoleGrant> {
        self.grants.iter()
    }
}
