use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::workflow::action::Action;
use crate::workflow::status::CanonicalStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: CanonicalStatus,
    pub action: Action,
    pub to: CanonicalStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    entries: BTreeMap<CanonicalStatus, Vec<(Action, CanonicalStatus)>>,
}

impl TransitionTable {
    pub fn new(entries: BTreeMap<CanonicalStatus, Vec<(Action, CanonicalStatus)>>) -> Self {
        Self { entries }
    }

    pub fn standard() -> Self {
        use Action::{Approve, Confirm, Edit, Reject, RequestModification, Submit};
        use CanonicalStatus::{
            Draft, FinalConfirmed, LecturerConfirmed, ModificationRequested,
            PendingTutorConfirmation, Rejected, TutorConfirmed,
        };

        let entries = BTreeMap::from([
            (Draft, vec![(Edit, Draft), (Submit, PendingTutorConfirmation)]),
            (
                ModificationRequested,
                vec![(Edit, ModificationRequested), (Submit, PendingTutorConfirmation)],
            ),
            (Rejected, vec![(Edit, Draft)]),
            (PendingTutorConfirmation, vec![(Confirm, TutorConfirmed)]),
            (
                TutorConfirmed,
                vec![
                    (Approve, LecturerConfirmed),
                    (Reject, Rejected),
                    (RequestModification, ModificationRequested),
                ],
            ),
            (LecturerConfirmed, vec![(Approve, FinalConfirmed), (Reject, Rejected)]),
            (FinalConfirmed, Vec::new()),
        ]);

        Self { entries }
    }

    pub fn contains_status(&self, status: CanonicalStatus) -> bool {
        self.entries.contains_key(&status)
    }

    pub fn legal_actions(&self, status: CanonicalStatus) -> Vec<Action> {
        self.entries
            .get(&status)
            .map(|actions| actions.iter().map(|(action, _)| *action).collect())
            .unwrap_or_default()
    }

    pub fn target(&self, status: CanonicalStatus, action: Action) -> Option<CanonicalStatus> {
        self.entries
            .get(&status)?
            .iter()
            .find(|(candidate, _)| *candidate == action)
            .map(|(_, target)| *target)
    }

    pub fn is_terminal(&self, status: CanonicalStatus) -> bool {
        self.entries.get(&status).is_some_and(Vec::is_empty)
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.entries
            .iter()
            .flat_map(|(from, actions)| {
                actions
                    .iter()
                    .map(|(action, to)| Transition { from: *from, action: *action, to: *to })
            })
            .collect()
    }

    /// Shortest chain of forward transitions from `from` to `goal`.
    /// Rejections and modification requests never appear in a chain; an edit
    /// only appears when it moves the timesheet to another status.
    pub fn path(&self, from: CanonicalStatus, goal: CanonicalStatus) -> Option<Vec<Transition>> {
        if from == goal {
            return Some(Vec::new());
        }

        let mut previous: BTreeMap<CanonicalStatus, Transition> = BTreeMap::new();
        let mut visited = BTreeSet::from([from]);
        let mut queue = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            for transition in self.forward_transitions(current) {
                if !visited.insert(transition.to) {
                    continue;
                }
                previous.insert(transition.to, transition);
                if transition.to == goal {
                    return Some(unwind(&previous, from, goal));
                }
                queue.push_back(transition.to);
            }
        }

        None
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for transition in self.transitions() {
            if !self.entries.contains_key(&transition.to) {
                errors.push(format!(
                    "{} from {} targets {} which has no entry",
                    transition.action, transition.from, transition.to
                ));
            }
        }

        let mut reachable = BTreeSet::from([CanonicalStatus::Draft]);
        let mut queue = VecDeque::from([CanonicalStatus::Draft]);
        while let Some(current) = queue.pop_front() {
            if let Some(actions) = self.entries.get(&current) {
                for (_, target) in actions {
                    if reachable.insert(*target) {
                        queue.push_back(*target);
                    }
                }
            }
        }

        for status in CanonicalStatus::ALL {
            if !reachable.contains(&status) {
                errors.push(format!("unreachable status: {status}"));
            }
        }

        for (status, actions) in &self.entries {
            let distinct: BTreeSet<Action> = actions.iter().map(|(action, _)| *action).collect();
            if distinct.len() != actions.len() {
                errors.push(format!("{status} lists the same action more than once"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn forward_transitions(
        &self,
        status: CanonicalStatus,
    ) -> impl Iterator<Item = Transition> + '_ {
        self.entries.get(&status).into_iter().flatten().filter_map(move |(action, to)| {
            let forward = match action {
                Action::Submit | Action::Confirm | Action::Approve => true,
                Action::Edit => *to != status,
                Action::Reject | Action::RequestModification => false,
            };
            forward.then_some(Transition { from: status, action: *action, to: *to })
        })
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn unwind(
    previous: &BTreeMap<CanonicalStatus, Transition>,
    from: CanonicalStatus,
    goal: CanonicalStatus,
) -> Vec<Transition> {
    let mut chain = Vec::new();
    let mut cursor = goal;
    while cursor != from {
        let Some(step) = previous.get(&cursor) else {
            break;
        };
        chain.push(*step);
        cursor = step.from;
    }
    chain.reverse();
    chain
}
