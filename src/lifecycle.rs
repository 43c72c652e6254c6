//! Application lifecycle: the linear status progression and its mapping
//! onto the three-node progress timeline shown to applicants.
//!
//! `Submitted -> UnderReview -> {Approved | Rejected}`. Transitions are not
//! enforced; an admin may set any status at any time.

use serde::Serialize;

use crate::models::ApplicationStatus;

/// Number of nodes in the progress timeline.
pub const TIMELINE_STEPS: u8 = 3;

/// Timeline position of a status: 1..=3, or 0 for `Draft`.
pub fn step_of(status: ApplicationStatus) -> u8 {
    match status {
        ApplicationStatus::Submitted => 1,
        ApplicationStatus::UnderReview => 2,
        ApplicationStatus::Approved | ApplicationStatus::Rejected => 3,
        ApplicationStatus::Draft => 0,
    }
}

pub fn is_terminal(status: ApplicationStatus) -> bool {
    matches!(
        status,
        ApplicationStatus::Approved | ApplicationStatus::Rejected
    )
}

/// Statuses the workflow could move to next. Informational only.
pub fn natural_successors(status: ApplicationStatus) -> &'static [ApplicationStatus] {
    match status {
        ApplicationStatus::Draft => &[ApplicationStatus::Submitted],
        ApplicationStatus::Submitted => &[ApplicationStatus::UnderReview],
        ApplicationStatus::UnderReview => {
            &[ApplicationStatus::Approved, ApplicationStatus::Rejected]
        }
        ApplicationStatus::Approved | ApplicationStatus::Rejected => &[],
    }
}

/// Presentation tone of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Info,
    Success,
    Danger,
}

pub fn tone(status: ApplicationStatus) -> Tone {
    match status {
        ApplicationStatus::Approved => Tone::Success,
        ApplicationStatus::Rejected => Tone::Danger,
        _ => Tone::Info,
    }
}

/// State of one timeline node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Pending,
    Completed,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub step: u8,
    pub label: &'static str,
    pub description: &'static str,
    pub state: StepState,
}

const STAGES: [(u8, &str, &str); TIMELINE_STEPS as usize] = [
    (1, "Submitted", "Received by Admissions Desk"),
    (2, "In Verification", "Academic records review"),
    (3, "Final Decision", "Seat allocation result"),
];

/// Build the three timeline nodes for a status. The final node carries the
/// decision outcome; both outcomes share step 3.
pub fn timeline(status: ApplicationStatus) -> Vec<TimelineStep> {
    let active = step_of(status);
    STAGES
        .iter()
        .map(|&(step, label, description)| {
            let state = match (step, status) {
                (TIMELINE_STEPS, ApplicationStatus::Approved) => StepState::Approved,
                (TIMELINE_STEPS, ApplicationStatus::Rejected) => StepState::Rejected,
                _ if active >= step => StepState::Completed,
                _ => StepState::Pending,
            };
            TimelineStep {
                step,
                label,
                description,
                state,
            }
        })
        .collect()
}

/// Applicant-facing explanation for a status.
pub fn status_message(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Draft => "This application has not been submitted yet.",
        ApplicationStatus::Submitted => {
            "Your application is securely stored in our system. The automation layer is performing preliminary document cross-verification."
        }
        ApplicationStatus::UnderReview => {
            "The Academic Senate is currently reviewing your merit scores and statement of purpose. Expected turnaround: 24-48 hours."
        }
        ApplicationStatus::Approved => {
            "Congratulations! You have been provisionally selected for the program. An official offer letter with payment instructions has been dispatched to your email."
        }
        ApplicationStatus::Rejected => {
            "We regret to inform you that your application does not meet the current merit threshold for the selected engineering program."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_mapping_is_total_and_ordered() {
        assert_eq!(step_of(ApplicationStatus::Draft), 0);
        assert_eq!(step_of(ApplicationStatus::Submitted), 1);
        assert_eq!(step_of(ApplicationStatus::UnderReview), 2);
        assert_eq!(step_of(ApplicationStatus::Approved), 3);
        assert_eq!(step_of(ApplicationStatus::Rejected), 3);
        for status in ApplicationStatus::ALL {
            assert!(step_of(*status) <= TIMELINE_STEPS);
        }
    }

    #[test]
    fn only_decisions_are_terminal() {
        assert!(is_terminal(ApplicationStatus::Approved));
        assert!(is_terminal(ApplicationStatus::Rejected));
        assert!(!is_terminal(ApplicationStatus::UnderReview));
        assert!(natural_successors(ApplicationStatus::Rejected).is_empty());
        assert_eq!(
            natural_successors(ApplicationStatus::Submitted),
            &[ApplicationStatus::UnderReview]
        );
    }

    #[test]
    fn timeline_for_submitted_completes_first_node_only() {
        let nodes = timeline(ApplicationStatus::Submitted);
        let states: Vec<StepState> = nodes.iter().map(|n| n.state).collect();
        assert_eq!(
            states,
            vec![StepState::Completed, StepState::Pending, StepState::Pending]
        );
        assert_eq!(nodes[1].label, "In Verification");
    }

    #[test]
    fn timeline_final_node_carries_outcome() {
        let approved = timeline(ApplicationStatus::Approved);
        assert_eq!(approved[0].state, StepState::Completed);
        assert_eq!(approved[1].state, StepState::Completed);
        assert_eq!(approved[2].state, StepState::Approved);

        let rejected = timeline(ApplicationStatus::Rejected);
        assert_eq!(rejected[2].state, StepState::Rejected);
    }

    #[test]
    fn draft_timeline_is_all_pending() {
        assert!(timeline(ApplicationStatus::Draft)
            .iter()
            .all(|n| n.state == StepState::Pending));
    }

    #[test]
    fn tone_and_message_follow_outcome() {
        assert_eq!(tone(ApplicationStatus::Approved), Tone::Success);
        assert_eq!(tone(ApplicationStatus::Rejected), Tone::Danger);
        assert_eq!(tone(ApplicationStatus::Submitted), Tone::Info);
        assert!(status_message(ApplicationStatus::Approved).starts_with("Congratulations"));
    }
}
