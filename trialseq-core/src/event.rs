use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The three events every trial steps through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Fixation,
    Stimulus,
    Feedback,
}

/// What an event puts on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySelector {
    FixationMark,
    /// Resolved per trial from the condition.
    Stimulus,
}

/// Timed step of a trial. A `None` duration holds until a response arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub duration: Option<Duration>,
    pub display: DisplaySelector,
}

impl Event {
    pub fn fixation(duration: Duration) -> Self {
        Self {
            kind: EventKind::Fixation,
            duration: Some(duration),
            display: DisplaySelector::FixationMark,
        }
    }

    pub fn stimulus() -> Self {
        Self {
            kind: EventKind::Stimulus,
            duration: None,
            display: DisplaySelector::Stimulus,
        }
    }

    pub fn feedback(duration: Duration) -> Self {
        Self {
            kind: EventKind::Feedback,
            duration: Some(duration),
            display: DisplaySelector::FixationMark,
        }
    }

    pub fn is_response_event(&self) -> bool {
        self.duration.is_none()
    }
}
