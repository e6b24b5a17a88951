//! Setup errors. All of them surface before the first trial runs.

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("repetitions must be at least 1, got {0}")]
    Repetitions(usize),

    #[error("design table has no conditions")]
    EmptyDesign,

    /// Ids must be exactly 1..=n.
    #[error("condition ids are not dense from 1: unexpected id {id} in a table of {len}")]
    NonDenseIds { id: u32, len: usize },

    #[error("condition id {0} appears more than once")]
    DuplicateCondition(u32),

    #[error("condition {id} is named {named:?} but its id maps to slot {expected}")]
    PositionMismatch {
        id: u32,
        named: trialseq_core::PositionName,
        expected: usize,
    },

    #[error("response label {label:?} maps to slot {position}, outside 0..4")]
    ResponsePosition { label: String, position: usize },

    #[error("response mapping is not bijective: slot {0} has more than one label")]
    DuplicatePosition(usize),

    #[error("response mapping is not bijective: no label for slot {0}")]
    MissingPosition(usize),

    #[error("response label {0:?} listed twice")]
    DuplicateLabel(String),

    #[error("speed factor must be finite and positive, got {0}")]
    SpeedFactor(f64),

    #[error("{event} duration must be at least 1 ms")]
    Duration { event: &'static str },

    #[error("poll interval must be at least 1 ms")]
    PollInterval,

    #[error("invalid configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}
