/// Where the trial runner currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunnerState {
    #[default]
    Idle,
    /// Showing the timeline event at this index.
    Presenting(usize),
    AwaitingResponse,
    Scoring,
    Done,
    Aborted,
}

impl RunnerState {
    pub fn allows_input(&self) -> bool {
        matches!(self, Self::AwaitingResponse)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }
}
