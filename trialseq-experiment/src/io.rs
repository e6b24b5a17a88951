//! Seams to the outside world: drawing, input and result storage.

use std::time::Duration;

use anyhow::Result;
use trialseq_core::{Frame, TrialRecord};

/// Draws frames. `render` prepares the back buffer, `present` flips it.
pub trait Presenter {
    fn render(&mut self, frame: &Frame) -> Result<()>;
    fn present(&mut self) -> Result<()>;
}

/// A key observed by the input source, stamped on the run clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub label: String,
    pub timestamp: Duration,
}

pub trait InputSource {
    /// Next pending key among `valid`, if any. Sources may still hand back
    /// other labels; the runner ignores them.
    fn poll_response(&mut self, valid: &[&str]) -> Option<KeyPress>;
    /// Quit request (escape).
    fn poll_cancel(&mut self) -> bool;
}

/// Receives each trial once it has been scored.
pub trait ResultSink {
    fn accept(&mut self, record: &TrialRecord);
}

impl ResultSink for Vec<TrialRecord> {
    fn accept(&mut self, record: &TrialRecord) {
        self.push(record.clone());
    }
}

/// Input that never answers and never cancels; autorun runs need nothing
/// more.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInput;

impl InputSource for NullInput {
    fn poll_response(&mut self, _valid: &[&str]) -> Option<KeyPress> {
        None
    }

    fn poll_cancel(&mut self) -> bool {
        false
    }
}
