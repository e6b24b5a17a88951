#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use trialseq_core::Frame;
use trialseq_experiment::{InputSource, KeyPress, Presenter};
use trialseq_timing::{ManualTimer, Timer};

/// Keeps every frame and counts renders in a cell an input source can watch.
#[derive(Default)]
pub struct RecordingPresenter {
    pub frames: Vec<Frame>,
    pub presented: usize,
    pub renders: Rc<Cell<usize>>,
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        self.frames.push(frame.clone());
        self.renders.set(self.renders.get() + 1);
        Ok(())
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.presented += 1;
        Ok(())
    }
}

/// Answers each response window with the next scripted label once the
/// scripted delay has passed on the shared virtual clock.
pub struct ScriptedInput {
    timer: ManualTimer,
    script: VecDeque<(String, Duration)>,
    window_start: Option<Duration>,
    cancel_after_renders: Option<(Rc<Cell<usize>>, usize)>,
    cancel_polls: usize,
}

impl ScriptedInput {
    pub fn new<I, S>(timer: ManualTimer, script: I) -> Self
    where
        I: IntoIterator<Item = (S, Duration)>,
        S: Into<String>,
    {
        Self {
            timer,
            script: script.into_iter().map(|(l, d)| (l.into(), d)).collect(),
            window_start: None,
            cancel_after_renders: None,
            cancel_polls: 0,
        }
    }

    /// Raise the quit request once more than `renders` frames were drawn.
    pub fn cancel_after(mut self, renders: Rc<Cell<usize>>, count: usize) -> Self {
        self.cancel_after_renders = Some((renders, count));
        self
    }

    pub fn cancel_polls(&self) -> usize {
        self.cancel_polls
    }
}

impl InputSource for ScriptedInput {
    fn poll_response(&mut self, _valid: &[&str]) -> Option<KeyPress> {
        let now = self.timer.now();
        let start = *self.window_start.get_or_insert(now);
        let (_, delay) = self.script.front()?;
        if now < start + *delay {
            return None;
        }
        let (label, delay) = self.script.pop_front()?;
        self.window_start = None;
        Some(KeyPress {
            label,
            timestamp: start + delay,
        })
    }

    fn poll_cancel(&mut self) -> bool {
        self.cancel_polls += 1;
        match &self.cancel_after_renders {
            Some((renders, count)) => renders.get() > *count,
            None => false,
        }
    }
}
