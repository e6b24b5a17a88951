use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};
use trialseq_core::{DisplaySelector, Event, Frame, RunnerState, TrialRecord};
use trialseq_timing::{Timer, WaitRecorder, WaitStats};

use crate::autorun::AutorunSimulator;
use crate::config::{Instructions, RunConfiguration};
use crate::error::ConfigError;
use crate::io::{InputSource, Presenter, ResultSink};
use crate::timeline::{EventTimeline, scale_duration};
use crate::trial::TrialList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Done { completed: usize },
    /// Cancelled; `completed` trials were scored and emitted first.
    Aborted { completed: usize },
}

impl RunOutcome {
    pub fn completed(&self) -> usize {
        match self {
            RunOutcome::Done { completed } | RunOutcome::Aborted { completed } => *completed,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, RunOutcome::Aborted { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wait {
    Elapsed,
    Cancelled,
}

/// Drives trials through the event timeline one at a time.
pub struct TrialRunner<'a, T, R>
where
    T: Timer,
    R: Rng,
{
    config: &'a RunConfiguration,
    timeline: EventTimeline,
    simulator: Option<AutorunSimulator>,
    pub timer: T,
    pub rng: R,
    state: RunnerState,
    trial_number: usize,
    completed: usize,
    waits: WaitRecorder,
}

impl<'a, T, R> TrialRunner<'a, T, R>
where
    T: Timer,
    R: Rng,
{
    /// Validates the configuration and compresses the timeline once when
    /// autorun is on.
    pub fn new(config: &'a RunConfiguration, timer: T, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let timeline = EventTimeline::from_config(config).scaled(config.time_scale())?;
        let simulator = config
            .speed_factor
            .map(|speed| {
                AutorunSimulator::new(&config.valid_responses, timeline.fixation_duration(), speed)
            })
            .transpose()?;

        info!(
            autorun = simulator.is_some(),
            speed_factor = timeline.speed_factor(),
            trial_duration_ms = timeline.trial_duration().as_secs_f64() * 1e3,
            "trial runner ready"
        );

        Ok(Self {
            config,
            timeline,
            simulator,
            timer,
            rng,
            state: RunnerState::Idle,
            trial_number: 0,
            completed: 0,
            waits: WaitRecorder::new(),
        })
    }

    /// Builds the run's trial list from the configured design, drawing the
    /// order from this runner's random source.
    pub fn generate_trials(&mut self) -> Result<TrialList, ConfigError> {
        TrialList::generate(&self.config.design, self.config.repetitions, &mut self.rng)
    }

    pub fn run<P, I, S>(
        &mut self,
        trials: &mut TrialList,
        presenter: &mut P,
        input: &mut I,
        sink: &mut S,
    ) -> RunOutcome
    where
        P: Presenter,
        I: InputSource,
        S: ResultSink,
    {
        let config = self.config;
        self.completed = 0;
        info!(trials = trials.len(), autorun = self.is_autorun(), "run started");

        if let Some(instructions) = &config.instructions {
            if self.show_instructions(instructions, presenter, input) == Wait::Cancelled {
                return self.abort();
            }
        }

        for index in 0..trials.len() {
            let Some(record) = trials.record_mut(index) else {
                break;
            };
            self.trial_number = index;
            if self.run_trial(record, presenter, input, sink) == Wait::Cancelled {
                // A trial already handed to the sink stays as emitted.
                if !record.is_complete() {
                    record.reset();
                }
                return self.abort();
            }
        }

        self.transition(RunnerState::Done);
        let stats = self.waits.stats();
        info!(
            completed = self.completed,
            waits = stats.count,
            underruns = stats.underruns,
            mean_error_us = stats.mean_error_ns / 1e3,
            jitter_us = stats.jitter_ns / 1e3,
            "run finished"
        );
        RunOutcome::Done {
            completed: self.completed,
        }
    }

    fn run_trial<P, I, S>(
        &mut self,
        record: &mut TrialRecord,
        presenter: &mut P,
        input: &mut I,
        sink: &mut S,
    ) -> Wait
    where
        P: Presenter,
        I: InputSource,
        S: ResultSink,
    {
        self.transition(RunnerState::Idle);
        record.duration = self.timeline.trial_duration().as_secs_f64();
        if let Some(sim) = &self.simulator {
            record.simulated = Some(sim.simulate(record, &mut self.rng));
        }
        debug!(
            trial = record.trial_id,
            condition = record.condition.id,
            context = record.condition.context.as_str(),
            target = record.position_index,
            "trial started"
        );

        let search = Frame::search_display(record.condition.context, record.condition.position_name);
        let mut onset = self.timer.now();
        let mut state = RunnerState::Presenting(EventTimeline::FIXATION);
        loop {
            self.transition(state);
            state = match state {
                RunnerState::Presenting(i) => {
                    let Some(event) = self.timeline.event(i).copied() else {
                        break;
                    };
                    Self::show(presenter, &Self::frame_for(&event, &search));
                    match event.duration {
                        Some(d) => {
                            if self.hold(d, input) == Wait::Cancelled {
                                return Wait::Cancelled;
                            }
                            if i + 1 < self.timeline.events().len() {
                                RunnerState::Presenting(i + 1)
                            } else {
                                break;
                            }
                        }
                        None => {
                            onset = self.timer.now();
                            record.onset = Some(onset.as_secs_f64());
                            RunnerState::AwaitingResponse
                        }
                    }
                }
                RunnerState::AwaitingResponse => {
                    if self.await_response(record, onset, input) == Wait::Cancelled {
                        return Wait::Cancelled;
                    }
                    RunnerState::Scoring
                }
                RunnerState::Scoring => {
                    let accuracy = record.score();
                    debug!(
                        trial = record.trial_id,
                        response = ?record.subject_response,
                        rt = ?record.reaction_time,
                        ?accuracy,
                        "trial scored"
                    );
                    sink.accept(record);
                    self.completed += 1;
                    RunnerState::Presenting(EventTimeline::FEEDBACK)
                }
                RunnerState::Idle | RunnerState::Done | RunnerState::Aborted => break,
            };
        }
        Wait::Elapsed
    }

    /// Live: poll until a mapped label arrives. Autorun: sit out the
    /// simulated latency, then take the simulated answer.
    fn await_response<I: InputSource>(
        &mut self,
        record: &mut TrialRecord,
        onset: Duration,
        input: &mut I,
    ) -> Wait {
        if let Some(simulated) = record.simulated.clone() {
            let rt = Duration::try_from_secs_f64(simulated.rt).unwrap_or_default();
            if self.wait_until(onset, rt, input) == Wait::Cancelled {
                return Wait::Cancelled;
            }
            record.record_response(simulated.label, simulated.position, simulated.rt);
            return Wait::Elapsed;
        }

        let config = self.config;
        let valid: Vec<&str> = config.valid_responses.labels().collect();
        loop {
            if input.poll_cancel() {
                return Wait::Cancelled;
            }
            if let Some(press) = input.poll_response(&valid) {
                match config.valid_responses.position(&press.label) {
                    Some(position) => {
                        let rt = press.timestamp.saturating_sub(onset).as_secs_f64();
                        record.record_response(press.label, position, rt);
                        return Wait::Elapsed;
                    }
                    None => debug!(label = %press.label, "ignoring label outside the response set"),
                }
            }
            self.timer.sleep(config.poll_interval());
        }
    }

    fn show_instructions<P, I>(
        &mut self,
        instructions: &Instructions,
        presenter: &mut P,
        input: &mut I,
    ) -> Wait
    where
        P: Presenter,
        I: InputSource,
    {
        Self::show(presenter, &Frame::instructions(&instructions.text));
        if !self.is_autorun() {
            let start = [instructions.start_label.as_str()];
            loop {
                if input.poll_cancel() {
                    return Wait::Cancelled;
                }
                match input.poll_response(&start) {
                    Some(press) if press.label == instructions.start_label => break,
                    _ => self.timer.sleep(self.config.poll_interval()),
                }
            }
        }
        let pause = scale_duration(
            Duration::from_millis(instructions.wait_ms),
            self.timeline.speed_factor(),
        );
        self.hold(pause, input)
    }

    /// Fixed-duration wait; the measured length goes into the wait stats.
    fn hold<I: InputSource>(&mut self, target: Duration, input: &mut I) -> Wait {
        let start = self.timer.now();
        let wait = self.wait_until(start, target, input);
        if wait == Wait::Elapsed {
            self.waits.record(target, self.timer.elapsed(start));
        }
        wait
    }

    fn wait_until<I: InputSource>(&self, start: Duration, target: Duration, input: &mut I) -> Wait {
        let poll = self.config.poll_interval();
        loop {
            if input.poll_cancel() {
                return Wait::Cancelled;
            }
            let elapsed = self.timer.elapsed(start);
            if elapsed >= target {
                return Wait::Elapsed;
            }
            self.timer.sleep((target - elapsed).min(poll));
        }
    }

    fn show<P: Presenter>(presenter: &mut P, frame: &Frame) {
        if let Err(err) = presenter.render(frame).and_then(|()| presenter.present()) {
            warn!(error = %err, frame = ?frame.kind, "presenter failed; continuing");
        }
    }

    fn frame_for(event: &Event, search: &Frame) -> Frame {
        match event.display {
            DisplaySelector::FixationMark => Frame::fixation(event.kind),
            DisplaySelector::Stimulus => search.clone(),
        }
    }

    fn abort(&mut self) -> RunOutcome {
        self.transition(RunnerState::Aborted);
        info!(
            completed = self.completed,
            trial = self.trial_number,
            "run cancelled; in-flight trial discarded"
        );
        RunOutcome::Aborted {
            completed: self.completed,
        }
    }

    fn transition(&mut self, next: RunnerState) {
        debug!(from = ?self.state, to = ?next, trial = self.trial_number, "state");
        self.state = next;
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn timeline(&self) -> &EventTimeline {
        &self.timeline
    }

    pub fn is_autorun(&self) -> bool {
        self.simulator.is_some()
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn wait_stats(&self) -> WaitStats {
        self.waits.stats()
    }
}
