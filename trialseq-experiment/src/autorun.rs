//! Synthetic responses for unattended runs.
//!
//! Each context has a fixed accuracy/speed profile: the grouped ("whole")
//! displays are answered more accurately and faster than the bare ("parts")
//! ones, which is the effect the experiment is designed to show.

use std::time::Duration;

use rand::Rng;
use rand::distr::Distribution;
use rand::seq::IndexedRandom;
use rand_distr::StandardNormal;
use trialseq_core::{Context, POSITION_COUNT, PositionName, SimulatedResponse, TrialRecord};

use crate::config::ResponseMap;
use crate::error::ConfigError;

/// Standard deviation of the simulated latency, seconds.
pub const RT_STDEV: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextProfile {
    /// Probability of answering the true slot.
    pub hit: f64,
    /// Probability of each of the other three slots.
    pub miss: f64,
    /// Mean latency, seconds.
    pub rt_mean: f64,
}

impl ContextProfile {
    pub fn for_context(context: Context) -> Self {
        match context {
            Context::Parts => Self {
                hit: 0.7,
                miss: 0.1,
                rt_mean: 1.0,
            },
            Context::Whole => Self {
                hit: 0.85,
                miss: 0.05,
                rt_mean: 0.8,
            },
        }
    }

    pub fn weights(&self, target: usize) -> [f64; POSITION_COUNT] {
        let mut w = [self.miss; POSITION_COUNT];
        w[target] = self.hit;
        w
    }
}

pub struct AutorunSimulator {
    /// Label for each slot.
    labels: Vec<String>,
    fixation: Duration,
    speed_factor: f64,
}

impl AutorunSimulator {
    /// `fixation` is the already rescaled fixation duration; latencies are
    /// measured from trial start, so it is added to every draw.
    pub fn new(
        responses: &ResponseMap,
        fixation: Duration,
        speed_factor: f64,
    ) -> Result<Self, ConfigError> {
        if !speed_factor.is_finite() || speed_factor <= 0.0 {
            return Err(ConfigError::SpeedFactor(speed_factor));
        }
        let labels = (0..POSITION_COUNT)
            .map(|pos| {
                responses
                    .label(pos)
                    .map(str::to_string)
                    .ok_or(ConfigError::MissingPosition(pos))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            labels,
            fixation,
            speed_factor,
        })
    }

    pub fn simulate<R: Rng + ?Sized>(&self, trial: &TrialRecord, rng: &mut R) -> SimulatedResponse {
        let profile = ContextProfile::for_context(trial.condition.context);
        // The slot comes from the condition, not the editable record field.
        let target = trial.condition.position_name.index();
        let weights = profile.weights(target);
        let position = PositionName::ALL
            .choose_weighted(rng, |slot| weights[slot.index()])
            .map(PositionName::index)
            .unwrap_or(target);
        let label = self.labels[position].clone();

        let z: f64 = StandardNormal.sample(rng);
        let draw = (profile.rt_mean + RT_STDEV * z).max(0.0);
        let rt = self.fixation.as_secs_f64() + draw / self.speed_factor;

        SimulatedResponse {
            label,
            position,
            rt,
        }
    }

    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }
}
