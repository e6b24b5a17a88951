use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use trialseq_core::POSITION_COUNT;

use crate::design::DesignTable;
use crate::error::ConfigError;

/// Bijective mapping from input label to target slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, usize>",
    into = "BTreeMap<String, usize>"
)]
pub struct ResponseMap {
    forward: BTreeMap<String, usize>,
}

impl ResponseMap {
    pub fn new<I, S>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut forward = BTreeMap::new();
        let mut taken = [false; POSITION_COUNT];
        for (label, position) in pairs {
            let label = label.into();
            if position >= POSITION_COUNT {
                return Err(ConfigError::ResponsePosition { label, position });
            }
            if taken[position] {
                return Err(ConfigError::DuplicatePosition(position));
            }
            if forward.contains_key(&label) {
                return Err(ConfigError::DuplicateLabel(label));
            }
            taken[position] = true;
            forward.insert(label, position);
        }
        if let Some(missing) = taken.iter().position(|t| !t) {
            return Err(ConfigError::MissingPosition(missing));
        }
        Ok(Self { forward })
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.forward.get(label).copied()
    }

    /// Reverse lookup.
    pub fn label(&self, position: usize) -> Option<&str> {
        self.forward
            .iter()
            .find(|(_, p)| **p == position)
            .map(|(label, _)| label.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.forward.keys().map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.forward.contains_key(label)
    }
}

impl Default for ResponseMap {
    /// Numeric keypad: 4 5 over 1 2.
    fn default() -> Self {
        let forward = [("num_4", 0), ("num_5", 1), ("num_1", 2), ("num_2", 3)]
            .into_iter()
            .map(|(label, pos)| (label.to_string(), pos))
            .collect();
        Self { forward }
    }
}

impl TryFrom<BTreeMap<String, usize>> for ResponseMap {
    type Error = ConfigError;

    fn try_from(map: BTreeMap<String, usize>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<ResponseMap> for BTreeMap<String, usize> {
    fn from(map: ResponseMap) -> Self {
        map.forward
    }
}

/// Screen shown once before the first trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instructions {
    pub text: String,
    /// Label that dismisses the screen in live mode.
    pub start_label: String,
    /// Pause after dismissal, before the first trial.
    pub wait_ms: u64,
}

impl Default for Instructions {
    fn default() -> Self {
        Self {
            text: "Task:\n\
                   Indicate which shape is different. Use the numeric pad to respond:\n\
                   \tTop left: 4\n\
                   \tTop right: 5\n\
                   \tBottom left: 1\n\
                   \tBottom right: 2\n\
                   Please remember to fixate on the central dot.\n\
                   Please press spacebar to begin.\n\
                   (Use 'Esc' to exit.)"
                .to_string(),
            start_label: "space".to_string(),
            wait_ms: 0,
        }
    }
}

/// Everything a run is set up from. Built once, then passed by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfiguration {
    /// Trials per condition.
    pub repetitions: usize,
    /// `None` runs live. `Some(k)` enables autorun and compresses the
    /// timeline by `k`.
    pub speed_factor: Option<f64>,
    pub valid_responses: ResponseMap,
    pub design: DesignTable,
    pub fixation_ms: u64,
    pub feedback_ms: u64,
    /// Granularity of cancellation and input polling.
    pub poll_interval_ms: u64,
    pub instructions: Option<Instructions>,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            repetitions: 20,
            speed_factor: None,
            valid_responses: ResponseMap::default(),
            design: DesignTable::default(),
            fixation_ms: 300,
            feedback_ms: 300,
            poll_interval_ms: 1,
            instructions: None,
        }
    }
}

impl RunConfiguration {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repetitions < 1 {
            return Err(ConfigError::Repetitions(self.repetitions));
        }
        if let Some(k) = self.speed_factor {
            if !k.is_finite() || k <= 0.0 {
                return Err(ConfigError::SpeedFactor(k));
            }
        }
        if self.fixation_ms == 0 {
            return Err(ConfigError::Duration { event: "fixation" });
        }
        if self.feedback_ms == 0 {
            return Err(ConfigError::Duration { event: "feedback" });
        }
        if self.poll_interval_ms < 1 {
            return Err(ConfigError::PollInterval);
        }
        Ok(())
    }

    pub fn is_autorun(&self) -> bool {
        self.speed_factor.is_some()
    }

    /// Factor fixed durations are divided by.
    pub fn time_scale(&self) -> f64 {
        self.speed_factor.unwrap_or(1.0)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
