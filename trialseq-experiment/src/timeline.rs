use std::time::Duration;

use trialseq_core::Event;

use crate::config::RunConfiguration;
use crate::error::ConfigError;

/// Divides `d` by `factor`, rounded to the nanosecond. Exact for 1.
pub fn scale_duration(d: Duration, factor: f64) -> Duration {
    Duration::from_nanos((d.as_nanos() as f64 / factor).round() as u64)
}

/// Fixation, response-bearing stimulus, feedback. Keeps the unscaled
/// template so rescaling never compounds.
#[derive(Debug, Clone, PartialEq)]
pub struct EventTimeline {
    template: [Event; 3],
    events: [Event; 3],
    trial_duration: Duration,
    speed_factor: f64,
}

impl EventTimeline {
    pub const FIXATION: usize = 0;
    pub const STIMULUS: usize = 1;
    pub const FEEDBACK: usize = 2;

    pub fn new(fixation: Duration, feedback: Duration) -> Self {
        let events = [
            Event::fixation(fixation),
            Event::stimulus(),
            Event::feedback(feedback),
        ];
        Self {
            template: events,
            events,
            trial_duration: fixed_sum(&events),
            speed_factor: 1.0,
        }
    }

    pub fn from_config(config: &RunConfiguration) -> Self {
        Self::new(
            Duration::from_millis(config.fixation_ms),
            Duration::from_millis(config.feedback_ms),
        )
    }

    /// Rebuilds from the unscaled template with every fixed duration divided
    /// by `speed_factor`.
    pub fn scaled(&self, speed_factor: f64) -> Result<Self, ConfigError> {
        if !speed_factor.is_finite() || speed_factor <= 0.0 {
            return Err(ConfigError::SpeedFactor(speed_factor));
        }
        let events = self.template.map(|mut event| {
            event.duration = event.duration.map(|d| scale_duration(d, speed_factor));
            event
        });
        Ok(Self {
            template: self.template,
            events,
            trial_duration: fixed_sum(&events),
            speed_factor,
        })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    /// Sum of the fixed durations; the response wait is excluded.
    pub fn trial_duration(&self) -> Duration {
        self.trial_duration
    }

    pub fn fixation_duration(&self) -> Duration {
        self.events[Self::FIXATION].duration.unwrap_or_default()
    }

    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }
}

fn fixed_sum(events: &[Event]) -> Duration {
    events.iter().filter_map(|e| e.duration).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialseq_core::{DisplaySelector, EventKind};

    fn standard() -> EventTimeline {
        EventTimeline::from_config(&RunConfiguration::default())
    }

    #[test]
    fn test_standard_layout() {
        let tl = standard();
        let kinds: Vec<EventKind> = tl.events().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Fixation, EventKind::Stimulus, EventKind::Feedback]
        );
        assert!(tl.event(EventTimeline::STIMULUS).unwrap().is_response_event());
        assert_eq!(
            tl.event(EventTimeline::FEEDBACK).unwrap().display,
            DisplaySelector::FixationMark
        );
        assert_eq!(tl.trial_duration(), Duration::from_millis(600));
    }

    #[test]
    fn test_unit_speed_is_identity() {
        let tl = standard();
        let same = tl.scaled(1.0).unwrap();
        assert_eq!(same.events(), tl.events());
        assert_eq!(same.trial_duration(), tl.trial_duration());
    }

    #[test]
    fn test_scaling_does_not_compound() {
        let tl = standard();
        let once = tl.scaled(4.0).unwrap();
        let twice = once.scaled(4.0).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, tl.scaled(4.0).unwrap());
        assert_eq!(once.fixation_duration(), Duration::from_millis(75));
        assert_eq!(once.trial_duration(), Duration::from_millis(150));
        assert!(once.event(EventTimeline::STIMULUS).unwrap().duration.is_none());
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        assert!(standard().scaled(0.0).is_err());
        assert!(standard().scaled(-1.0).is_err());
    }
}
