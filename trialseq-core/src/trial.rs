use serde::{Deserialize, Serialize};

use crate::condition::Condition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accuracy {
    Correct,
    Incorrect,
}

impl Accuracy {
    pub fn score(response: Option<usize>, correct: usize) -> Self {
        if response == Some(correct) {
            Accuracy::Correct
        } else {
            Accuracy::Incorrect
        }
    }
}

/// Response drawn by the autorun simulator before a trial runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedResponse {
    pub label: String,
    pub position: usize,
    /// Seconds.
    pub rt: f64,
}

/// Recorded result per trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Index in the shuffled trial list.
    pub trial_id: usize,
    pub condition: Condition,
    pub position_index: usize,
    pub correct_response: usize,
    /// Fixed (non-response) duration of the timeline that ran, seconds.
    pub duration: f64,
    /// Response event onset on the run clock, seconds.
    pub onset: Option<f64>,
    pub response_label: Option<String>,
    pub subject_response: Option<usize>,
    pub accuracy: Option<Accuracy>,
    /// Seconds from response event onset.
    pub reaction_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulated: Option<SimulatedResponse>,
}

impl TrialRecord {
    pub fn new(trial_id: usize, condition: Condition) -> Self {
        let position_index = condition.position_index();
        Self {
            trial_id,
            condition,
            position_index,
            correct_response: position_index,
            duration: 0.0,
            onset: None,
            response_label: None,
            subject_response: None,
            accuracy: None,
            reaction_time: None,
            simulated: None,
        }
    }

    pub fn record_response(&mut self, label: String, position: usize, reaction_time: f64) {
        self.response_label = Some(label);
        self.subject_response = Some(position);
        self.reaction_time = Some(reaction_time);
    }

    pub fn score(&mut self) -> Accuracy {
        let accuracy = Accuracy::score(self.subject_response, self.correct_response);
        self.accuracy = Some(accuracy);
        accuracy
    }

    pub fn is_complete(&self) -> bool {
        self.accuracy.is_some()
    }

    /// Drops everything the run wrote, leaving the generated fields.
    pub fn reset(&mut self) {
        self.duration = 0.0;
        self.onset = None;
        self.response_label = None;
        self.subject_response = None;
        self.accuracy = None;
        self.reaction_time = None;
        self.simulated = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Context, PositionName};

    fn record() -> TrialRecord {
        TrialRecord::new(0, Condition::new(3, Context::Parts, PositionName::BottomLeft))
    }

    #[test]
    fn test_new_record_mirrors_position_into_correct_response() {
        let rec = record();
        assert_eq!(rec.position_index, 2);
        assert_eq!(rec.correct_response, 2);
        assert!(!rec.is_complete());
    }

    #[test]
    fn test_score_compares_against_correct_response() {
        let mut rec = record();
        rec.record_response("num_1".into(), 2, 0.4);
        assert_eq!(rec.score(), Accuracy::Correct);

        rec.record_response("num_4".into(), 0, 0.4);
        assert_eq!(rec.score(), Accuracy::Incorrect);
        assert!(rec.is_complete());
    }

    #[test]
    fn test_missing_response_scores_incorrect() {
        let mut rec = record();
        assert_eq!(rec.score(), Accuracy::Incorrect);
    }

    #[test]
    fn test_reset_clears_run_fields_only() {
        let mut rec = record();
        rec.onset = Some(1.0);
        rec.record_response("num_1".into(), 2, 0.3);
        rec.score();
        rec.reset();
        assert_eq!(rec, record());
    }

    #[test]
    fn test_simulated_field_omitted_when_absent() {
        let json = serde_json::to_value(record()).unwrap();
        assert!(json.get("simulated").is_none());
        assert_eq!(json["correct_response"], 2);
    }
}
