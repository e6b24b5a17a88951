use rand::Rng;
use rand::seq::SliceRandom;
use trialseq_core::TrialRecord;

use crate::design::DesignTable;
use crate::error::ConfigError;

/// Trial order for one run. Shuffled once when generated; afterwards only
/// the runner writes into records and nothing reorders them.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialList {
    records: Vec<TrialRecord>,
}

impl TrialList {
    /// Every condition `repetitions` times, fully reshuffled (no blocking).
    pub fn generate<R: Rng + ?Sized>(
        design: &DesignTable,
        repetitions: usize,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        if repetitions < 1 {
            return Err(ConfigError::Repetitions(repetitions));
        }
        if design.is_empty() {
            return Err(ConfigError::EmptyDesign);
        }

        let mut records = Vec::with_capacity(repetitions * design.len());
        for _ in 0..repetitions {
            for cond in design.iter() {
                records.push(TrialRecord::new(0, *cond));
            }
        }
        records.shuffle(rng);
        for (i, rec) in records.iter_mut().enumerate() {
            rec.trial_id = i;
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrialRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrialRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn count_condition(&self, id: u32) -> usize {
        self.records.iter().filter(|r| r.condition.id == id).count()
    }

    pub fn into_records(self) -> Vec<TrialRecord> {
        self.records
    }

    pub(crate) fn record_mut(&mut self, index: usize) -> Option<&mut TrialRecord> {
        self.records.get_mut(index)
    }
}
