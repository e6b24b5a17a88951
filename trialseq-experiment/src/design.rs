use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use trialseq_core::{Condition, Context, PositionName};

use crate::error::ConfigError;

/// Ordered, validated set of conditions. Ids run densely from 1 and each
/// condition's named slot agrees with the slot its id maps to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Condition>", into = "Vec<Condition>")]
pub struct DesignTable {
    conditions: Vec<Condition>,
}

impl DesignTable {
    pub fn new(conditions: Vec<Condition>) -> Result<Self, ConfigError> {
        if conditions.is_empty() {
            return Err(ConfigError::EmptyDesign);
        }
        let len = conditions.len();
        let mut seen = HashSet::with_capacity(len);
        for cond in &conditions {
            if cond.id == 0 || cond.id as usize > len {
                return Err(ConfigError::NonDenseIds { id: cond.id, len });
            }
            if !seen.insert(cond.id) {
                return Err(ConfigError::DuplicateCondition(cond.id));
            }
            let expected = cond.position_index();
            if cond.position_name.index() != expected {
                return Err(ConfigError::PositionMismatch {
                    id: cond.id,
                    named: cond.position_name,
                    expected,
                });
            }
        }
        Ok(Self { conditions })
    }

    /// Configural superiority design: both contexts × four target slots.
    pub fn configural_superiority() -> Self {
        let conditions = [Context::Parts, Context::Whole]
            .into_iter()
            .flat_map(|context| PositionName::ALL.into_iter().map(move |pos| (context, pos)))
            .enumerate()
            .map(|(i, (context, pos))| Condition::new(i as u32 + 1, context, pos))
            .collect();
        Self { conditions }
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.id == id)
    }
}

impl Default for DesignTable {
    fn default() -> Self {
        Self::configural_superiority()
    }
}

impl TryFrom<Vec<Condition>> for DesignTable {
    type Error = ConfigError;

    fn try_from(conditions: Vec<Condition>) -> Result<Self, Self::Error> {
        Self::new(conditions)
    }
}

impl From<DesignTable> for Vec<Condition> {
    fn from(table: DesignTable) -> Self {
        table.conditions
    }
}
