//! Immutable score history entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::store::Entity;
use crate::types::ScoreComponents;

/// One recomputation of the Neuro-Score. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Monotonic sequence number within the history
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    /// 0-100
    pub final_score: u8,
    pub components: ScoreComponents,
    /// What caused the recomputation (e.g. "reaction_game", "manual")
    pub trigger: String,
}

impl ScoreRecord {
    pub fn new(id: u64, final_score: u8, components: ScoreComponents, trigger: impl Into<String>) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            final_score,
            components,
            trigger: trigger.into(),
        }
    }

    /// Parseable one-liner for terminal output
    pub fn to_parseable_string(&self) -> String {
        format!(
            "#{} score={} | rt={:.2} acc={:.2} brk={:.2} hrv={:.2} | trigger={} | {}",
            self.id,
            self.final_score,
            self.components.reaction_time,
            self.components.accuracy,
            self.components.break_timing,
            self.components.hrv,
            self.trigger,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

impl Entity for ScoreRecord {
    const KIND: &'static str = "score_history";

    /// Zero-padded so lexical key order equals append order
    fn key(&self) -> String {
        format!("{:012}", self.id)
    }
}
