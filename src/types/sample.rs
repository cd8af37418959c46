//! Raw score inputs

use serde::{Deserialize, Serialize};

use crate::MAX_VALID_REACTION_MS;

/// Freshly sampled signals for one score recomputation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreSample {
    /// Mean reaction time over valid trials (milliseconds)
    pub reaction_time_ms: Option<u32>,
    /// Number of valid trials behind `reaction_time_ms`
    pub trial_count: u32,
    /// Minutes since the last recorded break
    pub minutes_since_break: u32,
    /// Heart-rate variability (ms RMSSD)
    pub heart_rate_variability: Option<u32>,
    /// Sleep last night (minutes)
    pub sleep_minutes: Option<u32>,
}

impl ScoreSample {
    /// Build a sample from per-trial reaction times.
    ///
    /// Zero-length responses and lapses slower than `MAX_VALID_REACTION_MS`
    /// are dropped before averaging.
    pub fn from_reaction_trials(
        trials: &[u32],
        minutes_since_break: u32,
        heart_rate_variability: Option<u32>,
        sleep_minutes: Option<u32>,
    ) -> Self {
        let valid: Vec<u64> = trials
            .iter()
            .copied()
            .filter(|&t| t > 0 && t <= MAX_VALID_REACTION_MS)
            .map(u64::from)
            .collect();

        let reaction_time_ms = if valid.is_empty() {
            None
        } else {
            let mean = valid.iter().sum::<u64>() as f64 / valid.len() as f64;
            Some(mean.round() as u32)
        };

        Self {
            reaction_time_ms,
            trial_count: valid.len() as u32,
            minutes_since_break,
            heart_rate_variability,
            sleep_minutes,
        }
    }

    /// True when the sample carries a usable reaction average
    pub fn has_valid_trials(&self) -> bool {
        self.trial_count > 0 && self.reaction_time_ms.is_some()
    }
}
