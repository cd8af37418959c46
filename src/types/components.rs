//! Normalized score components and the fixed weight policy

use serde::{Deserialize, Serialize};

use crate::{WEIGHT_ACCURACY, WEIGHT_BREAK_TIMING, WEIGHT_HRV, WEIGHT_REACTION_TIME};

/// Five independent sub-scores, each in [0,1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    /// 1.0 at or under 250 ms, 0.0 at or over 600 ms
    pub reaction_time: f64,
    /// Placeholder: 0.8 with trials, 0.5 without
    pub accuracy: f64,
    /// Closeness to a 50 minute work interval
    pub break_timing: f64,
    /// HRV relative to 70 ms
    pub hrv: f64,
    /// Sleep relative to 8 hours; absent when not reported.
    /// Computed but not weighted into the final score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<f64>,
}

impl ScoreComponents {
    /// All weighted components at the neutral value, no sleep
    pub fn neutral() -> Self {
        Self {
            reaction_time: crate::NEUTRAL_COMPONENT,
            accuracy: crate::NEUTRAL_COMPONENT,
            break_timing: crate::NEUTRAL_COMPONENT,
            hrv: crate::NEUTRAL_COMPONENT,
            sleep: None,
        }
    }

    /// Weighted sum in [0,1]
    pub fn weighted_sum(&self, weights: &ScoreWeights) -> f64 {
        self.reaction_time * weights.reaction_time
            + self.accuracy * weights.accuracy
            + self.break_timing * weights.break_timing
            + self.hrv * weights.hrv
    }
}

/// Component weights. Fixed policy, not user-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub reaction_time: f64,
    pub accuracy: f64,
    pub break_timing: f64,
    pub hrv: f64,
}

impl ScoreWeights {
    pub const FIXED: ScoreWeights = ScoreWeights {
        reaction_time: WEIGHT_REACTION_TIME,
        accuracy: WEIGHT_ACCURACY,
        break_timing: WEIGHT_BREAK_TIMING,
        hrv: WEIGHT_HRV,
    };

    pub fn total(&self) -> f64 {
        self.reaction_time + self.accuracy + self.break_timing + self.hrv
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::FIXED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_weights_sum_to_one() {
        assert!((ScoreWeights::FIXED.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_neutral_weighted_sum() {
        let sum = ScoreComponents::neutral().weighted_sum(&ScoreWeights::FIXED);
        assert!((sum - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sleep_not_weighted() {
        let mut with_sleep = ScoreComponents::neutral();
        with_sleep.sleep = Some(1.0);
        assert_eq!(
            with_sleep.weighted_sum(&ScoreWeights::FIXED),
            ScoreComponents::neutral().weighted_sum(&ScoreWeights::FIXED)
        );
    }
}
