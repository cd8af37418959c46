//! Score Aggregator: raw signals → bounded Neuro-Score
//!
//! Each signal is normalized against a fixed reference into [0,1], then
//! the four weighted components are combined:
//!
//! score = round(100 × (0.4·rt + 0.3·acc + 0.2·brk + 0.1·hrv)), clamped to [0,100]
//!
//! Missing inputs score as neutral (0.5) instead of failing. Sleep is
//! normalized and reported but carries no weight.

use tracing::{debug, trace};

use crate::core::ScoreHistory;
use crate::types::{ReasonCode, ScoreBreakdown, ScoreComponents, ScoreRecord, ScoreSample, ScoreWeights};
use crate::{
    Result, ACCURACY_WITH_TRIALS, BREAK_TOLERANCE_MINUTES, MAX_SCORE, NEUTRAL_COMPONENT,
    OPTIMAL_BREAK_MINUTES, OPTIMAL_HRV, OPTIMAL_REACTION_MS, OPTIMAL_SLEEP_MINUTES, POOR_REACTION_MS,
};

/// Stateless score calculator
#[derive(Debug, Clone, Default)]
pub struct ScoreAggregator {
    weights: ScoreWeights,
}

impl ScoreAggregator {
    /// Aggregator with the fixed weight policy
    pub fn new() -> Self {
        Self { weights: ScoreWeights::FIXED }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Normalize every signal in the sample
    pub fn components(&self, sample: &ScoreSample) -> ScoreComponents {
        let reaction_time = match sample.reaction_time_ms {
            Some(avg) if sample.trial_count > 0 => reaction_component(f64::from(avg)),
            _ => {
                trace!("no valid trials, reaction component neutral");
                NEUTRAL_COMPONENT
            }
        };

        // Placeholder until per-trial correctness is recorded
        let accuracy = if sample.trial_count > 0 {
            ACCURACY_WITH_TRIALS
        } else {
            NEUTRAL_COMPONENT
        };

        let hrv = match sample.heart_rate_variability {
            Some(hrv) if hrv > 0 => (f64::from(hrv) / OPTIMAL_HRV).clamp(0.0, 1.0),
            _ => {
                trace!("no hrv reading, hrv component neutral");
                NEUTRAL_COMPONENT
            }
        };

        let sleep = match sample.sleep_minutes {
            Some(minutes) if minutes > 0 => Some((f64::from(minutes) / OPTIMAL_SLEEP_MINUTES).clamp(0.0, 1.0)),
            _ => None,
        };

        ScoreComponents {
            reaction_time,
            accuracy,
            break_timing: break_component(sample.minutes_since_break),
            hrv,
            sleep,
        }
    }

    /// Weighted, rounded and clamped score
    pub fn final_score(&self, components: &ScoreComponents) -> u8 {
        let raw = 100.0 * components.weighted_sum(&self.weights);
        raw.round().clamp(0.0, f64::from(MAX_SCORE)) as u8
    }

    /// Pure computation, no history side effect
    pub fn compute(&self, sample: &ScoreSample) -> ScoreBreakdown {
        let components = self.components(sample);
        let final_score = self.final_score(&components);

        let defaulted = !sample.has_valid_trials()
            || !matches!(sample.heart_rate_variability, Some(h) if h > 0);
        let reason = if defaulted {
            ReasonCode::R102_SCORE_NEUTRAL_DEFAULTS
        } else {
            ReasonCode::R101_SCORE_COMPLETE
        };

        debug!(score = final_score, reason = reason.code(), "score computed");
        ScoreBreakdown { final_score, components, reason }
    }

    /// Compute and append a record to `history`
    pub fn record(
        &self,
        history: &mut ScoreHistory,
        sample: &ScoreSample,
        trigger: &str,
    ) -> Result<ScoreRecord> {
        let breakdown = self.compute(sample);
        history.append(breakdown.final_score, breakdown.components, trigger)
    }
}

/// 1.0 at or under OPTIMAL_REACTION_MS, 0.0 at or over POOR_REACTION_MS
pub fn reaction_component(avg_ms: f64) -> f64 {
    (1.0 - (avg_ms - OPTIMAL_REACTION_MS) / (POOR_REACTION_MS - OPTIMAL_REACTION_MS)).clamp(0.0, 1.0)
}

/// Peaks at OPTIMAL_BREAK_MINUTES, linear falloff to zero 100 minutes away
pub fn break_component(minutes_since_break: u32) -> f64 {
    let distance = (f64::from(minutes_since_break) - OPTIMAL_BREAK_MINUTES).abs();
    (1.0 - distance / BREAK_TOLERANCE_MINUTES).clamp(0.0, 1.0)
}

// =============================================================================
// TESTS
// =============================================================================
