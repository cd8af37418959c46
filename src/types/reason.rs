//! Reason codes for score and reward decisions

use serde::{Deserialize, Serialize};

/// Reason codes attached to score outputs and purchase receipts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R1xx: Score
    // =========================================================================
    /// Every input was present
    R101_SCORE_COMPLETE,
    /// At least one component fell back to the neutral value
    R102_SCORE_NEUTRAL_DEFAULTS,

    // =========================================================================
    // R2xx: Rewards
    // =========================================================================
    /// Reward drawn for the first time, added to the unlock set
    R201_FIRST_UNLOCK,
    /// Reward already owned, half the price refunded
    R202_DUPLICATE_REFUND,
    /// Balance below the loot box price
    R203_INSUFFICIENT_POINTS,
    /// No loot box with that id
    R204_UNKNOWN_LOOT_BOX,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_SCORE_COMPLETE => "R101_SCORE_COMPLETE",
            Self::R102_SCORE_NEUTRAL_DEFAULTS => "R102_SCORE_NEUTRAL_DEFAULTS",
            Self::R201_FIRST_UNLOCK => "R201_FIRST_UNLOCK",
            Self::R202_DUPLICATE_REFUND => "R202_DUPLICATE_REFUND",
            Self::R203_INSUFFICIENT_POINTS => "R203_INSUFFICIENT_POINTS",
            Self::R204_UNKNOWN_LOOT_BOX => "R204_UNKNOWN_LOOT_BOX",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_SCORE_COMPLETE => "All signals present",
            Self::R102_SCORE_NEUTRAL_DEFAULTS => "Missing signals scored as neutral",
            Self::R201_FIRST_UNLOCK => "New reward unlocked",
            Self::R202_DUPLICATE_REFUND => "Duplicate - half price refunded",
            Self::R203_INSUFFICIENT_POINTS => "Not enough points",
            Self::R204_UNKNOWN_LOOT_BOX => "Unknown loot box",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
