//! Neuroscore: Neuro-Score aggregation and loot-box rewards
//!
//! Raw signals → ScoreAggregator → ScoreHistory, and
//! points → Shop → RewardDrawer → PlayerLedger.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{Error, Result};

// =============================================================================
// SCORE REFERENCE CONSTANTS
// =============================================================================

/// Reaction time that earns a full reaction component (milliseconds)
pub const OPTIMAL_REACTION_MS: f64 = 250.0;

/// Reaction time at or beyond which the reaction component is zero (milliseconds)
pub const POOR_REACTION_MS: f64 = 600.0;

/// Trials slower than this are lapses and are not averaged (milliseconds)
pub const MAX_VALID_REACTION_MS: u32 = 2000;

/// Ideal work interval before a break (minutes)
pub const OPTIMAL_BREAK_MINUTES: f64 = 50.0;

/// Distance from the ideal break interval that drives the component to zero
pub const BREAK_TOLERANCE_MINUTES: f64 = 100.0;

/// Heart-rate variability that earns a full hrv component (ms RMSSD)
pub const OPTIMAL_HRV: f64 = 70.0;

/// Sleep duration that earns a full sleep component (minutes)
pub const OPTIMAL_SLEEP_MINUTES: f64 = 480.0;

/// Component value used when an input is missing
pub const NEUTRAL_COMPONENT: f64 = 0.5;

/// Placeholder accuracy once any trial has been recorded
pub const ACCURACY_WITH_TRIALS: f64 = 0.8;

// =============================================================================
// SCORE WEIGHTS - fixed policy (sum = 1.0), sleep is not weighted
// =============================================================================

pub const WEIGHT_REACTION_TIME: f64 = 0.4;
pub const WEIGHT_ACCURACY: f64 = 0.3;
pub const WEIGHT_BREAK_TIMING: f64 = 0.2;
pub const WEIGHT_HRV: f64 = 0.1;

/// Upper bound of the Neuro-Score
pub const MAX_SCORE: u8 = 100;

// =============================================================================
// REWARDS
// =============================================================================

/// Duplicate draws refund `price / DUPLICATE_REFUND_DIVISOR` (floored)
pub const DUPLICATE_REFUND_DIVISOR: u64 = 2;

/// A recorded score earns `score / SCORE_POINTS_DIVISOR` points
pub const SCORE_POINTS_DIVISOR: u64 = 10;

/// Default number of score records kept in history
pub const DEFAULT_HISTORY_RETENTION: usize = 1000;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
