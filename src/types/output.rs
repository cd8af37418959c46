//! Output structures for terminal display and the API

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{RarityTier, ReasonCode, RewardEntry, ScoreComponents};

/// Result of a pure score computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub final_score: u8,
    pub components: ScoreComponents,
    pub reason: ReasonCode,
}

impl ScoreBreakdown {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let score = format!("{:>3}", self.final_score);
        let score = match self.final_score {
            75..=100 => score.green().bold(),
            50..=74 => score.yellow().bold(),
            _ => score.red().bold(),
        };
        format!(
            "🧠 Neuro-Score {} | {} | {}",
            score,
            self.component_line(),
            self.reason.code().dimmed()
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "score={} | {} | reason={}",
            self.final_score,
            self.component_line(),
            self.reason.code()
        )
    }

    fn component_line(&self) -> String {
        let c = &self.components;
        let sleep = c
            .sleep
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "rt={:.2} acc={:.2} brk={:.2} hrv={:.2} sleep={}",
            c.reaction_time, c.accuracy, c.break_timing, c.hrv, sleep
        )
    }
}

/// What a single draw did to the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOutcome {
    pub reward: RewardEntry,
    pub duplicate: bool,
    pub refund: u64,
}

impl DrawOutcome {
    pub fn reason(&self) -> ReasonCode {
        if self.duplicate {
            ReasonCode::R202_DUPLICATE_REFUND
        } else {
            ReasonCode::R201_FIRST_UNLOCK
        }
    }
}

/// Completed loot box purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub box_id: String,
    pub reward_id: String,
    pub reward_name: String,
    pub rarity: RarityTier,
    pub duplicate: bool,
    pub price: u64,
    pub refund: u64,
    pub balance_after: u64,
    pub reason: ReasonCode,
}

impl PurchaseReceipt {
    pub fn new(box_id: &str, price: u64, outcome: DrawOutcome, balance_after: u64) -> Self {
        let reason = outcome.reason();
        Self {
            box_id: box_id.to_string(),
            reward_id: outcome.reward.id,
            reward_name: outcome.reward.name,
            rarity: outcome.reward.rarity,
            duplicate: outcome.duplicate,
            price,
            refund: outcome.refund,
            balance_after,
            reason,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let label = format!("{} [{}]", self.reward_name, self.rarity);
        let mut line = format!(
            "{} {} from {} | -{} pts",
            self.rarity.emoji(),
            self.rarity.paint(&label),
            self.box_id,
            self.price
        );
        if self.duplicate {
            line.push_str(&format!(" | duplicate, +{} refunded", self.refund).dimmed().to_string());
        } else {
            line.push_str(&" | NEW".green().bold().to_string());
        }
        line.push_str(&format!(" | balance={}", self.balance_after));
        line
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "box={} | reward={} | rarity={} | price={} | refund={} | balance={} | reason={}",
            self.box_id,
            self.reward_id,
            self.rarity,
            self.price,
            self.refund,
            self.balance_after,
            self.reason.code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parseable_breakdown() {
        let breakdown = ScoreBreakdown {
            final_score: 50,
            components: ScoreComponents::neutral(),
            reason: ReasonCode::R102_SCORE_NEUTRAL_DEFAULTS,
        };
        let line = breakdown.to_parseable_string();
        assert!(line.starts_with("score=50"));
        assert!(line.contains("sleep=-"));
        assert!(line.contains("reason=R102_SCORE_NEUTRAL_DEFAULTS"));
    }

    #[test]
    fn test_receipt_from_duplicate_outcome() {
        let outcome = DrawOutcome {
            reward: RewardEntry::new("halo", "Halo", 1.0, RarityTier::Rare),
            duplicate: true,
            refund: 12,
        };
        let receipt = PurchaseReceipt::new("starter", 25, outcome, 87);
        assert_eq!(receipt.reason, ReasonCode::R202_DUPLICATE_REFUND);
        assert_eq!(receipt.reward_id, "halo");
        assert!(receipt.to_parseable_string().contains("refund=12"));
    }
}
