//! Player points and unlocked rewards

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::store::Entity;
use crate::{Error, Result};

/// Key of the single local player row
pub const LOCAL_PLAYER: &str = "local";

/// Points balance and unlock set of the single local player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerLedger {
    /// Spendable balance
    pub total_points: u64,
    /// Lifetime points spent on loot boxes
    pub points_spent: u64,
    pub unlocked_reward_ids: BTreeSet<String>,
}

impl PlayerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(points: u64) -> Self {
        Self {
            total_points: points,
            ..Self::default()
        }
    }

    pub fn can_afford(&self, price: u64) -> bool {
        self.total_points >= price
    }

    /// Add points to the balance
    pub fn earn(&mut self, points: u64) {
        self.total_points = self.total_points.saturating_add(points);
    }

    /// Deduct `price`, refusing rather than going below zero
    pub fn spend(&mut self, price: u64) -> Result<()> {
        let remaining = self
            .total_points
            .checked_sub(price)
            .ok_or(Error::InsufficientPoints {
                needed: price,
                available: self.total_points,
            })?;
        self.total_points = remaining;
        self.points_spent = self.points_spent.saturating_add(price);
        Ok(())
    }

    pub fn is_unlocked(&self, reward_id: &str) -> bool {
        self.unlocked_reward_ids.contains(reward_id)
    }

    /// Record an unlock. Returns false if it was already unlocked.
    pub fn unlock(&mut self, reward_id: &str) -> bool {
        self.unlocked_reward_ids.insert(reward_id.to_string())
    }
}

impl Entity for PlayerLedger {
    const KIND: &'static str = "ledger";

    fn key(&self) -> String {
        LOCAL_PLAYER.to_string()
    }
}
