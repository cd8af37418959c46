//! Reward Drawer: weighted loot-box draws
//!
//! Cumulative-probability sampling over a RewardTable. With
//! total = Σ drop_chance and u uniform in [0,1), the first entry whose
//! running sum reaches u × total wins. Table order breaks ties. If float
//! drift leaves nothing qualifying, the last entry is returned, so a draw
//! cannot fail.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::types::{DrawOutcome, PlayerLedger, RewardEntry, RewardTable};
use crate::DUPLICATE_REFUND_DIVISOR;

/// Index picked by uniform draw `u` ∈ [0,1)
pub fn select_index(table: &RewardTable, u: f64) -> usize {
    let entries = table.entries();
    let target = u * table.total_weight();

    let mut cumulative = 0.0;
    for (i, entry) in entries.iter().enumerate() {
        cumulative += entry.drop_chance;
        if cumulative >= target {
            return i;
        }
    }
    entries.len() - 1
}

/// Record a drawn reward against the ledger.
///
/// Already-owned rewards unlock nothing and refund `price / 2` (floored);
/// new ones are added to the unlock set with no refund. Affordability is
/// the caller's concern.
pub fn apply_draw(ledger: &mut PlayerLedger, reward: &RewardEntry, price: u64) -> DrawOutcome {
    let duplicate = ledger.is_unlocked(&reward.id);
    let refund = if duplicate {
        let refund = price / DUPLICATE_REFUND_DIVISOR;
        ledger.earn(refund);
        refund
    } else {
        ledger.unlock(&reward.id);
        0
    };

    DrawOutcome {
        reward: reward.clone(),
        duplicate,
        refund,
    }
}

/// Draws rewards using an injected random source
#[derive(Debug)]
pub struct RewardDrawer<R: Rng = StdRng> {
    rng: R,
}

impl RewardDrawer<StdRng> {
    /// Deterministic drawer for replays and tests
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Seeded when `seed` is set, entropy otherwise
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RewardDrawer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draw one entry proportionally to drop chance
    pub fn draw<'t>(&mut self, table: &'t RewardTable) -> &'t RewardEntry {
        let u: f64 = self.rng.gen();
        let index = select_index(table, u);
        let entry = &table.entries()[index];
        debug!(u, index, reward = %entry.id, "reward drawn");
        entry
    }
}

// =============================================================================
// TESTS
// =============================================================================
