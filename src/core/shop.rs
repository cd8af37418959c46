//! Shop: points in, loot box rewards out
//!
//! A purchase is one logical step: check affordability, deduct the price,
//! draw, apply the duplicate rule, persist. All of it runs on a copy of the
//! ledger, which replaces the live ledger only after the store write
//! succeeds. A crash or write failure part-way leaves both the in-memory
//! and on-disk ledger at their pre-purchase state.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{info, warn};

use crate::core::drawer::apply_draw;
use crate::core::{Catalog, JsonStore, RewardDrawer};
use crate::types::{LootBox, PlayerLedger, PurchaseReceipt, ScoreRecord, LOCAL_PLAYER};
use crate::{Error, Result, SCORE_POINTS_DIVISOR};

#[derive(Debug)]
pub struct Shop<R: Rng = StdRng> {
    store: JsonStore,
    catalog: Catalog,
    drawer: RewardDrawer<R>,
    ledger: PlayerLedger,
}

impl<R: Rng> Shop<R> {
    /// Load the local player's ledger (empty if none saved yet)
    pub fn open(store: JsonStore, catalog: Catalog, drawer: RewardDrawer<R>) -> Result<Self> {
        let ledger = store
            .get::<PlayerLedger>(LOCAL_PLAYER)?
            .unwrap_or_default();
        Ok(Self { store, catalog, drawer, ledger })
    }

    pub fn ledger(&self) -> &PlayerLedger {
        &self.ledger
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Credit points and persist; returns the new balance
    pub fn earn(&mut self, points: u64, source: &str) -> Result<u64> {
        let mut next = self.ledger.clone();
        next.earn(points);
        self.commit(next)?;

        info!(points, source, balance = self.ledger.total_points, "points earned");
        Ok(self.ledger.total_points)
    }

    /// Points earned for a recorded score; returns the amount credited
    pub fn award_for_score(&mut self, record: &ScoreRecord) -> Result<u64> {
        let points = u64::from(record.final_score) / SCORE_POINTS_DIVISOR;
        if points > 0 {
            self.earn(points, &record.trigger)?;
        }
        Ok(points)
    }

    /// Buy and open a loot box
    pub fn open_loot_box(&mut self, box_id: &str) -> Result<PurchaseReceipt> {
        let loot_box: &LootBox = self
            .catalog
            .get(box_id)
            .ok_or_else(|| Error::UnknownLootBox(box_id.to_string()))?;

        let mut next = self.ledger.clone();
        if let Err(e) = next.spend(loot_box.price) {
            warn!(box_id, price = loot_box.price, balance = next.total_points, "purchase refused");
            return Err(e);
        }

        let reward = self.drawer.draw(&loot_box.table);
        let outcome = apply_draw(&mut next, reward, loot_box.price);
        let price = loot_box.price;

        self.commit(next)?;

        let receipt = PurchaseReceipt::new(box_id, price, outcome, self.ledger.total_points);
        info!(
            box_id,
            reward = %receipt.reward_id,
            duplicate = receipt.duplicate,
            refund = receipt.refund,
            balance = receipt.balance_after,
            "loot box opened"
        );
        Ok(receipt)
    }

    /// Persist first, then swap in
    fn commit(&mut self, next: PlayerLedger) -> Result<()> {
        self.store.upsert(&next)?;
        self.ledger = next;
        Ok(())
    }
}
