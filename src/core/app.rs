//! NeuroApp: the aggregator, history and shop wired to one data directory

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AppConfig;
use crate::core::{Catalog, JsonStore, RewardDrawer, ScoreAggregator, ScoreHistory, Shop};
use crate::types::{ReasonCode, ScoreRecord, ScoreSample};
use crate::Result;

/// Outcome of one score submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub record: ScoreRecord,
    pub reason: ReasonCode,
    pub points_earned: u64,
    pub balance: u64,
}

#[derive(Debug)]
pub struct NeuroApp {
    pub aggregator: ScoreAggregator,
    pub history: ScoreHistory,
    pub shop: Shop,
}

impl NeuroApp {
    pub fn open(config: &AppConfig) -> Result<Self> {
        let store = JsonStore::open(config.data_path())?;
        let catalog = Catalog::resolve(config.catalog_path.as_deref(), &store)?;
        let history = ScoreHistory::open(store.clone(), config.history_retention)?;
        let shop = Shop::open(store, catalog, RewardDrawer::from_optional_seed(config.rng_seed))?;

        Ok(Self {
            aggregator: ScoreAggregator::new(),
            history,
            shop,
        })
    }

    /// Score, record and award points for a fresh sample.
    ///
    /// Fails only when the record cannot be stored. Once it is stored the
    /// submission succeeds; an award that cannot be persisted is logged and
    /// reported as zero points, so a retry never records the score twice.
    pub fn submit_score(&mut self, sample: &ScoreSample, trigger: &str) -> Result<ScoreSubmission> {
        let breakdown = self.aggregator.compute(sample);
        let record = self
            .history
            .append(breakdown.final_score, breakdown.components, trigger)?;
        let points_earned = match self.shop.award_for_score(&record) {
            Ok(points) => points,
            Err(e) => {
                warn!(id = record.id, error = %e, "score recorded but points not awarded");
                0
            }
        };

        Ok(ScoreSubmission {
            record,
            reason: breakdown.reason,
            points_earned,
            balance: self.shop.ledger().total_points,
        })
    }
}
