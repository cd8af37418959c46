//! Core types for Neuroscore

mod components;
mod ledger;
mod output;
mod reason;
mod record;
mod reward;
mod sample;

pub use components::{ScoreComponents, ScoreWeights};
pub use ledger::{PlayerLedger, LOCAL_PLAYER};
pub use output::{DrawOutcome, PurchaseReceipt, ScoreBreakdown};
pub use reason::ReasonCode;
pub use record::ScoreRecord;
pub use reward::{LootBox, RarityTier, RewardEntry, RewardTable};
pub use sample::ScoreSample;
