//! Core modules for Neuroscore

pub mod aggregator;
pub mod drawer;
pub mod history;
pub mod store;
pub mod catalog;
pub mod shop;
pub mod app;
pub mod api;

pub use aggregator::ScoreAggregator;
pub use drawer::{RewardDrawer, select_index, apply_draw};
pub use history::{ScoreHistory, HistorySummary};
pub use store::{JsonStore, Entity};
pub use catalog::Catalog;
pub use shop::Shop;
pub use app::{NeuroApp, ScoreSubmission};
pub use api::{create_router, create_router_with_updates, run_server};
