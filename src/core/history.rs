//! ScoreHistory: append-only log of ScoreRecords with bounded retention
//!
//! Ids increase monotonically and are never reused or renumbered. When the
//! log exceeds its retention, the oldest records are dropped from memory and
//! from the backing store.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::store::Entity;
use crate::core::JsonStore;
use crate::types::{ScoreComponents, ScoreRecord};
use crate::Result;

/// Dashboard trend numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub count: usize,
    pub latest: Option<u8>,
    pub best: Option<u8>,
    pub average: Option<f64>,
    pub since: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct ScoreHistory {
    records: VecDeque<ScoreRecord>,
    next_id: u64,
    retention: usize,
    store: Option<JsonStore>,
}

impl ScoreHistory {
    /// Volatile history, nothing persisted
    pub fn in_memory(retention: usize) -> Self {
        Self {
            records: VecDeque::new(),
            next_id: 1,
            retention: retention.max(1),
            store: None,
        }
    }

    /// Load persisted records from `store` and keep writing to it
    pub fn open(store: JsonStore, retention: usize) -> Result<Self> {
        let records: VecDeque<ScoreRecord> = store.get_all::<ScoreRecord>()?.into();
        let next_id = records.back().map(|r| r.id + 1).unwrap_or(1);
        debug!(count = records.len(), next_id, "score history loaded");

        let mut history = Self {
            records,
            next_id,
            retention: retention.max(1),
            store: Some(store),
        };
        history.enforce_retention()?;
        Ok(history)
    }

    /// Append a new record. Earlier records are never touched.
    ///
    /// Once the record is stored the append succeeds. A failed retention
    /// sweep is logged; the stale rows are swept again on the next open.
    pub fn append(
        &mut self,
        final_score: u8,
        components: ScoreComponents,
        trigger: &str,
    ) -> Result<ScoreRecord> {
        let record = ScoreRecord::new(self.next_id, final_score, components, trigger);
        if let Some(store) = &self.store {
            store.upsert(&record)?;
        }

        self.next_id += 1;
        self.records.push_back(record.clone());
        if let Err(e) = self.enforce_retention() {
            warn!(id = record.id, error = %e, "history retention sweep failed");
        }

        info!(id = record.id, score = record.final_score, trigger, "score recorded");
        Ok(record)
    }

    fn enforce_retention(&mut self) -> Result<()> {
        if self.records.len() <= self.retention {
            return Ok(());
        }
        let excess = self.records.len() - self.retention;
        let dropped: Vec<String> = self
            .records
            .drain(..excess)
            .map(|r| r.key())
            .collect();

        if let Some(store) = &self.store {
            store.delete_many::<ScoreRecord>(&dropped)?;
        }
        debug!(dropped = dropped.len(), "history retention applied");
        Ok(())
    }

    pub fn latest(&self) -> Option<&ScoreRecord> {
        self.records.back()
    }

    /// Last `n` records, oldest first
    pub fn recent(&self, n: usize) -> Vec<&ScoreRecord> {
        let skip = self.records.len().saturating_sub(n);
        self.records.iter().skip(skip).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn summary(&self) -> HistorySummary {
        let count = self.records.len();
        let average = if count == 0 {
            None
        } else {
            let sum: u64 = self.records.iter().map(|r| u64::from(r.final_score)).sum();
            Some(sum as f64 / count as f64)
        };

        HistorySummary {
            count,
            latest: self.latest().map(|r| r.final_score),
            best: self.records.iter().map(|r| r.final_score).max(),
            average,
            since: self.records.front().map(|r| r.timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(history: &mut ScoreHistory, score: u8) -> ScoreRecord {
        history.append(score, ScoreComponents::neutral(), "test").unwrap()
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut history = ScoreHistory::in_memory(10);
        let a = push(&mut history, 40);
        let b = push(&mut history, 60);
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(history.latest().unwrap().final_score, 60);
    }

    #[test]
    fn test_retention_drops_oldest_without_renumbering() {
        let mut history = ScoreHistory::in_memory(3);
        for score in [10, 20, 30, 40, 50] {
            push(&mut history, score);
        }
        let ids: Vec<u64> = history.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_recent_is_oldest_first() {
        let mut history = ScoreHistory::in_memory(10);
        for score in [10, 20, 30] {
            push(&mut history, score);
        }
        let scores: Vec<u8> = history.recent(2).iter().map(|r| r.final_score).collect();
        assert_eq!(scores, vec![20, 30]);
        assert_eq!(history.recent(99).len(), 3);
    }

    #[test]
    fn test_summary() {
        let mut history = ScoreHistory::in_memory(10);
        assert_eq!(history.summary().count, 0);
        assert_eq!(history.summary().average, None);

        for score in [50, 80, 65] {
            push(&mut history, score);
        }
        let summary = history.summary();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.latest, Some(65));
        assert_eq!(summary.best, Some(80));
        assert_eq!(summary.average, Some(65.0));
    }

    #[test]
    fn test_persisted_history_resumes_ids() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonStore::open(dir.path()).unwrap();
            let mut history = ScoreHistory::open(store, 2).unwrap();
            for score in [1, 2, 3] {
                push(&mut history, score);
            }
        }

        let store = JsonStore::open(dir.path()).unwrap();
        assert_eq!(store.get_all::<ScoreRecord>().unwrap().len(), 2);

        let mut history = ScoreHistory::open(store, 2).unwrap();
        let next = push(&mut history, 4);
        assert_eq!(next.id, 4);
        let ids: Vec<u64> = history.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }
}
