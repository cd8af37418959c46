//! Integration tests for scoring
//!
//! Tests the full path: trials → ScoreSample → ScoreAggregator → ScoreHistory → store

use neuroscore::core::{JsonStore, ScoreAggregator, ScoreHistory};
use neuroscore::types::{ReasonCode, ScoreRecord, ScoreSample};
use neuroscore::{OPTIMAL_REACTION_MS, POOR_REACTION_MS};
use pretty_assertions::assert_eq;

fn sample_with_reaction(ms: u32) -> ScoreSample {
    ScoreSample {
        reaction_time_ms: Some(ms),
        trial_count: 10,
        minutes_since_break: 50,
        heart_rate_variability: Some(70),
        sleep_minutes: None,
    }
}

/// Test the full scoring path
#[test]
fn test_full_score_path() {
    let aggregator = ScoreAggregator::new();
    let mut history = ScoreHistory::in_memory(100);

    let sample = ScoreSample::from_reaction_trials(&[280, 300, 320, 0, 4000], 40, Some(56), Some(420));
    let record = aggregator.record(&mut history, &sample, "reaction_game").unwrap();

    assert_eq!(record.id, 1);
    assert_eq!(record.trigger, "reaction_game");
    assert!(record.final_score <= 100);
    assert_eq!(history.len(), 1);
    assert_eq!(history.latest(), Some(&record));
}

/// Reaction component saturates at both reference points
#[test]
fn test_reaction_reference_points() {
    let aggregator = ScoreAggregator::new();
    let fast = aggregator.components(&sample_with_reaction(OPTIMAL_REACTION_MS as u32));
    let faster = aggregator.components(&sample_with_reaction(120));
    let slow = aggregator.components(&sample_with_reaction(POOR_REACTION_MS as u32));
    let slower = aggregator.components(&sample_with_reaction(950));

    assert_eq!(fast.reaction_time, 1.0);
    assert_eq!(faster.reaction_time, 1.0);
    assert_eq!(slow.reaction_time, 0.0);
    assert_eq!(slower.reaction_time, 0.0);
}

/// Scores never rise as reaction time gets slower
#[test]
fn test_score_non_increasing_in_reaction_time() {
    let aggregator = ScoreAggregator::new();
    let mut previous = u8::MAX;
    for ms in (150..=700).step_by(10) {
        let score = aggregator.compute(&sample_with_reaction(ms)).final_score;
        assert!(score <= previous, "score rose at {} ms", ms);
        previous = score;
    }
}

/// Empty input scores exactly neutral
#[test]
fn test_default_sample_scores_fifty() {
    let aggregator = ScoreAggregator::new();
    let sample = ScoreSample {
        minutes_since_break: 100,
        ..Default::default()
    };

    let breakdown = aggregator.compute(&sample);
    assert_eq!(breakdown.final_score, 50);
    assert_eq!(breakdown.reason, ReasonCode::R102_SCORE_NEUTRAL_DEFAULTS);
}

/// History persists through the store and keeps append order
#[test]
fn test_history_round_trip_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let aggregator = ScoreAggregator::new();

    {
        let store = JsonStore::open(dir.path()).unwrap();
        let mut history = ScoreHistory::open(store, 100).unwrap();
        for ms in [500, 400, 300] {
            aggregator
                .record(&mut history, &sample_with_reaction(ms), "reaction_game")
                .unwrap();
        }
    }

    let store = JsonStore::open(dir.path()).unwrap();
    let stored: Vec<ScoreRecord> = store.get_all().unwrap();
    let ids: Vec<u64> = stored.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(stored[0].final_score < stored[2].final_score);

    let history = ScoreHistory::open(store, 100).unwrap();
    assert_eq!(history.summary().count, 3);
    assert_eq!(history.summary().latest, Some(stored[2].final_score));
}

/// JSON output of a record is stable and parseable
#[test]
fn test_record_json_output_valid() {
    let aggregator = ScoreAggregator::new();
    let mut history = ScoreHistory::in_memory(10);
    let record = aggregator
        .record(&mut history, &sample_with_reaction(300), "manual")
        .unwrap();

    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"final_score\""));
    assert!(json.contains("\"components\""));
    assert!(!json.contains("\"sleep\""));

    let back: ScoreRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
