//! Reward entries, weighted tables and loot boxes

use colored::{ColoredString, Colorize};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

lazy_static! {
    /// Lowercase slug: letters, digits, `_` and `-`, up to 64 chars
    static ref RE_REWARD_ID: Regex = Regex::new(r"^[a-z0-9][a-z0-9_\-]{0,63}$").unwrap();
}

/// Display tier. Never used in probability computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RarityTier {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl RarityTier {
    /// Tier name colored for terminal display
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            RarityTier::Common => text.white(),
            RarityTier::Rare => text.blue(),
            RarityTier::Epic => text.magenta(),
            RarityTier::Legendary => text.yellow().bold(),
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RarityTier::Common => "⚪",
            RarityTier::Rare => "🔷",
            RarityTier::Epic => "🟣",
            RarityTier::Legendary => "🌟",
        }
    }
}

impl std::fmt::Display for RarityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RarityTier::Common => "COMMON",
            RarityTier::Rare => "RARE",
            RarityTier::Epic => "EPIC",
            RarityTier::Legendary => "LEGENDARY",
        };
        write!(f, "{}", name)
    }
}

/// A drawable reward (avatar item, theme, badge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardEntry {
    pub id: String,
    pub name: String,
    /// Relative weight, > 0. Need not sum to 1 across a table.
    pub drop_chance: f64,
    pub rarity: RarityTier,
}

impl RewardEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, drop_chance: f64, rarity: RarityTier) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            drop_chance,
            rarity,
        }
    }
}

/// Non-empty, ordered list of weighted rewards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RewardEntry>", into = "Vec<RewardEntry>")]
pub struct RewardTable {
    entries: Vec<RewardEntry>,
}

impl RewardTable {
    /// Validate and build a table. Order is preserved; it decides ties.
    pub fn new(entries: Vec<RewardEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::InvalidTable("table has no entries".to_string()));
        }
        for entry in &entries {
            if !RE_REWARD_ID.is_match(&entry.id) {
                return Err(Error::InvalidTable(format!("malformed reward id '{}'", entry.id)));
            }
            if !entry.drop_chance.is_finite() || entry.drop_chance <= 0.0 {
                return Err(Error::InvalidTable(format!(
                    "reward '{}' has drop chance {}",
                    entry.id, entry.drop_chance
                )));
            }
        }
        let table = Self { entries };
        if !table.total_weight().is_finite() {
            return Err(Error::InvalidTable("drop chances overflow when summed".to_string()));
        }
        Ok(table)
    }

    pub fn entries(&self) -> &[RewardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of drop chances
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.drop_chance).sum()
    }

    /// Normalized probability of each entry, in table order
    pub fn probabilities(&self) -> Vec<(&str, f64)> {
        let total = self.total_weight();
        self.entries
            .iter()
            .map(|e| (e.id.as_str(), e.drop_chance / total))
            .collect()
    }
}

impl TryFrom<Vec<RewardEntry>> for RewardTable {
    type Error = Error;

    fn try_from(entries: Vec<RewardEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<RewardTable> for Vec<RewardEntry> {
    fn from(table: RewardTable) -> Self {
        table.entries
    }
}

/// A priced reward table the player can buy and open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootBox {
    pub id: String,
    pub name: String,
    pub price: u64,
    #[serde(rename = "rewards")]
    pub table: RewardTable,
}

impl LootBox {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u64, table: RewardTable) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, chance: f64) -> RewardEntry {
        RewardEntry::new(id, id, chance, RarityTier::Common)
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(RewardTable::new(vec![]), Err(Error::InvalidTable(_))));
    }

    #[test]
    fn test_non_positive_chance_rejected() {
        assert!(RewardTable::new(vec![entry("a", 0.0)]).is_err());
        assert!(RewardTable::new(vec![entry("a", -1.0)]).is_err());
        assert!(RewardTable::new(vec![entry("a", f64::NAN)]).is_err());
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let huge = RewardTable::new(vec![entry("a", 1e308), entry("b", 1e308)]);
        assert!(matches!(huge, Err(Error::InvalidTable(_))));
        assert!(RewardTable::new(vec![entry("a", 1e300), entry("b", 1e300)]).is_ok());
    }

    #[test]
    fn test_malformed_id_rejected() {
        assert!(RewardTable::new(vec![entry("Bad Id", 1.0)]).is_err());
        assert!(RewardTable::new(vec![entry("", 1.0)]).is_err());
        assert!(RewardTable::new(vec![entry("neon_visor-2", 1.0)]).is_ok());
    }

    #[test]
    fn test_probabilities_normalize_by_total() {
        let table = RewardTable::new(vec![entry("a", 2.0), entry("b", 6.0)]).unwrap();
        assert_eq!(table.total_weight(), 8.0);
        let probs = table.probabilities();
        assert_eq!(probs[0], ("a", 0.25));
        assert_eq!(probs[1], ("b", 0.75));
    }

    #[test]
    fn test_table_deserialize_validates() {
        let bad = r#"[{"id":"a","name":"A","drop_chance":0.0,"rarity":"common"}]"#;
        assert!(serde_json::from_str::<RewardTable>(bad).is_err());

        let good = r#"[{"id":"a","name":"A","drop_chance":0.5,"rarity":"epic"}]"#;
        let table: RewardTable = serde_json::from_str(good).unwrap();
        assert_eq!(table.entries()[0].rarity, RarityTier::Epic);
    }
}
