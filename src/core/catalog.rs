//! Loot box catalog: built-in defaults or a TOML file
//!
//! ```toml
//! [[loot_box]]
//! id = "starter"
//! name = "Starter Crate"
//! price = 50
//!
//! [[loot_box.rewards]]
//! id = "grey_hoodie"
//! name = "Grey Hoodie"
//! drop_chance = 0.6
//! rarity = "common"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::store::Entity;
use crate::core::JsonStore;
use crate::types::{LootBox, RarityTier, RewardEntry, RewardTable};
use crate::{Error, Result};

/// Store key of the catalog in use
pub const ACTIVE_CATALOG: &str = "active";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "loot_box")]
    boxes: Vec<LootBox>,
}

impl Catalog {
    /// Reject duplicate box ids; tables are validated on construction
    pub fn new(boxes: Vec<LootBox>) -> Result<Self> {
        let mut seen = HashSet::new();
        for b in &boxes {
            if !seen.insert(b.id.as_str()) {
                return Err(Error::InvalidTable(format!("duplicate loot box id '{}'", b.id)));
            }
        }
        Ok(Self { boxes })
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let parsed: Catalog = toml::from_str(&raw)?;
        let catalog = Self::new(parsed.boxes)?;
        info!(path = %path.as_ref().display(), boxes = catalog.boxes.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Resolve the active catalog and persist its definitions.
    ///
    /// A configured file wins, then definitions already in the store, then
    /// the built-in catalog. The catalog is one row so box order survives.
    pub fn resolve(path: Option<&str>, store: &JsonStore) -> Result<Self> {
        let catalog = match path {
            Some(path) => Self::load_from(path)?,
            None => match store.get::<Catalog>(ACTIVE_CATALOG)? {
                Some(stored) => return Self::new(stored.boxes),
                None => Self::builtin()?,
            },
        };
        store.upsert(&catalog)?;
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&LootBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub fn boxes(&self) -> &[LootBox] {
        &self.boxes
    }

    /// Stock avatar catalog
    pub fn builtin() -> Result<Self> {
        use RarityTier::*;

        let starter = vec![
            RewardEntry::new("grey_hoodie", "Grey Hoodie", 0.35, Common),
            RewardEntry::new("sneakers_white", "White Sneakers", 0.30, Common),
            RewardEntry::new("glasses_round", "Round Glasses", 0.20, Rare),
            RewardEntry::new("headband_focus", "Focus Headband", 0.12, Epic),
            RewardEntry::new("aura_calm", "Calm Aura", 0.03, Legendary),
        ];
        let neuro = vec![
            RewardEntry::new("lab_coat", "Lab Coat", 0.30, Common),
            RewardEntry::new("eeg_cap", "EEG Cap", 0.25, Rare),
            RewardEntry::new("visor_neon", "Neon Visor", 0.20, Rare),
            RewardEntry::new("cortex_tattoo", "Cortex Tattoo", 0.15, Epic),
            RewardEntry::new("synapse_wings", "Synapse Wings", 0.08, Epic),
            RewardEntry::new("halo_gamma", "Gamma Halo", 0.02, Legendary),
        ];

        Self::new(vec![
            LootBox::new("starter", "Starter Crate", 50, RewardTable::new(starter)?),
            LootBox::new("neuro_vault", "Neuro Vault", 150, RewardTable::new(neuro)?),
        ])
    }
}

impl Entity for Catalog {
    const KIND: &'static str = "catalog";

    fn key(&self) -> String {
        ACTIVE_CATALOG.to_string()
    }
}
