//! JsonStore: directory-backed key-row store
//!
//! One file per entity kind: `<dir>/<kind>.json` holding
//! `{ kind, checksum, rows }`, where `checksum` is the hex SHA-256 of the
//! serialized `rows`. Writes go through a temp file and a rename so a crash
//! leaves either the old or the new file, never a torn one.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::{Error, Result};

/// A row type the store can hold
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// File stem, one per entity type
    const KIND: &'static str;

    /// Row key, unique within `KIND`
    fn key(&self) -> String;
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    kind: String,
    checksum: String,
    rows: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All rows of `T`, ordered by key. Missing file reads as empty.
    pub fn get_all<T: Entity>(&self) -> Result<Vec<T>> {
        Ok(self.load::<T>()?.into_values().collect())
    }

    pub fn get<T: Entity>(&self, key: &str) -> Result<Option<T>> {
        Ok(self.load::<T>()?.remove(key))
    }

    /// Insert or overwrite by key. Last write wins.
    pub fn upsert<T: Entity>(&self, row: &T) -> Result<()> {
        let mut rows = self.load::<T>()?;
        rows.insert(row.key(), row.clone());
        self.save::<T>(&rows)
    }

    /// Remove a row; returns whether it existed
    pub fn delete<T: Entity>(&self, key: &str) -> Result<bool> {
        let mut rows = self.load::<T>()?;
        let existed = rows.remove(key).is_some();
        if existed {
            self.save::<T>(&rows)?;
        }
        Ok(existed)
    }

    /// Remove several rows in one write; returns how many existed
    pub fn delete_many<T: Entity>(&self, keys: &[String]) -> Result<usize> {
        let mut rows = self.load::<T>()?;
        let removed = keys.iter().filter(|k| rows.remove(k.as_str()).is_some()).count();
        if removed > 0 {
            self.save::<T>(&rows)?;
        }
        Ok(removed)
    }

    /// Replace every row of `T`
    pub fn replace_all<T: Entity>(&self, rows: &[T]) -> Result<()> {
        let rows: BTreeMap<String, T> = rows.iter().map(|r| (r.key(), r.clone())).collect();
        self.save::<T>(&rows)
    }

    fn path_for(&self, kind: &str) -> PathBuf {
        self.dir.join(format!("{}.json", kind))
    }

    fn load<T: Entity>(&self) -> Result<BTreeMap<String, T>> {
        let path = self.path_for(T::KIND);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        let envelope: Envelope = serde_json::from_str(&json)?;
        let rows_json = serde_json::to_string(&envelope.rows)?;
        if envelope.kind != T::KIND || checksum(rows_json.as_bytes()) != envelope.checksum {
            warn!(kind = T::KIND, path = %path.display(), "store checksum mismatch");
            return Err(Error::Corrupt { kind: T::KIND.to_string() });
        }

        Ok(serde_json::from_value(envelope.rows)?)
    }

    fn save<T: Entity>(&self, rows: &BTreeMap<String, T>) -> Result<()> {
        let rows = serde_json::to_value(rows)?;
        let rows_json = serde_json::to_string(&rows)?;
        let envelope = Envelope {
            kind: T::KIND.to_string(),
            checksum: checksum(rows_json.as_bytes()),
            rows,
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        let path = self.path_for(T::KIND);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        debug!(kind = T::KIND, path = %path.display(), "store saved");
        Ok(())
    }
}

/// Hex SHA-256
fn checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect()
}
