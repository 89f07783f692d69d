use crate::error::Result;
use crate::types::RawDataset;
use std::path::{Path, PathBuf};
use tracing::info;

/// Bulk provider of season and profile rows
///
/// The store never writes back; a source is asked for a full dataset each
/// time the cache (re)loads.
pub trait DataSource: Send + Sync {
    /// Fetch every season and profile row
    fn load(&self) -> Result<RawDataset>;

    /// Human-readable origin, used in log lines
    fn describe(&self) -> String;
}

/// Reads a `{ "seasons": [...], "players": [...] }` JSON document
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a dataset in the format this source reads
    pub fn save(&self, dataset: &RawDataset) -> Result<()> {
        let json = serde_json::to_string_pretty(dataset)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl DataSource for JsonFileSource {
    fn load(&self) -> Result<RawDataset> {
        info!("Loading player data from: {:?}", self.path);

        let json_content = std::fs::read_to_string(&self.path)?;
        let raw: RawDataset = serde_json::from_str(&json_content)?;

        info!("Loaded {} players and {} season rows from file", raw.players.len(), raw.seasons.len());
        Ok(raw)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

/// Fixed in-memory rows, for fixtures and embedding
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    raw: RawDataset,
}

impl InMemorySource {
    pub fn new(raw: RawDataset) -> Self {
        Self { raw }
    }
}

impl DataSource for InMemorySource {
    fn load(&self) -> Result<RawDataset> {
        Ok(self.raw.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{} players", self.raw.players.len())
    }
}
