//! Read-through snapshot cache
//!
//! Callers take an `Arc<Snapshot>` and keep it for the whole request, so a
//! concurrent reload never changes the rows a request is reading.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::source::DataSource;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::info;

/// One immutable generation of the dataset
#[derive(Debug)]
pub struct Snapshot {
    pub dataset: Dataset,
    /// Increments on every load, starting at 1
    pub generation: u64,
    pub loaded_at: DateTime<Utc>,
}

/// Lazily loads a [`Dataset`] from a [`DataSource`] and hands out shared snapshots
pub struct DatasetCache {
    source: Box<dyn DataSource>,
    current: RwLock<Option<Arc<Snapshot>>>,
    /// Serializes loads so concurrent misses hit the source once
    load_lock: Mutex<u64>,
}

impl DatasetCache {
    pub fn new(source: Box<dyn DataSource>) -> Self {
        Self { source, current: RwLock::new(None), load_lock: Mutex::new(0) }
    }

    /// Current snapshot, loading it on first use
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        if let Some(snapshot) = self.current.read().as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let mut generation = self.load_lock.lock();
        // Another caller may have finished loading while we waited
        if let Some(snapshot) = self.current.read().as_ref() {
            return Ok(Arc::clone(snapshot));
        }
        self.load_locked(&mut generation)
    }

    /// Load a fresh snapshot and swap it in; in-flight readers keep the old one
    pub fn reload(&self) -> Result<Arc<Snapshot>> {
        let mut generation = self.load_lock.lock();
        self.load_locked(&mut generation)
    }

    /// Drop the cached snapshot so the next read goes to the source
    pub fn invalidate(&self) {
        if self.current.write().take().is_some() {
            info!("Invalidated dataset snapshot from {}", self.source.describe());
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    fn load_locked(&self, generation: &mut u64) -> Result<Arc<Snapshot>> {
        let raw = self.source.load()?;
        let dataset = Dataset::from_raw(raw)?;

        *generation += 1;
        let snapshot = Arc::new(Snapshot { dataset, generation: *generation, loaded_at: Utc::now() });
        *self.current.write() = Some(Arc::clone(&snapshot));

        info!(
            "Loaded dataset generation {} from {}: {} players, {} season rows",
            snapshot.generation,
            self.source.describe(),
            snapshot.dataset.player_count(),
            snapshot.dataset.season_count()
        );
        Ok(snapshot)
    }
}

impl std::fmt::Debug for DatasetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetCache")
            .field("source", &self.source.describe())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
