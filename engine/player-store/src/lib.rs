//! Player Store - read-only NFL season and draft snapshots
//!
//! Loads season statistics and player profiles from a data source, fills the
//! derived columns the similarity engine relies on (season number, age,
//! position-pick), and serves immutable snapshots through a read-through cache.

pub mod cache;
pub mod dataset;
pub mod error;
pub mod source;
pub mod types;

pub use cache::{DatasetCache, Snapshot};
pub use dataset::Dataset;
pub use error::{Result, StoreError};
pub use source::{DataSource, InMemorySource, JsonFileSource};
pub use types::*;
