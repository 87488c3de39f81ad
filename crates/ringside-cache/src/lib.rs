//! Ringside Cache - redb implementation of the local fallback cache.

pub mod snapshot_store;
pub mod tables;

pub use snapshot_store::RedbSnapshotCache;

use std::path::Path;
use std::sync::Arc;

use redb::Database;

use ringside_core::StorageError;

/// Initialize a cache database with all required tables.
pub fn init_database(path: impl AsRef<Path>) -> Result<Arc<Database>, StorageError> {
    let db = Database::create(path).map_err(|e| StorageError::Database(e.to_string()))?;

    RedbSnapshotCache::init_tables(&db)?;

    Ok(Arc::new(db))
}
