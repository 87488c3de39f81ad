use std::sync::Arc;

use redb::Database;
use serde::de::DeserializeOwned;
use serde::Serialize;

use ringside_core::{Champion, Fight, Fighter, SnapshotCache, StorageError};

use crate::tables::{KEY_CHAMPIONS, KEY_FIGHTERS, KEY_FIGHTS, SNAPSHOT_TABLE};

/// redb implementation of SnapshotCache.
///
/// All three collections live in one table under fixed string keys; each
/// write replaces the collection wholesale, matching the cache's role as a
/// verbatim mirror of the latest in-memory state.
pub struct RedbSnapshotCache {
    db: Arc<Database>,
}

impl RedbSnapshotCache {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Initialize the database tables.
    pub fn init_tables(db: &Database) -> Result<(), StorageError> {
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        {
            let _ = write_txn
                .open_table(SNAPSHOT_TABLE)
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>, StorageError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let table = read_txn
            .open_table(SNAPSHOT_TABLE)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        match table
            .get(key)
            .map_err(|e| StorageError::Database(e.to_string()))?
        {
            Some(value) => {
                let collection: Vec<T> = serde_json::from_slice(value.value())
                    .map_err(|e| StorageError::Database(e.to_string()))?;
                Ok(Some(collection))
            }
            None => Ok(None),
        }
    }

    fn store<T: Serialize>(&self, key: &str, collection: &[T]) -> Result<(), StorageError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        {
            let mut table = write_txn
                .open_table(SNAPSHOT_TABLE)
                .map_err(|e| StorageError::Database(e.to_string()))?;

            let value = serde_json::to_vec(collection)
                .map_err(|e| StorageError::Database(e.to_string()))?;
            table
                .insert(key, value.as_slice())
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }

        write_txn
            .commit()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }
}

impl SnapshotCache for RedbSnapshotCache {
    fn load_fighters(&self) -> Result<Option<Vec<Fighter>>, StorageError> {
        self.load(KEY_FIGHTERS)
    }

    fn load_fights(&self) -> Result<Option<Vec<Fight>>, StorageError> {
        self.load(KEY_FIGHTS)
    }

    fn load_champions(&self) -> Result<Option<Vec<Champion>>, StorageError> {
        self.load(KEY_CHAMPIONS)
    }

    fn store_fighters(&self, fighters: &[Fighter]) -> Result<(), StorageError> {
        self.store(KEY_FIGHTERS, fighters)
    }

    fn store_fights(&self, fights: &[Fight]) -> Result<(), StorageError> {
        self.store(KEY_FIGHTS, fights)
    }

    fn store_champions(&self, champions: &[Champion]) -> Result<(), StorageError> {
        self.store(KEY_CHAMPIONS, champions)
    }
}
