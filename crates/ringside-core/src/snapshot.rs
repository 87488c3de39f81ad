use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::division::Division;
use crate::error::StorageError;
use crate::fight::Fight;
use crate::fighter::{Champion, Fighter};

/// The three collections making up session state: the working set held in
/// memory by the sync coordinator, and the unit persisted to the fallback
/// cache. There is no schema versioning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub fighters: Vec<Fighter>,
    pub fights: Vec<Fight>,
    pub champions: BTreeMap<Division, String>,
}

impl Snapshot {
    pub fn new(fighters: Vec<Fighter>, fights: Vec<Fight>, champions: Vec<Champion>) -> Self {
        Self {
            fighters,
            fights,
            champions: champions
                .into_iter()
                .map(|c| (c.division, c.name))
                .collect(),
        }
    }

    /// First fighter with the given name. Mutation commands key solely by
    /// name, so when the same name exists in several divisions this
    /// returns the earliest-added one.
    pub fn find_fighter(&self, name: &str) -> Option<&Fighter> {
        self.fighters.iter().find(|f| f.name == name)
    }

    /// The current champion of a division, or None when vacant.
    pub fn champion_of(&self, division: Division) -> Option<&str> {
        self.champions.get(&division).map(String::as_str)
    }

    /// Champions as remote-store rows.
    pub fn champion_rows(&self) -> Vec<Champion> {
        self.champions
            .iter()
            .map(|(division, name)| Champion {
                division: *division,
                name: name.clone(),
            })
            .collect()
    }
}

/// The local durable fallback cache: three fixed keys, each holding a
/// serialized collection. The cache always reflects the latest in-memory
/// state, confirmed by the remote or not, and is read back verbatim when
/// the remote store is unreachable.
pub trait SnapshotCache: Send + Sync {
    fn load_fighters(&self) -> Result<Option<Vec<Fighter>>, StorageError>;
    fn load_fights(&self) -> Result<Option<Vec<Fight>>, StorageError>;
    fn load_champions(&self) -> Result<Option<Vec<Champion>>, StorageError>;

    fn store_fighters(&self, fighters: &[Fighter]) -> Result<(), StorageError>;
    fn store_fights(&self, fights: &[Fight]) -> Result<(), StorageError>;
    fn store_champions(&self, champions: &[Champion]) -> Result<(), StorageError>;
}

// In-memory implementation for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod memory {
    use super::*;
    use std::sync::RwLock;

    /// In-memory snapshot cache for testing.
    #[derive(Default)]
    pub struct InMemorySnapshotCache {
        fighters: RwLock<Option<Vec<Fighter>>>,
        fights: RwLock<Option<Vec<Fight>>>,
        champions: RwLock<Option<Vec<Champion>>>,
    }

    impl InMemorySnapshotCache {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl SnapshotCache for InMemorySnapshotCache {
        fn load_fighters(&self) -> Result<Option<Vec<Fighter>>, StorageError> {
            Ok(self.fighters.read().unwrap().clone())
        }

        fn load_fights(&self) -> Result<Option<Vec<Fight>>, StorageError> {
            Ok(self.fights.read().unwrap().clone())
        }

        fn load_champions(&self) -> Result<Option<Vec<Champion>>, StorageError> {
            Ok(self.champions.read().unwrap().clone())
        }

        fn store_fighters(&self, fighters: &[Fighter]) -> Result<(), StorageError> {
            *self.fighters.write().unwrap() = Some(fighters.to_vec());
            Ok(())
        }

        fn store_fights(&self, fights: &[Fight]) -> Result<(), StorageError> {
            *self.fights.write().unwrap() = Some(fights.to_vec());
            Ok(())
        }

        fn store_champions(&self, champions: &[Champion]) -> Result<(), StorageError> {
            *self.champions.write().unwrap() = Some(champions.to_vec());
            Ok(())
        }
    }
}
