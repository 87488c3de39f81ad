//! Ringside Core - Domain models, aggregation, ranking, and validation.
//!
//! This crate contains the core domain logic for the Ringside fight
//! ranking system. It has no dependencies on other Ringside crates.

pub mod division;
pub mod error;
pub mod fight;
pub mod fighter;
pub mod ranking;
pub mod record;
pub mod snapshot;
pub mod validation;

// Re-exports for convenience
pub use division::Division;
pub use error::{StorageError, ValidationError};
pub use fight::{Fight, FightKey, Method, DRAW};
pub use fighter::{Champion, Fighter};
pub use ranking::{rank, RankedFighter, LEADERBOARD_CAP};
pub use record::aggregate;
pub use snapshot::{Snapshot, SnapshotCache};
pub use validation::Validator;

#[cfg(any(test, feature = "test-utils"))]
pub use snapshot::memory::InMemorySnapshotCache;
