use thiserror::Error;

use crate::division::Division;

/// Errors detected synchronously before any state mutation. These are
/// surfaced to the caller; no partial state change occurs when one is
/// returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("fighter {name} already exists in division {division}")]
    DuplicateFighter { name: String, division: Division },

    #[error("fighter name cannot be empty")]
    EmptyName,

    #[error("fighter name already taken: {0}")]
    NameTaken(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("fighter cannot fight themselves: {0}")]
    SelfOpponent(String),

    #[error("no fight at index {index} (ledger holds {len})")]
    NoSuchFight { index: usize, len: usize },

    #[error("unknown fighter: {0}")]
    UnknownFighter(String),
}

/// Errors from the local fallback cache.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),
}
