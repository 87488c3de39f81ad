use serde::{Deserialize, Serialize};

use crate::division::Division;

/// A competitor in one division.
///
/// The four counters are a derived cache of the fight ledger, recomputed by
/// [`crate::record::aggregate`] after every ledger change. They are never
/// authoritative on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fighter {
    pub name: String,
    pub division: Division,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub ko_wins: u32,
    #[serde(default)]
    pub previous_rank: i32,
}

impl Fighter {
    /// Create a zero-initialized fighter, as produced by the add-fighter
    /// command.
    pub fn debut(name: impl Into<String>, division: Division) -> Self {
        Self {
            name: name.into(),
            division,
            wins: 0,
            losses: 0,
            draws: 0,
            ko_wins: 0,
            previous_rank: 0,
        }
    }

    /// KO rate as a percentage of wins. Zero when the fighter has no wins.
    pub fn ko_percentage(&self) -> f64 {
        if self.wins == 0 {
            0.0
        } else {
            f64::from(self.ko_wins) / f64::from(self.wins) * 100.0
        }
    }
}

/// A champion assignment: at most one per division, absence meaning the
/// title is vacant. This is the row shape used by the remote store; the
/// in-memory working set keeps champions as a division-keyed map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Champion {
    pub division: Division,
    pub name: String,
}
