use serde::{Deserialize, Serialize};

/// A competitive pool. Fighters and fights each belong to exactly one
/// division, and rankings are derived per division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Division {
    #[serde(rename = "PC")]
    Pc,
    #[serde(rename = "PS5")]
    Ps5,
    #[serde(rename = "XBOX")]
    Xbox,
}

impl Division {
    /// All divisions, in display order.
    pub const ALL: [Division; 3] = [Division::Pc, Division::Ps5, Division::Xbox];

    pub fn as_str(&self) -> &'static str {
        match self {
            Division::Pc => "PC",
            Division::Ps5 => "PS5",
            Division::Xbox => "XBOX",
        }
    }
}

impl std::fmt::Display for Division {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Division {
    type Err = UnknownDivision;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PC" => Ok(Division::Pc),
            "PS5" => Ok(Division::Ps5),
            "XBOX" => Ok(Division::Xbox),
            _ => Err(UnknownDivision(s.to_string())),
        }
    }
}

/// Error for parsing an unrecognized division name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDivision(pub String);

impl std::fmt::Display for UnknownDivision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown division: {}", self.0)
    }
}

impl std::error::Error for UnknownDivision {}
