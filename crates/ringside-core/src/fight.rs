use serde::{Deserialize, Serialize};

use crate::division::Division;

/// Sentinel winner value for a fight that ended in a draw.
pub const DRAW: &str = "Draw";

/// How a fight was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    KO,
    Decision,
    Draw,
}

/// An entry in the append-ordered fight ledger.
///
/// Fights carry no surrogate identifier; the tuple
/// (fighter1, fighter2, division, date) serves as the natural key for
/// remote update and delete. Two fights sharing that tuple are
/// indistinguishable to the remote store and a keyed write affects all of
/// them.
///
/// `winner` is either one of the two participant names or the literal
/// [`DRAW`]. The fight's `division` is stored independently of the two
/// fighters' own divisions and no equality between them is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fight {
    pub fighter1: String,
    pub fighter2: String,
    pub winner: String,
    pub method: Method,
    pub division: Division,
    pub date: String,
}

impl Fight {
    pub fn is_draw(&self) -> bool {
        self.winner == DRAW
    }

    /// Whether the named fighter appears on either side of this fight.
    pub fn involves(&self, name: &str) -> bool {
        self.fighter1 == name || self.fighter2 == name
    }

    /// The other participant's name, if `name` is one of the two.
    pub fn opponent_of(&self, name: &str) -> Option<&str> {
        if self.fighter1 == name {
            Some(&self.fighter2)
        } else if self.fighter2 == name {
            Some(&self.fighter1)
        } else {
            None
        }
    }

    /// The natural key used to address this fight in the remote store.
    pub fn key(&self) -> FightKey {
        FightKey {
            fighter1: self.fighter1.clone(),
            fighter2: self.fighter2.clone(),
            division: self.division,
            date: self.date.clone(),
        }
    }
}

/// Natural key for a fight: (fighter1, fighter2, division, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightKey {
    pub fighter1: String,
    pub fighter2: String,
    pub division: Division,
    pub date: String,
}

impl FightKey {
    pub fn matches(&self, fight: &Fight) -> bool {
        fight.fighter1 == self.fighter1
            && fight.fighter2 == self.fighter2
            && fight.division == self.division
            && fight.date == self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_fight(winner: &str) -> Fight {
        Fight {
            fighter1: "Silva".to_string(),
            fighter2: "Costa".to_string(),
            winner: winner.to_string(),
            method: Method::Decision,
            division: Division::Pc,
            date: "2023-01-01".to_string(),
        }
    }

    #[test]
    fn test_is_draw() {
        assert!(make_fight(DRAW).is_draw());
        assert!(!make_fight("Silva").is_draw());
    }

    #[test]
    fn test_involves_and_opponent() {
        let fight = make_fight("Silva");
        assert!(fight.involves("Silva"));
        assert!(fight.involves("Costa"));
        assert!(!fight.involves("Adesanya"));

        assert_eq!(fight.opponent_of("Silva"), Some("Costa"));
        assert_eq!(fight.opponent_of("Costa"), Some("Silva"));
        assert_eq!(fight.opponent_of("Adesanya"), None);
    }

    #[test]
    fn test_key_matches_duplicates() {
        let fight = make_fight("Silva");
        let mut rematch = make_fight("Costa");
        let key = fight.key();

        // Same pair, division and date: the key cannot tell them apart.
        assert!(key.matches(&fight));
        assert!(key.matches(&rematch));

        rematch.date = "2023-01-02".to_string();
        assert!(!key.matches(&rematch));
    }

    #[test]
    fn test_method_serde_names() {
        assert_eq!(serde_json::to_string(&Method::KO).unwrap(), "\"KO\"");
        assert_eq!(
            serde_json::to_string(&Method::Decision).unwrap(),
            "\"Decision\""
        );
        let m: Method = serde_json::from_str("\"Draw\"").unwrap();
        assert_eq!(m, Method::Draw);
    }
}
