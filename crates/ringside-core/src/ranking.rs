use serde::Serialize;

use crate::division::Division;
use crate::fight::Fight;
use crate::fighter::Fighter;

/// Maximum number of entries in a division's leaderboard.
pub const LEADERBOARD_CAP: usize = 10;

/// A leaderboard entry: a fighter plus their derived quality and score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFighter {
    #[serde(flatten)]
    pub fighter: Fighter,
    /// Strength of schedule: the sum of each past opponent's current
    /// aggregated win total. Current by intent, not the total at fight
    /// time, so a fighter's quality moves as their old opponents keep
    /// winning.
    pub quality: u32,
    pub score: i64,
}

/// Derive the ordered leaderboard for one division.
///
/// The division's current champion is excluded from the candidate pool.
/// score = wins * 5 + quality - losses * 2, sorted descending; the sort is
/// stable so fighters with equal scores keep their pre-sort relative order.
/// At most [`LEADERBOARD_CAP`] entries are returned.
///
/// Opponents missing from `fighters` (deleted or renamed without cascading)
/// contribute zero quality rather than an error.
pub fn rank(
    division: Division,
    fighters: &[Fighter],
    ledger: &[Fight],
    champion: Option<&str>,
) -> Vec<RankedFighter> {
    let mut ranked: Vec<RankedFighter> = fighters
        .iter()
        .filter(|f| f.division == division && Some(f.name.as_str()) != champion)
        .map(|f| {
            let quality: u32 = ledger
                .iter()
                .filter(|fight| fight.division == division && fight.involves(&f.name))
                .filter_map(|fight| fight.opponent_of(&f.name))
                .map(|opponent| {
                    fighters
                        .iter()
                        .find(|o| o.name == opponent)
                        .map_or(0, |o| o.wins)
                })
                .sum();

            let score =
                i64::from(f.wins) * 5 + i64::from(quality) - i64::from(f.losses) * 2;

            RankedFighter {
                fighter: f.clone(),
                quality,
                score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(LEADERBOARD_CAP);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fight::{Method, DRAW};
    use crate::record::aggregate;

    fn fight(f1: &str, f2: &str, winner: &str, method: Method) -> Fight {
        Fight {
            fighter1: f1.to_string(),
            fighter2: f2.to_string(),
            winner: winner.to_string(),
            method,
            division: Division::Pc,
            date: "2023-01-01".to_string(),
        }
    }

    #[test]
    fn test_ko_scenario_orders_winner_first() {
        let fighters = vec![
            Fighter::debut("A", Division::Pc),
            Fighter::debut("B", Division::Pc),
        ];
        let ledger = vec![fight("A", "B", "A", Method::KO)];
        let fighters = aggregate(&ledger, &fighters);

        let ranked = rank(Division::Pc, &fighters, &ledger, None);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].fighter.name, "A");
        // A: 1 win * 5 + quality 0 (B has no wins) = 5
        assert_eq!(ranked[0].score, 5);
        // B: quality 1 (A's current win) - 1 loss * 2 = -1
        assert_eq!(ranked[1].score, -1);
    }

    #[test]
    fn test_champion_excluded() {
        let fighters = vec![
            Fighter::debut("A", Division::Pc),
            Fighter::debut("B", Division::Pc),
        ];
        let ledger = vec![fight("A", "B", "A", Method::Decision)];
        let fighters = aggregate(&ledger, &fighters);

        let ranked = rank(Division::Pc, &fighters, &ledger, Some("A"));

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].fighter.name, "B");
    }

    #[test]
    fn test_other_divisions_excluded() {
        let fighters = vec![
            Fighter::debut("A", Division::Pc),
            Fighter::debut("B", Division::Xbox),
        ];

        let ranked = rank(Division::Pc, &fighters, &[], None);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].fighter.name, "A");
    }

    #[test]
    fn test_capped_at_ten() {
        let fighters: Vec<Fighter> = (0..15)
            .map(|i| Fighter::debut(format!("F{i}"), Division::Pc))
            .collect();

        let ranked = rank(Division::Pc, &fighters, &[], None);

        assert_eq!(ranked.len(), LEADERBOARD_CAP);
    }

    #[test]
    fn test_size_is_min_of_cap_and_eligible() {
        let fighters: Vec<Fighter> = (0..4)
            .map(|i| Fighter::debut(format!("F{i}"), Division::Pc))
            .collect();

        let ranked = rank(Division::Pc, &fighters, &[], Some("F0"));

        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_stable_on_ties() {
        // All four fighters score zero; pre-sort (roster) order must hold.
        let fighters: Vec<Fighter> = ["D", "C", "B", "A"]
            .iter()
            .map(|n| Fighter::debut(*n, Division::Pc))
            .collect();

        let ranked = rank(Division::Pc, &fighters, &[], None);

        let names: Vec<&str> = ranked.iter().map(|r| r.fighter.name.as_str()).collect();
        assert_eq!(names, ["D", "C", "B", "A"]);
    }

    #[test]
    fn test_absent_opponent_contributes_zero_quality() {
        // B fought someone no longer on the roster.
        let fighters = vec![Fighter::debut("B", Division::Pc)];
        let ledger = vec![fight("B", "Ghost", "B", Method::Decision)];
        let fighters = aggregate(&ledger, &fighters);

        let ranked = rank(Division::Pc, &fighters, &ledger, None);

        assert_eq!(ranked[0].quality, 0);
        assert_eq!(ranked[0].score, 5);
    }

    #[test]
    fn test_quality_reflects_current_wins() {
        let fighters = vec![
            Fighter::debut("A", Division::Pc),
            Fighter::debut("B", Division::Pc),
            Fighter::debut("C", Division::Pc),
        ];
        // A beat B once; B then beat C twice. A's quality tracks B's
        // present total, not B's record when they met.
        let ledger = vec![
            fight("A", "B", "A", Method::Decision),
            fight("B", "C", "B", Method::Decision),
            fight("B", "C", "B", Method::KO),
        ];
        let fighters = aggregate(&ledger, &fighters);

        let ranked = rank(Division::Pc, &fighters, &ledger, None);
        let a = ranked.iter().find(|r| r.fighter.name == "A").unwrap();

        assert_eq!(a.quality, 2);
    }

    #[test]
    fn test_draws_do_not_move_score() {
        let fighters = vec![
            Fighter::debut("A", Division::Pc),
            Fighter::debut("B", Division::Pc),
        ];
        let ledger = vec![fight("A", "B", DRAW, Method::Draw)];
        let fighters = aggregate(&ledger, &fighters);

        let ranked = rank(Division::Pc, &fighters, &ledger, None);

        assert_eq!(ranked[0].score, 0);
        assert_eq!(ranked[1].score, 0);
    }
}
