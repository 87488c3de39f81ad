use crate::fight::Fight;
use crate::fighter::Fighter;

/// Recompute every fighter's win/loss/draw/KO counters from the ledger.
///
/// Pure and idempotent: all four counters start from zero on every call and
/// no incremental state is trusted. A ledger entry counts toward a fighter
/// only when the fighter is named on either side AND the entry's division
/// equals the fighter's own division; matching by name alone would mix
/// divisions.
///
/// Must run after every ledger mutation, before persisting.
pub fn aggregate(ledger: &[Fight], fighters: &[Fighter]) -> Vec<Fighter> {
    fighters
        .iter()
        .map(|fighter| {
            let mut updated = fighter.clone();
            updated.wins = 0;
            updated.losses = 0;
            updated.draws = 0;
            updated.ko_wins = 0;

            for fight in ledger
                .iter()
                .filter(|f| f.involves(&fighter.name) && f.division == fighter.division)
            {
                if fight.winner == fighter.name {
                    updated.wins += 1;
                    if fight.method == crate::fight::Method::KO {
                        updated.ko_wins += 1;
                    }
                } else if fight.is_draw() {
                    updated.draws += 1;
                } else {
                    updated.losses += 1;
                }
            }

            updated
        })
        .collect()
}
