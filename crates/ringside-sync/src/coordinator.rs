use std::sync::Arc;

use ringside_core::{
    aggregate, rank, Champion, Division, Fight, Fighter, RankedFighter, Snapshot, SnapshotCache,
    ValidationError, Validator,
};

use crate::remote::{FightPatch, RemoteError, RemoteStore};

/// Keeps the in-memory working set consistent with the remote canonical
/// store and the local fallback cache.
///
/// Reconciliation is optimistic-write / full-refresh: every command
/// validates, applies its change in memory, mirrors the cache, issues
/// best-effort remote writes, then reloads from the remote wholesale.
/// There is no transaction across the two stores; the reload is the only
/// convergence mechanism. Remote failures are logged and never surfaced
/// to the caller, so on total remote unavailability the coordinator
/// degrades to cache-only operation indefinitely.
pub struct SyncCoordinator<R: RemoteStore, C: SnapshotCache> {
    remote: Arc<R>,
    cache: Arc<C>,
    state: Snapshot,
}

impl<R: RemoteStore, C: SnapshotCache> SyncCoordinator<R, C> {
    pub fn new(remote: Arc<R>, cache: Arc<C>) -> Self {
        Self {
            remote,
            cache,
            state: Snapshot::default(),
        }
    }

    // ------------------------------------------------------------------
    // Reconciliation
    // ------------------------------------------------------------------

    /// Fetch all three collections from the remote and replace in-memory
    /// state wholesale; the fetched snapshot also overwrites the cache.
    /// On any fetch error, fall back to the last cached snapshot (empty
    /// when no cache exists).
    pub async fn load(&mut self) {
        match self.fetch_remote().await {
            Ok(snapshot) => {
                self.state = snapshot;
                self.mirror_to_cache();
            }
            Err(e) => {
                tracing::warn!("remote load failed, falling back to cache: {e}");
                self.state = self.read_cache();
            }
        }
    }

    async fn fetch_remote(&self) -> Result<Snapshot, RemoteError> {
        let fighters = self.remote.fetch_fighters().await?;
        let fights = self.remote.fetch_fights().await?;
        let champions = self.remote.fetch_champions().await?;
        Ok(Snapshot::new(fighters, fights, champions))
    }

    fn read_cache(&self) -> Snapshot {
        let fighters = self.cache.load_fighters().unwrap_or_else(|e| {
            tracing::warn!("cache read failed for fighters: {e}");
            None
        });
        let fights = self.cache.load_fights().unwrap_or_else(|e| {
            tracing::warn!("cache read failed for fights: {e}");
            None
        });
        let champions = self.cache.load_champions().unwrap_or_else(|e| {
            tracing::warn!("cache read failed for champions: {e}");
            None
        });

        Snapshot::new(
            fighters.unwrap_or_default(),
            fights.unwrap_or_default(),
            champions.unwrap_or_default(),
        )
    }

    /// Mirror the current in-memory state into the cache. Runs after
    /// every state transition, whether or not the remote confirmed it.
    fn mirror_to_cache(&self) {
        if let Err(e) = self.cache.store_fighters(&self.state.fighters) {
            tracing::warn!("cache write failed for fighters: {e}");
        }
        if let Err(e) = self.cache.store_fights(&self.state.fights) {
            tracing::warn!("cache write failed for fights: {e}");
        }
        if let Err(e) = self.cache.store_champions(&self.state.champion_rows()) {
            tracing::warn!("cache write failed for champions: {e}");
        }
    }

    fn reaggregate(&mut self) {
        self.state.fighters = aggregate(&self.state.fights, &self.state.fighters);
    }

    // ------------------------------------------------------------------
    // Mutation commands
    // ------------------------------------------------------------------

    pub async fn add_fighter(
        &mut self,
        name: &str,
        division: Division,
    ) -> Result<(), ValidationError> {
        Validator::validate_new_fighter(&self.state.fighters, name, division)?;

        let fighter = Fighter::debut(name, division);
        self.state.fighters.push(fighter.clone());
        self.mirror_to_cache();

        if let Err(e) = self.remote.insert_fighter(&fighter).await {
            tracing::warn!("remote insert failed for fighter {}: {e}", fighter.name);
        }

        self.load().await;
        Ok(())
    }

    pub async fn add_fight(&mut self, fight: Fight) -> Result<(), ValidationError> {
        Validator::validate_fight(&fight)?;

        self.state.fights.push(fight.clone());
        // One authoritative aggregator pass instead of a second
        // incremental counter formula.
        self.reaggregate();
        self.mirror_to_cache();

        if let Err(e) = self.remote.insert_fight(&fight).await {
            tracing::warn!("remote insert failed for fight: {e}");
        }
        for name in [&fight.fighter1, &fight.fighter2] {
            if let Some(fighter) = self.state.find_fighter(name) {
                if let Err(e) = self.remote.update_fighter_record(fighter).await {
                    tracing::warn!("remote record update failed for {name}: {e}");
                }
            }
        }

        self.load().await;
        Ok(())
    }

    /// Rename a fighter, rewriting every ledger and champion reference.
    /// A rename is a pure relabeling: re-aggregation afterwards yields
    /// counters identical to before.
    pub async fn edit_fighter_name(
        &mut self,
        old: &str,
        new: &str,
    ) -> Result<(), ValidationError> {
        Validator::validate_rename(&self.state.fighters, new)?;

        for fighter in self.state.fighters.iter_mut().filter(|f| f.name == old) {
            fighter.name = new.to_string();
        }
        for fight in self.state.fights.iter_mut() {
            if fight.fighter1 == old {
                fight.fighter1 = new.to_string();
            }
            if fight.fighter2 == old {
                fight.fighter2 = new.to_string();
            }
            if fight.winner == old {
                fight.winner = new.to_string();
            }
        }
        for holder in self.state.champions.values_mut() {
            if holder.as_str() == old {
                *holder = new.to_string();
            }
        }
        self.reaggregate();
        self.mirror_to_cache();

        if let Err(e) = self.remote.rename_fighter(old, new).await {
            tracing::warn!("remote rename failed for fighter {old}: {e}");
        }
        if let Err(e) = self.remote.rename_in_fights(old, new).await {
            tracing::warn!("remote rename failed in fights for {old}: {e}");
        }
        if let Err(e) = self.remote.rename_champion(old, new).await {
            tracing::warn!("remote rename failed in champions for {old}: {e}");
        }

        self.load().await;
        Ok(())
    }

    /// Remove a ledger entry by position and re-derive all counters from
    /// the reduced ledger. The remote delete is addressed by the natural
    /// key and removes every row matching it.
    pub async fn delete_fight(&mut self, index: usize) -> Result<(), ValidationError> {
        if index >= self.state.fights.len() {
            return Err(ValidationError::NoSuchFight {
                index,
                len: self.state.fights.len(),
            });
        }

        let fight = self.state.fights.remove(index);
        self.reaggregate();
        self.mirror_to_cache();

        if let Err(e) = self.remote.delete_fight(&fight.key()).await {
            tracing::warn!("remote delete failed for fight: {e}");
        }

        self.load().await;
        Ok(())
    }

    /// Patch a ledger entry's winner/method/date in place. The remote
    /// update is filtered by the pre-patch natural key.
    pub async fn edit_fight(
        &mut self,
        index: usize,
        patch: FightPatch,
    ) -> Result<(), ValidationError> {
        let Some(fight) = self.state.fights.get_mut(index) else {
            return Err(ValidationError::NoSuchFight {
                index,
                len: self.state.fights.len(),
            });
        };

        let key = fight.key();
        patch.apply(fight);
        self.reaggregate();
        self.mirror_to_cache();

        if let Err(e) = self.remote.update_fight(&key, &patch).await {
            tracing::warn!("remote update failed for fight: {e}");
        }

        self.load().await;
        Ok(())
    }

    /// Remove a fighter and detach it from ledger and champion
    /// references. Keyed by name only.
    pub async fn delete_fighter(&mut self, name: &str) -> Result<(), ValidationError> {
        if !self.state.fighters.iter().any(|f| f.name == name) {
            return Err(ValidationError::UnknownFighter(name.to_string()));
        }

        self.state.fighters.retain(|f| f.name != name);
        self.state.fights.retain(|f| !f.involves(name));
        self.state.champions.retain(|_, holder| holder.as_str() != name);
        self.reaggregate();
        self.mirror_to_cache();

        if let Err(e) = self.remote.delete_fighter(name).await {
            tracing::warn!("remote delete failed for fighter {name}: {e}");
        }
        if let Err(e) = self.remote.delete_fights_involving(name).await {
            tracing::warn!("remote delete failed for fights of {name}: {e}");
        }
        if let Err(e) = self.remote.clear_champion_named(name).await {
            tracing::warn!("remote delete failed for champion {name}: {e}");
        }

        self.load().await;
        Ok(())
    }

    /// Unconditional upsert keyed by division; an empty name vacates the
    /// title. No check that the name belongs to a fighter in that
    /// division.
    pub async fn set_champion(&mut self, division: Division, name: &str) {
        if name.is_empty() {
            self.state.champions.remove(&division);
            self.mirror_to_cache();

            if let Err(e) = self.remote.clear_champion(division).await {
                tracing::warn!("remote clear failed for {division} champion: {e}");
            }
        } else {
            self.state.champions.insert(division, name.to_string());
            self.mirror_to_cache();

            let champion = Champion {
                division,
                name: name.to_string(),
            };
            if let Err(e) = self.remote.upsert_champion(&champion).await {
                tracing::warn!("remote upsert failed for {division} champion: {e}");
            }
        }

        self.load().await;
    }

    // ------------------------------------------------------------------
    // Read queries
    // ------------------------------------------------------------------

    pub fn fighters(&self) -> &[Fighter] {
        &self.state.fighters
    }

    pub fn fights(&self) -> &[Fight] {
        &self.state.fights
    }

    pub fn champions(&self) -> Vec<Champion> {
        self.state.champion_rows()
    }

    pub fn champion_of(&self, division: Division) -> Option<&str> {
        self.state.champion_of(division)
    }

    /// The division's leaderboard, derived on demand.
    pub fn ranked_fighters(&self, division: Division) -> Vec<RankedFighter> {
        rank(
            division,
            &self.state.fighters,
            &self.state.fights,
            self.state.champion_of(division),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::mock::MockRemoteStore;
    use ringside_core::{InMemorySnapshotCache, Method, DRAW};

    fn coordinator() -> SyncCoordinator<MockRemoteStore, InMemorySnapshotCache> {
        SyncCoordinator::new(
            Arc::new(MockRemoteStore::new()),
            Arc::new(InMemorySnapshotCache::new()),
        )
    }

    fn fight(f1: &str, f2: &str, winner: &str, method: Method, date: &str) -> Fight {
        Fight {
            fighter1: f1.to_string(),
            fighter2: f2.to_string(),
            winner: winner.to_string(),
            method,
            division: Division::Pc,
            date: date.to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_replaces_state_and_overwrites_cache() {
        let mut coord = coordinator();
        coord
            .remote
            .seed(vec![Fighter::debut("Silva", Division::Pc)], Vec::new(), Vec::new());

        coord.load().await;

        assert_eq!(coord.fighters().len(), 1);
        let cached = coord.cache.load_fighters().unwrap().unwrap();
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn test_load_falls_back_to_cache_when_remote_down() {
        let mut coord = coordinator();
        coord
            .cache
            .store_fighters(&[Fighter::debut("Cached", Division::Pc)])
            .unwrap();
        coord.remote.set_unavailable(true);

        coord.load().await;

        assert_eq!(coord.fighters()[0].name, "Cached");
    }

    #[tokio::test]
    async fn test_load_with_no_remote_and_no_cache_starts_empty() {
        let mut coord = coordinator();
        coord.remote.set_unavailable(true);

        coord.load().await;

        assert!(coord.fighters().is_empty());
        assert!(coord.fights().is_empty());
        assert!(coord.champions().is_empty());
    }

    #[tokio::test]
    async fn test_add_fighter_reaches_remote() {
        let mut coord = coordinator();

        coord.add_fighter("Silva", Division::Pc).await.unwrap();

        assert_eq!(coord.fighters().len(), 1);
        assert_eq!(coord.remote.fighters().len(), 1);
    }

    #[tokio::test]
    async fn test_add_fighter_duplicate_rejected_leaves_one() {
        let mut coord = coordinator();

        coord.add_fighter("Silva", Division::Pc).await.unwrap();
        let err = coord.add_fighter("Silva", Division::Pc).await.unwrap_err();

        assert!(matches!(err, ValidationError::DuplicateFighter { .. }));
        assert_eq!(coord.fighters().len(), 1);
        assert_eq!(coord.remote.fighters().len(), 1);
    }

    #[tokio::test]
    async fn test_add_fight_aggregates_and_persists_counters() {
        let mut coord = coordinator();
        coord.add_fighter("A", Division::Pc).await.unwrap();
        coord.add_fighter("B", Division::Pc).await.unwrap();

        coord
            .add_fight(fight("A", "B", "A", Method::KO, "2023-01-01"))
            .await
            .unwrap();

        let a = coord.state.find_fighter("A").unwrap();
        assert_eq!((a.wins, a.ko_wins), (1, 1));
        let b = coord.state.find_fighter("B").unwrap();
        assert_eq!(b.losses, 1);

        // Counters made it to the remote rows too.
        let remote_a = coord
            .remote
            .fighters()
            .into_iter()
            .find(|f| f.name == "A")
            .unwrap();
        assert_eq!(remote_a.wins, 1);
    }

    #[tokio::test]
    async fn test_add_fight_self_opponent_rejected() {
        let mut coord = coordinator();
        coord.add_fighter("A", Division::Pc).await.unwrap();

        let err = coord
            .add_fight(fight("A", "A", "A", Method::KO, "2023-01-01"))
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::SelfOpponent("A".to_string()));
        assert!(coord.fights().is_empty());
    }

    #[tokio::test]
    async fn test_optimistic_update_survives_remote_failure() {
        let mut coord = coordinator();
        coord.add_fighter("A", Division::Pc).await.unwrap();
        coord.remote.set_unavailable(true);

        // Remote write and reload both fail; the optimistic update stays
        // visible via the cache fallback, and the command still succeeds.
        coord.add_fighter("B", Division::Pc).await.unwrap();

        assert_eq!(coord.fighters().len(), 2);
        assert_eq!(coord.remote.fighters().len(), 1);

        // Once the remote comes back the next reload reconciles, dropping
        // the unconfirmed fighter.
        coord.remote.set_unavailable(false);
        coord.load().await;
        assert_eq!(coord.fighters().len(), 1);
    }

    #[tokio::test]
    async fn test_rename_rewrites_everything_and_keeps_counters() {
        let mut coord = coordinator();
        coord.add_fighter("A", Division::Pc).await.unwrap();
        coord.add_fighter("B", Division::Pc).await.unwrap();
        coord
            .add_fight(fight("A", "B", "A", Method::KO, "2023-01-01"))
            .await
            .unwrap();
        coord.set_champion(Division::Pc, "A").await;

        let before = coord.state.find_fighter("A").unwrap().clone();

        coord.edit_fighter_name("A", "A2").await.unwrap();

        assert!(coord.state.find_fighter("A").is_none());
        let after = coord.state.find_fighter("A2").unwrap();
        assert_eq!(
            (after.wins, after.losses, after.draws, after.ko_wins),
            (before.wins, before.losses, before.draws, before.ko_wins)
        );

        let ledger = coord.fights();
        assert_eq!(ledger[0].fighter1, "A2");
        assert_eq!(ledger[0].winner, "A2");
        assert_eq!(coord.champion_of(Division::Pc), Some("A2"));

        // Remote rows were rewritten as well, so the reload kept them.
        assert!(coord.remote.fighters().iter().any(|f| f.name == "A2"));
        assert_eq!(coord.remote.fights()[0].fighter1, "A2");
        assert_eq!(coord.remote.champions()[0].name, "A2");
    }

    #[tokio::test]
    async fn test_rename_to_taken_name_rejected() {
        let mut coord = coordinator();
        coord.add_fighter("A", Division::Pc).await.unwrap();
        coord.add_fighter("B", Division::Pc).await.unwrap();

        let err = coord.edit_fighter_name("A", "B").await.unwrap_err();

        assert_eq!(err, ValidationError::NameTaken("B".to_string()));
        assert!(coord.state.find_fighter("A").is_some());
    }

    #[tokio::test]
    async fn test_delete_fight_matches_fresh_aggregate() {
        let mut coord = coordinator();
        coord.add_fighter("A", Division::Pc).await.unwrap();
        coord.add_fighter("B", Division::Pc).await.unwrap();
        coord
            .add_fight(fight("A", "B", "A", Method::KO, "2023-01-01"))
            .await
            .unwrap();
        coord
            .add_fight(fight("A", "B", "B", Method::Decision, "2023-02-01"))
            .await
            .unwrap();

        coord.delete_fight(0).await.unwrap();

        assert_eq!(coord.fights().len(), 1);
        let expected = aggregate(coord.fights(), coord.fighters());
        assert_eq!(coord.fighters(), expected.as_slice());

        let a = coord.state.find_fighter("A").unwrap();
        assert_eq!((a.wins, a.losses), (0, 1));
    }

    #[tokio::test]
    async fn test_delete_fight_out_of_range() {
        let mut coord = coordinator();

        let err = coord.delete_fight(3).await.unwrap_err();

        assert_eq!(err, ValidationError::NoSuchFight { index: 3, len: 0 });
    }

    #[tokio::test]
    async fn test_delete_fight_removes_all_natural_key_duplicates_remotely() {
        let mut coord = coordinator();
        coord.add_fighter("A", Division::Pc).await.unwrap();
        coord.add_fighter("B", Division::Pc).await.unwrap();
        // Two fights with the same pair, division and date.
        coord
            .add_fight(fight("A", "B", "A", Method::KO, "2023-01-01"))
            .await
            .unwrap();
        coord
            .add_fight(fight("A", "B", "B", Method::Decision, "2023-01-01"))
            .await
            .unwrap();

        coord.delete_fight(0).await.unwrap();

        // The keyed remote delete hits both rows; the reload then shrinks
        // the local ledger to match.
        assert!(coord.remote.fights().is_empty());
        assert!(coord.fights().is_empty());
    }

    #[tokio::test]
    async fn test_edit_fight_repatches_and_reaggregates() {
        let mut coord = coordinator();
        coord.add_fighter("A", Division::Pc).await.unwrap();
        coord.add_fighter("B", Division::Pc).await.unwrap();
        coord
            .add_fight(fight("A", "B", "A", Method::KO, "2023-01-01"))
            .await
            .unwrap();

        coord
            .edit_fight(
                0,
                FightPatch {
                    winner: DRAW.to_string(),
                    method: Method::Draw,
                    date: "2023-01-02".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(coord.fights()[0].winner, DRAW);
        assert_eq!(coord.fights()[0].date, "2023-01-02");
        let a = coord.state.find_fighter("A").unwrap();
        assert_eq!((a.wins, a.draws), (0, 1));

        // Remote row updated via the pre-patch key.
        assert_eq!(coord.remote.fights()[0].date, "2023-01-02");
    }

    #[tokio::test]
    async fn test_delete_fighter_detaches_references() {
        let mut coord = coordinator();
        coord.add_fighter("A", Division::Pc).await.unwrap();
        coord.add_fighter("B", Division::Pc).await.unwrap();
        coord
            .add_fight(fight("A", "B", "A", Method::KO, "2023-01-01"))
            .await
            .unwrap();
        coord.set_champion(Division::Pc, "A").await;

        coord.delete_fighter("A").await.unwrap();

        assert!(coord.state.find_fighter("A").is_none());
        assert!(coord.fights().is_empty());
        assert_eq!(coord.champion_of(Division::Pc), None);

        // B's record no longer counts the detached fight.
        let b = coord.state.find_fighter("B").unwrap();
        assert_eq!(b.losses, 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_fighter_rejected() {
        let mut coord = coordinator();

        let err = coord.delete_fighter("Ghost").await.unwrap_err();

        assert_eq!(err, ValidationError::UnknownFighter("Ghost".to_string()));
    }

    #[tokio::test]
    async fn test_set_champion_upserts_without_existence_check() {
        let mut coord = coordinator();

        coord.set_champion(Division::Ps5, "Nobody").await;

        assert_eq!(coord.champion_of(Division::Ps5), Some("Nobody"));
        assert_eq!(coord.remote.champions()[0].name, "Nobody");
    }

    #[tokio::test]
    async fn test_set_champion_empty_name_vacates() {
        let mut coord = coordinator();
        coord.set_champion(Division::Pc, "Silva").await;

        coord.set_champion(Division::Pc, "").await;

        assert_eq!(coord.champion_of(Division::Pc), None);
        assert!(coord.remote.champions().is_empty());
    }

    #[tokio::test]
    async fn test_champion_excluded_from_rankings() {
        let mut coord = coordinator();
        coord.add_fighter("A", Division::Pc).await.unwrap();
        coord.add_fighter("B", Division::Pc).await.unwrap();
        coord
            .add_fight(fight("A", "B", "A", Method::KO, "2023-01-01"))
            .await
            .unwrap();
        coord.set_champion(Division::Pc, "A").await;

        let ranked = coord.ranked_fighters(Division::Pc);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].fighter.name, "B");
    }

    #[tokio::test]
    async fn test_every_transition_mirrors_cache() {
        let mut coord = coordinator();
        coord.remote.set_unavailable(true);

        coord.add_fighter("A", Division::Pc).await.unwrap();

        // Remote never confirmed anything, yet the cache already holds
        // the optimistic state.
        let cached = coord.cache.load_fighters().unwrap().unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].name, "A");
    }
}
