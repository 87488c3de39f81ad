use serde::{Deserialize, Serialize};

use ringside_core::{Champion, Division, Fight, FightKey, Fighter, Method};

/// Error type for remote canonical store operations.
///
/// These are persistence errors in the engine's model: they are logged by
/// the coordinator and never surfaced to the command caller.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote rejected request: {0}")]
    Rejected(String),

    #[error("remote unavailable: {0}")]
    Unavailable(String),
}

/// In-place changes to a ledger entry: the mutable fields of a fight.
/// The remote row is addressed by its pre-patch natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightPatch {
    pub winner: String,
    pub method: Method,
    pub date: String,
}

impl FightPatch {
    /// Apply this patch to a ledger entry in place.
    pub fn apply(&self, fight: &mut Fight) {
        fight.winner = self.winner.clone();
        fight.method = self.method;
        fight.date = self.date.clone();
    }
}

/// The remote canonical store: three collections with bulk read-all, row
/// insert, update-by-filter, delete-by-filter, and champion upsert keyed
/// by division.
///
/// Fighters are addressed by `name` in filters; fights by their natural
/// key. A filtered write affects every matching row.
pub trait RemoteStore: Send + Sync {
    fn fetch_fighters(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Fighter>, RemoteError>> + Send;

    fn fetch_fights(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Fight>, RemoteError>> + Send;

    fn fetch_champions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Champion>, RemoteError>> + Send;

    fn insert_fighter(
        &self,
        fighter: &Fighter,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    /// Push a fighter's aggregated counters, filtered by name.
    fn update_fighter_record(
        &self,
        fighter: &Fighter,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    fn rename_fighter(
        &self,
        old: &str,
        new: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    /// Rewrite fighter1/fighter2/winner references in the fights
    /// collection.
    fn rename_in_fights(
        &self,
        old: &str,
        new: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    fn rename_champion(
        &self,
        old: &str,
        new: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    fn delete_fighter(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    fn insert_fight(
        &self,
        fight: &Fight,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    fn update_fight(
        &self,
        key: &FightKey,
        patch: &FightPatch,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    fn delete_fight(
        &self,
        key: &FightKey,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    fn delete_fights_involving(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    fn upsert_champion(
        &self,
        champion: &Champion,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    fn clear_champion(
        &self,
        division: Division,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    fn clear_champion_named(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;
}

// In-memory remote for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockData {
        fighters: Vec<Fighter>,
        fights: Vec<Fight>,
        champions: Vec<Champion>,
    }

    /// In-memory remote store for testing. Can be switched to an
    /// unavailable state to exercise the cache fallback and the
    /// optimistic-update paths.
    #[derive(Default)]
    pub struct MockRemoteStore {
        data: RwLock<MockData>,
        unavailable: AtomicBool,
    }

    impl MockRemoteStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seed(&self, fighters: Vec<Fighter>, fights: Vec<Fight>, champions: Vec<Champion>) {
            let mut data = self.data.write().unwrap();
            data.fighters = fighters;
            data.fights = fights;
            data.champions = champions;
        }

        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        pub fn fighters(&self) -> Vec<Fighter> {
            self.data.read().unwrap().fighters.clone()
        }

        pub fn fights(&self) -> Vec<Fight> {
            self.data.read().unwrap().fights.clone()
        }

        pub fn champions(&self) -> Vec<Champion> {
            self.data.read().unwrap().champions.clone()
        }

        fn check_available(&self) -> Result<(), RemoteError> {
            if self.unavailable.load(Ordering::SeqCst) {
                Err(RemoteError::Unavailable("mock remote offline".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl RemoteStore for MockRemoteStore {
        async fn fetch_fighters(&self) -> Result<Vec<Fighter>, RemoteError> {
            self.check_available()?;
            Ok(self.fighters())
        }

        async fn fetch_fights(&self) -> Result<Vec<Fight>, RemoteError> {
            self.check_available()?;
            Ok(self.fights())
        }

        async fn fetch_champions(&self) -> Result<Vec<Champion>, RemoteError> {
            self.check_available()?;
            Ok(self.champions())
        }

        async fn insert_fighter(&self, fighter: &Fighter) -> Result<(), RemoteError> {
            self.check_available()?;
            self.data.write().unwrap().fighters.push(fighter.clone());
            Ok(())
        }

        async fn update_fighter_record(&self, fighter: &Fighter) -> Result<(), RemoteError> {
            self.check_available()?;
            // Filtered by name only, like the real update path.
            for row in self
                .data
                .write()
                .unwrap()
                .fighters
                .iter_mut()
                .filter(|f| f.name == fighter.name)
            {
                row.wins = fighter.wins;
                row.losses = fighter.losses;
                row.draws = fighter.draws;
                row.ko_wins = fighter.ko_wins;
            }
            Ok(())
        }

        async fn rename_fighter(&self, old: &str, new: &str) -> Result<(), RemoteError> {
            self.check_available()?;
            for row in self
                .data
                .write()
                .unwrap()
                .fighters
                .iter_mut()
                .filter(|f| f.name == old)
            {
                row.name = new.to_string();
            }
            Ok(())
        }

        async fn rename_in_fights(&self, old: &str, new: &str) -> Result<(), RemoteError> {
            self.check_available()?;
            for fight in self.data.write().unwrap().fights.iter_mut() {
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
            Ok(())
        }

        async fn rename_champion(&self, old: &str, new: &str) -> Result<(), RemoteError> {
            self.check_available()?;
            for champion in self
                .data
                .write()
                .unwrap()
                .champions
                .iter_mut()
                .filter(|c| c.name == old)
            {
                champion.name = new.to_string();
            }
            Ok(())
        }

        async fn delete_fighter(&self, name: &str) -> Result<(), RemoteError> {
            self.check_available()?;
            self.data
                .write()
                .unwrap()
                .fighters
                .retain(|f| f.name != name);
            Ok(())
        }

        async fn insert_fight(&self, fight: &Fight) -> Result<(), RemoteError> {
            self.check_available()?;
            self.data.write().unwrap().fights.push(fight.clone());
            Ok(())
        }

        async fn update_fight(
            &self,
            key: &FightKey,
            patch: &FightPatch,
        ) -> Result<(), RemoteError> {
            self.check_available()?;
            for fight in self
                .data
                .write()
                .unwrap()
                .fights
                .iter_mut()
                .filter(|f| key.matches(f))
            {
                patch.apply(fight);
            }
            Ok(())
        }

        async fn delete_fight(&self, key: &FightKey) -> Result<(), RemoteError> {
            self.check_available()?;
            // Natural-key addressing: every matching row goes.
            self.data
                .write()
                .unwrap()
                .fights
                .retain(|f| !key.matches(f));
            Ok(())
        }

        async fn delete_fights_involving(&self, name: &str) -> Result<(), RemoteError> {
            self.check_available()?;
            self.data
                .write()
                .unwrap()
                .fights
                .retain(|f| !f.involves(name));
            Ok(())
        }

        async fn upsert_champion(&self, champion: &Champion) -> Result<(), RemoteError> {
            self.check_available()?;
            let mut data = self.data.write().unwrap();
            match data
                .champions
                .iter()
                .position(|c| c.division == champion.division)
            {
                Some(i) => data.champions[i].name = champion.name.clone(),
                None => data.champions.push(champion.clone()),
            }
            Ok(())
        }

        async fn clear_champion(&self, division: Division) -> Result<(), RemoteError> {
            self.check_available()?;
            self.data
                .write()
                .unwrap()
                .champions
                .retain(|c| c.division != division);
            Ok(())
        }

        async fn clear_champion_named(&self, name: &str) -> Result<(), RemoteError> {
            self.check_available()?;
            self.data
                .write()
                .unwrap()
                .champions
                .retain(|c| c.name != name);
            Ok(())
        }
    }
}
