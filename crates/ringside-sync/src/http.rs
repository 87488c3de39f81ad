use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use ringside_core::{Champion, Division, Fight, FightKey, Fighter};

use crate::remote::{FightPatch, RemoteError, RemoteStore};

const TABLE_FIGHTERS: &str = "fighters";
const TABLE_FIGHTS: &str = "fights";
const TABLE_CHAMPIONS: &str = "champions";

/// HTTP client for a PostgREST-style remote canonical store.
///
/// Rows are filtered with `column=eq.value` query parameters; champion
/// upserts resolve conflicts on the `division` column.
pub struct HttpRemoteStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpRemoteStore {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }

    fn expect_success(response: Response) -> Result<Response, RemoteError> {
        if !response.status().is_success() {
            return Err(RemoteError::Rejected(format!(
                "HTTP error: {}",
                response.status()
            )));
        }
        Ok(response)
    }

    async fn fetch_all<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, RemoteError> {
        let response = self
            .authed(self.client.get(self.table_url(table)).query(&[("select", "*")]))
            .send()
            .await?;
        let response = Self::expect_success(response)?;
        Ok(response.json().await?)
    }

    async fn insert_row<T: Serialize>(&self, table: &str, row: &T) -> Result<(), RemoteError> {
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;
        Self::expect_success(response)?;
        Ok(())
    }

    /// PATCH rows matching the given `column=eq.value` filters.
    async fn update_rows(
        &self,
        table: &str,
        filters: &[(&str, String)],
        body: serde_json::Value,
    ) -> Result<(), RemoteError> {
        let response = self
            .authed(self.client.patch(self.table_url(table)).query(&eq(filters)))
            .json(&body)
            .send()
            .await?;
        Self::expect_success(response)?;
        Ok(())
    }

    /// DELETE rows matching the given `column=eq.value` filters.
    async fn delete_rows(&self, table: &str, filters: &[(&str, String)]) -> Result<(), RemoteError> {
        let response = self
            .authed(self.client.delete(self.table_url(table)).query(&eq(filters)))
            .send()
            .await?;
        Self::expect_success(response)?;
        Ok(())
    }

    fn fight_key_filters(key: &FightKey) -> Vec<(&'static str, String)> {
        vec![
            ("fighter1", key.fighter1.clone()),
            ("fighter2", key.fighter2.clone()),
            ("date", key.date.clone()),
            ("division", key.division.to_string()),
        ]
    }
}

fn eq(filters: &[(&str, String)]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|(column, value)| (column.to_string(), format!("eq.{value}")))
        .collect()
}

impl RemoteStore for HttpRemoteStore {
    async fn fetch_fighters(&self) -> Result<Vec<Fighter>, RemoteError> {
        self.fetch_all(TABLE_FIGHTERS).await
    }

    async fn fetch_fights(&self) -> Result<Vec<Fight>, RemoteError> {
        self.fetch_all(TABLE_FIGHTS).await
    }

    async fn fetch_champions(&self) -> Result<Vec<Champion>, RemoteError> {
        self.fetch_all(TABLE_CHAMPIONS).await
    }

    async fn insert_fighter(&self, fighter: &Fighter) -> Result<(), RemoteError> {
        self.insert_row(TABLE_FIGHTERS, fighter).await
    }

    async fn update_fighter_record(&self, fighter: &Fighter) -> Result<(), RemoteError> {
        self.update_rows(
            TABLE_FIGHTERS,
            &[("name", fighter.name.clone())],
            json!({
                "wins": fighter.wins,
                "losses": fighter.losses,
                "draws": fighter.draws,
                "koWins": fighter.ko_wins,
            }),
        )
        .await
    }

    async fn rename_fighter(&self, old: &str, new: &str) -> Result<(), RemoteError> {
        self.update_rows(
            TABLE_FIGHTERS,
            &[("name", old.to_string())],
            json!({ "name": new }),
        )
        .await
    }

    async fn rename_in_fights(&self, old: &str, new: &str) -> Result<(), RemoteError> {
        for column in ["fighter1", "fighter2", "winner"] {
            self.update_rows(
                TABLE_FIGHTS,
                &[(column, old.to_string())],
                json!({ (column): new }),
            )
            .await?;
        }
        Ok(())
    }

    async fn rename_champion(&self, old: &str, new: &str) -> Result<(), RemoteError> {
        self.update_rows(
            TABLE_CHAMPIONS,
            &[("name", old.to_string())],
            json!({ "name": new }),
        )
        .await
    }

    async fn delete_fighter(&self, name: &str) -> Result<(), RemoteError> {
        self.delete_rows(TABLE_FIGHTERS, &[("name", name.to_string())])
            .await
    }

    async fn insert_fight(&self, fight: &Fight) -> Result<(), RemoteError> {
        self.insert_row(TABLE_FIGHTS, fight).await
    }

    async fn update_fight(&self, key: &FightKey, patch: &FightPatch) -> Result<(), RemoteError> {
        self.update_rows(
            TABLE_FIGHTS,
            &Self::fight_key_filters(key),
            json!({
                "winner": patch.winner,
                "method": patch.method,
                "date": patch.date,
            }),
        )
        .await
    }

    async fn delete_fight(&self, key: &FightKey) -> Result<(), RemoteError> {
        self.delete_rows(TABLE_FIGHTS, &Self::fight_key_filters(key))
            .await
    }

    async fn delete_fights_involving(&self, name: &str) -> Result<(), RemoteError> {
        self.delete_rows(TABLE_FIGHTS, &[("fighter1", name.to_string())])
            .await?;
        self.delete_rows(TABLE_FIGHTS, &[("fighter2", name.to_string())])
            .await
    }

    async fn upsert_champion(&self, champion: &Champion) -> Result<(), RemoteError> {
        let response = self
            .authed(
                self.client
                    .post(self.table_url(TABLE_CHAMPIONS))
                    .query(&[("on_conflict", "division")]),
            )
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[champion])
            .send()
            .await?;
        Self::expect_success(response)?;
        Ok(())
    }

    async fn clear_champion(&self, division: Division) -> Result<(), RemoteError> {
        self.delete_rows(TABLE_CHAMPIONS, &[("division", division.to_string())])
            .await
    }

    async fn clear_champion_named(&self, name: &str) -> Result<(), RemoteError> {
        self.delete_rows(TABLE_CHAMPIONS, &[("name", name.to_string())])
            .await
    }
}
