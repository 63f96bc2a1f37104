use async_trait::async_trait;
use serde_json::Value;

use super::{into_representations, Collection, DocumentRow};
use crate::error::ModelError;
use crate::models::*;

/// Implement the base capability set by delegating to the entity's own
/// `records` collection.
macro_rules! impl_resource_model {
    ($store:ty) => {
        #[async_trait]
        impl ResourceModel for $store {
            async fn get(&self) -> Result<Vec<Representation>, ModelError> {
                self.records.all().await
            }

            async fn get_by_id(&self, id: i64) -> Result<Option<Representation>, ModelError> {
                self.records.find(id).await
            }

            async fn create(&self, payload: Representation) -> Result<Representation, ModelError> {
                self.records.insert(payload).await
            }

            async fn update_by_id(
                &self,
                id: i64,
                payload: Representation,
            ) -> Result<Representation, ModelError> {
                self.records.merge(id, payload).await
            }
        }
    };
}

pub struct PlayerStore {
    records: Collection,
}

impl PlayerStore {
    pub fn new(records: Collection) -> Self {
        Self { records }
    }
}

impl_resource_model!(PlayerStore);
impl PlayerModel for PlayerStore {}

pub struct LocationStore {
    records: Collection,
}

impl LocationStore {
    pub fn new(records: Collection) -> Self {
        Self { records }
    }
}

impl_resource_model!(LocationStore);
impl LocationModel for LocationStore {}

pub struct TeamStore {
    records: Collection,
}

impl TeamStore {
    pub fn new(records: Collection) -> Self {
        Self { records }
    }
}

impl_resource_model!(TeamStore);

#[async_trait]
impl TeamModel for TeamStore {
    async fn get_roster(&self, team_id: i64) -> Result<Vec<Representation>, ModelError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"SELECT p.id, p.body FROM players p
               JOIN team_players m ON m.player_id = p.id
               WHERE m.team_id = ?
               ORDER BY p.id"#,
        )
        .bind(team_id)
        .fetch_all(self.records.pool())
        .await?;

        into_representations(rows)
    }

    async fn add_player(
        &self,
        player_id: i64,
        team_id: i64,
    ) -> Result<Vec<Representation>, ModelError> {
        // Only lands when the team exists at the time of the write.
        sqlx::query(
            r#"INSERT OR IGNORE INTO team_players (team_id, player_id)
               SELECT ?, ? WHERE EXISTS (SELECT 1 FROM teams WHERE id = ?)"#,
        )
        .bind(team_id)
        .bind(player_id)
        .bind(team_id)
        .execute(self.records.pool())
        .await?;

        self.get_roster(team_id).await
    }

    async fn remove_player(
        &self,
        player_id: i64,
        team_id: i64,
    ) -> Result<Vec<Representation>, ModelError> {
        sqlx::query(r#"DELETE FROM team_players WHERE team_id = ? AND player_id = ?"#)
            .bind(team_id)
            .bind(player_id)
            .execute(self.records.pool())
            .await?;

        self.get_roster(team_id).await
    }
}

pub struct LeagueStore {
    records: Collection,
    seasons: Collection,
}

impl LeagueStore {
    pub fn new(records: Collection, seasons: Collection) -> Self {
        Self { records, seasons }
    }
}

impl_resource_model!(LeagueStore);

#[async_trait]
impl LeagueModel for LeagueStore {
    async fn get_seasons(&self, league_id: i64) -> Result<Vec<Representation>, ModelError> {
        self.seasons.find_by_field("league_id", league_id).await
    }
}

pub struct SeasonStore {
    records: Collection,
}

impl SeasonStore {
    pub fn new(records: Collection) -> Self {
        Self { records }
    }
}

impl_resource_model!(SeasonStore);

#[async_trait]
impl SeasonModel for SeasonStore {
    async fn get_teams(&self, season_id: i64) -> Result<Vec<Representation>, ModelError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"SELECT t.id, t.body FROM teams t
               JOIN season_teams m ON m.team_id = t.id
               WHERE m.season_id = ?
               ORDER BY t.id"#,
        )
        .bind(season_id)
        .fetch_all(self.records.pool())
        .await?;

        into_representations(rows)
    }

    async fn add_team(&self, team_id: i64, season_id: i64) -> Result<Representation, ModelError> {
        let inserted = sqlx::query(
            r#"INSERT OR IGNORE INTO season_teams (season_id, team_id)
               SELECT ?, ? WHERE EXISTS (SELECT 1 FROM seasons WHERE id = ?)"#,
        )
        .bind(season_id)
        .bind(team_id)
        .bind(season_id)
        .execute(self.records.pool())
        .await?;
        if inserted.rows_affected() == 0 {
            tracing::debug!(season_id, team_id, "season missing or team already entered");
        }

        Ok(self.records.find(season_id).await?.unwrap_or(Value::Null))
    }

    async fn remove_team(
        &self,
        team_id: i64,
        season_id: i64,
    ) -> Result<Representation, ModelError> {
        sqlx::query(r#"DELETE FROM season_teams WHERE season_id = ? AND team_id = ?"#)
            .bind(season_id)
            .bind(team_id)
            .execute(self.records.pool())
            .await?;

        Ok(self.records.find(season_id).await?.unwrap_or(Value::Null))
    }
}

pub struct GameStore {
    records: Collection,
}

impl GameStore {
    pub fn new(records: Collection) -> Self {
        Self { records }
    }
}

impl_resource_model!(GameStore);

#[async_trait]
impl GameModel for GameStore {
    async fn get_by_formatter_id(
        &self,
        formatter_id: &str,
    ) -> Result<Vec<Representation>, ModelError> {
        self.records
            .find_by_text_field("formatter_id", formatter_id)
            .await
    }
}

pub struct RulesetStore {
    records: Collection,
}

impl RulesetStore {
    pub fn new(records: Collection) -> Self {
        Self { records }
    }
}

impl_resource_model!(RulesetStore);

#[async_trait]
impl RulesetModel for RulesetStore {
    async fn get_by_game_id(&self, game_id: i64) -> Result<Vec<Representation>, ModelError> {
        self.records.find_by_field("game_id", game_id).await
    }
}

pub struct PlayStore {
    records: Collection,
}

impl PlayStore {
    pub fn new(records: Collection) -> Self {
        Self { records }
    }
}

impl_resource_model!(PlayStore);

#[async_trait]
impl DeletableModel for PlayStore {
    async fn delete_by_id(&self, id: i64) -> Result<Representation, ModelError> {
        self.records.remove(id).await
    }
}

impl PlayModel for PlayStore {}

pub struct MatchStore {
    records: Collection,
    plays: Collection,
}

impl MatchStore {
    pub fn new(records: Collection, plays: Collection) -> Self {
        Self { records, plays }
    }
}

impl_resource_model!(MatchStore);

#[async_trait]
impl MatchModel for MatchStore {
    async fn get_plays(&self, match_id: i64) -> Result<Vec<Representation>, ModelError> {
        self.plays.find_by_field("match_id", match_id).await
    }
}
