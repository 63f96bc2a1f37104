use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ModelError;

/// JSON value describing one entity, as produced by a model.
pub type Representation = serde_json::Value;

/// Capability set every entity model provides.
#[async_trait]
pub trait ResourceModel: Send + Sync {
    async fn get(&self) -> Result<Vec<Representation>, ModelError>;

    /// `Ok(None)` means the id is unknown; it is not an error.
    async fn get_by_id(&self, id: i64) -> Result<Option<Representation>, ModelError>;

    async fn create(&self, payload: Representation) -> Result<Representation, ModelError>;

    async fn update_by_id(
        &self,
        id: i64,
        payload: Representation,
    ) -> Result<Representation, ModelError>;
}

/// Models whose entities can be removed.
#[async_trait]
pub trait DeletableModel: ResourceModel {
    /// Returns the deleted representation, or whatever the model uses to
    /// signal that nothing was deleted (the SQLite store returns `{}`).
    async fn delete_by_id(&self, id: i64) -> Result<Representation, ModelError>;
}

pub trait PlayerModel: ResourceModel {}

pub trait LocationModel: ResourceModel {}

#[async_trait]
pub trait TeamModel: ResourceModel {
    async fn get_roster(&self, team_id: i64) -> Result<Vec<Representation>, ModelError>;

    /// Returns the roster after the player joined.
    async fn add_player(
        &self,
        player_id: i64,
        team_id: i64,
    ) -> Result<Vec<Representation>, ModelError>;

    /// Returns the roster after the player left.
    async fn remove_player(
        &self,
        player_id: i64,
        team_id: i64,
    ) -> Result<Vec<Representation>, ModelError>;
}

#[async_trait]
pub trait LeagueModel: ResourceModel {
    async fn get_seasons(&self, league_id: i64) -> Result<Vec<Representation>, ModelError>;
}

#[async_trait]
pub trait SeasonModel: ResourceModel {
    async fn get_teams(&self, season_id: i64) -> Result<Vec<Representation>, ModelError>;

    /// Returns the season, or `null` if it does not exist.
    async fn add_team(&self, team_id: i64, season_id: i64) -> Result<Representation, ModelError>;

    async fn remove_team(&self, team_id: i64, season_id: i64)
    -> Result<Representation, ModelError>;
}

#[async_trait]
pub trait GameModel: ResourceModel {
    /// Formatter ids are opaque strings, not integers.
    async fn get_by_formatter_id(
        &self,
        formatter_id: &str,
    ) -> Result<Vec<Representation>, ModelError>;
}

#[async_trait]
pub trait RulesetModel: ResourceModel {
    async fn get_by_game_id(&self, game_id: i64) -> Result<Vec<Representation>, ModelError>;
}

pub trait PlayModel: DeletableModel {}

#[async_trait]
pub trait MatchModel: ResourceModel {
    /// Plays of the match in the order they were recorded.
    async fn get_plays(&self, match_id: i64) -> Result<Vec<Representation>, ModelError>;
}

/// One model per entity kind, handed to the route registrar at startup.
#[derive(Clone)]
pub struct Models {
    pub players: Arc<dyn PlayerModel>,
    pub teams: Arc<dyn TeamModel>,
    pub leagues: Arc<dyn LeagueModel>,
    pub seasons: Arc<dyn SeasonModel>,
    pub locations: Arc<dyn LocationModel>,
    pub games: Arc<dyn GameModel>,
    pub rulesets: Arc<dyn RulesetModel>,
    pub plays: Arc<dyn PlayModel>,
    pub matches: Arc<dyn MatchModel>,
}
