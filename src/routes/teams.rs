use std::sync::Arc;

use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::{get, put},
    Router,
};

use crate::adapter::{self, parse_id, ResourceAdapter};
use crate::error::ApiError;
use crate::models::{Representation, TeamModel};

pub fn router<M>(model: Arc<M>) -> Router
where
    M: TeamModel + ?Sized + 'static,
{
    Router::new()
        .route("/teams", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route("/teams/", get(adapter::get_all::<M>).post(adapter::create_new::<M>))
        .route(
            "/teams/{id}",
            get(adapter::get_by_id::<M>).put(adapter::update_by_id::<M>),
        )
        .route("/teams/{id}/roster", get(get_roster::<M>))
        .route(
            "/teams/{id}/player/{player_id}",
            put(add_player::<M>).delete(remove_player::<M>),
        )
        .layer(middleware::map_response(adapter::set_json_type))
        .with_state(ResourceAdapter::new("team", model))
}

// GET /teams/{id}/roster - Players currently on the team
async fn get_roster<M>(
    State(teams): State<ResourceAdapter<M>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Representation>>, ApiError>
where
    M: TeamModel + ?Sized + 'static,
{
    let team_id = parse_id(&raw_id)?;
    tracing::debug!(team_id, "fetching roster");
    let roster = teams.model().get_roster(team_id).await?;

    Ok(Json(roster))
}

// PUT /teams/{id}/player/{player_id} - Add a player, returns the new roster
async fn add_player<M>(
    State(teams): State<ResourceAdapter<M>>,
    Path((raw_team_id, raw_player_id)): Path<(String, String)>,
) -> Result<Json<Vec<Representation>>, ApiError>
where
    M: TeamModel + ?Sized + 'static,
{
    let team_id = parse_id(&raw_team_id)?;
    let player_id = parse_id(&raw_player_id)?;
    tracing::debug!(team_id, player_id, "adding player to team");

    let roster = teams.model().add_player(player_id, team_id).await?;

    Ok(Json(roster))
}

// DELETE /teams/{id}/player/{player_id} - Remove a player, returns the new roster
async fn remove_player<M>(
    State(teams): State<ResourceAdapter<M>>,
    Path((raw_team_id, raw_player_id)): Path<(String, String)>,
) -> Result<Json<Vec<Representation>>, ApiError>
where
    M: TeamModel + ?Sized + 'static,
{
    let team_id = parse_id(&raw_team_id)?;
    let player_id = parse_id(&raw_player_id)?;
    tracing::debug!(team_id, player_id, "removing player from team");

    let roster = teams.model().remove_player(player_id, team_id).await?;

    Ok(Json(roster))
}
